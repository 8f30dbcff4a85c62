use zfarming_plantid::PlantIdConfig;

/// Seconds of each request reserved for work around the Plant.id call
/// (reading the upload, loading the catalog, writing history).
pub const UPSTREAM_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum request body size in bytes, bounding image uploads (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Plant.id identification client settings.
    pub plant_id: PlantIdConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    ///
    /// Plant.id settings are read by [`PlantIdConfig::from_env`]; their
    /// timeout is then bounded by [`ServerConfig::bound_upstream_timeout`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values, or if `REQUEST_TIMEOUT_SECS` does not
    /// exceed [`UPSTREAM_TIMEOUT_MARGIN_SECS`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");
        assert!(
            request_timeout_secs > UPSTREAM_TIMEOUT_MARGIN_SECS,
            "REQUEST_TIMEOUT_SECS must be greater than {UPSTREAM_TIMEOUT_MARGIN_SECS}"
        );

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "10485760".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let plant_id = PlantIdConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            plant_id,
        }
        .bound_upstream_timeout()
    }

    /// Clamp the Plant.id timeout to `request_timeout_secs` minus
    /// [`UPSTREAM_TIMEOUT_MARGIN_SECS`] (at least one second), so a hung
    /// upstream resolves to mock results before the request timeout fires.
    pub fn bound_upstream_timeout(mut self) -> Self {
        let ceiling = self
            .request_timeout_secs
            .saturating_sub(UPSTREAM_TIMEOUT_MARGIN_SECS)
            .max(1);
        if self.plant_id.timeout_secs > ceiling {
            tracing::warn!(
                configured = self.plant_id.timeout_secs,
                ceiling,
                "PLANT_ID_TIMEOUT_SECS exceeds the request budget, clamping"
            );
            self.plant_id.timeout_secs = ceiling;
        }
        self
    }
}
