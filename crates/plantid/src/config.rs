/// Default Plant.id identification endpoint.
pub const DEFAULT_API_URL: &str = "https://api.plant.id/v2/identify";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Plant.id client configuration.
#[derive(Debug, Clone)]
pub struct PlantIdConfig {
    /// API key sent in the `Api-Key` header. `None` disables live calls.
    pub api_key: Option<String>,
    /// Identification endpoint URL.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PlantIdConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PlantIdConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default                            |
    /// |-------------------------|----------|------------------------------------|
    /// | `PLANT_ID_API_KEY`      | no       | --                                 |
    /// | `PLANT_ID_API_URL`      | no       | `https://api.plant.id/v2/identify` |
    /// | `PLANT_ID_TIMEOUT_SECS` | no       | `20`                               |
    ///
    /// # Panics
    ///
    /// Panics if `PLANT_ID_TIMEOUT_SECS` is not a valid u64.
    pub fn from_env() -> Self {
        let api_key = std::env::var("PLANT_ID_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let api_url =
            std::env::var("PLANT_ID_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = std::env::var("PLANT_ID_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("PLANT_ID_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            api_url,
            timeout_secs,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
