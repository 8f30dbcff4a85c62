//! Client for the Plant.id identification API.
//!
//! [`PlantIdClient`] implements
//! [`IdentificationProvider`](zfarming_core::identification::IdentificationProvider),
//! so the reconciler and its mock fallback never see HTTP details.

pub mod client;
pub mod config;
pub mod response;

pub use client::{PlantIdClient, PlantIdError};
pub use config::PlantIdConfig;
