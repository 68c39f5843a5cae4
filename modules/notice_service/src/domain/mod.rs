//! Domain layer - business logic and services

pub mod activation;
pub mod auth;
pub mod nonce;
pub mod render;
pub mod repository;
pub mod service;
pub mod status;
pub mod store;
pub mod validation;

pub use activation::{is_active, Clock, FixedClock, SystemClock};
pub use auth::{Authorizer, CapabilityAuthorizer};
pub use nonce::{NonceIssuer, SAVE_SETTINGS_ACTION};
pub use repository::OptionStore;
pub use service::Service;
pub use store::SettingsStore;
