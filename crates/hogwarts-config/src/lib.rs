//! # Hogwarts Config
//!
//! Configuration types for the Hogwarts API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`avatars`]: Avatar upload directory, size cap, and preview width
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Listener host and port
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_config::{AvatarConfig, CorsConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let server_config = ServerConfig::from_env();
//! let avatar_config = AvatarConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod avatars;
pub mod cors;
pub mod database;
pub mod server;

// Re-export commonly used types at crate root
pub use avatars::AvatarConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Reads an environment variable and parses it, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(variable = name, value = %raw, "Ignoring unparsable configuration value");
                default
            }
        },
        Err(_) => default,
    }
}
