pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, ProviderCredentials};
pub use error::{AppError, ErrorKind};
pub type Result<T> = std::result::Result<T, AppError>;
