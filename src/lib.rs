pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

// Convenient re-exports (so call sites can do `nameclaim::UsernameRegistry`, etc.)
pub use config::Config;
pub use error::{AppResult, DomainError};
pub use models::types::OwnerId;
pub use models::username::Username;
pub use services::signup::SignupService;
pub use state::registry::UsernameRegistry;
