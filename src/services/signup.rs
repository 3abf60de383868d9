use crate::error::{AppResult, DomainError};
use crate::models::types::OwnerId;
use crate::models::username::Username;
use crate::state::registry::UsernameRegistry;
use std::sync::Arc;

/// Request-facing facade over the registry.
///
/// Fields of an incoming signup request may be absent, which the core
/// registry cannot express; absence is rejected here as
/// [`DomainError::MissingArgument`]. Present-but-empty strings pass
/// through untouched.
pub struct SignupService {
    registry: Arc<UsernameRegistry>,
}

impl SignupService {
    pub fn new(registry: Arc<UsernameRegistry>) -> Self {
        Self { registry }
    }

    pub fn check_availability(&self, username: Option<&str>) -> AppResult<bool> {
        let raw = username.ok_or(DomainError::MissingArgument("username"))?;
        let available = self.registry.check_availability(raw);
        tracing::debug!(username = raw, available, "availability check");
        Ok(available)
    }

    pub fn register_username(&self, username: Option<&str>, owner_id: Option<&str>) -> AppResult<bool> {
        let raw = username.ok_or(DomainError::MissingArgument("username"))?;
        let owner = owner_id.ok_or(DomainError::MissingArgument("owner_id"))?;

        let claimed = self.registry.register_username(raw, OwnerId::from(owner));
        if claimed {
            tracing::info!(username = raw, owner_id = owner, "username claimed");
        } else {
            tracing::debug!(username = raw, "claim rejected, name taken");
        }
        Ok(claimed)
    }

    pub fn suggest_alternatives(&self, username: Option<&str>) -> AppResult<Vec<String>> {
        let raw = username.ok_or(DomainError::MissingArgument("username"))?;
        self.registry.suggest_alternatives(raw)
    }

    pub fn most_attempted(&self) -> Option<Username> {
        self.registry.most_attempted()
    }
}
