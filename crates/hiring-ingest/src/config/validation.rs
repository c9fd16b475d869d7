//! Configuration validation.

use super::Config;
use crate::error::{LoadError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.database.host.is_empty() {
        return Err(LoadError::Config("database.host is required".into()));
    }
    if config.database.database.is_empty() {
        return Err(LoadError::Config("database.database is required".into()));
    }
    if config.database.user.is_empty() {
        return Err(LoadError::Config("database.user is required".into()));
    }
    if config.database.max_connections == 0 {
        return Err(LoadError::Config(
            "database.max_connections must be at least 1".into(),
        ));
    }

    if config.server.bind.is_empty() {
        return Err(LoadError::Config("server.bind is required".into()));
    }

    if config.ingest.batch_size == 0 {
        return Err(LoadError::Config(
            "ingest.batch_size must be at least 1".into(),
        ));
    }
    if config.ingest.max_upload_bytes == 0 {
        return Err(LoadError::Config(
            "ingest.max_upload_bytes must be at least 1".into(),
        ));
    }

    Ok(())
}
