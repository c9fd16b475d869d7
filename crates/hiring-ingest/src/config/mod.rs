//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
database:
  host: db.internal
  port: 3307
  database: hiring
  user: loader
  password: secret
server:
  port: 9000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.server.port, 9000);
        // Sections absent from the file keep their defaults.
        assert_eq!(config.ingest.batch_size, 1000);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Config::load("/nonexistent/config.yaml");
        assert!(matches!(result, Err(crate::error::LoadError::Io(_))));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let result = Config::from_yaml("database: [not, a, mapping");
        assert!(matches!(result, Err(crate::error::LoadError::Yaml(_))));
    }
}
