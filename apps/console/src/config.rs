//! Console configuration.
//!
//! The three positional arguments name the database; everything else is
//! loaded from environment variables with fallback to defaults.

use std::path::PathBuf;

use rental_db::DbConfig;

use crate::cli::Args;

/// Runtime configuration assembled from arguments and environment.
#[derive(Debug, Clone)]
pub struct RentalConfig {
    /// Database name (first argument)
    pub database: String,

    /// Server port (second argument)
    pub port: u16,

    /// Database role used to connect (third argument)
    pub user: String,

    /// `RENTAL_DB_HOST`, default `localhost`
    pub host: String,

    /// `RENTAL_DB_PASSWORD`, default empty
    pub password: String,

    /// `RENTAL_DATA_DIR`, directory for SQLite files, default `.`
    pub data_dir: PathBuf,

    /// `RENTAL_DB_MAX_CONNECTIONS`, default 1
    pub max_connections: u32,
}

impl RentalConfig {
    /// Load configuration from the process environment.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    /// Load configuration with a custom variable lookup.
    pub fn from_lookup<F>(args: &Args, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = RentalConfig {
            database: args.dbname.clone(),
            port: args.port,
            user: args.user.clone(),

            host: lookup("RENTAL_DB_HOST").unwrap_or_else(|| "localhost".to_string()),

            password: lookup("RENTAL_DB_PASSWORD").unwrap_or_default(),

            data_dir: lookup("RENTAL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),

            max_connections: lookup("RENTAL_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "1".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RENTAL_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.database.trim().is_empty() {
            return Err(ConfigError::MissingRequired("dbname".to_string()));
        }

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "RENTAL_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Database settings for [`rental_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database, self.port, &self.user)
            .host(&self.host)
            .password(&self.password)
            .data_dir(&self.data_dir)
            .max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args() -> Args {
        Args {
            dbname: "rentals".to_string(),
            port: 5432,
            user: "store".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = RentalConfig::from_lookup(&args(), |_| None).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.password, "");
        assert_eq!(config.max_connections, 1);
        assert_eq!(
            config.db_config().sqlite_path(),
            PathBuf::from("./rentals.db")
        );
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("RENTAL_DB_HOST", "db.internal"),
            ("RENTAL_DB_PASSWORD", "secret"),
            ("RENTAL_DATA_DIR", "/var/lib/rental"),
            ("RENTAL_DB_MAX_CONNECTIONS", "4"),
        ]
        .into_iter()
        .collect();

        let config =
            RentalConfig::from_lookup(&args(), |key| env.get(key).map(|v| v.to_string())).unwrap();

        let db = config.db_config();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.password, "secret");
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.username, "store");
        assert!(!db.describe().contains("secret"));
    }

    #[test]
    fn test_bad_connection_count() {
        for bad in ["many", "0", "-1"] {
            let result = RentalConfig::from_lookup(&args(), |key| {
                (key == "RENTAL_DB_MAX_CONNECTIONS").then(|| bad.to_string())
            });
            assert!(matches!(result, Err(ConfigError::InvalidValue(_))), "{bad}");
        }
    }
}
