//! MySQL connection pool construction and acquisition.

use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, SslOpts};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::{LoadError, Result};

/// Shared MySQL pool.
///
/// Cloning is cheap; all clones share one underlying connection set, and
/// connections return to the pool when dropped, including on error paths.
#[derive(Clone)]
pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    /// Build a pool from configuration without touching the network.
    ///
    /// Connections are established lazily on first acquisition.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let ssl_opts = match config.ssl_mode.to_lowercase().as_str() {
            "disable" => {
                warn!("MySQL TLS is disabled. Credentials will be transmitted in plaintext.");
                None
            }
            "prefer" => Some(SslOpts::default().with_danger_accept_invalid_certs(true)),
            "require" => Some(SslOpts::default().with_danger_accept_invalid_certs(true)),
            "verify-ca" | "verify_ca" => Some(SslOpts::default()),
            "verify-full" | "verify_identity" => Some(SslOpts::default()),
            _ => {
                warn!(
                    "Unknown ssl_mode '{}', defaulting to Preferred",
                    config.ssl_mode
                );
                Some(SslOpts::default().with_danger_accept_invalid_certs(true))
            }
        };

        let mut builder = OptsBuilder::default()
            .ip_or_hostname(&config.host)
            .tcp_port(config.port)
            .db_name(Some(&config.database))
            .user(Some(&config.user))
            .pass(Some(&config.password))
            // Use utf8mb4 for full Unicode support
            .init(vec!["SET NAMES utf8mb4"]);

        if let Some(ssl) = ssl_opts {
            builder = builder.ssl_opts(ssl);
        }

        let constraints = PoolConstraints::new(1, config.max_connections).ok_or_else(|| {
            LoadError::Config("database.max_connections must be at least 1".into())
        })?;
        let pool_opts = PoolOpts::new().with_constraints(constraints);

        let opts: Opts = builder.pool_opts(pool_opts).into();
        Ok(Self {
            pool: Pool::new(opts),
        })
    }

    /// Build a pool and verify it with a test query.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db = Self::from_config(config)?;

        let mut conn = db
            .pool
            .get_conn()
            .await
            .map_err(|e| LoadError::pool(e, "creating MySQL pool"))?;
        conn.query_drop("SELECT 1")
            .await
            .map_err(|e| LoadError::pool(e, "testing MySQL connection"))?;
        drop(conn);

        info!(
            "Connected to MySQL: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(db)
    }

    /// Acquire a connection for the duration of one request.
    ///
    /// `context` names the operation for pool error reporting.
    pub async fn get_conn(&self, context: &str) -> Result<Conn> {
        self.pool
            .get_conn()
            .await
            .map_err(|e| LoadError::pool(e, context))
    }

    /// Close all pooled connections.
    pub async fn disconnect(self) {
        self.pool.disconnect().await.ok();
    }
}
