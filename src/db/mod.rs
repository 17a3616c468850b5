//! Database module providing connection management, migrations, and queries.

pub mod accounts;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::{Migrator, MigratorTrait};

/// Database connection pool wrapper around a SeaORM connection.
///
/// The pool is shared process-wide via `web::Data`; handlers borrow the
/// underlying connection through [`DbPool::connection`].
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database described by the configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.db_max_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options).await?;
        Ok(DbPool { conn })
    }

    /// Wrap an existing connection (used by tests with a mock backend).
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Verify database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn.ping().await?;
        Ok(())
    }

    /// Apply all pending migrations in order.
    ///
    /// Each applied migration is recorded in `seaql_migrations` before the
    /// next one runs; a failure stops the run with earlier successes intact.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    /// Check that no migrations remain pending, i.e. the schema matches the
    /// entities this binary was built against.
    pub async fn assert_schema_synced(&self) -> AppResult<()> {
        let pending = Migrator::get_pending_migrations(&self.conn).await?;
        if pending.is_empty() {
            return Ok(());
        }

        Err(AppError::Database(format!(
            "{} migration(s) still pending after migrate",
            pending.len()
        )))
    }
}
