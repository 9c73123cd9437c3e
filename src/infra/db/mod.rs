//! Store connection and schema management.

use std::collections::HashSet;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use crate::config::{Config, DB_CONNECT_TIMEOUT_SECONDS, DB_MAX_CONNECTIONS};

pub mod migrations;

pub use migrations::Migrator;

/// Applied state of one schema migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled handle on the document store
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::connect_without_migrations(config).await?;
        database.run_migrations().await?;
        Ok(database)
    }

    /// Connect without touching the schema (used by `migrate`).
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(DB_MAX_CONNECTIONS)
            .connect_timeout(Duration::from_secs(DB_CONNECT_TIMEOUT_SECONDS))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(max_connections = DB_MAX_CONNECTIONS, "Store connected");
        Ok(Self::from_connection(connection))
    }

    /// Wrap an already established connection.
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Clone of the pooled connection for repositories.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Revert the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration in order, flagged with whether it ran.
    pub async fn migration_status(&self) -> Result<Vec<MigrationState>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }

    /// Drop every table and re-apply all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection.ping().await
    }
}
