//! One orchestrated MigrationRun: connect, dispatch by kind, close

use crate::alter::AlterationApplier;
use crate::error::{MigrateError, MigrateResult};
use crate::report::MigrationReport;
use crate::routine::RoutineMigrator;
use crate::run::MigrationRun;
use crate::table::TableMigrator;
use hoist_core::{AlterKind, Clock, Config, Environment, ListStatus, ObjectKind, RunMode};
use hoist_db::{Connector, Database};
use std::time::Instant;

/// What to migrate and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationRequest {
    pub kind: ObjectKind,
    pub status: ListStatus,
    pub destination: Environment,
}

/// Runs migrations against destinations opened through a [`Connector`]
pub struct Orchestrator<'a> {
    config: &'a Config,
    connector: &'a dyn Connector,
    clock: &'a dyn Clock,
    mode: RunMode,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a Config,
        connector: &'a dyn Connector,
        clock: &'a dyn Clock,
        mode: RunMode,
    ) -> Self {
        Self {
            config,
            connector,
            clock,
            mode,
        }
    }

    /// Execute one request. Configuration and connection failures are
    /// returned; everything after the connection opens is reported through
    /// the counts.
    pub async fn run(&self, request: MigrationRequest) -> MigrateResult<MigrationReport> {
        let start = Instant::now();

        let run = MigrationRun::resolve(self.config, request.destination, self.clock, self.mode)
            .inspect_err(|e| log::error!("Cannot prepare migration: {}", e))?;
        let profile = self
            .config
            .destination_profile(request.destination)
            .inspect_err(|e| log::error!("Cannot prepare migration: {}", e))?;

        log::debug!("Connecting to {:?}", profile);
        let db = match self.connector.connect(&profile).await {
            Ok(db) => db,
            Err(source) => {
                log::error!("Cannot connect to {}: {}", request.destination, source);
                return Err(MigrateError::Connect {
                    env: request.destination,
                    source,
                });
            }
        };
        log::info!(
            "Migrating {} {} from {} to {} over {}{}",
            request.status,
            request.kind,
            run.source,
            run.destination,
            db.db_type(),
            if self.mode.is_dry_run() { " (dry run)" } else { "" }
        );

        let (migrated, altered) = dispatch(db.as_ref(), &run, request).await;

        if let Err(e) = db.close().await {
            log::warn!("Error closing connection to {}: {}", request.destination, e);
        }

        let report = MigrationReport {
            destination: request.destination,
            database: run.destination_db.clone(),
            kind: request.kind,
            status: request.status,
            migrated,
            altered,
            elapsed: start.elapsed(),
        };
        log::info!("{}", report);
        Ok(report)
    }
}

/// Route a request to its migrator; returns (migrated, altered)
async fn dispatch(db: &dyn Database, run: &MigrationRun, request: MigrationRequest) -> (usize, usize) {
    match request.kind {
        ObjectKind::Functions => {
            let migrated = RoutineMigrator::functions(db, run)
                .migrate(request.status)
                .await;
            (migrated, 0)
        }
        ObjectKind::Procedures => {
            let migrated = RoutineMigrator::procedures(db, run)
                .migrate(request.status)
                .await;
            (migrated, 0)
        }
        ObjectKind::Tables => {
            let migrated = TableMigrator::new(db, run).migrate().await;
            let mut altered = 0;
            if request.status == ListStatus::Updated {
                let applier = AlterationApplier::new(db, run);
                for alter in AlterKind::ALL {
                    altered += applier.apply(alter).await;
                }
            }
            (migrated, altered)
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
