//! Migrate command implementation

use anyhow::Result;
use hoist_core::SystemClock;
use hoist_db::MySqlConnector;
use hoist_migrate::{MigrationRequest, Orchestrator};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_config, ExitCode};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let config = match load_config(global) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Cannot load configuration: {:#}", e);
            eprintln!("Error: {:#}", e);
            return Err(ExitCode(1).into());
        }
    };

    let mode = global.run_mode();
    if mode.is_dry_run() {
        println!("Dry run: statements are logged, nothing is applied");
    }

    let request = MigrationRequest {
        kind: args.kind,
        status: args.status,
        destination: args.env,
    };
    let orchestrator = Orchestrator::new(&config, &MySqlConnector, &SystemClock, mode);

    match orchestrator.run(request).await {
        Ok(report) => {
            println!("{}", report);
            if report.total() == 0 && !mode.is_dry_run() {
                println!("Nothing was migrated; see the log for details");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Migration of {} into {} did not start: {}", args.kind, args.env, e);
            Err(ExitCode(1).into())
        }
    }
}
