//! Pending command implementation

use anyhow::{Context, Result};
use hoist_core::worklist::{pending_for, PendingList};
use hoist_core::{Config, Environment, FileStore, Layout};

use crate::cli::{GlobalArgs, PendingArgs};
use crate::commands::common::{load_config, print_table};

/// Execute the pending command
pub async fn execute(args: &PendingArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let destinations = match args.env {
        Some(env) => vec![env],
        None => configured_targets(&config),
    };

    if destinations.is_empty() {
        println!("No promotion destinations are configured");
        return Ok(());
    }

    for destination in destinations {
        let pending = collect(&config, destination)?;
        if pending.is_empty() {
            println!("Nothing pending for {}", destination);
            continue;
        }

        println!("Pending for {}:\n", destination);
        print_table(&["LIST", "COUNT", "NAMES"], &rows(&pending));
        println!();
    }
    Ok(())
}

/// Destinations whose own profile and upstream profile are both configured
fn configured_targets(config: &Config) -> Vec<Environment> {
    Environment::promotion_targets()
        .filter(|env| {
            let upstream_known = config
                .upstream_of(*env)
                .is_ok_and(|up| config.environment(up).is_ok());
            upstream_known && config.environment(*env).is_ok()
        })
        .collect()
}

fn collect(config: &Config, destination: Environment) -> Result<Vec<PendingList>> {
    let source = config.upstream_of(destination)?;
    let source_db = config.database_name(source)?;
    let layout = Layout::new(config.data_root_absolute());

    pending_for(&layout, &FileStore, source, destination, source_db)
        .with_context(|| format!("Failed to read work lists for {}", destination))
}

fn rows(pending: &[PendingList]) -> Vec<Vec<String>> {
    pending
        .iter()
        .map(|p| {
            let names: Vec<&str> = p.names.iter().map(|n| n.as_str()).collect();
            vec![
                p.list.to_string(),
                p.names.len().to_string(),
                names.join(", "),
            ]
        })
        .collect()
}

#[cfg(test)]
#[path = "pending_test.rs"]
mod tests;
