//! In-memory destination for tests
//!
//! Records every statement, buffers work inside transactions so rollback
//! restores the table set, and fails on demand. Clones share state, so a
//! test can hand one clone to the code under test and inspect another.

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, Database};
use async_trait::async_trait;
use hoist_core::ConnectionProfile;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    tables: BTreeSet<String>,
    txn_snapshot: Option<BTreeSet<String>>,
    txn_statements: Vec<String>,
    executed: Vec<String>,
    committed: Vec<String>,
    events: Vec<String>,
    fail_on: Vec<String>,
    fail_exists: bool,
    closed: bool,
}

/// Shared-state fake destination database
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<State>>,
}

/// Table name created or dropped by a `CREATE TABLE` / `DROP TABLE` statement
fn table_target(sql: &str, verb: &str) -> Option<String> {
    let upper = sql.to_ascii_uppercase();
    let start = upper.find(verb)? + verb.len();
    let mut rest = sql[start..].trim_start();
    for guard in ["IF NOT EXISTS", "IF EXISTS"] {
        if rest.to_ascii_uppercase().starts_with(guard) {
            rest = rest[guard.len()..].trim_start();
        }
    }
    let name: String = rest
        .trim_start_matches('`')
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Pre-existing destination tables
    pub fn with_tables<I, S>(self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state()
            .tables
            .extend(tables.into_iter().map(Into::into));
        self
    }

    /// Fail any statement containing `fragment`
    pub fn fail_on(self, fragment: impl Into<String>) -> Self {
        self.state().fail_on.push(fragment.into());
        self
    }

    /// Make every presence query fail
    pub fn fail_existence_checks(self) -> Self {
        self.state().fail_exists = true;
        self
    }

    /// Statements that executed successfully, including rolled-back ones
    pub fn executed(&self) -> Vec<String> {
        self.state().executed.clone()
    }

    /// Statements that are durable: committed, or run outside a transaction
    pub fn committed(&self) -> Vec<String> {
        self.state().committed.clone()
    }

    /// Transaction and connection lifecycle calls, in order
    pub fn events(&self) -> Vec<String> {
        self.state().events.clone()
    }

    pub fn tables(&self) -> BTreeSet<String> {
        self.state().tables.clone()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.state().tables.contains(name)
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn check_open(state: &State) -> DbResult<()> {
        if state.closed {
            Err(DbError::Closed("memory".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        let mut state = self.state();
        Self::check_open(&state)?;

        if let Some(fragment) = state.fail_on.iter().find(|f| sql.contains(f.as_str())) {
            return Err(DbError::ExecutionError(format!(
                "injected failure on '{}': {}",
                fragment, sql
            )));
        }

        if let Some(table) = table_target(sql, "CREATE TABLE") {
            state.tables.insert(table);
        } else if let Some(table) = table_target(sql, "DROP TABLE") {
            state.tables.remove(&table);
        }

        state.executed.push(sql.to_string());
        if state.txn_snapshot.is_some() {
            state.txn_statements.push(sql.to_string());
        } else {
            state.committed.push(sql.to_string());
        }
        Ok(0)
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        let state = self.state();
        Self::check_open(&state)?;
        if state.fail_exists {
            return Err(DbError::ExecutionError(format!(
                "injected failure checking table {}",
                name
            )));
        }
        Ok(state.tables.contains(name))
    }

    async fn begin(&self) -> DbResult<()> {
        let mut state = self.state();
        Self::check_open(&state)?;
        if state.txn_snapshot.is_some() {
            return Err(DbError::TransactionError {
                action: "begin",
                message: "transaction already open".to_string(),
            });
        }
        state.txn_snapshot = Some(state.tables.clone());
        state.events.push("BEGIN".to_string());
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        let mut state = self.state();
        Self::check_open(&state)?;
        if state.txn_snapshot.take().is_none() {
            return Err(DbError::TransactionError {
                action: "commit",
                message: "no open transaction".to_string(),
            });
        }
        let statements = std::mem::take(&mut state.txn_statements);
        state.committed.extend(statements);
        state.events.push("COMMIT".to_string());
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        let mut state = self.state();
        Self::check_open(&state)?;
        match state.txn_snapshot.take() {
            Some(snapshot) => state.tables = snapshot,
            None => {
                return Err(DbError::TransactionError {
                    action: "rollback",
                    message: "no open transaction".to_string(),
                })
            }
        }
        state.txn_statements.clear();
        state.events.push("ROLLBACK".to_string());
        Ok(())
    }

    async fn close(&self) -> DbResult<()> {
        let mut state = self.state();
        state.closed = true;
        state.events.push("CLOSE".to_string());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "memory"
    }
}

/// Connector handing out clones of one [`MemoryDatabase`], or refusing
/// every connection when built with [`MemoryConnector::refusing`]
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    db: Option<MemoryDatabase>,
}

impl MemoryConnector {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db: Some(db) }
    }

    pub fn refusing() -> Self {
        Self { db: None }
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, profile: &ConnectionProfile) -> DbResult<Box<dyn Database>> {
        match &self.db {
            Some(db) => Ok(Box::new(db.clone())),
            None => Err(DbError::ConnectionError(format!(
                "connection to {}:{} refused",
                profile.host, profile.port
            ))),
        }
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
