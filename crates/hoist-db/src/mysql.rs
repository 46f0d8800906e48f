//! MySQL database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, Database};
use async_trait::async_trait;
use hoist_core::ConnectionProfile;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Executor, Row};
use tokio::sync::Mutex;

/// MySQL database backend over one dedicated connection
pub struct MySqlBackend {
    conn: Mutex<Option<MySqlConnection>>,
    label: String,
}

/// Build sqlx connect options from a resolved profile
pub fn connect_options(profile: &ConnectionProfile) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new()
        .host(&profile.host)
        .port(profile.port)
        .username(&profile.user)
        .database(&profile.database);
    if !profile.password.is_empty() {
        options = options.password(&profile.password);
    }
    options
}

impl MySqlBackend {
    /// Open a connection to the profile's database
    pub async fn connect(profile: &ConnectionProfile) -> DbResult<Self> {
        let conn = connect_options(profile)
            .connect()
            .await
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", profile.host, e)))?;
        log::debug!(
            "Connected to {}@{}:{}/{}",
            profile.user,
            profile.host,
            profile.port,
            profile.database
        );
        Ok(Self {
            conn: Mutex::new(Some(conn)),
            label: format!("{}/{}", profile.host, profile.database),
        })
    }

    /// Run a statement over the text protocol so routine bodies pass through
    /// without prepared-statement restrictions
    async fn run_raw(&self, sql: &str) -> DbResult<u64> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::Closed(self.label.clone()))?;
        let result = conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        Ok(result.rows_affected())
    }

    async fn transaction_control(&self, action: &'static str, sql: &str) -> DbResult<()> {
        self.run_raw(sql)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                DbError::Closed(label) => DbError::Closed(label),
                other => DbError::TransactionError {
                    action,
                    message: other.to_string(),
                },
            })
    }
}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        self.run_raw(sql).await
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or_else(|| DbError::Closed(self.label.clone()))?;

        let row = sqlx::query(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = ?",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
        let count: i64 = row.try_get(0)?;

        Ok(count > 0)
    }

    async fn begin(&self) -> DbResult<()> {
        self.transaction_control("begin", "START TRANSACTION").await
    }

    async fn commit(&self) -> DbResult<()> {
        self.transaction_control("commit", "COMMIT").await
    }

    async fn rollback(&self) -> DbResult<()> {
        self.transaction_control("rollback", "ROLLBACK").await
    }

    async fn close(&self) -> DbResult<()> {
        let conn = self.conn.lock().await.take();
        match conn {
            Some(conn) => conn.close().await.map_err(DbError::from),
            None => Ok(()),
        }
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}

/// Connector producing [`MySqlBackend`] connections
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(&self, profile: &ConnectionProfile) -> DbResult<Box<dyn Database>> {
        Ok(Box::new(MySqlBackend::connect(profile).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoist_core::Environment;

    fn profile(password: &str) -> ConnectionProfile {
        ConnectionProfile {
            env: Environment::Stage,
            host: "stage-db.internal".to_string(),
            port: 3307,
            database: "flo_stage".to_string(),
            user: "migrator".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_connect_options_from_profile() {
        let options = connect_options(&profile("secret"));
        assert_eq!(options.get_host(), "stage-db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "migrator");
        assert_eq!(options.get_database(), Some("flo_stage"));
    }

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() {
        let mut p = profile("");
        p.host = "127.0.0.1".to_string();
        p.port = 1;
        let err = MySqlConnector.connect(&p).await.err().unwrap();
        assert!(matches!(err, DbError::ConnectionError(_)));
    }
}
