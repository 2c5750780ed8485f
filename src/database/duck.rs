use crate::database::StoreError;
use crate::database::TableStore;
use crate::table::row::Row;
use crate::table::Table;
use chrono::DateTime;
use chrono::Utc;
use duckdb::params;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;
use tracing::debug;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS lesson_tables (
    name VARCHAR PRIMARY KEY,
    data VARCHAR NOT NULL,
    updated_at VARCHAR NOT NULL
)";

/// Stores each table as one JSON document in a DuckDB table, keyed by name.
pub struct DuckDbTableStore {
    connection: Mutex<Connection>,
}

impl DuckDbTableStore {
    /// Opens (or creates) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, StoreError> {
        connection.execute_batch(CREATE_TABLE)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Reads a single VARCHAR column of the row named `name`.
    fn select(&self, column: &str, name: &str) -> Result<Option<String>, StoreError> {
        let connection = self.connection()?;
        let sql = format!("SELECT {} FROM lesson_tables WHERE name = ?", column);
        match connection.query_row(&sql, [name], |row| row.get::<_, String>(0)) {
            Ok(value) => Ok(Some(value)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl TableStore for DuckDbTableStore {
    fn get(&self, name: &str) -> Result<Option<Table>, StoreError> {
        let Some(data) = self.select("data", name)? else {
            return Ok(None);
        };
        let rows: Vec<Row> = serde_json::from_str(&data)?;
        Ok(Some(Table::with_rows(name, rows)))
    }

    fn replace(&self, table: &Table) -> Result<DateTime<Utc>, StoreError> {
        let data = serde_json::to_string(&table.data)?;
        let now = Utc::now();
        let connection = self.connection()?;
        connection.execute(
            "INSERT OR REPLACE INTO lesson_tables (name, data, updated_at) VALUES (?, ?, ?)",
            params![table.name, data, now.to_rfc3339()],
        )?;
        debug!(table = %table.name, rows = table.len(), "Stored table document");
        Ok(now)
    }

    fn updated_at(&self, name: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        match self.select("updated_at", name)? {
            Some(text) => Ok(Some(DateTime::parse_from_rfc3339(&text)?.with_timezone(&Utc))),
            None => Ok(None),
        }
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let connection = self.connection()?;
        let mut statement = connection.prepare("SELECT name FROM lesson_tables ORDER BY name")?;
        let names = statement
            .query_map(params![], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}
