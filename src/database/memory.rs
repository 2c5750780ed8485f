use crate::database::StoreError;
use crate::database::TableStore;
use crate::table::Table;
use chrono::DateTime;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Keeps table documents in process memory. Used by tests and by callers that
/// load tables from elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: Mutex<BTreeMap<String, (Table, DateTime<Utc>)>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableStore for MemoryTableStore {
    fn get(&self, name: &str) -> Result<Option<Table>, StoreError> {
        let tables = self.tables.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(name).map(|(table, _)| table.clone()))
    }

    fn replace(&self, table: &Table) -> Result<DateTime<Utc>, StoreError> {
        let mut tables = self.tables.lock().map_err(|_| StoreError::LockPoisoned)?;
        let now = Utc::now();
        tables.insert(table.name.clone(), (table.clone(), now));
        Ok(now)
    }

    fn updated_at(&self, name: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        let tables = self.tables.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.get(name).map(|(_, updated_at)| *updated_at))
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::row::Row;

    #[test]
    fn replace_overwrites_whole_document() {
        let store = MemoryTableStore::new();
        assert_eq!(store.get("main").unwrap(), None);

        let first = Table::with_rows("main", vec![Row::new().with("a", "1"), Row::new().with("a", "2")]);
        let written = store.replace(&first).unwrap();
        assert_eq!(store.updated_at("main").unwrap(), Some(written));

        let second = Table::with_rows("main", vec![Row::new().with("b", "3")]);
        store.replace(&second).unwrap();
        assert_eq!(store.get("main").unwrap(), Some(second));
        assert_eq!(store.names().unwrap(), vec!["main".to_owned()]);
    }
}
