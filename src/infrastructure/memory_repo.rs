use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::errors::DomainError;
use crate::domain::ports::TableRepository;
use crate::domain::table::TableSnapshot;
use crate::domain::values::TableId;

/// Keeps table snapshots in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryTableRepository {
    tables: Mutex<HashMap<TableId, TableSnapshot>>,
}

impl InMemoryTableRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TableRepository for InMemoryTableRepository {
    fn load(&self, id: TableId) -> Result<Option<TableSnapshot>, DomainError> {
        let tables = self.tables.lock()?;
        Ok(tables.get(&id).cloned())
    }

    fn save(&self, snapshot: &TableSnapshot) -> Result<(), DomainError> {
        let mut tables = self.tables.lock()?;
        tables.insert(snapshot.id, snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryTableRepository;
    use crate::domain::ports::TableRepository;
    use crate::domain::table::Table;
    use crate::domain::values::TableId;
    use chrono::Utc;

    #[test]
    fn load_returns_none_for_unknown_table() {
        let repo = InMemoryTableRepository::new();
        assert!(repo.load(TableId::from(9)).unwrap().is_none());
        assert!(repo.tables.lock().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_returns_latest_snapshot() {
        let repo = InMemoryTableRepository::new();
        let mut table = Table::new(4, 100).unwrap();
        repo.save(&table.snapshot()).unwrap();

        table.add_order(Utc::now()).unwrap();
        repo.save(&table.snapshot()).unwrap();

        let loaded = repo.load(TableId::from(4)).unwrap().expect("table stored");
        assert_eq!(loaded, table.snapshot());
        assert_eq!(repo.tables.lock().unwrap().len(), 1);
    }
}
