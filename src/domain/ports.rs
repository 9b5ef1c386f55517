use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::errors::DomainError;
use super::table::TableSnapshot;
use super::values::TableId;

/// Where tables are loaded from and where committed changes end up.
pub trait TableRepository: Send + Sync + 'static {
    fn load(&self, id: TableId) -> Result<Option<TableSnapshot>, DomainError>;
    fn save(&self, snapshot: &TableSnapshot) -> Result<(), DomainError>;
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

impl<R: TableRepository> TableRepository for Arc<R> {
    fn load(&self, id: TableId) -> Result<Option<TableSnapshot>, DomainError> {
        (**self).load(id)
    }

    fn save(&self, snapshot: &TableSnapshot) -> Result<(), DomainError> {
        (**self).save(snapshot)
    }
}
