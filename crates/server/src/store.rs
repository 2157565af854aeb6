use chrono::NaiveDate;
use serde::Serialize;
use shared_types::{
    mock_applications, mock_inspections, mock_local_content_plans, mock_notifications,
    mock_payments, mock_visas, Actionable, AppError, Application, CommandResult, EntityKind,
    ExpatriateVisa, FilterCriteria, InspectionReport, LocalContentPlan, Notification, Payment,
    RecordCommand,
};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error_convert::poisoned;

/// One in-memory record collection.
///
/// Readers work on a snapshot or under the read lock; commands hold the
/// write lock only for the single record they change.
pub struct Collection<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Actionable> Collection<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, AppError> {
        self.records.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, AppError> {
        self.records.write().map_err(poisoned)
    }

    pub fn snapshot(&self) -> Result<Vec<T>, AppError> {
        Ok(self.read()?.clone())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.read()?.is_empty())
    }

    pub fn find(&self, id: &str) -> Result<Option<T>, AppError> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// Records matching `criteria`, in collection order.
    pub fn query(&self, criteria: &FilterCriteria) -> Result<Vec<T>, AppError> {
        let records = self.read()?;
        Ok(shared_types::filter(&records, criteria))
    }

    /// Apply `command` to the record with `id`. The stored record is only
    /// replaced when the command succeeds.
    pub fn update(
        &self,
        id: &str,
        command: &RecordCommand,
        today: NaiveDate,
    ) -> Result<CommandResult<T>, AppError> {
        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} {} not found", T::KIND.as_str(), id)))?;

        let previous_status = slot.status_label().to_string();
        let mut updated = slot.clone();
        updated.apply(command, today)?;
        *slot = updated.clone();

        Ok(CommandResult {
            action: command.action().to_string(),
            previous_status,
            status: updated.status_label().to_string(),
            record: updated,
        })
    }
}

/// Every collection the API serves, seeded from mock data.
pub struct RecordStore {
    pub applications: Collection<Application>,
    pub payments: Collection<Payment>,
    pub local_content_plans: Collection<LocalContentPlan>,
    pub inspections: Collection<InspectionReport>,
    pub visas: Collection<ExpatriateVisa>,
    pub notifications: Collection<Notification>,
}

impl RecordStore {
    pub fn seeded() -> Self {
        Self {
            applications: Collection::new(mock_applications()),
            payments: Collection::new(mock_payments()),
            local_content_plans: Collection::new(mock_local_content_plans()),
            inspections: Collection::new(mock_inspections()),
            visas: Collection::new(mock_visas()),
            notifications: Collection::new(mock_notifications()),
        }
    }

    /// Record count per collection, keyed by URL segment.
    pub fn counts(&self) -> Result<BTreeMap<String, usize>, AppError> {
        let mut counts = BTreeMap::new();
        for kind in EntityKind::ALL {
            let n = match kind {
                EntityKind::Application => self.applications.len()?,
                EntityKind::Payment => self.payments.len()?,
                EntityKind::LocalContentPlan => self.local_content_plans.len()?,
                EntityKind::Inspection => self.inspections.len()?,
                EntityKind::Visa => self.visas.len()?,
                EntityKind::Notification => self.notifications.len()?,
            };
            counts.insert(kind.segment().to_string(), n);
        }
        Ok(counts)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Record types held by [`RecordStore`].
pub trait Stored: Actionable + Serialize {
    fn collection(store: &RecordStore) -> &Collection<Self>;
}

impl Stored for Application {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.applications
    }
}

impl Stored for Payment {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.payments
    }
}

impl Stored for LocalContentPlan {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.local_content_plans
    }
}

impl Stored for InspectionReport {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.inspections
    }
}

impl Stored for ExpatriateVisa {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.visas
    }
}

impl Stored for Notification {
    fn collection(store: &RecordStore) -> &Collection<Self> {
        &store.notifications
    }
}

/// Where a search session reads its records from.
pub trait RecordSource<T>: Send + Sync + 'static {
    fn snapshot(&self) -> Result<Vec<T>, AppError>;
}

impl<T: Stored> RecordSource<T> for RecordStore {
    fn snapshot(&self) -> Result<Vec<T>, AppError> {
        T::collection(self).snapshot()
    }
}
