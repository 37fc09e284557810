use crate::clock::{format_point_id, format_timestamp, partition_name, Clock, SystemClock};
use crate::error::LogError;
use crate::record::PointRecord;
use crate::store::{CsvStore, PartitionStore};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info};

/// Default base name for partition files.
pub const DEFAULT_BASE_NAME: &str = "tennis_log";

/// What a caller must keep to resume a log in a later process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogState {
    /// Partition that was open, so undo keeps targeting it across midnight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Undone records, most recently undone last.
    #[serde(default)]
    pub redo: Vec<PointRecord>,
}

/// Append-only, day-partitioned point log with an undo/redo stack.
pub struct MatchLog<S = CsvStore, C = SystemClock> {
    store: S,
    clock: C,
    base_name: String,
    partition: String,
    redo: Vec<PointRecord>,
    last_point_id: Option<u128>,
}

impl<S: PartitionStore, C: Clock> MatchLog<S, C> {
    /// Open the log on today's partition. Nothing is written until `append`.
    pub fn open(store: S, clock: C, base_name: impl Into<String>) -> Result<Self, LogError> {
        let base_name = base_name.into();
        let partition = partition_name(&base_name, clock.now().date())?;
        let mut log = Self {
            store,
            clock,
            base_name,
            partition,
            redo: Vec::new(),
            last_point_id: None,
        };
        log.seed_last_point_id()?;
        Ok(log)
    }

    /// Reopen with the partition and redo stack saved by `state`.
    pub fn resume(
        store: S,
        clock: C,
        base_name: impl Into<String>,
        state: LogState,
    ) -> Result<Self, LogError> {
        let mut log = Self::open(store, clock, base_name)?;
        if let Some(partition) = state.partition {
            log.partition = partition;
            log.seed_last_point_id()?;
        }
        log.redo = state.redo;
        Ok(log)
    }

    pub fn state(&self) -> LogState {
        LogState {
            partition: Some(self.partition.clone()),
            redo: self.redo.clone(),
        }
    }

    /// File name of the partition undo/redo currently act on.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write a new point. Fills in `point_id` and `timestamp` when empty,
    /// drops any pending redo and rotates to today's partition first.
    pub fn append(&mut self, mut record: PointRecord) -> Result<PointRecord, LogError> {
        let now = self.clock.now();
        if record.point_id.is_empty() {
            record.point_id = self.next_point_id(now)?;
        } else if let Ok(id) = record.point_id.parse::<u128>() {
            self.last_point_id = self.last_point_id.max(Some(id));
        }
        if record.timestamp.is_empty() {
            record.timestamp = format_timestamp(now)?;
        }

        self.redo.clear();
        self.rotate(now.date())?;
        self.store.append_row(&self.partition, &record)?;
        debug!(point_id = %record.point_id, partition = %self.partition, "point appended");
        Ok(record)
    }

    /// Remove the final data row and keep it for `redo_last_append`.
    pub fn undo_last_append(&mut self) -> Result<Option<PointRecord>, LogError> {
        let Some(mut rows) = self.store.read_rows(&self.partition)? else {
            return Ok(None);
        };
        let Some(removed) = rows.pop() else {
            return Ok(None);
        };
        self.store.rewrite(&self.partition, &rows)?;
        debug!(point_id = %removed.point_id, redo_depth = self.redo.len() + 1, "point undone");
        self.redo.push(removed.clone());
        Ok(Some(removed))
    }

    /// Re-append the most recently undone row exactly as it was.
    /// Unlike `append`, the rest of the redo stack is kept.
    pub fn redo_last_append(&mut self) -> Result<Option<PointRecord>, LogError> {
        let Some(record) = self.redo.pop() else {
            return Ok(None);
        };
        if let Err(e) = self.store.append_row(&self.partition, &record) {
            self.redo.push(record);
            return Err(e);
        }
        debug!(point_id = %record.point_id, redo_depth = self.redo.len(), "point redone");
        Ok(Some(record))
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Forget undone rows without writing anything, e.g. when a new match starts.
    pub fn clear_redo(&mut self) {
        if !self.redo.is_empty() {
            debug!(dropped = self.redo.len(), "redo stack cleared");
        }
        self.redo.clear();
    }

    pub fn last_record(&self) -> Result<Option<PointRecord>, LogError> {
        Ok(self.records()?.pop())
    }

    /// All data rows of the open partition, oldest first.
    pub fn records(&self) -> Result<Vec<PointRecord>, LogError> {
        Ok(self.store.read_rows(&self.partition)?.unwrap_or_default())
    }

    fn rotate(&mut self, today: Date) -> Result<(), LogError> {
        let expected = partition_name(&self.base_name, today)?;
        if expected != self.partition {
            info!(from = %self.partition, to = %expected, "switching log partition");
            self.partition = expected;
        }
        Ok(())
    }

    fn next_point_id(&mut self, now: time::OffsetDateTime) -> Result<String, LogError> {
        let candidate = format_point_id(now)?;
        let id = match (candidate.parse::<u128>().ok(), self.last_point_id) {
            (Some(id), Some(last)) if id <= last => last + 1,
            (Some(id), _) => id,
            (None, _) => return Ok(candidate),
        };
        self.last_point_id = Some(id);
        Ok(format!("{id:0width$}", width = candidate.len()))
    }

    fn seed_last_point_id(&mut self) -> Result<(), LogError> {
        let last = self
            .last_record()?
            .and_then(|r| r.point_id.parse::<u128>().ok());
        self.last_point_id = self.last_point_id.max(last);
        Ok(())
    }
}
