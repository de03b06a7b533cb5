//! Record-level driver over bound column adapters.

use tracing::warn;

use crate::cell::CellValue;
use crate::column::{ColumnAdapter, ColumnError, PostUpdateQueue};

/// Failure of one column while loading or emitting one record.
#[derive(Debug)]
pub struct ColumnFailure {
    pub column: String,
    pub error: ColumnError,
}

/// Outcome of loading one record.
///
/// Column failures are collected, not propagated: a malformed cell does
/// not abort the rest of the record, and never the batch. The caller
/// aggregates reports and decides.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of deferred post-update actions that ran.
    pub deferred_runs: usize,
    pub failures: Vec<ColumnFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of emitting one record.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub cells: Vec<(String, CellValue)>,
    /// How many columns wrote a non-empty value.
    pub non_empty: usize,
    pub failures: Vec<ColumnFailure>,
}

/// Drives all bound adapters over one record of an import batch.
pub struct RecordLoader<E> {
    bindings: Vec<(String, Box<dyn ColumnAdapter<E>>)>,
}

impl<E> RecordLoader<E> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind one column name to one adapter.
    pub fn bind(mut self, column: impl Into<String>, adapter: impl ColumnAdapter<E> + 'static) -> Self {
        self.bindings.push((column.into(), Box::new(adapter)));
        self
    }

    /// Load one record into `entity`.
    ///
    /// Every bound column is applied (absent columns count as empty);
    /// afterwards the post-update queue is drained in FIFO order.
    pub fn load_record(&self, entity: &mut E, record: &[(String, CellValue)]) -> LoadReport {
        let mut report = LoadReport::default();
        let mut queue = PostUpdateQueue::new();

        for (column, adapter) in &self.bindings {
            let cell = record
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, cell)| cell.clone())
                .unwrap_or(CellValue::Empty);

            if let Err(error) = adapter.load(entity, &cell, &mut queue) {
                warn!(column = %column, error = %error, "column load failed");
                report.failures.push(ColumnFailure {
                    column: column.clone(),
                    error,
                });
            }
        }

        for (label, action) in queue.drain() {
            report.deferred_runs += 1;
            if let Err(error) = action(entity) {
                warn!(action = %label, error = %error, "post-update action failed");
                report.failures.push(ColumnFailure {
                    column: label,
                    error: error.into(),
                });
            }
        }

        report
    }

    /// Emit one export record from `entity`.
    pub fn emit_record(&self, entity: &E) -> ExportReport {
        let mut report = ExportReport::default();

        for (column, adapter) in &self.bindings {
            match adapter.emit(entity) {
                Ok(Some(cell)) => {
                    report.non_empty += 1;
                    report.cells.push((column.clone(), cell));
                }
                Ok(None) => report.cells.push((column.clone(), CellValue::Empty)),
                Err(error) => {
                    report.cells.push((column.clone(), CellValue::Empty));
                    report.failures.push(ColumnFailure {
                        column: column.clone(),
                        error,
                    });
                }
            }
        }

        report
    }
}

impl<E> Default for RecordLoader<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{DateTime, Utc};

    use entitykit_core::{ChoiceDomain, DomainResult, Entity, IdentitySlot};
    use entitykit_properties::{
        Identified, Lifecycle, Named, NumberRegistry, Numbered, NumberingScope, PersistenceState,
        Stored, TargetDate,
    };

    use crate::column::{NameColumn, NumberColumn, StateColumn, TargetDateColumn};

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum JobState {
        Draft,
        Ready,
        Done,
    }

    impl ChoiceDomain for JobState {
        const DOMAIN: &'static str = "job_state";

        fn code(&self) -> &'static str {
            match self {
                JobState::Draft => "draft",
                JobState::Ready => "ready",
                JobState::Done => "done",
            }
        }

        fn all() -> &'static [Self] {
            &[JobState::Draft, JobState::Ready, JobState::Done]
        }
    }

    #[derive(Debug)]
    struct Job {
        persisted: bool,
        identity: IdentitySlot<Job>,
        name: String,
        number: Option<String>,
        state: JobState,
        target: Option<DateTime<Utc>>,
    }

    impl Default for Job {
        fn default() -> Self {
            Self {
                persisted: false,
                identity: IdentitySlot::empty(),
                name: String::new(),
                number: None,
                state: JobState::Draft,
                target: None,
            }
        }
    }

    impl Entity for Job {
        const KIND: &'static str = "job";
    }

    impl Stored for Job {
        fn persistence_state(&self) -> PersistenceState {
            if self.persisted {
                PersistenceState::Persisted
            } else {
                PersistenceState::Transient
            }
        }

        fn mark_persisted(&mut self) {
            self.persisted = true;
        }
    }

    impl Identified for Job {
        fn identity(&self) -> &IdentitySlot<Self> {
            &self.identity
        }

        fn identity_mut(&mut self) -> &mut IdentitySlot<Self> {
            &mut self.identity
        }
    }

    impl Named for Job {
        fn name(&self) -> &str {
            &self.name
        }

        fn store_name(&mut self, name: String) {
            self.name = name;
        }
    }

    impl Numbered for Job {
        fn number(&self) -> Option<&str> {
            self.number.as_deref()
        }

        fn store_number(&mut self, number: String) {
            self.number = Some(number);
        }
    }

    impl Lifecycle for Job {
        type State = JobState;

        fn state(&self) -> JobState {
            self.state
        }

        fn store_state(&mut self, state: JobState) {
            self.state = state;
        }

        fn valid_transitions(&self) -> Vec<JobState> {
            match self.state {
                JobState::Draft => vec![JobState::Ready],
                JobState::Ready => vec![JobState::Done],
                JobState::Done => vec![],
            }
        }
    }

    impl TargetDate for Job {
        fn target_date(&self) -> Option<DateTime<Utc>> {
            self.target
        }

        fn store_target_date(&mut self, date: Option<DateTime<Utc>>) {
            self.target = date;
        }
    }

    /// Registry accepting everything; conflicts are covered elsewhere.
    #[derive(Debug, Default)]
    struct OpenRegistry;

    impl NumberRegistry for OpenRegistry {
        fn claim(&self, _scope: &NumberingScope, _value: &str) -> DomainResult<()> {
            Ok(())
        }

        fn release(&self, _scope: &NumberingScope, _value: &str) {}
    }

    fn loader() -> RecordLoader<Job> {
        RecordLoader::new()
            .bind("name", NameColumn)
            .bind("number", NumberColumn::new(Arc::new(OpenRegistry)))
            .bind("state", StateColumn)
            .bind("due", TargetDateColumn)
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn full_record_loads_and_defers_only_the_state() {
        let mut job = Job::default();
        let record = vec![
            ("name".to_string(), text("Grind housing")),
            ("number".to_string(), text("J-0042")),
            ("state".to_string(), text("ready")),
            ("due".to_string(), text("2026-04-01T12:00:00Z")),
        ];

        let report = loader().load_record(&mut job, &record);
        assert!(report.is_clean(), "failures: {:?}", report.failures);
        assert_eq!(report.deferred_runs, 1);

        assert_eq!(job.name(), "Grind housing");
        assert_eq!(job.number(), Some("J-0042"));
        assert_eq!(job.state(), JobState::Ready);
        assert!(job.target_date().is_some());
    }

    #[test]
    fn number_column_never_defers() {
        let registry: Arc<dyn NumberRegistry> = Arc::new(OpenRegistry);
        let adapter = NumberColumn::new(registry);
        let mut job = Job::default();
        let mut queue = PostUpdateQueue::new();

        let deferred = adapter.load(&mut job, &text("J-1"), &mut queue).unwrap();
        assert!(!deferred);
        assert!(queue.is_empty());
        assert_eq!(job.number(), Some("J-1"));
    }

    #[test]
    fn empty_number_cell_leaves_the_number_untouched() {
        let registry: Arc<dyn NumberRegistry> = Arc::new(OpenRegistry);
        let adapter = NumberColumn::new(registry);
        let mut job = Job::default();
        job.number = Some("J-9".to_string());
        let mut queue = PostUpdateQueue::new();

        let deferred = adapter
            .load(&mut job, &CellValue::Empty, &mut queue)
            .unwrap();
        assert!(!deferred);
        assert_eq!(job.number(), Some("J-9"));
    }

    #[test]
    fn malformed_cells_fail_their_column_only() {
        let mut job = Job::default();
        let record = vec![
            ("name".to_string(), text("Polish")),
            ("state".to_string(), text("no-such-state")),
            ("due".to_string(), text("not a date")),
        ];

        let report = loader().load_record(&mut job, &record);
        assert_eq!(report.failures.len(), 2);
        let failed: Vec<&str> = report.failures.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(failed, vec!["state", "due"]);

        // The healthy column still applied.
        assert_eq!(job.name(), "Polish");
        assert_eq!(job.state(), JobState::Draft);
    }

    #[test]
    fn emit_reports_non_empty_columns() {
        let mut job = Job::default();
        job.store_name("Grind housing".to_string());
        job.store_number("J-0042".to_string());

        let report = loader().emit_record(&job);
        assert!(report.failures.is_empty());
        // name, number and state write; the target date is unset.
        assert_eq!(report.non_empty, 3);
        assert_eq!(report.cells.len(), 4);
        assert_eq!(report.cells[3].1, CellValue::Empty);
    }
}
