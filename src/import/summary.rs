// productimporter/src/import/summary.rs
use chrono::{DateTime, Local};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// 1-based position of the record in the catalog.
    pub position: usize,
    pub sku: Option<String>,
    pub reason: String,
}

/// Counts for one import run.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub started_at: DateTime<Local>,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<RecordFailure>,
}

impl ImportSummary {
    pub fn start() -> Self {
        ImportSummary {
            started_at: Local::now(),
            created: 0,
            updated: 0,
            failures: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, position: usize, sku: Option<&str>, reason: impl Into<String>) {
        self.failures.push(RecordFailure {
            position,
            sku: sku.map(str::to_string),
            reason: reason.into(),
        });
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn processed(&self) -> usize {
        self.created + self.updated + self.failed()
    }

    pub fn log(&self) {
        let elapsed = Local::now() - self.started_at;
        info!(
            created = self.created,
            updated = self.updated,
            failed = self.failed(),
            processed = self.processed(),
            elapsed_ms = elapsed.num_milliseconds(),
            "Import finished"
        );
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created={} updated={} failed={}",
            self.created,
            self.updated,
            self.failed()
        )?;
        for failure in &self.failures {
            write!(
                f,
                "\n  #{} sku={}: {}",
                failure.position,
                failure.sku.as_deref().unwrap_or("(none)"),
                failure.reason
            )?;
        }
        Ok(())
    }
}
