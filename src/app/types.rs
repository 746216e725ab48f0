/// Outcome of one record in a bulk workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Change reached the backend
    Applied,
    /// Nothing to do (duplicate, invalid, or graduating)
    Skipped,
    /// Request or validation failed
    Failed,
}

/// Counters aggregated across a bulk workflow run.
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncStats {
    pub fn add(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Applied => self.applied += 1,
            SyncOutcome::Skipped => self.skipped += 1,
            SyncOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.failed
    }
}
