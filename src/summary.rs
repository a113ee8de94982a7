use tracing::info;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub projects_created: usize,
    /// Created projects whose statuses could not be set up, so no issues were imported.
    pub projects_incomplete: usize,
    pub projects_existing: usize,
    pub projects_failed: usize,
    pub issues_created: usize,
    pub issues_failed: usize,
}

impl RunSummary {
    pub fn projects_seen(&self) -> usize {
        self.projects_created + self.projects_existing + self.projects_failed
    }

    pub fn log(&self, outcome: &str) {
        info!(
            outcome,
            projects = self.projects_seen(),
            created = self.projects_created,
            incomplete = self.projects_incomplete,
            existing = self.projects_existing,
            failed = self.projects_failed,
            issues_created = self.issues_created,
            issues_failed = self.issues_failed,
            "Migration summary"
        );
    }
}
