use crate::error::{ClientError, MigrationError};
use crate::mapping::*;
use crate::models::*;
use crate::statuses::{find_status_id, StatusDefinition, STATUS_MAP};
use crate::summary::RunSummary;
use tracing::{debug, error, info, warn};

pub trait SourceApi {
    fn fetch_projects(&self) -> Result<Vec<LinearProject>, ClientError>;
    fn fetch_issues(&self, project_id: &str) -> Result<Vec<LinearIssue>, ClientError>;
}

pub trait TargetApi {
    fn find_project_by_key(&self, key: &str) -> Result<Option<SpaceProject>, ClientError>;
    fn create_project(&self, request: &CreateProjectRequest) -> Result<SpaceProject, ClientError>;
    fn list_issue_statuses(&self, project_id: &str) -> Result<Vec<SpaceIssueStatus>, ClientError>;
    /// Replaces the whole status workflow of the project.
    fn overwrite_issue_statuses(
        &self,
        project_id: &str,
        statuses: &[StatusDefinition],
    ) -> Result<(), ClientError>;
    fn create_issue(
        &self,
        project_id: &str,
        request: &CreateIssueRequest,
    ) -> Result<(), ClientError>;
}

pub struct Migrator<'a, S, T> {
    source: &'a S,
    target: &'a T,
}

impl<'a, S: SourceApi, T: TargetApi> Migrator<'a, S, T> {
    pub fn new(source: &'a S, target: &'a T) -> Self {
        Self { source, target }
    }

    /// Migrates every source project in order, recording progress in
    /// `summary` even when the run aborts. Only source failures and unknown
    /// issue statuses abort the run; target failures skip the affected
    /// project or issue.
    pub fn run(&self, summary: &mut RunSummary) -> Result<(), MigrationError> {
        let projects = self
            .source
            .fetch_projects()
            .map_err(MigrationError::Source)?;
        info!(count = projects.len(), "Migrating projects");

        for project in &projects {
            self.migrate_project(project, summary)?;
        }
        Ok(())
    }

    fn migrate_project(
        &self,
        project: &LinearProject,
        summary: &mut RunSummary,
    ) -> Result<(), MigrationError> {
        let key = project_key(&project.name);
        debug!(project = %project.name, members = ?project.member_emails(), "Processing project");

        match self.target.find_project_by_key(&key) {
            Ok(Some(existing)) => {
                // Issues are not imported into existing projects to avoid duplicates.
                info!(%key, id = %existing.id, "Project already exists, skipping its issues");
                summary.projects_existing += 1;
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => {
                error!(%key, error = %e, "Could not check for existing project");
                summary.projects_failed += 1;
                return Ok(());
            }
        }

        let created = match self.target.create_project(&create_project_request(project)) {
            Ok(created) => created,
            Err(e) => {
                error!(project = %project.name, %key, error = %e, "Could not create project");
                summary.projects_failed += 1;
                return Ok(());
            }
        };
        info!(%key, id = %created.id, "Project created");
        summary.projects_created += 1;

        if let Err(e) = self
            .target
            .overwrite_issue_statuses(&created.id, &STATUS_MAP)
        {
            error!(%key, error = %e, "Could not overwrite issue statuses, skipping its issues");
            summary.projects_incomplete += 1;
            return Ok(());
        }

        let issues = self
            .source
            .fetch_issues(&project.id)
            .map_err(MigrationError::Source)?;

        let statuses = match self.target.list_issue_statuses(&created.id) {
            Ok(statuses) => statuses,
            Err(e) => {
                error!(%key, error = %e, "Could not list issue statuses, skipping its issues");
                summary.projects_incomplete += 1;
                return Ok(());
            }
        };

        for issue in &issues {
            let status_id = find_status_id(&statuses, &issue.state.name).ok_or_else(|| {
                MigrationError::StatusNotFound {
                    status: issue.state.name.clone(),
                    issue: issue.title.clone(),
                }
            })?;

            debug!(
                title = %issue.title,
                status = %issue.state.name,
                priority = ?issue.priority,
                priority_label = ?issue.priority_label,
                "Creating issue"
            );
            match self
                .target
                .create_issue(&created.id, &create_issue_request(issue, status_id))
            {
                Ok(()) => summary.issues_created += 1,
                Err(e) => {
                    warn!(%key, title = %issue.title, error = %e, "Could not create issue");
                    summary.issues_failed += 1;
                }
            }
        }
        info!(%key, issues = issues.len(), "Project issues imported");
        Ok(())
    }
}
