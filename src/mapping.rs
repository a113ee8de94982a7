use crate::models::{
    CreateIssueRequest, CreateProjectRequest, LinearIssue, LinearProject, ProjectKey,
};

/// Space project key for a Linear project name.
pub fn project_key(name: &str) -> String {
    name.to_uppercase()
}

pub fn assignee_username(issue: &LinearIssue) -> &str {
    issue
        .assignee
        .as_ref()
        .map(|assignee| assignee.email.split('@').next().unwrap_or_default())
        .unwrap_or_default()
}

pub fn create_project_request(project: &LinearProject) -> CreateProjectRequest {
    CreateProjectRequest {
        key: ProjectKey {
            key: project_key(&project.name),
        },
        name: project.name.clone(),
        description: project.description.clone(),
    }
}

pub fn create_issue_request(issue: &LinearIssue, status_id: &str) -> CreateIssueRequest {
    CreateIssueRequest {
        title: issue.title.clone(),
        description: issue.description.clone(),
        assignee: format!("username:{}", assignee_username(issue)),
        status: status_id.to_string(),
    }
}
