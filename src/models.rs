use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

#[derive(Deserialize)]
pub struct ProjectsData {
    pub projects: Connection<LinearProject>,
}

#[derive(Deserialize)]
pub struct ProjectData {
    pub project: Option<ProjectIssues>,
}

#[derive(Deserialize)]
pub struct ProjectIssues {
    pub issues: Connection<LinearIssue>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LinearProject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Connection<LinearUser>,
}

impl LinearProject {
    pub fn member_emails(&self) -> Vec<&str> {
        self.members.nodes.iter().map(|m| m.email.as_str()).collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LinearUser {
    pub email: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LinearIssue {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<LinearUser>,
    pub state: LinearState,
    pub priority: Option<f64>,
    #[serde(rename = "priorityLabel")]
    pub priority_label: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LinearState {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectKey {
    pub key: String,
}

#[derive(Deserialize, Debug, Clone)]
#[allow(dead_code)]
pub struct SpaceProject {
    pub id: String,
    pub key: ProjectKey,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[allow(dead_code)]
pub struct SpaceIssueStatus {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateProjectRequest {
    pub key: ProjectKey,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusPayload<'a> {
    pub name: &'a str,
    pub resolved: bool,
    pub color: &'a str,
}

#[derive(Serialize, Debug)]
pub struct UpdateStatusesRequest<'a> {
    pub statuses: Vec<StatusPayload<'a>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreateIssueRequest {
    pub title: String,
    pub description: Option<String>,
    pub assignee: String,
    pub status: String,
}
