use crate::config::Config;
use crate::error::ClientError;
use crate::migrator::SourceApi;
use crate::models::*;
use serde_json::json;
use tracing::debug;

const PROJECTS_QUERY: &str = r#"
query Projects {
    projects {
        nodes {
            id
            name
            description
            members {
                nodes {
                    email
                }
            }
        }
    }
}
"#;

const PROJECT_ISSUES_QUERY: &str = r#"
query Project($id: String!) {
    project(id: $id) {
        issues {
            nodes {
                title
                description
                assignee {
                    email
                }
                state {
                    name
                }
                priority
                priorityLabel
            }
        }
    }
}
"#;

pub struct LinearClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl LinearClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", config.linear_api_key).parse()?,
        );

        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .default_headers(headers)
                .build()?,
            endpoint: config.linear_endpoint.clone(),
        })
    }

    fn _query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            debug!(%status, %body, "Linear request failed");
            return Err(ClientError::UnexpectedStatus { status, body });
        }

        into_data(response.json::<GraphQlResponse<T>>()?)
    }
}

impl SourceApi for LinearClient {
    fn fetch_projects(&self) -> Result<Vec<LinearProject>, ClientError> {
        let data: ProjectsData = self._query(PROJECTS_QUERY, json!({}))?;
        debug!(count = data.projects.nodes.len(), "Fetched Linear projects");
        Ok(data.projects.nodes)
    }

    fn fetch_issues(&self, project_id: &str) -> Result<Vec<LinearIssue>, ClientError> {
        let data: ProjectData = self._query(PROJECT_ISSUES_QUERY, json!({ "id": project_id }))?;
        let project = data.project.ok_or(ClientError::MissingData("project"))?;
        debug!(project_id, count = project.issues.nodes.len(), "Fetched Linear issues");
        Ok(project.issues.nodes)
    }
}

fn into_data<T>(response: GraphQlResponse<T>) -> Result<T, ClientError> {
    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::GraphQl(message));
    }
    response.data.ok_or(ClientError::MissingData("data"))
}
