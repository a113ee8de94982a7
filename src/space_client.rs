use crate::config::Config;
use crate::error::ClientError;
use crate::migrator::TargetApi;
use crate::models::*;
use crate::statuses::{update_request, StatusDefinition};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::StatusCode;
use tracing::{debug, warn};

pub struct SpaceClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SpaceClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", config.space_key).parse()?,
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        Ok(Self {
            client: reqwest::blocking::Client::builder()
                .default_headers(headers)
                .build()?,
            base_url: config.space_endpoint.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn _send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text()?;
        debug!(%status, %body, "Space request failed");
        Err(ClientError::UnexpectedStatus { status, body })
    }
}

fn project_by_key_path(key: &str) -> String {
    format!("/projects/key:{}", key)
}

fn statuses_path(project_id: &str) -> String {
    format!("/projects/id:{}/planning/issues/statuses", project_id)
}

fn issues_path(project_id: &str) -> String {
    format!("/projects/id:{}/planning/issues", project_id)
}

impl TargetApi for SpaceClient {
    fn find_project_by_key(&self, key: &str) -> Result<Option<SpaceProject>, ClientError> {
        let response = self
            .client
            .get(self.url(&project_by_key_path(key)))
            .send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(Some(response.json()?));
        }
        if status != StatusCode::NOT_FOUND {
            let body = response.text()?;
            warn!(key, %status, %body, "Project lookup failed, treating as not found");
        }
        Ok(None)
    }

    fn create_project(&self, request: &CreateProjectRequest) -> Result<SpaceProject, ClientError> {
        let project: SpaceProject = self
            ._send(self.client.post(self.url("/projects")).json(request))?
            .json()?;
        debug!(id = %project.id, key = %project.key.key, "Created Space project");
        Ok(project)
    }

    fn list_issue_statuses(&self, project_id: &str) -> Result<Vec<SpaceIssueStatus>, ClientError> {
        let statuses = self
            ._send(self.client.get(self.url(&statuses_path(project_id))))?
            .json()?;
        Ok(statuses)
    }

    fn overwrite_issue_statuses(
        &self,
        project_id: &str,
        statuses: &[StatusDefinition],
    ) -> Result<(), ClientError> {
        let body = self
            ._send(
                self.client
                    .patch(self.url(&statuses_path(project_id)))
                    .json(&update_request(statuses)),
            )?
            .text()?;
        debug!(project_id, %body, "Overwrote issue statuses");
        Ok(())
    }

    fn create_issue(
        &self,
        project_id: &str,
        request: &CreateIssueRequest,
    ) -> Result<(), ClientError> {
        let body = self
            ._send(
                self.client
                    .post(self.url(&issues_path(project_id)))
                    .json(request),
            )?
            .text()?;
        debug!(project_id, %body, "Created Space issue");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statuses::STATUS_MAP;
    use mockito::Matcher;
    use serde_json::json;

    const PROJECT_BODY: &str = r#"{ "id": "2kQz", "key": { "key": "DEMO" }, "name": "Demo" }"#;

    fn client_for(endpoint: &str) -> SpaceClient {
        SpaceClient::new(&Config {
            linear_endpoint: "http://localhost:4000/graphql".into(),
            linear_api_key: "lin".into(),
            space_endpoint: endpoint.into(),
            space_key: "space-token".into(),
        })
        .unwrap()
    }

    fn client() -> SpaceClient {
        client_for("https://acme.jetbrains.space/api/http")
    }

    fn issue_request() -> CreateIssueRequest {
        CreateIssueRequest {
            title: "T".into(),
            description: None,
            assignee: "username:x".into(),
            status: "s1".into(),
        }
    }

    #[test]
    fn lookup_returns_existing_project() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/projects/key:DEMO")
            .match_header("authorization", "Bearer space-token")
            .with_header("content-type", "application/json")
            .with_body(PROJECT_BODY)
            .create();

        let project = client_for(&server.url())
            .find_project_by_key("DEMO")
            .unwrap()
            .unwrap();

        mock.assert();
        assert_eq!(project.id, "2kQz");
        assert_eq!(project.key.key, "DEMO");
    }

    #[test]
    fn lookup_treats_404_as_not_found() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/projects/key:DEMO")
            .with_status(404)
            .create();

        let found = client_for(&server.url()).find_project_by_key("DEMO").unwrap();

        mock.assert();
        assert!(found.is_none());
    }

    #[test]
    fn lookup_treats_server_error_as_not_found() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/projects/key:DEMO")
            .with_status(500)
            .with_body("upstream unavailable")
            .create();

        let found = client_for(&server.url()).find_project_by_key("DEMO").unwrap();

        mock.assert();
        assert!(found.is_none());
    }

    #[test]
    fn create_project_posts_key_and_returns_project() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/projects")
            .match_header("authorization", "Bearer space-token")
            .match_body(Matcher::Json(json!({
                "key": { "key": "DEMO" },
                "name": "Demo",
                "description": "d"
            })))
            .with_header("content-type", "application/json")
            .with_body(PROJECT_BODY)
            .create();

        let request = CreateProjectRequest {
            key: ProjectKey { key: "DEMO".into() },
            name: "Demo".into(),
            description: Some("d".into()),
        };
        let project = client_for(&server.url()).create_project(&request).unwrap();

        mock.assert();
        assert_eq!(project.id, "2kQz");
    }

    #[test]
    fn create_project_failure_carries_status_and_body() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/projects")
            .with_status(400)
            .with_body(r#"{"error":"DuplicateKey"}"#)
            .create();

        let request = CreateProjectRequest {
            key: ProjectKey { key: "DEMO".into() },
            name: "Demo".into(),
            description: None,
        };
        let err = client_for(&server.url())
            .create_project(&request)
            .unwrap_err();

        match err {
            ClientError::UnexpectedStatus { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, r#"{"error":"DuplicateKey"}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overwrite_sends_whole_status_map() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PATCH", "/projects/id:2kQz/planning/issues/statuses")
            .match_header("authorization", "Bearer space-token")
            .match_body(Matcher::Json(json!({
                "statuses": [
                    { "name": "Backlog", "resolved": false, "color": "eeeeee" },
                    { "name": "Todo", "resolved": false, "color": "444444" },
                    { "name": "In Progress", "resolved": false, "color": "eeff44" },
                    { "name": "On Hold", "resolved": false, "color": "ef5524" },
                    { "name": "In Review", "resolved": false, "color": "069420" },
                    { "name": "Done", "resolved": true, "color": "0053e2" },
                    { "name": "Cancelled", "resolved": true, "color": "999999" }
                ]
            })))
            .create();

        client_for(&server.url())
            .overwrite_issue_statuses("2kQz", &STATUS_MAP)
            .unwrap();

        mock.assert();
    }

    #[test]
    fn lists_statuses_of_project() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/projects/id:2kQz/planning/issues/statuses")
            .with_header("content-type", "application/json")
            .with_body(r#"[ { "id": "s1", "name": "Todo", "resolved": false, "color": "444444" } ]"#)
            .create();

        let statuses = client_for(&server.url())
            .list_issue_statuses("2kQz")
            .unwrap();

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].id, "s1");
    }

    #[test]
    fn create_issue_posts_request() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/projects/id:2kQz/planning/issues")
            .match_header("authorization", "Bearer space-token")
            .match_body(Matcher::Json(json!({
                "title": "T",
                "description": null,
                "assignee": "username:x",
                "status": "s1"
            })))
            .with_body(r#"{ "id": "issue-1" }"#)
            .create();

        client_for(&server.url())
            .create_issue("2kQz", &issue_request())
            .unwrap();

        mock.assert();
    }

    #[test]
    fn create_issue_failure_is_returned() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/projects/id:2kQz/planning/issues")
            .with_status(400)
            .with_body(r#"{"error":"x"}"#)
            .create();

        let err = client_for(&server.url())
            .create_issue("2kQz", &issue_request())
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::UnexpectedStatus { status, ref body }
                if status == StatusCode::BAD_REQUEST && body == r#"{"error":"x"}"#
        ));
    }

    #[test]
    fn builds_routes() {
        let client = client();

        assert_eq!(
            client.url(&project_by_key_path("DEMO")),
            "https://acme.jetbrains.space/api/http/projects/key:DEMO"
        );
        assert_eq!(
            client.url(&statuses_path("2kQz")),
            "https://acme.jetbrains.space/api/http/projects/id:2kQz/planning/issues/statuses"
        );
        assert_eq!(
            client.url(&issues_path("2kQz")),
            "https://acme.jetbrains.space/api/http/projects/id:2kQz/planning/issues"
        );
    }

    #[test]
    fn parses_project_response() {
        let project: SpaceProject = serde_json::from_str(
            r#"{ "id": "2kQz", "key": { "key": "DEMO" }, "name": "Demo", "description": "d", "private": false }"#,
        )
        .unwrap();

        assert_eq!(project.id, "2kQz");
        assert_eq!(project.key.key, "DEMO");
    }

    #[test]
    fn serializes_issue_request() {
        assert_eq!(
            serde_json::to_value(issue_request()).unwrap(),
            json!({
                "title": "T",
                "description": null,
                "assignee": "username:x",
                "status": "s1"
            })
        );
    }
}
