use crate::models::{SpaceIssueStatus, StatusPayload, UpdateStatusesRequest};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusDefinition {
    pub name: &'static str,
    pub resolved: bool,
    pub color: &'static str,
}

/// Workflow applied to every newly created Space project. Names have to
/// cover every Linear workflow state in use, otherwise the run aborts.
pub static STATUS_MAP: [StatusDefinition; 7] = [
    StatusDefinition {
        name: "Backlog",
        resolved: false,
        color: "eeeeee",
    },
    StatusDefinition {
        name: "Todo",
        resolved: false,
        color: "444444",
    },
    StatusDefinition {
        name: "In Progress",
        resolved: false,
        color: "eeff44",
    },
    StatusDefinition {
        name: "On Hold",
        resolved: false,
        color: "ef5524",
    },
    StatusDefinition {
        name: "In Review",
        resolved: false,
        color: "069420",
    },
    StatusDefinition {
        name: "Done",
        resolved: true,
        color: "0053e2",
    },
    StatusDefinition {
        name: "Cancelled",
        resolved: true,
        color: "999999",
    },
];

/// Id of the first target status whose name matches `name`, ignoring case.
pub fn find_status_id<'a>(statuses: &'a [SpaceIssueStatus], name: &str) -> Option<&'a str> {
    let name = name.to_lowercase();
    statuses
        .iter()
        .find(|status| status.name.to_lowercase() == name)
        .map(|status| status.id.as_str())
}

pub fn update_request(definitions: &[StatusDefinition]) -> UpdateStatusesRequest<'_> {
    UpdateStatusesRequest {
        statuses: definitions
            .iter()
            .map(|definition| StatusPayload {
                name: definition.name,
                resolved: definition.resolved,
                color: definition.color,
            })
            .collect(),
    }
}
