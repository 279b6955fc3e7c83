//! Wire contract for the registration status endpoint.
//!
//! One POST endpoint decides any number of registrations in a single
//! request. The richer of the two historical payload shapes is canonical:
//! `{action, reason, users: [{id, role}]}`; the response carries a status
//! field whose value `"success"` is the only success signal.

use serde::{Deserialize, Serialize};

use crate::flow::ActionKind;
use crate::Role;

/// Status value the backend returns when the whole batch was applied.
pub const SUCCESS_STATUS: &str = "success";

/// One registration affected by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTarget {
    /// Registration id.
    pub id: String,
    /// Role to assign on approval; always `null` for rejections.
    pub role: Option<Role>,
}

/// JSON body POSTed to the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// What to do with every target.
    pub action: ActionKind,
    /// Shared rejection reason; `null` for approvals.
    pub reason: Option<String>,
    /// The affected registrations.
    pub users: Vec<ActionTarget>,
}

impl ActionRequest {
    /// Ids of every registration this request decides.
    pub fn affected_ids(&self) -> Vec<String> {
        self.users.iter().map(|u| u.id.clone()).collect()
    }
}

/// JSON body of the endpoint's response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionResponse {
    /// `"success"` when the batch was applied; anything else is failure.
    pub status: String,
    /// Optional human-readable detail; unused by the dashboard.
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionResponse {
    /// Whether the backend reported the batch as applied.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Extract one value from a raw `document.cookie` string.
///
/// Used to pull the `csrftoken` cookie the backend expects echoed in the
/// `X-CSRFToken` header. Values are percent-decoded; a missing cookie or an
/// undecodable value yields `None`.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_to_the_canonical_shape() {
        let request = ActionRequest {
            action: ActionKind::Reject,
            reason: Some("duplicate".into()),
            users: vec![
                ActionTarget { id: "a".into(), role: None },
                ActionTarget { id: "b".into(), role: None },
            ],
        };
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            json!({
                "action": "reject",
                "reason": "duplicate",
                "users": [
                    {"id": "a", "role": null},
                    {"id": "b", "role": null},
                ],
            })
        );
    }

    #[test]
    fn approve_targets_carry_their_role() {
        let request = ActionRequest {
            action: ActionKind::Approve,
            reason: None,
            users: vec![ActionTarget {
                id: "c".into(),
                role: Some(crate::Role::Teacher),
            }],
        };
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            json!({
                "action": "approve",
                "reason": null,
                "users": [{"id": "c", "role": "teacher"}],
            })
        );
    }

    #[test]
    fn only_a_literal_success_status_counts() {
        let ok: ActionResponse = serde_json::from_str(r#"{"status": "success"}"#).expect("parse");
        assert!(ok.is_success());

        let err: ActionResponse =
            serde_json::from_str(r#"{"status": "error", "message": "boom"}"#).expect("parse");
        assert!(!err.is_success());

        let odd: ActionResponse = serde_json::from_str(r#"{"status": "Success"}"#).expect("parse");
        assert!(!odd.is_success());
    }

    #[test]
    fn cookie_value_finds_and_decodes_the_token() {
        let cookies = "theme=dark; csrftoken=abc%3D123 ;sessionid=xyz";
        assert_eq!(cookie_value(cookies, "csrftoken"), Some("abc=123".into()));
        assert_eq!(cookie_value(cookies, "sessionid"), Some("xyz".into()));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }
}
