//! Confirmation and submission state machine.
//!
//! The original page tracked this with four module-level flags
//! (`in progress`, `bulk`, `current action`, `current id`); here the whole
//! flow is one [`DashboardFlow`] value, so stale cross-field combinations
//! cannot exist. Validation and payload construction are pure functions:
//! the frontend only wires their results to the modal and the network call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wire::{ActionRequest, ActionTarget};
use crate::Role;

/// What the operator asked to do with the targeted registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Activate the account and assign the selected role.
    Approve,
    /// Turn the request down, with a shared reason.
    Reject,
}

impl ActionKind {
    /// Wire value, also used for modal copy.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
        }
    }

    /// Confirm-button label.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Approve => "Approve",
            ActionKind::Reject => "Reject",
        }
    }

    /// Past-tense form for success notices.
    pub fn past_tense(self) -> &'static str {
        match self {
            ActionKind::Approve => "approved",
            ActionKind::Reject => "rejected",
        }
    }
}

/// Transient description of a gesture awaiting confirmation.
///
/// Created when a row button or the bulk-reject entry is clicked and
/// discarded on confirm, cancel or validation failure. Bulk approve never
/// produces an intent: it skips the modal and goes straight to submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionIntent {
    /// One row's approve or reject button.
    Single {
        /// Which button was clicked.
        action: ActionKind,
        /// The row's registration id.
        id: String,
    },
    /// Reject every selected row with one shared reason.
    BulkReject {
        /// Ids captured from the selection at gesture time.
        ids: Vec<String>,
    },
}

impl ActionIntent {
    /// The action this intent will submit.
    pub fn action(&self) -> ActionKind {
        match self {
            ActionIntent::Single { action, .. } => *action,
            ActionIntent::BulkReject { .. } => ActionKind::Reject,
        }
    }

    /// Whether the modal must show the rejection-reason field.
    pub fn needs_reason(&self) -> bool {
        self.action() == ActionKind::Reject
    }

    /// Confirmation copy shown in the modal body.
    pub fn prompt(&self) -> String {
        match self {
            ActionIntent::Single { action, .. } => {
                format!("Are you sure you want to {} this registration?", action.as_str())
            },
            ActionIntent::BulkReject { ids } => {
                format!("Reject {} selected user{}?", ids.len(), plural(ids.len()))
            },
        }
    }
}

/// The single state-machine value driving the modal and the action lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardFlow {
    /// Nothing pending; all controls live.
    #[default]
    Idle,
    /// Modal open, waiting for confirm or cancel. No lock held.
    Confirming(ActionIntent),
    /// Request on the wire. Entered synchronously before the call is
    /// issued and left synchronously when it resolves, so no interleaved
    /// event can observe a half-applied state.
    Submitting(ActionRequest),
}

impl DashboardFlow {
    /// The exclusive in-flight lock: true while a submission is
    /// outstanding. Every action trigger must be disabled while held.
    pub fn is_locked(&self) -> bool {
        matches!(self, DashboardFlow::Submitting(_))
    }

    /// Role selectors are disabled while a reject confirmation is pending
    /// and while any submission is on the wire.
    pub fn roles_disabled(&self) -> bool {
        match self {
            DashboardFlow::Idle => false,
            DashboardFlow::Confirming(intent) => intent.needs_reason(),
            DashboardFlow::Submitting(_) => true,
        }
    }

    /// Whether the confirmation modal is visible.
    pub fn modal_open(&self) -> bool {
        !matches!(self, DashboardFlow::Idle)
    }
}

/// A confirmation rejected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Bulk action with nothing selected.
    #[error("Select at least one user.")]
    EmptySelection,
    /// Reject confirmed with a blank reason.
    #[error("Rejection reason is required.")]
    MissingReason,
    /// Approve confirmed while a target has no role picked.
    #[error("Please select a role for all users before approving.")]
    MissingRole,
}

/// Validate a confirmed intent and build its request payload.
///
/// `roles` is the operator's current per-row role choice; `reason` is the
/// raw reason field. Runs before the lock is acquired: an `Err` means no
/// network call happens and the flow returns to idle.
pub fn confirm_intent(
    intent: &ActionIntent,
    roles: &HashMap<String, Role>,
    reason: &str,
) -> Result<ActionRequest, ValidationError> {
    match intent {
        ActionIntent::Single { action: ActionKind::Approve, id } => {
            approve_request(std::slice::from_ref(id), roles)
        },
        ActionIntent::Single { action: ActionKind::Reject, id } => {
            reject_request(std::slice::from_ref(id), reason)
        },
        ActionIntent::BulkReject { ids } => reject_request(ids, reason),
    }
}

/// Build the payload for the modal-free bulk-approve path.
pub fn bulk_approve_request(
    ids: &[String],
    roles: &HashMap<String, Role>,
) -> Result<ActionRequest, ValidationError> {
    approve_request(ids, roles)
}

/// Success notice shown after the server applied the batch.
pub fn outcome_notice(count: usize, action: ActionKind) -> String {
    format!("{count} user{} {}.", plural(count), action.past_tense())
}

fn approve_request(
    ids: &[String],
    roles: &HashMap<String, Role>,
) -> Result<ActionRequest, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let users = ids
        .iter()
        .map(|id| {
            let role = roles.get(id).copied().ok_or(ValidationError::MissingRole)?;
            Ok(ActionTarget { id: id.clone(), role: Some(role) })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ActionRequest {
        action: ActionKind::Approve,
        reason: None,
        users,
    })
}

fn reject_request(ids: &[String], reason: &str) -> Result<ActionRequest, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::MissingReason);
    }
    Ok(ActionRequest {
        action: ActionKind::Reject,
        reason: Some(reason.to_string()),
        users: ids
            .iter()
            .map(|id| ActionTarget { id: id.clone(), role: None })
            .collect(),
    })
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{PendingSet, Registration};

    fn roles(entries: &[(&str, Role)]) -> HashMap<String, Role> {
        entries
            .iter()
            .map(|(id, role)| (id.to_string(), *role))
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn bulk_reject_with_empty_selection_never_builds_a_request() {
        let intent = ActionIntent::BulkReject { ids: vec![] };
        assert_eq!(
            confirm_intent(&intent, &HashMap::new(), "duplicate"),
            Err(ValidationError::EmptySelection)
        );
    }

    #[test]
    fn reject_requires_a_non_blank_reason() {
        let single = ActionIntent::Single {
            action: ActionKind::Reject,
            id: "a".into(),
        };
        assert_eq!(
            confirm_intent(&single, &HashMap::new(), "   "),
            Err(ValidationError::MissingReason)
        );

        let bulk = ActionIntent::BulkReject { ids: ids(&["a", "b"]) };
        assert_eq!(
            confirm_intent(&bulk, &HashMap::new(), ""),
            Err(ValidationError::MissingReason)
        );
    }

    #[test]
    fn approve_requires_a_role_for_every_target() {
        let intent = ActionIntent::Single {
            action: ActionKind::Approve,
            id: "c".into(),
        };
        assert_eq!(
            confirm_intent(&intent, &HashMap::new(), ""),
            Err(ValidationError::MissingRole)
        );

        let partial = roles(&[("a", Role::Student)]);
        assert_eq!(
            bulk_approve_request(&ids(&["a", "b"]), &partial),
            Err(ValidationError::MissingRole)
        );
    }

    #[test]
    fn bulk_reject_builds_the_shared_reason_payload() {
        let intent = ActionIntent::BulkReject { ids: ids(&["a", "b"]) };
        let request = confirm_intent(&intent, &HashMap::new(), "duplicate").expect("valid");
        assert_eq!(request.action, ActionKind::Reject);
        assert_eq!(request.reason.as_deref(), Some("duplicate"));
        assert_eq!(
            request.users,
            vec![
                ActionTarget { id: "a".into(), role: None },
                ActionTarget { id: "b".into(), role: None },
            ]
        );
    }

    #[test]
    fn single_approve_carries_the_selected_role() {
        let intent = ActionIntent::Single {
            action: ActionKind::Approve,
            id: "c".into(),
        };
        let request =
            confirm_intent(&intent, &roles(&[("c", Role::Teacher)]), "").expect("valid");
        assert_eq!(request.action, ActionKind::Approve);
        assert_eq!(request.reason, None);
        assert_eq!(
            request.users,
            vec![ActionTarget { id: "c".into(), role: Some(Role::Teacher) }]
        );
    }

    #[test]
    fn successful_submission_removes_exactly_the_affected_ids() {
        let joined = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let reg = |id: &str| Registration {
            id: id.to_string(),
            full_name: None,
            email: None,
            phone_number: None,
            role: None,
            date_joined: joined,
        };
        let mut pending = PendingSet::from_records(vec![reg("a"), reg("b"), reg("c")]);

        let intent = ActionIntent::BulkReject { ids: ids(&["a", "b"]) };
        let request = confirm_intent(&intent, &HashMap::new(), "duplicate").expect("valid");
        pending.remove_ids(&request.affected_ids());

        assert_eq!(pending.len(), 1);
        assert!(pending.contains("c"));
    }

    #[test]
    fn lock_is_held_exactly_while_submitting() {
        let idle = DashboardFlow::Idle;
        assert!(!idle.is_locked());
        assert!(!idle.modal_open());

        let confirming = DashboardFlow::Confirming(ActionIntent::Single {
            action: ActionKind::Reject,
            id: "a".into(),
        });
        // Opening the modal must not take the lock.
        assert!(!confirming.is_locked());
        assert!(confirming.modal_open());
        assert!(confirming.roles_disabled());

        let approving = DashboardFlow::Confirming(ActionIntent::Single {
            action: ActionKind::Approve,
            id: "a".into(),
        });
        assert!(!approving.roles_disabled());

        let request = bulk_approve_request(&ids(&["a"]), &roles(&[("a", Role::Parent)]))
            .expect("valid");
        let submitting = DashboardFlow::Submitting(request);
        assert!(submitting.is_locked());
        assert!(submitting.roles_disabled());
    }

    #[test]
    fn outcome_notice_matches_count() {
        assert_eq!(outcome_notice(1, ActionKind::Approve), "1 user approved.");
        assert_eq!(outcome_notice(3, ActionKind::Reject), "3 users rejected.");
    }

    #[test]
    fn modal_copy_tracks_the_intent() {
        let single = ActionIntent::Single {
            action: ActionKind::Approve,
            id: "a".into(),
        };
        assert_eq!(single.prompt(), "Are you sure you want to approve this registration?");
        assert!(!single.needs_reason());

        let bulk = ActionIntent::BulkReject { ids: ids(&["a", "b"]) };
        assert_eq!(bulk.prompt(), "Reject 2 selected users?");
        assert!(bulk.needs_reason());
    }
}
