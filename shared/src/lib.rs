//! Data model and dashboard logic shared between the ClassDesk admin
//! frontend and the registration backend.
//!
//! Everything in this crate is DOM-free on purpose: the view projection
//! ([`filters`]), the confirmation/submission state machine ([`flow`]) and
//! the wire contract ([`wire`]) are plain functions over plain data, so the
//! whole decision layer is testable with `cargo test` on the host. The
//! frontend only adds rendering and the actual network call on top.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod filters;
pub mod flow;
pub mod wire;

/// Account role assigned when a registration is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular student account.
    Student,
    /// Teaching staff account.
    Teacher,
    /// Parent/guardian account.
    Parent,
    /// School administrator account.
    Admin,
}

impl Role {
    /// Every selectable role, in the order the role dropdown shows them.
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Parent, Role::Admin];

    /// Wire value for this role, matching the backend's role map.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        }
    }

    /// Parse a role from a form control value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "parent" => Some(Role::Parent),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Human-readable label for the role dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Parent => "Parent",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending registration request, as embedded in the page payload.
///
/// Records are hydrated once at page load and never mutated client-side;
/// the only lifecycle event is removal from the [`PendingSet`] after the
/// server confirms an approve/reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Opaque stable identifier issued by the server.
    pub id: String,
    /// Display name; may be absent for incomplete sign-ups.
    pub full_name: Option<String>,
    /// Contact e-mail, if provided.
    pub email: Option<String>,
    /// Contact phone number, if provided.
    pub phone_number: Option<String>,
    /// Role requested at sign-up; `None` until the operator picks one.
    pub role: Option<Role>,
    /// When the registration request was submitted.
    pub date_joined: DateTime<Utc>,
}

/// The canonical, ordered list of still-undecided registrations.
///
/// Order is the server-provided order; ids are unique. All filtering and
/// sorting happens on projections ([`filters::apply_filters`]), never on
/// this set itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingSet {
    records: Vec<Registration>,
}

impl PendingSet {
    /// Build the set from the hydrated payload, keeping insertion order.
    ///
    /// Duplicate ids are dropped (first occurrence wins) so the uniqueness
    /// invariant holds even against a malformed payload.
    pub fn from_records(records: Vec<Registration>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();
        PendingSet { records }
    }

    /// The records in canonical order.
    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    /// Number of pending registrations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there is nothing left to decide.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a registration with this id is still pending.
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Drop every record whose id appears in `ids`.
    ///
    /// Called only after the server confirmed the action; ids not present
    /// are ignored.
    pub fn remove_ids(&mut self, ids: &[String]) {
        self.records.retain(|r| !ids.iter().any(|id| id == &r.id));
    }
}
