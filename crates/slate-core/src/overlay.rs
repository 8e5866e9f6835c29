//! Locally-owned overlay annotations and their merge semantics.
//!
//! An overlay is an opaque JSON object keyed by (scope, owner, issue key) in
//! the external store. Two scopes exist: `team` (shared, owner normalized to
//! empty) and `user` (personal, requires a non-empty owner). Merging layers
//! the user payload over the team payload field by field: a user field wins
//! on conflict, team fields absent from the user payload survive.

use crate::model::Issue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Annotation payload: a JSON object. Unknown keys pass through opaquely.
pub type OverlayPayload = Map<String, Value>;

/// Overlay field read as the item's start date.
pub const KEY_START_DATE: &str = "startDate";
/// Primary overlay field read as the item's end date.
pub const KEY_DUE_DATE: &str = "dueDate";
/// Legacy alias for [`KEY_DUE_DATE`], consulted second.
pub const KEY_END_DATE: &str = "endDate";
/// Overlay field overriding the item's color.
pub const KEY_COLOR: &str = "color";
/// Truthy value excludes the issue from projection entirely.
pub const KEY_HIDDEN: &str = "hidden";

/// Visibility tier of an overlay record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Team,
    User,
}

impl Scope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::User => "user",
        }
    }

    /// Owner as stored: team scope always normalizes to empty.
    #[must_use]
    pub fn normalize_owner(self, owner: Option<&str>) -> String {
        match self {
            Self::Team => String::new(),
            Self::User => owner.unwrap_or_default().to_owned(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown overlay scope '{0}': expected 'team' or 'user'")]
pub struct ParseScopeError(pub String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "user" => Ok(Self::User),
            other => Err(ParseScopeError(other.to_owned())),
        }
    }
}

/// A full overlay row as exported from / imported into the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRecord {
    pub scope: Scope,
    #[serde(default)]
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    pub issue_key: String,
    #[serde(default)]
    pub payload: OverlayPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// An issue with its merged overlay attached. The issue itself is never
/// mutated; an absent overlay is represented as an empty payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedIssue {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub overlay: OverlayPayload,
}

/// Layer `user` over `team`, field by field. User wins per key; team keys
/// absent from the user payload survive.
#[must_use]
pub fn merge_payloads(team: &OverlayPayload, user: &OverlayPayload) -> OverlayPayload {
    let mut merged = team.clone();
    for (key, value) in user {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Merge per-issue overlay maps from both scopes into one mapping.
#[must_use]
pub fn merge_overlay_maps(
    team: HashMap<String, OverlayPayload>,
    user: HashMap<String, OverlayPayload>,
) -> HashMap<String, OverlayPayload> {
    let mut merged = team;
    for (issue_key, user_payload) in user {
        let entry = merged.entry(issue_key).or_default();
        *entry = merge_payloads(entry, &user_payload);
    }
    merged
}

/// Attach merged overlays to issues by key. Issues without an overlay pass
/// through with an empty payload.
#[must_use]
pub fn attach_overlays(
    issues: Vec<Issue>,
    overlays: &HashMap<String, OverlayPayload>,
) -> Vec<EnrichedIssue> {
    issues
        .into_iter()
        .map(|issue| {
            let overlay = overlays.get(&issue.key).cloned().unwrap_or_default();
            EnrichedIssue { issue, overlay }
        })
        .collect()
}

/// Read a non-empty string field from a payload.
#[must_use]
pub fn payload_str<'a>(payload: &'a OverlayPayload, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Truthiness in the sense overlay consumers expect: `false`, `null`, `0`,
/// empty strings/arrays/objects are falsy, everything else is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl EnrichedIssue {
    /// Whether the merged overlay marks this issue hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.overlay.get(KEY_HIDDEN).is_some_and(is_truthy)
    }
}
