//! Typed view over the tracker's issue search payload.
//!
//! Only the fields the projection engine reads are modeled; everything else
//! the tracker returns is kept opaquely in `extra` so epic links (whose field
//! id is deployment configuration) and future fields survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel project key for issues whose record carries no project.
pub const UNKNOWN_PROJECT: &str = "UNKNOWN";

/// An issue as returned by the external tracker. Read-only to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: IssueFields,
}

/// The named subset of tracker fields plus a flattened catch-all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "issuetype", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<NamedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NamedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(rename = "duedate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserField>,
    /// Unrecognized fields, notably the epic link custom field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `{ "name": ... }` wrapper used by issue type, status, and priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserField {
    #[serde(rename = "accountId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(
        rename = "displayName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
}

/// A structured reference to an epic, read from the configured link field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicRef {
    pub key: String,
    pub summary: Option<String>,
}

impl Issue {
    /// Project key, or [`UNKNOWN_PROJECT`] when the record has none.
    #[must_use]
    pub fn project_key(&self) -> &str {
        self.fields
            .project
            .as_ref()
            .and_then(|p| p.key.as_deref())
            .unwrap_or(UNKNOWN_PROJECT)
    }

    /// Raw (source-language) issue type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.fields
            .issue_type
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .unwrap_or(super::issue_type::DEFAULT_TYPE)
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref().and_then(|s| s.name.as_deref())
    }

    #[must_use]
    pub fn priority_name(&self) -> Option<&str> {
        self.fields
            .priority
            .as_ref()
            .and_then(|p| p.name.as_deref())
    }

    /// Display identity of the assignee: display name, falling back to the
    /// account id.
    #[must_use]
    pub fn assignee_label(&self) -> Option<&str> {
        let assignee = self.fields.assignee.as_ref()?;
        assignee
            .display_name
            .as_deref()
            .or(assignee.account_id.as_deref())
    }

    /// Read the epic link from the given custom field. Only populated when
    /// the field holds a structured reference with a `key`.
    #[must_use]
    pub fn epic_ref(&self, link_field: &str) -> Option<EpicRef> {
        let obj = self.fields.extra.get(link_field)?.as_object()?;
        let key = obj.get("key")?.as_str()?;
        let summary = obj
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Some(EpicRef {
            key: key.to_owned(),
            summary,
        })
    }
}
