//! Data model for externally-sourced issues.

pub mod issue;
pub mod issue_type;

pub use issue::{EpicRef, Issue, IssueFields, NamedField, ProjectField, UserField};
