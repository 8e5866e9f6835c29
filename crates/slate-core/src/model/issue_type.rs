//! Canonicalization of tracker issue-type names.
//!
//! The tracker is configured with localized (Korean) type names; the
//! projection engine works on a canonical English set and renders localized
//! labels back into group titles. Both directions are static const tables so
//! the mapping is testable without any runtime configuration.

/// Canonical name of the sub-task type. Always placed at the deepest
/// hierarchy level, never at L3.
pub const SUBTASK_TYPE: &str = "Task";

/// Canonical name of the epic type.
pub const EPIC_TYPE: &str = "Epic";

/// Fallback type when the tracker record carries no type name.
pub const DEFAULT_TYPE: &str = "Task";

/// Localized display label for the sub-task bucket suffix in group titles.
pub const SUBTASK_LABEL: &str = "하위업무";

/// Fallback item color for types without a dedicated default.
pub const DEFAULT_COLOR: &str = "#f59e0b";

/// Localized source name -> canonical type name.
const CANONICAL: &[(&str, &str)] = &[
    ("서버", "Server"),
    ("버그", "Bug"),
    ("디자인", "Design"),
    ("기획", "Planning"),
    ("하위업무", "Task"),
    ("스토리", "Story"),
    ("에픽", "Epic"),
    ("QA", "QA"),
    ("클라", "Client"),
];

/// Canonical type name -> localized display label for group titles.
const LABELS: &[(&str, &str)] = &[
    ("Task", SUBTASK_LABEL),
    ("Story", "스토리"),
    ("Bug", "버그"),
    ("Design", "디자인"),
    ("Planning", "기획"),
    ("QA", "QA"),
    ("Server", "서버"),
    ("Client", "클라"),
];

/// Canonical type name -> default item color.
const COLORS: &[(&str, &str)] = &[
    ("Bug", "#ef4444"),
    ("Task", "#3b82f6"),
    ("Story", "#10b981"),
    ("Epic", "#8b5cf6"),
];

fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Map a source type name to its canonical form; unmapped names pass through
/// unchanged.
#[must_use]
pub fn canonical_type<'a>(name: &'a str) -> &'a str {
    lookup(CANONICAL, name).unwrap_or(name)
}

/// Render a canonical type back to its localized label; unmapped types pass
/// through unchanged.
#[must_use]
pub fn localized_label<'a>(canonical: &'a str) -> &'a str {
    lookup(LABELS, canonical).unwrap_or(canonical)
}

/// Default visual color for a canonical type.
#[must_use]
pub fn default_color(canonical: &str) -> &'static str {
    lookup(COLORS, canonical).unwrap_or(DEFAULT_COLOR)
}
