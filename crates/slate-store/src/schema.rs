//! Canonical SQLite schema for the overlay store.
//!
//! One row per (scope, owner, issue key); a later write replaces the payload
//! for that exact key. `owner` is always empty for team scope. The payload is
//! an opaque JSON object so unknown annotation keys survive round trips.

/// Migration v1: the overlays table plus lookup indexes.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS overlays (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scope TEXT NOT NULL CHECK (scope IN ('team', 'user')),
    owner TEXT NOT NULL DEFAULT '',
    project_key TEXT,
    issue_key TEXT NOT NULL CHECK (length(trim(issue_key)) > 0),
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (scope, owner, issue_key)
);

CREATE INDEX IF NOT EXISTS idx_overlays_issue ON overlays(issue_key);
CREATE INDEX IF NOT EXISTS idx_overlays_project ON overlays(project_key);
";
