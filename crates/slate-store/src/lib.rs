#![forbid(unsafe_code)]
//! SQLite-backed overlay store.
//!
//! Overlays are locally-owned annotation payloads keyed by
//! (scope, owner, issue key). The store is the only shared mutable resource
//! in the system; every method is a single transaction-per-call operation and
//! concurrent writers serialize through SQLite's own locking.
//!
//! Runtime defaults are intentionally conservative:
//! - `journal_mode = WAL` to allow concurrent readers while writers append
//! - `busy_timeout = 5s` to reduce transient lock failures under contention
//! - `foreign_keys = ON` for relational integrity
//!
//! Failure policy: SQL errors propagate; a malformed payload degrades that
//! one record to an empty mapping instead of aborting a batch fetch.

pub mod migrations;
pub mod schema;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use slate_core::overlay::{OverlayPayload, OverlayRecord, Scope, merge_overlay_maps, merge_payloads};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Busy timeout used for overlay store connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the overlay database.
pub struct OverlayStore {
    conn: Connection,
}

impl OverlayStore {
    /// Open (or create) the overlay database, apply runtime pragmas, and
    /// migrate the schema to the latest version.
    ///
    /// # Errors
    ///
    /// Returns an error if opening/configuring/migrating the database fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create overlay db directory {}", parent.display()))?;
            }
        }

        let mut conn = Connection::open(path)
            .with_context(|| format!("open overlay database {}", path.display()))?;
        configure_connection(&conn).context("configure sqlite pragmas")?;
        migrations::migrate(&mut conn).context("apply overlay store migrations")?;

        Ok(Self { conn })
    }

    /// In-memory store, used by tests and dry runs.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite setup fails.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory().context("open in-memory overlay database")?;
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)
            .context("configure sqlite pragmas")?;
        migrations::migrate(&mut conn).context("apply overlay store migrations")?;
        Ok(Self { conn })
    }

    /// Create-or-replace the payload for (scope, owner, issue key). The whole
    /// payload is replaced; use [`Self::patch`] for field-level merge.
    ///
    /// # Errors
    ///
    /// Fails on SQL errors, on unserializable payloads, and on user-scope
    /// writes without an owner.
    pub fn upsert(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_key: &str,
        project_key: Option<&str>,
        payload: &OverlayPayload,
    ) -> Result<()> {
        let owner = normalized_owner_for_write(scope, owner)?;
        let payload_json =
            serde_json::to_string(payload).context("serialize overlay payload")?;
        let now = now_iso();

        self.conn
            .execute(
                "INSERT INTO overlays (scope, owner, project_key, issue_key, payload, updated_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 ON CONFLICT (scope, owner, issue_key) DO UPDATE SET
                     payload = excluded.payload,
                     project_key = COALESCE(excluded.project_key, project_key),
                     updated_at = excluded.updated_at",
                params![scope.as_str(), owner, project_key, issue_key, payload_json, now],
            )
            .with_context(|| format!("upsert overlay for {issue_key}"))?;
        debug!(scope = scope.as_str(), issue_key, "overlay upserted");
        Ok(())
    }

    /// Field-merge `patch` over the stored payload, then upsert the result.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert`].
    pub fn patch(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_key: &str,
        project_key: Option<&str>,
        patch: &OverlayPayload,
    ) -> Result<()> {
        let current = self.get(scope, owner, issue_key)?;
        let merged = merge_payloads(&current, patch);
        self.upsert(scope, owner, issue_key, project_key, &merged)
    }

    /// Set overlay start/end dates. `None` fields are left untouched; a call
    /// with neither date is a no-op.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert`].
    pub fn set_dates(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_key: &str,
        project_key: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<()> {
        let mut patch = OverlayPayload::new();
        if let Some(start) = start_date {
            patch.insert(
                slate_core::overlay::KEY_START_DATE.to_owned(),
                serde_json::Value::String(start.to_owned()),
            );
        }
        if let Some(end) = end_date {
            patch.insert(
                slate_core::overlay::KEY_DUE_DATE.to_owned(),
                serde_json::Value::String(end.to_owned()),
            );
        }
        if patch.is_empty() {
            return Ok(());
        }
        self.patch(scope, owner, issue_key, project_key, &patch)
    }

    /// Set the overlay color.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert`].
    pub fn set_color(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_key: &str,
        project_key: Option<&str>,
        color: &str,
    ) -> Result<()> {
        let mut patch = OverlayPayload::new();
        patch.insert(
            slate_core::overlay::KEY_COLOR.to_owned(),
            serde_json::Value::String(color.to_owned()),
        );
        self.patch(scope, owner, issue_key, project_key, &patch)
    }

    /// Set or clear the hidden flag.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::upsert`].
    pub fn set_hidden(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_key: &str,
        project_key: Option<&str>,
        hidden: bool,
    ) -> Result<()> {
        let mut patch = OverlayPayload::new();
        patch.insert(
            slate_core::overlay::KEY_HIDDEN.to_owned(),
            serde_json::Value::Bool(hidden),
        );
        self.patch(scope, owner, issue_key, project_key, &patch)
    }

    /// Delete the overlay row for (scope, owner, issue key). Returns whether
    /// a row existed.
    ///
    /// # Errors
    ///
    /// Fails on SQL errors and on user-scope deletes without an owner.
    pub fn delete(&self, scope: Scope, owner: Option<&str>, issue_key: &str) -> Result<bool> {
        let owner = normalized_owner_for_write(scope, owner)?;
        let deleted = self
            .conn
            .execute(
                "DELETE FROM overlays WHERE scope = ?1 AND owner = ?2 AND issue_key = ?3",
                params![scope.as_str(), owner, issue_key],
            )
            .with_context(|| format!("delete overlay for {issue_key}"))?;
        Ok(deleted > 0)
    }

    /// Fetch a single payload; a missing row or malformed payload yields an
    /// empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get(&self, scope: Scope, owner: Option<&str>, issue_key: &str) -> Result<OverlayPayload> {
        let owner = scope.normalize_owner(owner);
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM overlays WHERE scope = ?1 AND owner = ?2 AND issue_key = ?3",
                params![scope.as_str(), owner, issue_key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("fetch overlay for {issue_key}"))?;
        Ok(raw.map_or_else(OverlayPayload::new, |payload| {
            decode_payload(issue_key, &payload)
        }))
    }

    /// Fetch all payloads for one scope, keyed by issue key, optionally
    /// narrowed to issue keys and/or project keys. User scope with an empty
    /// owner yields an empty result, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn fetch_many(
        &self,
        scope: Scope,
        owner: Option<&str>,
        issue_keys: Option<&[String]>,
        project_keys: Option<&[String]>,
    ) -> Result<HashMap<String, OverlayPayload>> {
        let owner = scope.normalize_owner(owner);
        if scope == Scope::User && owner.is_empty() {
            return Ok(HashMap::new());
        }

        let mut sql = String::from(
            "SELECT issue_key, payload FROM overlays WHERE scope = ?1 AND owner = ?2",
        );
        let mut bind: Vec<String> = vec![scope.as_str().to_owned(), owner];
        for (column, keys) in [("issue_key", issue_keys), ("project_key", project_keys)] {
            let Some(keys) = keys.filter(|keys| !keys.is_empty()) else {
                continue;
            };
            let placeholders: Vec<String> = keys
                .iter()
                .enumerate()
                .map(|(i, _)| format!("?{}", bind.len() + i + 1))
                .collect();
            sql.push_str(&format!(" AND {column} IN ({})", placeholders.join(", ")));
            bind.extend(keys.iter().cloned());
        }

        let mut stmt = self.conn.prepare(&sql).context("prepare overlay fetch")?;
        let rows = stmt
            .query_map(params_from_iter(bind), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .context("fetch overlays")?;

        let mut out = HashMap::new();
        for row in rows {
            let (issue_key, payload) = row.context("read overlay row")?;
            let decoded = decode_payload(&issue_key, &payload);
            out.insert(issue_key, decoded);
        }
        Ok(out)
    }

    /// Merged overlays per issue key: team scope first, then the user scope
    /// for `user_owner` layered on top field by field.
    ///
    /// # Errors
    ///
    /// Returns an error if either scope fetch fails; a lookup error is never
    /// swallowed into a wrong merge.
    pub fn merged(
        &self,
        issue_keys: Option<&[String]>,
        project_keys: Option<&[String]>,
        user_owner: Option<&str>,
    ) -> Result<HashMap<String, OverlayPayload>> {
        let team = self.fetch_many(Scope::Team, None, issue_keys, project_keys)?;
        let user = self.fetch_many(Scope::User, user_owner, issue_keys, project_keys)?;
        Ok(merge_overlay_maps(team, user))
    }

    /// Dump every overlay row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn export_all(&self) -> Result<Vec<OverlayRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT scope, owner, project_key, issue_key, payload, updated_at, created_at
                 FROM overlays ORDER BY scope, owner, issue_key",
            )
            .context("prepare overlay export")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
            .context("export overlays")?;

        let mut records = Vec::new();
        for row in rows {
            let (scope, owner, project_key, issue_key, payload, updated_at, created_at) =
                row.context("read overlay row")?;
            let scope: Scope = scope
                .parse()
                .with_context(|| format!("invalid scope stored for {issue_key}"))?;
            let payload = decode_payload(&issue_key, &payload);
            records.push(OverlayRecord {
                scope,
                owner,
                project_key,
                issue_key,
                payload,
                updated_at: Some(updated_at),
                created_at: Some(created_at),
            });
        }
        Ok(records)
    }

    /// Upsert every record. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Fails on the first record that cannot be written.
    pub fn import_all(&self, records: &[OverlayRecord]) -> Result<usize> {
        for record in records {
            let owner = if record.owner.is_empty() {
                None
            } else {
                Some(record.owner.as_str())
            };
            self.upsert(
                record.scope,
                owner,
                &record.issue_key,
                record.project_key.as_deref(),
                &record.payload,
            )?;
        }
        Ok(records.len())
    }

    /// Export the whole store to a pretty-printed JSON file. Returns the
    /// number of records written.
    ///
    /// # Errors
    ///
    /// Fails if the export query or the file write fails.
    pub fn export_to_file(&self, path: &Path) -> Result<usize> {
        let records = self.export_all()?;
        let json =
            serde_json::to_string_pretty(&records).context("serialize overlay export")?;
        std::fs::write(path, json)
            .with_context(|| format!("write overlay export {}", path.display()))?;
        Ok(records.len())
    }

    /// Import records from a JSON file previously produced by
    /// [`Self::export_to_file`]. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read/parsed or any record write fails.
    pub fn import_from_file(&self, path: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read overlay import {}", path.display()))?;
        let records: Vec<OverlayRecord> =
            serde_json::from_str(&raw).context("parse overlay import")?;
        self.import_all(&records)
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    let _journal_mode: String =
        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}

fn normalized_owner_for_write(scope: Scope, owner: Option<&str>) -> Result<String> {
    let owner = scope.normalize_owner(owner);
    if scope == Scope::User && owner.is_empty() {
        bail!("user-scope overlay writes require an owner");
    }
    Ok(owner)
}

/// Defensive decode: externally-imported payloads may be partially
/// malformed; a bad record degrades to an empty mapping rather than failing
/// the batch.
fn decode_payload(issue_key: &str, raw: &str) -> OverlayPayload {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!(issue_key, "malformed overlay payload, degrading to empty");
            OverlayPayload::new()
        }
    }
}

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
