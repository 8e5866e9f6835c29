//! `slate overlay`: inspect and mutate the local overlay store. Nothing in
//! here ever writes back to the external tracker.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use slate_core::config::Config;
use slate_core::overlay::{OverlayPayload, ParseScopeError, Scope};
use slate_store::OverlayStore;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OverlayArgs {
    /// Overlay layer to operate on: team or user.
    #[arg(long, default_value = "team", value_parser = parse_scope)]
    pub scope: Scope,

    /// Owner of the user layer. Required for user-scope writes.
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Project key recorded alongside the overlay, used for bulk lookups.
    #[arg(long, value_name = "KEY")]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: OverlayCommand,
}

#[derive(Subcommand, Debug)]
pub enum OverlayCommand {
    /// Merge a JSON object of overlay fields into an issue's payload.
    Set {
        issue_key: String,
        /// JSON object, e.g. '{"startDate": "2024-03-04", "color": "#ef4444"}'.
        payload: String,
        /// Replace the stored payload instead of merging into it.
        #[arg(long)]
        replace: bool,
    },
    /// Set the scheduled date range for an issue.
    Dates {
        issue_key: String,
        #[arg(long, value_name = "DATE")]
        start: Option<String>,
        #[arg(long, value_name = "DATE")]
        end: Option<String>,
    },
    /// Set the display color for an issue.
    Color { issue_key: String, color: String },
    /// Hide an issue from projected views.
    Hide {
        issue_key: String,
        /// Unhide instead.
        #[arg(long)]
        clear: bool,
    },
    /// Print the stored payload for an issue in this scope.
    Show { issue_key: String },
    /// Remove the overlay row for an issue in this scope.
    Rm { issue_key: String },
    /// Dump every overlay row to a JSON file.
    Export {
        #[arg(long, value_name = "PATH", default_value = "overlays.json")]
        out: PathBuf,
    },
    /// Load overlay rows from a JSON file produced by export.
    Import { input: PathBuf },
}

fn parse_scope(s: &str) -> Result<Scope, ParseScopeError> {
    s.parse()
}

/// # Errors
///
/// Fails when the store cannot be opened or the requested mutation fails.
pub fn run_overlay(args: &OverlayArgs, config: &Config) -> Result<()> {
    let store = OverlayStore::open(&config.overlay.db_path)?;
    apply(&store, args)
}

fn apply(store: &OverlayStore, args: &OverlayArgs) -> Result<()> {
    let scope = args.scope;
    let owner = args.owner.as_deref();
    let project = args.project.as_deref();

    match &args.command {
        OverlayCommand::Set {
            issue_key,
            payload,
            replace,
        } => {
            let payload = parse_payload(payload)?;
            if *replace {
                store.upsert(scope, owner, issue_key, project, &payload)?;
            } else {
                store.patch(scope, owner, issue_key, project, &payload)?;
            }
        }
        OverlayCommand::Dates {
            issue_key,
            start,
            end,
        } => {
            if start.is_none() && end.is_none() {
                bail!("nothing to set: pass --start and/or --end");
            }
            store.set_dates(scope, owner, issue_key, project, start.as_deref(), end.as_deref())?;
        }
        OverlayCommand::Color { issue_key, color } => {
            store.set_color(scope, owner, issue_key, project, color)?;
        }
        OverlayCommand::Hide { issue_key, clear } => {
            store.set_hidden(scope, owner, issue_key, project, !clear)?;
        }
        OverlayCommand::Show { issue_key } => {
            let payload = store.get(scope, owner, issue_key)?;
            let json = serde_json::to_string_pretty(&payload)
                .context("serialize overlay payload")?;
            println!("{json}");
        }
        OverlayCommand::Rm { issue_key } => {
            if store.delete(scope, owner, issue_key)? {
                println!("removed overlay for {issue_key}");
            } else {
                println!("no overlay stored for {issue_key}");
            }
        }
        OverlayCommand::Export { out } => {
            let count = store.export_to_file(out)?;
            println!("exported {count} overlay rows to {}", out.display());
        }
        OverlayCommand::Import { input } => {
            let count = store.import_from_file(input)?;
            println!("imported {count} overlay rows from {}", input.display());
        }
    }
    Ok(())
}

fn parse_payload(raw: &str) -> Result<OverlayPayload> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("parse overlay payload as JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => bail!("overlay payload must be a JSON object, got {other}"),
    }
}
