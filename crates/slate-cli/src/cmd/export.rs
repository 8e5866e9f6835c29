//! `slate export`: fetch issues, apply overlays, project, filter, and write
//! the result as JSON or a self-contained HTML page.

use crate::jira::JiraClient;
use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use serde_json::Value;
use slate_core::config::Config;
use slate_core::date::normalize_date;
use slate_core::overlay::attach_overlays;
use slate_core::source::search_all;
use slate_core::timeline::filter::filter_items;
use slate_core::timeline::{GroupBy, TimelineView, build_view};
use slate_store::OverlayStore;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project keys to fetch (defaults to the configured projects).
    #[arg(long, value_delimiter = ',', value_name = "KEY")]
    pub projects: Vec<String>,

    /// Grouping mode: project, project-flat, or assignee.
    #[arg(long, value_name = "MODE")]
    pub group_by: Option<String>,

    /// Owner whose personal overlay layer is applied on top of the team layer.
    #[arg(long, value_name = "OWNER")]
    pub user: Option<String>,

    /// Keep only items whose range ends on or after this date.
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Keep only items whose range starts on or before this date.
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file (defaults to timeline.json or timeline.html).
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

/// # Errors
///
/// Fails on tracker or overlay-store errors, and when the output file
/// cannot be written.
pub fn run_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let projects: &[String] = if args.projects.is_empty() {
        &config.timeline.projects
    } else {
        &args.projects
    };
    if projects.is_empty() {
        bail!("at least one project key is required (--projects or [timeline] projects)");
    }

    let group_by = GroupBy::parse(args.group_by.as_deref().unwrap_or(&config.timeline.group_by));
    let query = search_query(projects);

    let client = JiraClient::from_config(&config.tracker)?;
    let issues = search_all(&client, &query, None, config.timeline.fetch_cap)?;
    info!(fetched = issues.len(), query = query.as_str(), "issues fetched");

    let store = OverlayStore::open(&config.overlay.db_path)?;
    let keys: Vec<String> = issues.iter().map(|i| i.key.clone()).collect();
    let overlays = store.merged(Some(&keys), None, args.user.as_deref())?;

    let enriched = attach_overlays(issues, &overlays);
    let mut view = build_view(&enriched, group_by, &config.timeline.epic_link_field);
    view.items = filter_items(
        view.items,
        normalize_date(args.from.as_deref()),
        normalize_date(args.to.as_deref()),
    );

    let out = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(match args.format {
            ExportFormat::Json => "timeline.json",
            ExportFormat::Html => "timeline.html",
        })
    });
    write_view(&view, args.format, &out)?;
    info!(
        groups = view.groups.len(),
        items = view.items.len(),
        out = %out.display(),
        "timeline exported"
    );
    Ok(())
}

fn search_query(projects: &[String]) -> String {
    format!("project in ({})", projects.join(","))
}

fn write_view(view: &TimelineView, format: ExportFormat, out: &Path) -> Result<()> {
    let body = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(view).context("serialize timeline view")?
        }
        ExportFormat::Html => render_html(view)?,
    };
    std::fs::write(out, body)
        .with_context(|| format!("write timeline export {}", out.display()))?;
    Ok(())
}

/// Render the view into a standalone vis-timeline page. The data payload is
/// inlined into a `<script>` block, so `</` must be escaped to keep the
/// parser from closing the tag early.
fn render_html(view: &TimelineView) -> Result<String> {
    let mut data = serde_json::to_value(view).context("serialize timeline view")?;
    if let Some(items) = data.get_mut("items").and_then(Value::as_array_mut) {
        for item in items {
            let style = item.get("color").and_then(Value::as_str).map(|color| {
                format!("background-color: {color}; border-color: {color}; color: #111;")
            });
            if let (Some(obj), Some(style)) = (item.as_object_mut(), style) {
                obj.insert("style".to_owned(), Value::String(style));
            }
        }
    }
    let payload = serde_json::to_string(&data)
        .context("serialize timeline payload")?
        .replace("</", "<\\/");
    Ok(HTML_TEMPLATE.replace("__DATA__", &payload))
}

const HTML_TEMPLATE: &str = r#"<!doctype html>
<html lang="ko">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Timeline</title>
  <link rel="stylesheet" href="https://unpkg.com/vis-timeline@latest/styles/vis-timeline-graph2d.min.css" />
  <style>
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Noto Sans KR', 'Apple SD Gothic Neo', sans-serif; }
    #app { height: 100vh; }
    .vis-item.vis-range { border-radius: 6px; }
    .header { padding: 10px 12px; border-bottom: 1px solid #e5e7eb; display:flex; align-items:center; gap:12px; }
    .badge { font-size:12px; background:#eef2ff; color:#3730a3; padding:2px 8px; border-radius:999px; }
  </style>
</head>
<body>
  <div class="header">
    <strong>Read-only Timeline</strong>
    <span class="badge">Local overlays applied (not written to the tracker)</span>
  </div>
  <div id="app"></div>
  <script src="https://unpkg.com/vis-data@latest/peer/umd/vis-data.min.js"></script>
  <script src="https://unpkg.com/vis-timeline@latest/peer/umd/vis-timeline-graph2d.min.js"></script>
  <script>
    const data = __DATA__;
    const container = document.getElementById('app');
    const items = new vis.DataSet(data.items.map(it => ({
      id: it.id,
      group: it.group,
      content: it.content,
      start: it.start ? new Date(it.start) : null,
      end: it.end ? new Date(it.end + 'T23:59:59') : null,
      style: it.style || ''
    })));
    const groups = new vis.DataSet(data.groups);

    const today = new Date();
    const startWindow = new Date(today.getFullYear(), today.getMonth(), today.getDate() - 14);
    const endWindow = new Date(today.getFullYear(), today.getMonth(), today.getDate() + 45);

    const timeline = new vis.Timeline(container, items, groups, {
      stack: true,
      orientation: 'top',
      multiselect: false,
      showCurrentTime: true,
      zoomKey: 'ctrlKey',
      margin: { item: 6, axis: 12 },
      min: startWindow,
      max: endWindow,
      timeAxis: { scale: 'day', step: 1 },
      zoomMin: 1000 * 60 * 60 * 24,
      zoomMax: 1000 * 60 * 60 * 24 * 365
    });

    timeline.addCustomTime(new Date(), 'now');
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::{ExportFormat, render_html, search_query, write_view};
    use slate_core::timeline::{Item, TimelineView};

    fn sample_view(content: &str) -> TimelineView {
        TimelineView {
            groups: Vec::new(),
            items: vec![Item {
                id: "SR-1".to_owned(),
                group: "SR_PROJECT".to_owned(),
                content: content.to_owned(),
                title: "SR-1".to_owned(),
                start: Some("2024-01-01".to_owned()),
                end: Some("2024-01-02".to_owned()),
                color: "#ef4444".to_owned(),
                status: None,
                priority: None,
                issue_type: "Bug".to_owned(),
                url: None,
                overlay: slate_core::overlay::OverlayPayload::new(),
            }],
        }
    }

    #[test]
    fn query_joins_project_keys() {
        assert_eq!(
            search_query(&["SR".to_owned(), "OPS".to_owned()]),
            "project in (SR,OPS)"
        );
    }

    #[test]
    fn html_escapes_closing_tags_and_injects_styles() {
        let html = render_html(&sample_view("</script><b>x</b>")).expect("render");
        assert!(html.contains("<\\/script>"));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("background-color: #ef4444; border-color: #ef4444; color: #111;"));
    }

    #[test]
    fn written_files_match_the_requested_format() {
        let dir = tempfile::tempdir().expect("temp dir");
        let view = sample_view("Crash on save");

        let json_path = dir.path().join("timeline.json");
        write_view(&view, ExportFormat::Json, &json_path).expect("write json");
        let raw = std::fs::read_to_string(&json_path).expect("read json");
        let parsed: TimelineView = serde_json::from_str(&raw).expect("json parses back");
        assert_eq!(parsed, view);

        let html_path = dir.path().join("timeline.html");
        write_view(&view, ExportFormat::Html, &html_path).expect("write html");
        let html = std::fs::read_to_string(&html_path).expect("read html");
        assert!(html.contains("vis.Timeline"));
        assert!(!html.contains("__DATA__"));
        assert!(html.contains("Crash on save"));
    }
}
