//! Timeline projection: classify enriched issues and emit a flat list of
//! hierarchy groups plus positioned items.
//!
//! Hierarchical mode builds up to four levels per project (project, epic,
//! issue type, sub-task bucket). Flat modes emit a single level keyed by one
//! dimension (assignee or project). Groups and items are rebuilt from scratch
//! on every call and ordering is fully deterministic: every bucket preserves
//! first-seen input order, which is the tie-break contract for sub-task
//! parent attribution and type order keys.

pub mod filter;

use crate::date::{normalize_date, to_iso};
use crate::model::issue_type::{
    EPIC_TYPE, SUBTASK_LABEL, SUBTASK_TYPE, canonical_type, default_color, localized_label,
};
use crate::model::{EpicRef, issue::UNKNOWN_PROJECT};
use crate::overlay::{
    EnrichedIssue, KEY_COLOR, KEY_DUE_DATE, KEY_END_DATE, KEY_START_DATE, OverlayPayload,
    payload_str,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel group id for issues without an assignee in flat-assignee mode.
pub const UNASSIGNED_GROUP: &str = "__unassigned__";
/// Sentinel group id for issues without a project in flat-project mode.
pub const UNKNOWN_GROUP: &str = "__unknown__";

/// Requested grouping dimension.
///
/// `project` selects the four-level hierarchy. `assignee` — and any
/// unrecognized mode string — selects flat single-level grouping by
/// assignee; `project-flat` selects flat grouping by project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Project,
    Assignee,
    FlatProject,
}

impl GroupBy {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "project" => Self::Project,
            "project-flat" | "project_flat" => Self::FlatProject,
            _ => Self::Assignee,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Assignee => "assignee",
            Self::FlatProject => "project-flat",
        }
    }
}

/// A hierarchy node in the projected view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub title: String,
    pub content: String,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    pub level: u8,
    pub order: u32,
}

/// A timeline-placeable record. Never emitted with both dates undetermined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub group: String,
    pub content: String,
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    pub color: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    pub issue_type: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub overlay: OverlayPayload,
}

/// The projected view: groups sorted by (project, order), items in input
/// order per project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub groups: Vec<Group>,
    pub items: Vec<Item>,
}

// ---------------------------------------------------------------------------
// Group id composition
// ---------------------------------------------------------------------------

// Id composition lives in free functions so group emission and item
// assignment build ids from the same source.

fn project_group_id(project: &str) -> String {
    format!("{project}_PROJECT")
}

fn epic_group_id(project: &str, epic: &str) -> String {
    format!("{project}_EPIC_{epic}")
}

fn type_under_epic_id(project: &str, epic: &str, issue_type: &str) -> String {
    format!("{project}_EPIC_{epic}_{issue_type}")
}

fn type_direct_id(project: &str, issue_type: &str) -> String {
    format!("{project}_DIRECT_{issue_type}")
}

fn subtask_bucket_id(parent_type_group_id: &str) -> String {
    format!("{parent_type_group_id}_TASK")
}

/// Tagged hierarchy node kind. Each kind carries its own id-composition
/// fields and discovery indices, so id, level, and order key are computed in
/// one auditable place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    Project {
        project: String,
    },
    Epic {
        project: String,
        epic: String,
        epic_order: u32,
    },
    TypeUnderEpic {
        project: String,
        epic: String,
        epic_order: u32,
        issue_type: String,
        type_index: u32,
    },
    TypeDirect {
        project: String,
        issue_type: String,
        type_index: u32,
    },
    /// Sub-task bucket under a type node; `epic` is `None` for the
    /// project-direct variant.
    SubtaskBucket {
        project: String,
        epic: Option<(String, u32)>,
        issue_type: String,
        type_index: u32,
    },
}

impl GroupKind {
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Project { project } => project_group_id(project),
            Self::Epic { project, epic, .. } => epic_group_id(project, epic),
            Self::TypeUnderEpic {
                project,
                epic,
                issue_type,
                ..
            } => type_under_epic_id(project, epic, issue_type),
            Self::TypeDirect {
                project, issue_type, ..
            } => type_direct_id(project, issue_type),
            Self::SubtaskBucket {
                project,
                epic,
                issue_type,
                ..
            } => {
                let parent = match epic {
                    Some((epic, _)) => type_under_epic_id(project, epic, issue_type),
                    None => type_direct_id(project, issue_type),
                };
                subtask_bucket_id(&parent)
            }
        }
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Project { .. } => 1,
            Self::Epic { .. } => 2,
            Self::TypeUnderEpic { .. } | Self::TypeDirect { .. } => 3,
            Self::SubtaskBucket { .. } => 4,
        }
    }

    /// Sibling order key. Preserves the original tie-break arithmetic:
    /// epics count from 1 in discovery order, type nodes fold the epic order
    /// and the type's discovery index together, direct (epic-less) nodes use
    /// the 1000/10000 bands.
    #[must_use]
    pub const fn order(&self) -> u32 {
        match self {
            Self::Project { .. } => 0,
            Self::Epic { epic_order, .. } => *epic_order,
            Self::TypeUnderEpic {
                epic_order,
                type_index,
                ..
            } => *epic_order * 100 + *type_index,
            Self::TypeDirect { type_index, .. } => 1000 + *type_index,
            Self::SubtaskBucket {
                epic: Some((_, epic_order)),
                type_index,
                ..
            } => *epic_order * 1000 + *type_index * 10 + 1,
            Self::SubtaskBucket {
                epic: None,
                type_index,
                ..
            } => 10000 + *type_index * 10 + 1,
        }
    }

    fn project(&self) -> &str {
        match self {
            Self::Project { project }
            | Self::Epic { project, .. }
            | Self::TypeUnderEpic { project, .. }
            | Self::TypeDirect { project, .. }
            | Self::SubtaskBucket { project, .. } => project,
        }
    }

    fn epic_key(&self) -> Option<&str> {
        match self {
            Self::Epic { epic, .. } | Self::TypeUnderEpic { epic, .. } => Some(epic),
            Self::SubtaskBucket { epic, .. } => epic.as_ref().map(|(key, _)| key.as_str()),
            Self::Project { .. } | Self::TypeDirect { .. } => None,
        }
    }

    fn issue_type(&self) -> Option<&str> {
        match self {
            Self::TypeUnderEpic { issue_type, .. }
            | Self::TypeDirect { issue_type, .. }
            | Self::SubtaskBucket { issue_type, .. } => Some(issue_type),
            Self::Project { .. } | Self::Epic { .. } => None,
        }
    }
}

impl Group {
    fn from_kind(kind: &GroupKind, title: String) -> Self {
        Self {
            id: kind.id(),
            content: title.clone(),
            title,
            project: kind.project().to_owned(),
            epic_key: kind.epic_key().map(str::to_owned),
            issue_type: kind.issue_type().map(str::to_owned),
            level: kind.level(),
            order: kind.order(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

struct Classified<'a> {
    enriched: &'a EnrichedIssue,
    key: &'a str,
    summary: &'a str,
    project: Option<&'a str>,
    issue_type: &'a str,
    epic: Option<EpicRef>,
}

fn classify<'a>(enriched: &'a EnrichedIssue, epic_link_field: &str) -> Classified<'a> {
    let issue = &enriched.issue;
    let issue_type = canonical_type(issue.type_name());
    // Epic issues never have an epic of their own.
    let epic = if issue_type == EPIC_TYPE {
        None
    } else {
        issue.epic_ref(epic_link_field)
    };
    Classified {
        enriched,
        key: issue.key.as_str(),
        summary: issue.summary(),
        project: issue.fields.project.as_ref().and_then(|p| p.key.as_deref()),
        issue_type,
        epic,
    }
}

/// Push into an insertion-ordered bucket list. Linear scan keeps first-seen
/// order authoritative without depending on hash iteration.
fn push_bucket<T>(buckets: &mut Vec<(String, Vec<T>)>, key: &str, value: T) {
    if let Some((_, bucket)) = buckets.iter_mut().find(|(k, _)| k == key) {
        bucket.push(value);
    } else {
        buckets.push((key.to_owned(), vec![value]));
    }
}

// ---------------------------------------------------------------------------
// Item construction
// ---------------------------------------------------------------------------

/// Effective start/end: overlay dates win, then the normalized creation
/// date (start) and the raw due-date field (end), then end mirrors start.
fn derive_dates(enriched: &EnrichedIssue) -> (Option<String>, Option<String>) {
    let overlay = &enriched.overlay;
    let fields = &enriched.issue.fields;

    let start = payload_str(overlay, KEY_START_DATE)
        .map(str::to_owned)
        .or_else(|| normalize_date(fields.created.as_deref()).map(to_iso));
    let end = payload_str(overlay, KEY_DUE_DATE)
        .or_else(|| payload_str(overlay, KEY_END_DATE))
        .map(str::to_owned)
        .or_else(|| fields.due_date.clone().filter(|d| !d.is_empty()))
        .or_else(|| start.clone());

    (start, end)
}

fn make_item(classified: &Classified<'_>, group_id: String) -> Option<Item> {
    let (start, end) = derive_dates(classified.enriched);
    if start.is_none() && end.is_none() {
        return None;
    }

    let issue = &classified.enriched.issue;
    let overlay = &classified.enriched.overlay;
    let color = payload_str(overlay, KEY_COLOR)
        .unwrap_or_else(|| default_color(classified.issue_type))
        .to_owned();
    let content = if classified.summary.is_empty() {
        classified.key.to_owned()
    } else {
        classified.summary.to_owned()
    };

    Some(Item {
        id: classified.key.to_owned(),
        group: group_id,
        content,
        title: classified.summary.to_owned(),
        start,
        end,
        color,
        status: issue.status_name().map(str::to_owned),
        priority: issue.priority_name().map(str::to_owned),
        issue_type: classified.issue_type.to_owned(),
        url: issue.self_url.clone(),
        overlay: overlay.clone(),
    })
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project enriched issues into `{groups, items}` under the requested
/// grouping mode. `epic_link_field` names the tracker custom field holding
/// structured epic references; it is only consulted in hierarchical mode.
///
/// Hidden issues (merged overlay `hidden` truthy) are excluded before any
/// grouping or item work. Every emitted `item.group` id is present in
/// `groups`.
#[must_use]
pub fn build_view(
    issues: &[EnrichedIssue],
    group_by: GroupBy,
    epic_link_field: &str,
) -> TimelineView {
    let classified: Vec<Classified<'_>> = issues
        .iter()
        .filter(|enriched| !enriched.is_hidden())
        .map(|enriched| classify(enriched, epic_link_field))
        .collect();

    let (mut groups, items) = match group_by {
        GroupBy::Project => build_hierarchy(&classified),
        GroupBy::Assignee => build_flat(&classified, FlatDimension::Assignee),
        GroupBy::FlatProject => build_flat(&classified, FlatDimension::Project),
    };

    groups.sort_by(|a, b| a.project.cmp(&b.project).then(a.order.cmp(&b.order)));
    debug!(
        mode = group_by.as_str(),
        groups = groups.len(),
        items = items.len(),
        "projected timeline view"
    );
    TimelineView { groups, items }
}

fn build_hierarchy(classified: &[Classified<'_>]) -> (Vec<Group>, Vec<Item>) {
    let mut groups: Vec<Group> = Vec::new();
    let mut items: Vec<Item> = Vec::new();

    // Partition by project, preserving first-seen project order.
    let mut projects: Vec<(String, Vec<&Classified<'_>>)> = Vec::new();
    for c in classified {
        push_bucket(&mut projects, c.project.unwrap_or(UNKNOWN_PROJECT), c);
    }

    for (project, members) in &projects {
        build_project_hierarchy(project, members, &mut groups, &mut items);
    }

    (groups, items)
}

fn build_project_hierarchy(
    project: &str,
    members: &[&Classified<'_>],
    groups: &mut Vec<Group>,
    items: &mut Vec<Item>,
) {
    // Epic buckets collect the epic issue itself plus every issue that
    // references it; epic-less issues go to the direct list.
    let mut epic_buckets: Vec<(String, Vec<&Classified<'_>>)> = Vec::new();
    let mut direct: Vec<&Classified<'_>> = Vec::new();
    for &c in members {
        if c.issue_type == EPIC_TYPE {
            push_bucket(&mut epic_buckets, c.key, c);
        } else if let Some(epic) = &c.epic {
            push_bucket(&mut epic_buckets, &epic.key, c);
        } else {
            direct.push(c);
        }
    }

    groups.push(Group::from_kind(
        &GroupKind::Project {
            project: project.to_owned(),
        },
        project.to_owned(),
    ));

    let mut epic_order: u32 = 0;
    for (epic_key, epic_members) in &epic_buckets {
        epic_order += 1;
        emit_epic_level(project, epic_key, epic_order, epic_members, groups, items);
    }

    emit_direct_level(project, &direct, groups, items);
}

/// First non-sub-task type among `members` (excluding the epic record
/// itself), in input order. This is the parent type every sub-task in the
/// bucket attaches to; input order is the contract, not an accident.
fn first_sibling_type<'a>(members: &[&Classified<'a>], epic_key: Option<&str>) -> Option<&'a str> {
    members
        .iter()
        .find(|c| Some(c.key) != epic_key && c.issue_type != SUBTASK_TYPE)
        .map(|c| c.issue_type)
}

fn type_index_of(type_buckets: &[(String, Vec<&Classified<'_>>)], issue_type: &str) -> u32 {
    let index = type_buckets
        .iter()
        .position(|(t, _)| t == issue_type)
        .unwrap_or(type_buckets.len());
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn emit_epic_level(
    project: &str,
    epic_key: &str,
    epic_order: u32,
    members: &[&Classified<'_>],
    groups: &mut Vec<Group>,
    items: &mut Vec<Item>,
) {
    // Epic title: the epic issue's own summary when it was collected, the
    // link-field summary a child carried otherwise, the key as a last resort.
    let epic_summary = members
        .iter()
        .find(|c| c.key == epic_key)
        .map(|c| c.summary.to_owned())
        .or_else(|| {
            members
                .iter()
                .find_map(|c| c.epic.as_ref().and_then(|e| e.summary.clone()))
        })
        .unwrap_or_else(|| epic_key.to_owned());

    groups.push(Group::from_kind(
        &GroupKind::Epic {
            project: project.to_owned(),
            epic: epic_key.to_owned(),
            epic_order,
        },
        format!("{project} | {epic_summary}"),
    ));

    // Issue-type buckets in discovery order, the epic record excluded.
    let mut type_buckets: Vec<(String, Vec<&Classified<'_>>)> = Vec::new();
    for &c in members {
        if c.key != epic_key {
            push_bucket(&mut type_buckets, c.issue_type, c);
        }
    }

    let sibling_type = first_sibling_type(members, Some(epic_key));
    let has_subtasks = type_buckets.iter().any(|(t, _)| t == SUBTASK_TYPE);

    for (index, (issue_type, _)) in type_buckets.iter().enumerate() {
        if issue_type == SUBTASK_TYPE {
            continue;
        }
        let kind = GroupKind::TypeUnderEpic {
            project: project.to_owned(),
            epic: epic_key.to_owned(),
            epic_order,
            issue_type: issue_type.clone(),
            type_index: u32::try_from(index).unwrap_or(u32::MAX),
        };
        let label = localized_label(issue_type);
        groups.push(Group::from_kind(
            &kind,
            format!("{project} | {epic_summary} | {label}"),
        ));
    }

    if has_subtasks {
        if let Some(parent_type) = sibling_type {
            let kind = GroupKind::SubtaskBucket {
                project: project.to_owned(),
                epic: Some((epic_key.to_owned(), epic_order)),
                issue_type: parent_type.to_owned(),
                type_index: type_index_of(&type_buckets, parent_type),
            };
            let label = localized_label(parent_type);
            groups.push(Group::from_kind(
                &kind,
                format!("{project} | {epic_summary} | {label} | {SUBTASK_LABEL}"),
            ));
        }
        // No sibling type: sub-tasks fall back to the epic node itself.
    }

    let subtask_target = sibling_type.map_or_else(
        || epic_group_id(project, epic_key),
        |parent| subtask_bucket_id(&type_under_epic_id(project, epic_key, parent)),
    );

    for &c in members {
        let group_id = if c.issue_type == EPIC_TYPE {
            epic_group_id(project, c.key)
        } else if c.issue_type == SUBTASK_TYPE {
            subtask_target.clone()
        } else {
            type_under_epic_id(project, epic_key, c.issue_type)
        };
        items.extend(make_item(c, group_id));
    }
}

fn emit_direct_level(
    project: &str,
    direct: &[&Classified<'_>],
    groups: &mut Vec<Group>,
    items: &mut Vec<Item>,
) {
    if direct.is_empty() {
        return;
    }

    let mut type_buckets: Vec<(String, Vec<&Classified<'_>>)> = Vec::new();
    for &c in direct {
        push_bucket(&mut type_buckets, c.issue_type, c);
    }

    let sibling_type = first_sibling_type(direct, None);
    let has_subtasks = type_buckets.iter().any(|(t, _)| t == SUBTASK_TYPE);

    for (index, (issue_type, _)) in type_buckets.iter().enumerate() {
        // The sub-task type only surfaces at L3 when it is its own fallback
        // target (no sibling type to nest under).
        if issue_type == SUBTASK_TYPE && sibling_type.is_some() {
            continue;
        }
        let kind = GroupKind::TypeDirect {
            project: project.to_owned(),
            issue_type: issue_type.clone(),
            type_index: u32::try_from(index).unwrap_or(u32::MAX),
        };
        let label = localized_label(issue_type);
        groups.push(Group::from_kind(&kind, format!("{project} | {label}")));
    }

    if has_subtasks {
        if let Some(parent_type) = sibling_type {
            let kind = GroupKind::SubtaskBucket {
                project: project.to_owned(),
                epic: None,
                issue_type: parent_type.to_owned(),
                type_index: type_index_of(&type_buckets, parent_type),
            };
            let label = localized_label(parent_type);
            groups.push(Group::from_kind(
                &kind,
                format!("{project} | {label} | {SUBTASK_LABEL}"),
            ));
        }
    }

    let subtask_target = sibling_type.map_or_else(
        || type_direct_id(project, SUBTASK_TYPE),
        |parent| subtask_bucket_id(&type_direct_id(project, parent)),
    );

    for &c in direct {
        let group_id = if c.issue_type == SUBTASK_TYPE {
            subtask_target.clone()
        } else {
            type_direct_id(project, c.issue_type)
        };
        items.extend(make_item(c, group_id));
    }
}

// ---------------------------------------------------------------------------
// Flat modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum FlatDimension {
    Assignee,
    Project,
}

fn build_flat(
    classified: &[Classified<'_>],
    dimension: FlatDimension,
) -> (Vec<Group>, Vec<Item>) {
    let mut buckets: Vec<(String, Vec<&Classified<'_>>)> = Vec::new();
    for c in classified {
        let key = match dimension {
            FlatDimension::Assignee => c
                .enriched
                .issue
                .assignee_label()
                .unwrap_or(UNASSIGNED_GROUP),
            FlatDimension::Project => c.project.unwrap_or(UNKNOWN_GROUP),
        };
        push_bucket(&mut buckets, key, c);
    }

    let mut groups = Vec::new();
    let mut items = Vec::new();
    for (index, (key, members)) in buckets.iter().enumerate() {
        let title = match (dimension, key.as_str()) {
            (FlatDimension::Assignee, UNASSIGNED_GROUP) => "Unassigned".to_owned(),
            (FlatDimension::Project, UNKNOWN_GROUP) => "Unknown".to_owned(),
            _ => key.clone(),
        };
        groups.push(Group {
            id: key.clone(),
            content: title.clone(),
            title,
            project: key.clone(),
            epic_key: None,
            issue_type: None,
            level: 1,
            order: u32::try_from(index).unwrap_or(u32::MAX),
        });
        for &c in members {
            items.extend(make_item(c, key.clone()));
        }
    }

    (groups, items)
}

#[cfg(test)]
mod tests {
    use super::{GroupBy, GroupKind};

    #[test]
    fn group_by_parses_with_flat_fallback() {
        assert_eq!(GroupBy::parse("project"), GroupBy::Project);
        assert_eq!(GroupBy::parse(" Project "), GroupBy::Project);
        assert_eq!(GroupBy::parse("assignee"), GroupBy::Assignee);
        assert_eq!(GroupBy::parse("project-flat"), GroupBy::FlatProject);
        assert_eq!(GroupBy::parse("sprint"), GroupBy::Assignee);
        assert_eq!(GroupBy::parse(""), GroupBy::Assignee);
    }

    #[test]
    fn group_kind_ids_compose_by_prefix() {
        let project = GroupKind::Project {
            project: "SR".into(),
        };
        let epic = GroupKind::Epic {
            project: "SR".into(),
            epic: "SR-100".into(),
            epic_order: 1,
        };
        let under_epic = GroupKind::TypeUnderEpic {
            project: "SR".into(),
            epic: "SR-100".into(),
            epic_order: 1,
            issue_type: "Story".into(),
            type_index: 0,
        };
        let direct = GroupKind::TypeDirect {
            project: "SR".into(),
            issue_type: "Bug".into(),
            type_index: 2,
        };
        let subtask = GroupKind::SubtaskBucket {
            project: "SR".into(),
            epic: Some(("SR-100".into(), 1)),
            issue_type: "Story".into(),
            type_index: 0,
        };

        assert_eq!(project.id(), "SR_PROJECT");
        assert_eq!(epic.id(), "SR_EPIC_SR-100");
        assert_eq!(under_epic.id(), "SR_EPIC_SR-100_Story");
        assert_eq!(direct.id(), "SR_DIRECT_Bug");
        assert_eq!(subtask.id(), "SR_EPIC_SR-100_Story_TASK");
        assert!(subtask.id().starts_with(&under_epic.id()));
        assert!(under_epic.id().starts_with(&epic.id()));
    }

    #[test]
    fn order_keys_preserve_band_arithmetic() {
        assert_eq!(
            GroupKind::Project {
                project: "SR".into()
            }
            .order(),
            0
        );
        assert_eq!(
            GroupKind::Epic {
                project: "SR".into(),
                epic: "SR-100".into(),
                epic_order: 3,
            }
            .order(),
            3
        );
        assert_eq!(
            GroupKind::TypeUnderEpic {
                project: "SR".into(),
                epic: "SR-100".into(),
                epic_order: 3,
                issue_type: "Bug".into(),
                type_index: 2,
            }
            .order(),
            302
        );
        assert_eq!(
            GroupKind::TypeDirect {
                project: "SR".into(),
                issue_type: "Bug".into(),
                type_index: 2,
            }
            .order(),
            1002
        );
        assert_eq!(
            GroupKind::SubtaskBucket {
                project: "SR".into(),
                epic: Some(("SR-100".into(), 3)),
                issue_type: "Bug".into(),
                type_index: 2,
            }
            .order(),
            3021
        );
        assert_eq!(
            GroupKind::SubtaskBucket {
                project: "SR".into(),
                epic: None,
                issue_type: "Bug".into(),
                type_index: 2,
            }
            .order(),
            10021
        );
    }

    #[test]
    fn levels_match_hierarchy_depth() {
        assert_eq!(
            GroupKind::Project {
                project: "SR".into()
            }
            .level(),
            1
        );
        assert_eq!(
            GroupKind::SubtaskBucket {
                project: "SR".into(),
                epic: None,
                issue_type: "Bug".into(),
                type_index: 0,
            }
            .level(),
            4
        );
    }
}
