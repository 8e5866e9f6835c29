//! Overlay store behavior: replace semantics, scope/owner normalization,
//! defensive decoding, and export/import round trips.

use serde_json::json;
use slate_core::overlay::{OverlayPayload, Scope};
use slate_store::OverlayStore;

fn payload(value: serde_json::Value) -> OverlayPayload {
    value.as_object().expect("object").clone()
}

fn store() -> OverlayStore {
    OverlayStore::open_in_memory().expect("open store")
}

#[test]
fn upsert_replaces_the_whole_payload() {
    let store = store();
    store
        .upsert(
            Scope::Team,
            None,
            "SR-1",
            Some("SR"),
            &payload(json!({"color": "#fff", "hidden": true})),
        )
        .expect("first upsert");
    store
        .upsert(Scope::Team, None, "SR-1", None, &payload(json!({"color": "#000"})))
        .expect("second upsert");

    // Whole-payload replace: hidden is gone, not merged.
    let stored = store.get(Scope::Team, None, "SR-1").expect("get");
    assert_eq!(stored, payload(json!({"color": "#000"})));
}

#[test]
fn patch_merges_field_by_field() {
    let store = store();
    store
        .patch(
            Scope::Team,
            None,
            "SR-1",
            Some("SR"),
            &payload(json!({"color": "#fff"})),
        )
        .expect("patch color");
    store
        .set_dates(Scope::Team, None, "SR-1", None, Some("2024-01-01"), Some("2024-01-05"))
        .expect("patch dates");
    store
        .set_hidden(Scope::Team, None, "SR-1", None, true)
        .expect("patch hidden");

    let stored = store.get(Scope::Team, None, "SR-1").expect("get");
    assert_eq!(
        stored,
        payload(json!({
            "color": "#fff",
            "startDate": "2024-01-01",
            "dueDate": "2024-01-05",
            "hidden": true
        }))
    );
}

#[test]
fn team_scope_ignores_owner_user_scope_requires_it() {
    let store = store();
    store
        .upsert(Scope::Team, Some("kim"), "SR-1", None, &payload(json!({"a": 1})))
        .expect("team write with owner");
    // Owner is normalized away for team scope.
    assert_eq!(
        store.get(Scope::Team, None, "SR-1").expect("get"),
        payload(json!({"a": 1}))
    );

    assert!(
        store
            .upsert(Scope::User, None, "SR-1", None, &payload(json!({"a": 2})))
            .is_err()
    );

    store
        .upsert(Scope::User, Some("kim"), "SR-1", None, &payload(json!({"a": 2})))
        .expect("user write with owner");
    let anonymous = store
        .fetch_many(Scope::User, None, None, None)
        .expect("fetch without owner");
    assert!(anonymous.is_empty());
}

#[test]
fn merged_layers_user_over_team() {
    let store = store();
    store
        .upsert(
            Scope::Team,
            None,
            "SR-1",
            Some("SR"),
            &payload(json!({"A": 1, "B": 2})),
        )
        .expect("team write");
    store
        .upsert(
            Scope::User,
            Some("kim"),
            "SR-1",
            Some("SR"),
            &payload(json!({"B": 3, "C": 4})),
        )
        .expect("user write");

    let merged = store
        .merged(Some(&["SR-1".to_owned()]), None, Some("kim"))
        .expect("merged");
    assert_eq!(merged["SR-1"], payload(json!({"A": 1, "B": 3, "C": 4})));

    // Without a user owner only team fields remain.
    let team_only = store.merged(Some(&["SR-1".to_owned()]), None, None).expect("merged");
    assert_eq!(team_only["SR-1"], payload(json!({"A": 1, "B": 2})));
}

#[test]
fn fetch_many_narrows_by_issue_and_project_keys() {
    let store = store();
    store
        .upsert(Scope::Team, None, "SR-1", Some("SR"), &payload(json!({"a": 1})))
        .expect("write SR-1");
    store
        .upsert(Scope::Team, None, "SR-2", Some("SR"), &payload(json!({"a": 2})))
        .expect("write SR-2");
    store
        .upsert(Scope::Team, None, "OPS-1", Some("OPS"), &payload(json!({"a": 3})))
        .expect("write OPS-1");

    let by_issue = store
        .fetch_many(Scope::Team, None, Some(&["SR-1".to_owned()]), None)
        .expect("fetch by issue");
    assert_eq!(by_issue.len(), 1);
    assert!(by_issue.contains_key("SR-1"));

    let by_project = store
        .fetch_many(Scope::Team, None, None, Some(&["SR".to_owned()]))
        .expect("fetch by project");
    assert_eq!(by_project.len(), 2);

    let all = store.fetch_many(Scope::Team, None, None, None).expect("fetch all");
    assert_eq!(all.len(), 3);
}

#[test]
fn export_import_round_trip_preserves_merged_results() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = dir.path().join("overlays.json");

    let store = store();
    store
        .upsert(
            Scope::Team,
            None,
            "SR-1",
            Some("SR"),
            &payload(json!({"color": "#fff", "startDate": "2024-01-01"})),
        )
        .expect("team write");
    store
        .upsert(
            Scope::User,
            Some("kim"),
            "SR-1",
            Some("SR"),
            &payload(json!({"color": "#000"})),
        )
        .expect("user write");
    store
        .upsert(Scope::Team, None, "SR-2", Some("SR"), &payload(json!({"hidden": true})))
        .expect("second team write");

    let before = store.merged(None, None, Some("kim")).expect("merged before");
    let exported = store.export_to_file(&file).expect("export");
    assert_eq!(exported, 3);

    let restored = OverlayStore::open_in_memory().expect("fresh store");
    let imported = restored.import_from_file(&file).expect("import");
    assert_eq!(imported, 3);

    let after = restored.merged(None, None, Some("kim")).expect("merged after");
    assert_eq!(before, after);
}
