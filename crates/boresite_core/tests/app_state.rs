use boresite_core::{
    AppState, BoreholeFilter, BoreholePatch, BoreholeStatus, CurrentProject, MemoryBlobStorage,
    NewBorehole, NewProject, ProjectFilter, ProjectPatch, ProjectStatus, STORAGE_KEY,
};
use uuid::Uuid;

fn state() -> AppState<MemoryBlobStorage> {
    AppState::with_storage(MemoryBlobStorage::new())
}

#[test]
fn initialize_seeds_once_and_loads_projects() {
    let mut state = state();
    state.initialize();
    assert!(state.is_initialized());
    assert_eq!(state.projects().len(), 1);
    assert_eq!(state.projects()[0].name, "Sample Site Investigation");

    let seeded_id = state.projects()[0].id;
    assert!(state.delete_project(seeded_id));
    state.initialize();
    assert!(state.projects().is_empty());

    let mut restarted = AppState::with_storage(state.store().storage().clone());
    restarted.initialize();
    assert!(restarted.projects().is_empty());
}

#[test]
fn create_project_reloads_list_newest_first() {
    let mut state = state();
    let first = state.create_project(NewProject::named("first")).unwrap();
    let second = state.create_project(NewProject::named("second")).unwrap();

    let ids: Vec<_> = state.projects().iter().map(|p| p.id).collect();
    assert_eq!(ids, [second.id, first.id]);
    assert!(state.error().is_none());
}

#[test]
fn load_missing_project_is_not_found_not_error() {
    let mut state = state();
    let missing = Uuid::new_v4();
    state.load_project(missing);

    assert_eq!(state.current_project(), &CurrentProject::NotFound(missing));
    assert!(state.error().is_none());
    assert!(!state.is_loading());
}

#[test]
fn borehole_mutations_refresh_current_project() {
    let mut state = state();
    let project = state
        .create_project(NewProject::named("Acme Survey"))
        .unwrap();
    state.load_project(project.id);

    let borehole = state
        .add_borehole(project.id, NewBorehole::at(-36.84, 174.76))
        .unwrap();
    let current = state.current_project().project().unwrap();
    assert_eq!(current.boreholes.len(), 1);
    assert_eq!(current.boreholes[0], borehole);
    assert!(current.updated_at > project.updated_at);
}

#[test]
fn updating_selected_borehole_refreshes_selection() {
    let mut state = state();
    let project = state.create_project(NewProject::named("select")).unwrap();
    state.load_project(project.id);
    let borehole = state
        .add_borehole(project.id, NewBorehole::at(1.0, 1.0))
        .unwrap();
    state.select_borehole(Some(borehole.id));

    let updated = state
        .update_borehole(
            project.id,
            borehole.id,
            &BoreholePatch::status(BoreholeStatus::Drilling),
        )
        .unwrap();

    let selected = state.selected_borehole().unwrap();
    assert_eq!(selected, &updated);
    assert_eq!(selected.status, BoreholeStatus::Drilling);
}

#[test]
fn deleting_selected_borehole_clears_selection() {
    let mut state = state();
    let project = state.create_project(NewProject::named("delete")).unwrap();
    state.load_project(project.id);
    let keep = state
        .add_borehole(project.id, NewBorehole::at(1.0, 1.0))
        .unwrap();
    let doomed = state
        .add_borehole(project.id, NewBorehole::at(2.0, 2.0))
        .unwrap();
    state.select_borehole(Some(doomed.id));

    assert!(state.delete_borehole(project.id, doomed.id));
    assert!(state.selected_borehole().is_none());
    let current = state.current_project().project().unwrap();
    assert_eq!(current.boreholes.len(), 1);
    assert_eq!(current.boreholes[0].id, keep.id);
}

#[test]
fn loading_another_project_clears_selection() {
    let mut state = state();
    let first = state.create_project(NewProject::named("first")).unwrap();
    let second = state.create_project(NewProject::named("second")).unwrap();
    state.load_project(first.id);
    let borehole = state
        .add_borehole(first.id, NewBorehole::at(0.0, 0.0))
        .unwrap();
    state.select_borehole(Some(borehole.id));
    assert!(state.selected_borehole().is_some());

    state.load_project(second.id);
    assert!(state.selected_borehole().is_none());
    assert_eq!(state.current_project().id(), Some(second.id));
}

#[test]
fn selecting_unknown_borehole_clears_selection() {
    let mut state = state();
    let project = state.create_project(NewProject::named("unknown")).unwrap();
    state.load_project(project.id);
    let borehole = state
        .add_borehole(project.id, NewBorehole::at(0.0, 0.0))
        .unwrap();
    state.select_borehole(Some(borehole.id));

    state.select_borehole(Some(Uuid::new_v4()));
    assert!(state.selected_borehole().is_none());
}

#[test]
fn deleting_current_project_leaves_not_found() {
    let mut state = state();
    let project = state.create_project(NewProject::named("gone")).unwrap();
    state.load_project(project.id);
    let borehole = state
        .add_borehole(project.id, NewBorehole::at(0.0, 0.0))
        .unwrap();
    state.select_borehole(Some(borehole.id));

    assert!(state.delete_project(project.id));
    assert!(state.projects().is_empty());
    assert!(state.current_project().is_not_found());
    assert!(state.selected_borehole().is_none());
}

#[test]
fn updating_current_project_refreshes_it() {
    let mut state = state();
    let project = state.create_project(NewProject::named("rename me")).unwrap();
    state.load_project(project.id);

    let updated = state
        .update_project(project.id, &ProjectPatch::rename("renamed"))
        .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(state.current_project().project().unwrap().name, "renamed");
    assert_eq!(state.projects()[0].name, "renamed");
}

#[test]
fn store_failure_is_captured_and_state_unchanged() {
    let mut state = AppState::with_storage(MemoryBlobStorage::with_quota(400));
    let project = state.create_project(NewProject::named("quota")).unwrap();
    state.load_project(project.id);
    let snapshot_projects = state.projects().to_vec();
    let snapshot_current = state.current_project().clone();
    let blob_before = state
        .store()
        .storage()
        .raw(STORAGE_KEY)
        .unwrap()
        .to_string();

    let notes = "x".repeat(500);
    let input = NewBorehole {
        notes: Some(notes),
        ..NewBorehole::at(0.0, 0.0)
    };
    assert!(state.add_borehole(project.id, input).is_none());

    let message = state.error().expect("error slot should be filled");
    assert!(message.starts_with("add_borehole failed"));
    assert!(message.contains("quota"));
    assert_eq!(state.projects(), snapshot_projects.as_slice());
    assert_eq!(state.current_project(), &snapshot_current);
    assert_eq!(
        state.store().storage().raw(STORAGE_KEY).unwrap(),
        blob_before
    );

    state.clear_error();
    assert!(state.error().is_none());
}

#[test]
fn later_error_overwrites_earlier_one() {
    let mut state = state();
    assert!(state.create_project(NewProject::named("")).is_none());
    let first = state.error().unwrap().to_string();

    let project = state.create_project(NewProject::named("ok")).unwrap();
    state.load_project(project.id);
    assert!(state
        .add_borehole(project.id, NewBorehole::at(0.0, 500.0))
        .is_none());
    let second = state.error().unwrap();
    assert_ne!(first, second);
    assert!(second.starts_with("add_borehole failed"));
}

#[test]
fn not_found_mutations_do_not_set_error() {
    let mut state = state();
    assert!(state
        .update_project(Uuid::new_v4(), &ProjectPatch::rename("x"))
        .is_none());
    assert!(!state.delete_project(Uuid::new_v4()));
    assert!(!state.delete_borehole(Uuid::new_v4(), Uuid::new_v4()));
    assert!(state.error().is_none());
}

#[test]
fn filters_apply_to_snapshots() {
    let mut state = state();
    let wharf = state
        .create_project(NewProject::named("Wharf Extension").client("Port Co"))
        .unwrap();
    let tunnel = state.create_project(NewProject::named("Tunnel")).unwrap();
    state.update_project(tunnel.id, &ProjectPatch::status(ProjectStatus::Archived));

    let active = state.filtered_projects(&ProjectFilter {
        status: Some(ProjectStatus::Active),
        text: None,
    });
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, wharf.id);

    let by_client = state.filtered_projects(&ProjectFilter {
        status: None,
        text: Some("port".to_string()),
    });
    assert_eq!(by_client.len(), 1);

    state.load_project(wharf.id);
    let drilled = state
        .add_borehole(wharf.id, NewBorehole::at(0.0, 0.0))
        .unwrap();
    state.add_borehole(wharf.id, NewBorehole::at(0.0, 0.0).code("CPT-1"));
    state.update_borehole(
        wharf.id,
        drilled.id,
        &BoreholePatch::status(BoreholeStatus::Completed),
    );

    let completed = state.filtered_boreholes(&BoreholeFilter {
        status: Some(BoreholeStatus::Completed),
        text: None,
    });
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, drilled.id);

    let cpt = state.filtered_boreholes(&BoreholeFilter {
        status: None,
        text: Some("cpt".to_string()),
    });
    assert_eq!(cpt.len(), 1);
    assert_eq!(cpt[0].code, "CPT-1");
}

#[test]
fn clear_current_project_resets_focus() {
    let mut state = state();
    let project = state.create_project(NewProject::named("focus")).unwrap();
    state.load_project(project.id);
    state.clear_current_project();
    assert_eq!(state.current_project(), &CurrentProject::Absent);
    assert!(state.filtered_boreholes(&BoreholeFilter::default()).is_empty());
}

#[test]
fn synchronous_reloads_never_leave_a_loading_state_behind() {
    let mut state = state();
    let project = state.create_project(NewProject::named("Settled")).unwrap();
    assert!(!state.is_loading());

    state.load_project(project.id);
    assert!(matches!(state.current_project(), CurrentProject::Found(_)));
    assert!(!state.is_loading());

    state.add_borehole(project.id, NewBorehole::at(-36.0, 174.0));
    assert!(!matches!(state.current_project(), CurrentProject::Loading(_)));
    assert!(!state.is_loading());

    state.delete_project(project.id);
    assert_eq!(state.current_project(), &CurrentProject::NotFound(project.id));
    assert!(!state.is_loading());
}
