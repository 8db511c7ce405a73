//! Application state facade.
//!
//! # Responsibility
//! - Provide the imperative operations UI callers issue.
//! - Re-synchronize snapshots from the store after every mutation.
//! - Capture store failures into one clearable error slot.
//!
//! # Invariants
//! - Project mutations reload the project list (and the current project when
//!   it was the target).
//! - Borehole mutations reload the targeted project into `current_project`.
//! - `selected_borehole` is either a fresh copy from `current_project` or
//!   `None`; it never outlives a reload that no longer contains it.
//! - A failed operation leaves every snapshot unchanged.

use crate::model::borehole::{Borehole, BoreholeId, BoreholePatch, NewBorehole};
use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::repo::project_store::{ProjectStore, StoreError};
use crate::service::filter::{BoreholeFilter, ProjectFilter};
use crate::storage::BlobStorage;
use log::{debug, error};

/// Resolution state of the project the UI is focused on.
///
/// Store lookups are synchronous, so `Loading` is entered and left inside a
/// single `load_project` call and callers only ever observe `Absent`, `Found`
/// or `NotFound`. The variant is kept for backends that resolve lookups
/// asynchronously.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CurrentProject {
    /// No project requested.
    #[default]
    Absent,
    /// Lookup in progress. Never visible with a synchronous store.
    Loading(ProjectId),
    Found(Project),
    /// Requested id does not exist; callers treat this as an empty state.
    NotFound(ProjectId),
}

impl CurrentProject {
    pub fn project(&self) -> Option<&Project> {
        match self {
            Self::Found(project) => Some(project),
            _ => None,
        }
    }

    /// Returns the requested project id, whether or not it resolved.
    pub fn id(&self) -> Option<ProjectId> {
        match self {
            Self::Absent => None,
            Self::Loading(id) | Self::NotFound(id) => Some(*id),
            Self::Found(project) => Some(project.id),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Process-lifetime state context handed to UI callers.
pub struct AppState<S: BlobStorage> {
    store: ProjectStore<S>,
    projects: Vec<Project>,
    current_project: CurrentProject,
    selected_borehole: Option<Borehole>,
    loading: bool,
    error: Option<String>,
    initialized: bool,
}

impl<S: BlobStorage> AppState<S> {
    pub fn new(store: ProjectStore<S>) -> Self {
        Self {
            store,
            projects: Vec::new(),
            current_project: CurrentProject::Absent,
            selected_borehole: None,
            loading: false,
            error: None,
            initialized: false,
        }
    }

    /// Builds a state context over a store using the default storage key.
    pub fn with_storage(storage: S) -> Self {
        Self::new(ProjectStore::new(storage))
    }

    /// Seeds sample data on first run and loads the project list.
    ///
    /// Only the first call per context has any effect.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        if let Err(err) = self.store.seed_defaults() {
            self.record_error("initialize", err);
        }
        self.load_projects();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_project(&self) -> &CurrentProject {
        &self.current_project
    }

    pub fn selected_borehole(&self) -> Option<&Borehole> {
        self.selected_borehole.as_ref()
    }

    /// Whether a store read is in flight.
    ///
    /// Always `false` between calls with a synchronous store; the flag is
    /// raised only for the duration of a reload.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the last unacknowledged error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn store(&self) -> &ProjectStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectStore<S> {
        &mut self.store
    }

    /// Replaces the project list snapshot from the store.
    pub fn load_projects(&mut self) {
        self.loading = true;
        self.projects = self.store.list_projects();
        self.loading = false;
        debug!(
            "event=state_reload module=state scope=projects count={}",
            self.projects.len()
        );
    }

    /// Focuses `id`. A missing project resolves to `CurrentProject::NotFound`.
    pub fn load_project(&mut self, id: ProjectId) {
        self.reload_current(id);
    }

    /// Drops the focused project and the borehole selection.
    pub fn clear_current_project(&mut self) {
        self.current_project = CurrentProject::Absent;
        self.selected_borehole = None;
    }

    pub fn create_project(&mut self, input: NewProject) -> Option<Project> {
        match self.store.create_project(input) {
            Ok(project) => {
                self.load_projects();
                Some(project)
            }
            Err(err) => {
                self.record_error("create_project", err);
                None
            }
        }
    }

    pub fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) -> Option<Project> {
        match self.store.update_project(id, patch) {
            Ok(updated) => {
                self.after_project_mutation(id);
                updated
            }
            Err(err) => {
                self.record_error("update_project", err);
                None
            }
        }
    }

    pub fn delete_project(&mut self, id: ProjectId) -> bool {
        match self.store.delete_project(id) {
            Ok(removed) => {
                self.after_project_mutation(id);
                removed
            }
            Err(err) => {
                self.record_error("delete_project", err);
                false
            }
        }
    }

    pub fn add_borehole(&mut self, project_id: ProjectId, input: NewBorehole) -> Option<Borehole> {
        match self.store.add_borehole(project_id, input) {
            Ok(created) => {
                self.reload_current(project_id);
                created
            }
            Err(err) => {
                self.record_error("add_borehole", err);
                None
            }
        }
    }

    pub fn update_borehole(
        &mut self,
        project_id: ProjectId,
        borehole_id: BoreholeId,
        patch: &BoreholePatch,
    ) -> Option<Borehole> {
        match self.store.update_borehole(project_id, borehole_id, patch) {
            Ok(updated) => {
                self.reload_current(project_id);
                updated
            }
            Err(err) => {
                self.record_error("update_borehole", err);
                None
            }
        }
    }

    pub fn delete_borehole(&mut self, project_id: ProjectId, borehole_id: BoreholeId) -> bool {
        match self.store.delete_borehole(project_id, borehole_id) {
            Ok(removed) => {
                self.reload_current(project_id);
                removed
            }
            Err(err) => {
                self.record_error("delete_borehole", err);
                false
            }
        }
    }

    /// Selects a borehole of the current project, or clears the selection.
    ///
    /// Ids not present in the current project clear the selection.
    pub fn select_borehole(&mut self, borehole_id: Option<BoreholeId>) {
        self.selected_borehole = borehole_id.and_then(|id| {
            self.current_project
                .project()
                .and_then(|project| project.borehole(id))
                .cloned()
        });
    }

    pub fn filtered_projects(&self, filter: &ProjectFilter) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| filter.matches(project))
            .collect()
    }

    /// Filters the current project's boreholes; empty when none is loaded.
    pub fn filtered_boreholes(&self, filter: &BoreholeFilter) -> Vec<&Borehole> {
        self.current_project
            .project()
            .map(|project| {
                project
                    .boreholes
                    .iter()
                    .filter(|borehole| filter.matches(borehole))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn after_project_mutation(&mut self, id: ProjectId) {
        self.load_projects();
        if self.current_project.id() == Some(id) {
            self.reload_current(id);
        }
    }

    fn reload_current(&mut self, id: ProjectId) {
        self.loading = true;
        self.current_project = CurrentProject::Loading(id);
        self.current_project = match self.store.get_project(id) {
            Some(project) => CurrentProject::Found(project),
            None => CurrentProject::NotFound(id),
        };
        self.loading = false;

        let selected_id = self.selected_borehole.as_ref().map(|borehole| borehole.id);
        self.select_borehole(selected_id);
        debug!(
            "event=state_reload module=state scope=project project_id={} found={}",
            id,
            self.current_project.project().is_some()
        );
    }

    fn record_error(&mut self, operation: &str, err: StoreError) {
        error!(
            "event=state_op module=state status=error op={} error={}",
            operation, err
        );
        self.error = Some(format!("{operation} failed: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, CurrentProject};
    use crate::storage::MemoryBlobStorage;
    use uuid::Uuid;

    #[test]
    fn fresh_state_is_empty() {
        let state = AppState::with_storage(MemoryBlobStorage::new());
        assert!(state.projects().is_empty());
        assert_eq!(state.current_project(), &CurrentProject::Absent);
        assert!(state.selected_borehole().is_none());
        assert!(state.error().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn current_project_id_covers_unresolved_states() {
        let id = Uuid::new_v4();
        assert_eq!(CurrentProject::Loading(id).id(), Some(id));
        assert_eq!(CurrentProject::NotFound(id).id(), Some(id));
        assert_eq!(CurrentProject::Absent.id(), None);
        assert!(CurrentProject::NotFound(id).is_not_found());
    }
}
