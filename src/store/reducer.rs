use tracing::warn;

use super::action::Action;
use super::state::AppState;

/// Applies `action` to `state` and returns the next state.
///
/// Pure and synchronous. Unknown actions return the state untouched.
/// Domain collections only ever grow.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetSection(section) => state.current_section = section,
        Action::SetWorkspace(name) => state.current_workspace = name,
        Action::SetProject(name) => state.current_project = name,
        Action::SetMode(mode) => state.mode = mode,
        Action::SetCwStep(step) => state.cw_step = step,
        Action::AddToast(toast) => {
            state.toasts.push(toast);
        }
        Action::RemoveToast(id) => {
            state.toasts.remove(id);
        }
        Action::RemoveToastAt(index) => {
            state.toasts.remove_at(index);
        }
        Action::ToggleModal(modal) => state.modals.toggle(modal),
        Action::ToggleTaskDrawer(open) => state.task_drawer.is_open = open,
        Action::SetTaskDrawerTitle(title) => state.task_drawer.title = title,
        Action::ToggleQuickAdd => state.quick_add_menu = !state.quick_add_menu,
        Action::ToggleUserMenu => state.user_menu = !state.user_menu,
        Action::ToggleSidebar => state.sidebar.collapsed = !state.sidebar.collapsed,
        Action::AddProject(project) => state.projects.push(project),
        Action::AddTask(task) => state.tasks.push(task),
        Action::AddWorkspace(workspace) => state.workspaces.push(workspace),
        Action::AddPendingRequest(request) => state.pending_workspace_requests.push(request),
        Action::UpdateProfile(patch) => state.user_profile.apply(patch),
        Action::SetUser(profile) => state.user_profile = profile,
        Action::UpdateSettings(patch) => state.settings = state.settings.merge(patch),
        Action::UpdateSettingsNested { path, value } => {
            match state.settings.with_path(&path, value) {
                Ok(settings) => state.settings = settings,
                Err(e) => warn!(path = ?path, error = %e, "Ignoring nested settings update"),
            }
        }
        Action::Unknown(_) => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::modal::Modal;
    use crate::store::records::{ProfilePatch, Project, Task, Workspace, WorkspaceRequest};
    use crate::store::section::Section;
    use crate::store::toast::{Toast, ToastKind};
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};
    use std::sync::Arc;

    fn reduce_all(state: AppState, actions: impl IntoIterator<Item = Action>) -> AppState {
        actions.into_iter().fold(state, reduce)
    }

    #[test]
    fn test_scalar_setters() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::SetSection(Section::WorkspaceOwner),
                Action::SetWorkspace("Alpha Corp".to_string()),
                Action::SetProject("Mobile App".to_string()),
                Action::SetMode("Workspace".to_string()),
                Action::SetCwStep(3),
            ],
        );

        assert_eq!(state.current_section, Section::WorkspaceOwner);
        assert_eq!(state.current_workspace, "Alpha Corp");
        assert_eq!(state.current_project, "Mobile App");
        assert_eq!(state.mode, "Workspace");
        assert_eq!(state.cw_step, 3);
    }

    #[test]
    fn test_add_toast_appends_in_call_order() {
        let mut state = AppState::default();
        for (i, message) in ["one", "two", "three", "four"].iter().enumerate() {
            state = reduce(state, Action::AddToast(Toast::info(*message)));
            assert_eq!(state.toasts.len(), i + 1);
            assert_eq!(state.toasts.iter().last().unwrap().message, *message);
        }
    }

    #[test]
    fn test_remove_toast_at_index() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::AddToast(Toast::info("a")),
                Action::AddToast(Toast::info("b")),
                Action::AddToast(Toast::info("c")),
                Action::RemoveToastAt(0),
            ],
        );
        let messages: Vec<_> = state.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_success_error_info_then_remove_middle() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::AddToast(Toast::success("created")),
                Action::AddToast(Toast::error("failed")),
                Action::AddToast(Toast::info("note")),
                Action::RemoveToastAt(1),
            ],
        );
        let kinds: Vec<_> = state.toasts.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Info]);
    }

    #[test]
    fn test_remove_toast_by_id_ignores_position_shifts() {
        let first = Toast::info("first");
        let second = Toast::info("second");
        let second_id = second.id;
        let first_id = first.id;

        let state = reduce_all(
            AppState::default(),
            [
                Action::AddToast(first),
                Action::AddToast(second),
                Action::RemoveToast(first_id),
                Action::RemoveToast(second_id),
                Action::RemoveToast(second_id),
            ],
        );
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_toggle_modal_twice_restores_flag() {
        let start = AppState::default();
        let once = reduce(start.clone(), Action::ToggleModal(Modal::CreateProject));
        assert!(once.modals.is_open(Modal::CreateProject));

        let twice = reduce(once, Action::ToggleModal(Modal::CreateProject));
        assert_eq!(twice, start);
    }

    #[test]
    fn test_modals_are_not_exclusive() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::ToggleModal(Modal::Polls),
                Action::ToggleModal(Modal::Payroll),
            ],
        );
        assert!(state.modals.is_open(Modal::Polls));
        assert!(state.modals.is_open(Modal::Payroll));
    }

    #[test]
    fn test_task_drawer_and_menus() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::ToggleTaskDrawer(true),
                Action::SetTaskDrawerTitle("Design hero section".to_string()),
                Action::ToggleSidebar,
                Action::ToggleQuickAdd,
                Action::ToggleUserMenu,
                Action::ToggleUserMenu,
            ],
        );
        assert!(state.task_drawer.is_open);
        assert_eq!(state.task_drawer.title, "Design hero section");
        assert!(state.sidebar.collapsed);
        assert!(state.quick_add_menu);
        assert!(!state.user_menu);

        let closed = reduce(state, Action::ToggleTaskDrawer(false));
        assert!(!closed.task_drawer.is_open);
        assert_eq!(closed.task_drawer.title, "Design hero section");
    }

    #[test]
    fn test_add_project_appends_without_touching_existing() {
        let before = AppState::with_demo_data();
        let after = reduce(before.clone(), Action::AddProject(Project::new(1, "X")));

        assert_eq!(after.projects.len(), before.projects.len() + 1);
        assert_eq!(after.projects[..before.projects.len()].to_vec(), before.projects);
        assert_eq!(after.projects.last(), Some(&Project::new(1, "X")));
    }

    #[test]
    fn test_add_records() {
        let state = reduce_all(
            AppState::default(),
            [
                Action::AddTask(Task::new(9, "Write docs")),
                Action::AddWorkspace(Workspace::new("Nova Tech", "Owner")),
                Action::AddPendingRequest(WorkspaceRequest {
                    workspace: Some("Alpha Corp".to_string()),
                    requested_by: Some("sam".to_string()),
                    message: None,
                    extra: Map::new(),
                }),
            ],
        );
        assert_eq!(state.tasks[0].title, "Write docs");
        assert_eq!(state.workspaces[0].initials, "NT");
        assert_eq!(
            state.pending_workspace_requests[0].workspace.as_deref(),
            Some("Alpha Corp")
        );
    }

    #[test]
    fn test_update_profile_merges() {
        let patch = ProfilePatch {
            designation: Some("Engineering Lead".to_string()),
            ..Default::default()
        };
        let state = reduce(AppState::default(), Action::UpdateProfile(patch));
        assert_eq!(state.user_profile.designation.as_deref(), Some("Engineering Lead"));
        assert_eq!(state.user_profile.full_name, "Alex Johnson");
    }

    #[test]
    fn test_update_settings_shallow_merge() {
        let mut patch = Map::new();
        patch.insert("darkMode".to_string(), json!(true));
        patch.insert("privacy".to_string(), json!({"twoFactorAuth": true}));

        let state = reduce(AppState::default(), Action::UpdateSettings(patch));

        assert!(state.settings.dark_mode());
        assert_eq!(state.settings.get(&["privacy", "twoFactorAuth"]), Some(&json!(true)));
        // Shallow: the replaced object does not keep its old keys.
        assert_eq!(state.settings.get(&["privacy", "profileVisibility"]), None);
    }

    #[test]
    fn test_update_settings_nested_changes_only_target() {
        let before = AppState::default();
        let after = reduce(
            before.clone(),
            Action::settings_nested(["calendar", "defaultView"], json!("week")),
        );

        assert_eq!(after.settings.calendar_default_view(), Some("week"));
        for sibling in [["calendar", "syncGoogle"], ["calendar", "syncOutlook"]] {
            assert!(Arc::ptr_eq(
                before.settings.node(&sibling).unwrap(),
                after.settings.node(&sibling).unwrap()
            ));
        }
        for top in ["notifications", "privacy"] {
            assert!(Arc::ptr_eq(
                before.settings.node(&[top]).unwrap(),
                after.settings.node(&[top]).unwrap()
            ));
        }
    }

    #[test]
    fn test_update_settings_nested_bad_path_is_noop() {
        let before = AppState::default();
        let after = reduce(
            before.clone(),
            Action::settings_nested(["integrations", "slack"], json!(true)),
        );
        assert_eq!(after, before);

        let after = reduce(before.clone(), Action::settings_nested(Vec::<String>::new(), json!(1)));
        assert_eq!(after, before);
    }

    #[test]
    fn test_unknown_action_returns_equal_state() {
        let before = AppState::with_demo_data();
        let after = reduce(before.clone(), Action::Unknown("SET_THEME".to_string()));
        assert_eq!(after, before);
    }
}
