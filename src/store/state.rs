use serde::{Deserialize, Serialize};

use super::modal::ModalRegistry;
use super::records::{Assignee, Project, Task, UserProfile, Workspace, WorkspaceRequest};
use super::section::Section;
use super::settings::Settings;
use super::toast::ToastQueue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDrawer {
    pub is_open: bool,
    pub title: String,
}

impl Default for TaskDrawer {
    fn default() -> Self {
        Self {
            is_open: false,
            title: "Task".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sidebar {
    pub collapsed: bool,
}

/// Everything the UI session knows. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_section: Section,
    pub current_workspace: String,
    pub current_project: String,
    pub mode: String,
    /// Step of the create-workspace wizard (1-based).
    pub cw_step: u32,
    pub toasts: ToastQueue,
    pub modals: ModalRegistry,
    pub task_drawer: TaskDrawer,
    pub quick_add_menu: bool,
    pub user_menu: bool,
    pub sidebar: Sidebar,
    pub workspaces: Vec<Workspace>,
    pub pending_workspace_requests: Vec<WorkspaceRequest>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub user_profile: UserProfile,
    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_section: Section::default(),
            current_workspace: "NovaTech".to_string(),
            current_project: "NovaTech Website".to_string(),
            mode: "Personal".to_string(),
            cw_step: 1,
            toasts: ToastQueue::default(),
            modals: ModalRegistry::default(),
            task_drawer: TaskDrawer::default(),
            quick_add_menu: false,
            user_menu: false,
            sidebar: Sidebar::default(),
            workspaces: Vec::new(),
            pending_workspace_requests: Vec::new(),
            projects: Vec::new(),
            tasks: Vec::new(),
            user_profile: UserProfile::default(),
            settings: Settings::default(),
        }
    }
}

impl AppState {
    /// Initial state seeded with the demo workspaces, projects and tasks.
    pub fn with_demo_data() -> Self {
        let mut state = Self::default();

        state.workspaces = vec![
            Workspace::new("NovaTech", "team"),
            Workspace::new("Alpha Corp", "team"),
        ];

        state.projects = vec![
            demo_project(1, "NovaTech Website", "NovaTech", "Active", "Oct 25", "High", &["Sam", "Priya"]),
            demo_project(2, "Mobile App", "Acme", "On Hold", "Nov 10", "Medium", &["Alex", "Priya"]),
            demo_project(3, "HR Policy Revamp", "Internal", "Completed", "Sep 18", "Low", &["Alex"]),
        ];

        state.tasks = vec![
            demo_task(1, "Design hero section", "UI", "Sam", "In Progress", "Oct 20"),
            demo_task(2, "Implement responsive grid", "Frontend", "Priya", "Backlog", "Oct 23"),
            demo_task(3, "Final QA pass", "QA", "Alex", "At Risk", "Oct 27"),
        ];

        state
    }

    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Tasks belonging to the currently selected project.
    pub fn current_project_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project.as_deref() == Some(self.current_project.as_str()))
            .collect()
    }
}

fn demo_project(
    id: u64,
    name: &str,
    client: &str,
    status: &str,
    due: &str,
    priority: &str,
    assignees: &[&str],
) -> Project {
    let mut project = Project::new(id, name);
    project.client = Some(client.to_string());
    project.status = Some(status.to_string());
    project.due = Some(due.to_string());
    project.priority = Some(priority.to_string());
    project.assignees = assignees.iter().map(|name| Assignee::new(*name)).collect();
    project
}

fn demo_task(id: u64, title: &str, category: &str, assignee: &str, status: &str, due: &str) -> Task {
    let mut task = Task::new(id, title);
    task.project = Some("NovaTech Website".to_string());
    task.category = Some(category.to_string());
    task.assignee = Some(Assignee::new(assignee));
    task.status = Some(status.to_string());
    task.due = Some(due.to_string());
    task
}
