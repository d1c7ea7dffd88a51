use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level view currently rendered. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    #[default]
    Login,
    Dashboard,
    Projects,
    Planner,
    Tracker,
    Reminders,
    Settings,
    Profile,
    Workspace,
    WorkspaceOwner,
    WorkspaceMember,
    Project,
}

impl Section {
    pub const ALL: [Section; 12] = [
        Section::Login,
        Section::Dashboard,
        Section::Projects,
        Section::Planner,
        Section::Tracker,
        Section::Reminders,
        Section::Settings,
        Section::Profile,
        Section::Workspace,
        Section::WorkspaceOwner,
        Section::WorkspaceMember,
        Section::Project,
    ];

    /// Wire name, as carried in `SET_SECTION` payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Login => "login",
            Section::Dashboard => "dashboard",
            Section::Projects => "projects",
            Section::Planner => "planner",
            Section::Tracker => "tracker",
            Section::Reminders => "reminders",
            Section::Settings => "settings",
            Section::Profile => "profile",
            Section::Workspace => "workspace",
            Section::WorkspaceOwner => "workspaceOwner",
            Section::WorkspaceMember => "workspaceMember",
            Section::Project => "project",
        }
    }

    /// Sections that only make sense inside a selected workspace.
    pub fn is_workspace_scoped(self) -> bool {
        matches!(
            self,
            Section::Workspace | Section::WorkspaceOwner | Section::WorkspaceMember | Section::Project
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}
