use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::modal::Modal;
use super::records::{ProfilePatch, Project, Task, UserProfile, Workspace, WorkspaceRequest};
use super::section::Section;
use super::toast::{Toast, ToastId};

/// Every state transition the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSection(Section),
    SetWorkspace(String),
    SetProject(String),
    SetMode(String),
    SetCwStep(u32),
    AddToast(Toast),
    RemoveToast(ToastId),
    /// Legacy positional removal, resolved against the queue at reduce time.
    RemoveToastAt(usize),
    ToggleModal(Modal),
    ToggleTaskDrawer(bool),
    SetTaskDrawerTitle(String),
    ToggleQuickAdd,
    ToggleUserMenu,
    ToggleSidebar,
    AddProject(Project),
    AddTask(Task),
    AddWorkspace(Workspace),
    AddPendingRequest(WorkspaceRequest),
    UpdateProfile(ProfilePatch),
    SetUser(UserProfile),
    UpdateSettings(Map<String, Value>),
    UpdateSettingsNested { path: Vec<String>, value: Value },
    /// A type this store does not know. Reduces to the unchanged state.
    Unknown(String),
}

impl Action {
    pub fn kind(&self) -> &str {
        match self {
            Action::SetSection(_) => "SET_SECTION",
            Action::SetWorkspace(_) => "SET_WORKSPACE",
            Action::SetProject(_) => "SET_PROJECT",
            Action::SetMode(_) => "SET_MODE",
            Action::SetCwStep(_) => "SET_CW_STEP",
            Action::AddToast(_) => "ADD_TOAST",
            Action::RemoveToast(_) | Action::RemoveToastAt(_) => "REMOVE_TOAST",
            Action::ToggleModal(_) => "TOGGLE_MODAL",
            Action::ToggleTaskDrawer(_) => "TOGGLE_TASK_DRAWER",
            Action::SetTaskDrawerTitle(_) => "SET_TASK_DRAWER_TITLE",
            Action::ToggleQuickAdd => "TOGGLE_QUICK_ADD",
            Action::ToggleUserMenu => "TOGGLE_USER_MENU",
            Action::ToggleSidebar => "TOGGLE_SIDEBAR",
            Action::AddProject(_) => "ADD_PROJECT",
            Action::AddTask(_) => "ADD_TASK",
            Action::AddWorkspace(_) => "ADD_WORKSPACE",
            Action::AddPendingRequest(_) => "ADD_PENDING_REQUEST",
            Action::UpdateProfile(_) => "UPDATE_PROFILE",
            Action::SetUser(_) => "SET_USER",
            Action::UpdateSettings(_) => "UPDATE_SETTINGS",
            Action::UpdateSettingsNested { .. } => "UPDATE_SETTINGS_NESTED",
            Action::Unknown(kind) => kind,
        }
    }

    pub fn settings_nested<S: Into<String>>(
        path: impl IntoIterator<Item = S>,
        value: Value,
    ) -> Self {
        Action::UpdateSettingsNested {
            path: path.into_iter().map(Into::into).collect(),
            value,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("{kind} requires a payload")]
    MissingPayload { kind: String },
    #[error("invalid payload for {kind}: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid action: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Untyped `{ "type": ..., "payload": ... }` form of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl RawAction {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    fn payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, ActionError> {
        if self.payload.is_null() {
            return Err(ActionError::MissingPayload {
                kind: self.kind.clone(),
            });
        }
        serde_json::from_value(self.payload.clone()).map_err(|source| ActionError::InvalidPayload {
            kind: self.kind.clone(),
            source,
        })
    }
}

#[derive(Deserialize)]
struct NestedPayload {
    path: Vec<String>,
    value: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToastTarget {
    Index(usize),
    Id(ToastId),
}

impl TryFrom<RawAction> for Action {
    type Error = ActionError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let action = match raw.kind.as_str() {
            "SET_SECTION" => Action::SetSection(raw.payload()?),
            "SET_WORKSPACE" => Action::SetWorkspace(raw.payload()?),
            "SET_PROJECT" => Action::SetProject(raw.payload()?),
            "SET_MODE" => Action::SetMode(raw.payload()?),
            "SET_CW_STEP" => Action::SetCwStep(raw.payload()?),
            "ADD_TOAST" => Action::AddToast(raw.payload()?),
            "REMOVE_TOAST" => match raw.payload()? {
                ToastTarget::Index(index) => Action::RemoveToastAt(index),
                ToastTarget::Id(id) => Action::RemoveToast(id),
            },
            "TOGGLE_MODAL" => Action::ToggleModal(raw.payload()?),
            "TOGGLE_TASK_DRAWER" => Action::ToggleTaskDrawer(raw.payload()?),
            "SET_TASK_DRAWER_TITLE" => Action::SetTaskDrawerTitle(raw.payload()?),
            "TOGGLE_QUICK_ADD" => Action::ToggleQuickAdd,
            "TOGGLE_USER_MENU" => Action::ToggleUserMenu,
            "TOGGLE_SIDEBAR" => Action::ToggleSidebar,
            "ADD_PROJECT" => Action::AddProject(raw.payload()?),
            "ADD_TASK" => Action::AddTask(raw.payload()?),
            "ADD_WORKSPACE" => Action::AddWorkspace(raw.payload()?),
            "ADD_PENDING_REQUEST" => Action::AddPendingRequest(raw.payload()?),
            "UPDATE_PROFILE" => Action::UpdateProfile(raw.payload()?),
            "SET_USER" => Action::SetUser(raw.payload()?),
            "UPDATE_SETTINGS" => Action::UpdateSettings(raw.payload()?),
            "UPDATE_SETTINGS_NESTED" => {
                let NestedPayload { path, value } = raw.payload()?;
                Action::UpdateSettingsNested { path, value }
            }
            _ => Action::Unknown(raw.kind),
        };
        Ok(action)
    }
}

impl std::str::FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: RawAction = serde_json::from_str(s)?;
        Action::try_from(raw)
    }
}

/// Parses a JSON array of raw actions.
pub fn parse_actions(json: &str) -> Result<Vec<Action>, ActionError> {
    let raw: Vec<RawAction> = serde_json::from_str(json)?;
    raw.into_iter().map(Action::try_from).collect()
}
