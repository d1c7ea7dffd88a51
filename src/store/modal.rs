use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named dialogs whose visibility lives in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modal {
    CreateWorkspace,
    CreateProject,
    WorkloadDeadline,
    TaskDetails,
    TaskRating,
    Polls,
    Leaderboard,
    Payroll,
    ExportReports,
    ManageProject,
    DocumentsHub,
    Timesheet,
    InviteEmployee,
    Client,
    Pricing,
    RequestChange,
    Notifications,
}

impl Modal {
    pub const ALL: [Modal; 17] = [
        Modal::CreateWorkspace,
        Modal::CreateProject,
        Modal::WorkloadDeadline,
        Modal::TaskDetails,
        Modal::TaskRating,
        Modal::Polls,
        Modal::Leaderboard,
        Modal::Payroll,
        Modal::ExportReports,
        Modal::ManageProject,
        Modal::DocumentsHub,
        Modal::Timesheet,
        Modal::InviteEmployee,
        Modal::Client,
        Modal::Pricing,
        Modal::RequestChange,
        Modal::Notifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Modal::CreateWorkspace => "createWorkspace",
            Modal::CreateProject => "createProject",
            Modal::WorkloadDeadline => "workloadDeadline",
            Modal::TaskDetails => "taskDetails",
            Modal::TaskRating => "taskRating",
            Modal::Polls => "polls",
            Modal::Leaderboard => "leaderboard",
            Modal::Payroll => "payroll",
            Modal::ExportReports => "exportReports",
            Modal::ManageProject => "manageProject",
            Modal::DocumentsHub => "documentsHub",
            Modal::Timesheet => "timesheet",
            Modal::InviteEmployee => "inviteEmployee",
            Modal::Client => "client",
            Modal::Pricing => "pricing",
            Modal::RequestChange => "requestChange",
            Modal::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modal::ALL
            .into_iter()
            .find(|modal| modal.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown modal: {}", s))
    }
}

/// Open/closed flag per modal.
///
/// Flags are independent: opening one modal never closes another, so any
/// subset can be open at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalRegistry(BTreeMap<Modal, bool>);

impl Default for ModalRegistry {
    fn default() -> Self {
        Self(Modal::ALL.into_iter().map(|modal| (modal, false)).collect())
    }
}

impl ModalRegistry {
    pub fn is_open(&self, modal: Modal) -> bool {
        self.0.get(&modal).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, modal: Modal) {
        let open = self.0.entry(modal).or_insert(false);
        *open = !*open;
    }

    pub fn open_modals(&self) -> Vec<Modal> {
        self.0
            .iter()
            .filter(|(_, open)| **open)
            .map(|(modal, _)| *modal)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_closed_by_default() {
        let registry = ModalRegistry::default();
        assert!(Modal::ALL.iter().all(|m| !registry.is_open(*m)));
        assert!(registry.open_modals().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut registry = ModalRegistry::default();
        registry.toggle(Modal::Payroll);
        assert!(registry.is_open(Modal::Payroll));
        registry.toggle(Modal::Payroll);
        assert!(!registry.is_open(Modal::Payroll));
    }

    #[test]
    fn test_modals_open_independently() {
        let mut registry = ModalRegistry::default();
        registry.toggle(Modal::Polls);
        registry.toggle(Modal::Leaderboard);

        assert_eq!(registry.open_modals(), vec![Modal::Polls, Modal::Leaderboard]);
    }

    #[test]
    fn test_serializes_as_name_map() {
        let mut registry = ModalRegistry::default();
        registry.toggle(Modal::DocumentsHub);

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["documentsHub"], true);
        assert_eq!(json["createWorkspace"], false);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("taskRating".parse::<Modal>().unwrap(), Modal::TaskRating);
        assert!("settings".parse::<Modal>().is_err());
    }
}
