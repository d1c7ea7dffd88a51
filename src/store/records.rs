use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Record identifier: numeric for locally created records, string for
/// records that came back from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Assignee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Assignee>,
    /// Fields this store does not interpret, kept as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: None,
            status: None,
            priority: None,
            due: None,
            assignees: Vec::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            project: None,
            category: None,
            assignee: None,
            status: None,
            due: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: None,
            initials: initials(&name),
            name,
            kind: Some(kind.into()),
            extra: Map::new(),
        }
    }
}

/// First letter of the first two words, upper-cased ("Nova Tech Labs" -> "NT").
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// A request to join a workspace, awaiting approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            full_name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            username: "alexjohnson".to_string(),
            phone: Some("+1 555-0102".to_string()),
            designation: Some("Product Manager".to_string()),
            department: Some("Product".to_string()),
            location: Some("Remote".to_string()),
            about: Some("Loves building delightful product experiences.".to_string()),
            avatar_url: None,
            is_email_verified: true,
            is_active: true,
        }
    }
}

/// Partial profile; present fields overwrite, absent fields are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub is_email_verified: Option<bool>,
    pub is_active: Option<bool>,
}

impl UserProfile {
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.designation.is_some() {
            self.designation = patch.designation;
        }
        if patch.department.is_some() {
            self.department = patch.department;
        }
        if patch.location.is_some() {
            self.location = patch.location;
        }
        if patch.about.is_some() {
            self.about = patch.about;
        }
        if patch.avatar_url.is_some() {
            self.avatar_url = patch.avatar_url;
        }
        if let Some(verified) = patch.is_email_verified {
            self.is_email_verified = verified;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_project_accepts_minimal_record() {
        let project: Project = serde_json::from_value(json!({"id": 1, "name": "X"})).unwrap();
        assert_eq!(project, Project::new(1, "X"));
    }

    #[test]
    fn test_project_keeps_unknown_fields() {
        let project: Project = serde_json::from_value(json!({
            "_id": "abc",
            "name": "Portal",
            "progress": 0,
            "startDate": "2024-10-01"
        }))
        .unwrap();

        assert_eq!(project.id, RecordId::from("abc"));
        assert_eq!(project.extra.get("progress"), Some(&json!(0)));

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["startDate"], "2024-10-01");
    }

    #[test]
    fn test_task_with_assignee() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Final QA pass",
            "assignee": {"name": "Alex"},
            "status": "At Risk"
        }))
        .unwrap();

        assert_eq!(task.assignee, Some(Assignee::new("Alex")));
        assert_eq!(task.status.as_deref(), Some("At Risk"));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("NovaTech"), "N");
        assert_eq!(initials("alpha corp"), "AC");
        assert_eq!(initials("Nova Tech Labs"), "NT");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_workspace_new_computes_initials() {
        let workspace = Workspace::new("Alpha Corp", "Member");
        assert_eq!(workspace.initials, "AC");
        assert_eq!(workspace.kind.as_deref(), Some("Member"));
    }

    #[test]
    fn test_profile_patch_merges_present_fields() {
        let mut profile = UserProfile::default();
        let patch: ProfilePatch =
            serde_json::from_value(json!({"fullName": "Sam Lee", "location": "Pune"})).unwrap();

        profile.apply(patch);

        assert_eq!(profile.full_name, "Sam Lee");
        assert_eq!(profile.location.as_deref(), Some("Pune"));
        assert_eq!(profile.email, "alex@example.com");
        assert_eq!(profile.designation.as_deref(), Some("Product Manager"));
    }
}
