//! Locally stored access tokens.
//!
//! This is a convenience for the CLI, not a security boundary: tokens are
//! kept in plain JSON in the data directory.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::utils::paths::get_session_path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub admin_token: Option<String>,
}

impl Session {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_session_path()?)
    }

    /// Reads the session file. An admin token, when present, also becomes
    /// the access token used for requests.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut session = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Session::default()
        };
        session.promote_admin_token();
        Ok(session)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_session_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn promote_admin_token(&mut self) {
        if let Some(admin) = &self.admin_token {
            debug!("Using admin token for requests");
            self.access_token = Some(admin.clone());
        }
    }

    /// Replaces the stored tokens. A plain sign-in drops any admin token,
    /// which would otherwise win again on the next load.
    pub fn sign_in(&mut self, token: impl Into<String>, admin: bool) {
        let token = token.into();
        self.admin_token = admin.then(|| token.clone());
        self.access_token = Some(token);
    }

    pub fn sign_out(&mut self) {
        self.access_token = None;
        self.admin_token = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.bearer().is_some()
    }

    /// Token to send as `Authorization: Bearer`.
    pub fn bearer(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_signed_out() {
        let tmp = tempfile::tempdir().unwrap();
        let session = Session::load_from(&tmp.path().join("session.json")).unwrap();
        assert_eq!(session, Session::default());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_admin_token_promoted_on_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, r#"{"accessToken":"user","adminToken":"admin"}"#).unwrap();

        let session = Session::load_from(&path).unwrap();
        assert_eq!(session.bearer(), Some("admin"));
    }

    #[test]
    fn test_sign_in_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("session.json");

        let mut session = Session::default();
        session.sign_in("abc123", false);
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path).unwrap();
        assert_eq!(loaded.bearer(), Some("abc123"));
        assert!(loaded.admin_token.is_none());
    }

    #[test]
    fn test_plain_login_replaces_admin_login() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");

        let mut session = Session::load_from(&path).unwrap();
        session.sign_in("A", true);
        session.save_to(&path).unwrap();

        let mut session = Session::load_from(&path).unwrap();
        assert_eq!(session.bearer(), Some("A"));
        session.sign_in("B", false);
        session.save_to(&path).unwrap();

        let session = Session::load_from(&path).unwrap();
        assert_eq!(session.bearer(), Some("B"));
        assert!(session.admin_token.is_none());
    }

    #[test]
    fn test_sign_out_and_blank_token() {
        let mut session = Session::default();
        session.sign_in("root", true);
        assert_eq!(session.admin_token.as_deref(), Some("root"));

        session.sign_out();
        assert!(!session.is_signed_in());

        session.access_token = Some("   ".to_string());
        assert!(session.bearer().is_none());
    }
}
