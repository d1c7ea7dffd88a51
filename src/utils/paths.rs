use anyhow::{Result, anyhow};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Overrides the data directory (useful for tests and sandboxes).
pub const HOME_ENV_VAR: &str = "SARTTHI_HOME";

pub fn get_sartthi_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(HOME_ENV_VAR).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".sartthi"))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_sartthi_dir()?.join("config.toml"))
}

pub fn get_session_path() -> Result<PathBuf> {
    Ok(get_sartthi_dir()?.join("session.json"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    Ok(get_sartthi_dir()?.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    Ok(get_sartthi_dir()?.join("crash.log"))
}

pub fn ensure_sartthi_dir_exists() -> Result<PathBuf> {
    let dir = get_sartthi_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_dir() {
        // SAFETY: serialized with every other test touching this variable.
        unsafe { env::remove_var(HOME_ENV_VAR) };
        let dir = get_sartthi_dir().unwrap();
        assert!(dir.to_string_lossy().ends_with(".sartthi"));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        let tmp = tempfile::tempdir().unwrap();
        unsafe { env::set_var(HOME_ENV_VAR, tmp.path()) };

        assert_eq!(get_sartthi_dir().unwrap(), tmp.path());
        assert_eq!(get_config_path().unwrap(), tmp.path().join("config.toml"));
        assert_eq!(get_session_path().unwrap(), tmp.path().join("session.json"));
        assert!(get_logs_dir().unwrap().ends_with("logs"));
        assert!(get_crash_log_path().unwrap().ends_with("crash.log"));

        unsafe { env::remove_var(HOME_ENV_VAR) };
    }

    #[test]
    #[serial]
    fn test_ensure_dir_creates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("nested").join("sartthi");
        unsafe { env::set_var(HOME_ENV_VAR, &nested) };

        let dir = ensure_sartthi_dir_exists().unwrap();
        assert!(dir.is_dir());

        unsafe { env::remove_var(HOME_ENV_VAR) };
    }
}
