use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::request::LeavePolicy;
use crate::domain::workweek::WorkweekConfig;
use crate::errors::LeaveError;
use crate::storage::SettingsStore;
use crate::utils::{app_data_dir, ensure_dir};

const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// A deployment-configured leave type, e.g. annual or sick leave. Balances
/// are keyed by the `id` slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaveType {
    pub id: String,
    pub name: String,
}

impl LeaveType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Deployment-wide policy: the workweek window, the two charging flags, and
/// the leave-type catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub workweek: WorkweekConfig,
    pub exclude_holidays: bool,
    pub weekend_bridging: bool,
    #[serde(default = "Settings::default_leave_types")]
    pub leave_types: Vec<LeaveType>,
}

impl Settings {
    pub fn policy(&self) -> LeavePolicy {
        LeavePolicy {
            exclude_holidays: self.exclude_holidays,
            weekend_bridging: self.weekend_bridging,
        }
    }

    pub fn leave_type(&self, id: &str) -> Option<&LeaveType> {
        self.leave_types.iter().find(|leave_type| leave_type.id == id)
    }

    pub fn validate(&self) -> Result<(), LeaveError> {
        self.workweek.validate()
    }

    fn default_leave_types() -> Vec<LeaveType> {
        vec![
            LeaveType::new("annual", "Annual Leave"),
            LeaveType::new("sick", "Sick Leave"),
            LeaveType::new("personal", "Personal Leave"),
        ]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workweek: WorkweekConfig::standard(),
            exclude_holidays: true,
            weekend_bridging: true,
            leave_types: Self::default_leave_types(),
        }
    }
}

/// Loads and persists [`Settings`] as JSON under the application data
/// directory, writing through a temp file so a crash never leaves a torn
/// settings file behind.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self, LeaveError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LeaveError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LeaveError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(SETTINGS_FILE),
        })
    }

    /// Reads the stored settings, falling back to defaults on first run.
    pub fn load(&self) -> Result<Settings, LeaveError> {
        let settings = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            Settings::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), LeaveError> {
        settings.validate()?;
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `mutator` to the stored settings and persists the result,
    /// re-validating the workweek before anything is written.
    pub fn update<F>(&self, mutator: F) -> Result<Settings, LeaveError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.load()?;
        mutator(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for SettingsManager {
    fn get(&self) -> Result<Settings, LeaveError> {
        self.load()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LeaveError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let settings = manager.load().expect("defaults on first run");
        assert_eq!(settings, Settings::default());
        assert!(settings.leave_type("annual").is_some());
    }

    #[test]
    fn update_persists_changes() {
        let temp = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        manager
            .update(|settings| {
                settings.workweek = WorkweekConfig {
                    start_day: 0,
                    end_day: 4,
                };
                settings.weekend_bridging = false;
            })
            .expect("update settings");

        let reloaded = manager.load().unwrap();
        assert_eq!(reloaded.workweek.start_day, 0);
        assert_eq!(reloaded.workweek.end_day, 4);
        assert!(!reloaded.weekend_bridging);
    }

    #[test]
    fn save_rejects_invalid_workweek() {
        let temp = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut settings = Settings::default();
        settings.workweek.end_day = 12;
        let err = manager.save(&settings).expect_err("invalid index must fail");
        assert!(matches!(err, LeaveError::InvalidWorkweek(12)));
        assert!(!manager.path().exists());
    }
}
