//! Settings Persistence
//!
//! Loads and saves [`EngineSettings`] as `settings.json` in the config
//! directory. Writes go through an advisory lock and a temp file that is
//! renamed over the target, so a crash never leaves a half-written file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use subtypo_lib::core::settings::{EngineSettings, SETTINGS_VERSION};
use thiserror::Error;
use tracing::{info, warn};

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Lock file name (advisory lock to prevent concurrent writers)
pub const SETTINGS_LOCK_FILE: &str = "settings.json.lock";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns `<platform config dir>/subtypo`, or `./.subtypo` when the
/// platform has none
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("subtypo"))
        .unwrap_or_else(|| PathBuf::from(".subtypo"))
}

/// Settings manager for loading, saving, and resetting settings
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn lock_path(&self) -> PathBuf {
        self.settings_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(SETTINGS_LOCK_FILE)
    }

    fn with_lock<T>(
        &self,
        exclusive: bool,
        op: impl FnOnce() -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;

        if exclusive {
            FileExt::lock_exclusive(&lock_file)?;
        } else {
            FileExt::lock_shared(&lock_file)?;
        }

        let result = op();

        if let Err(e) = FileExt::unlock(&lock_file) {
            warn!("Failed to unlock settings lock file: {}", e);
        }

        result
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// unreadable
    pub fn load(&self) -> EngineSettings {
        let result = self.with_lock(false, || {
            if !self.settings_path.exists() {
                info!("Settings file not found, using defaults");
                return Ok(EngineSettings::default());
            }

            let content = fs::read_to_string(&self.settings_path)?;
            let mut settings = serde_json::from_str::<EngineSettings>(&content)?;

            if settings.version < SETTINGS_VERSION {
                info!(
                    "Migrating settings from version {} to {}",
                    settings.version, SETTINGS_VERSION
                );
            }

            settings.normalize();
            Ok(settings)
        });

        match result {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings, using defaults: {}", e);
                EngineSettings::default()
            }
        }
    }

    /// Normalizes and saves settings, returning what was written
    pub fn save(&self, settings: &EngineSettings) -> Result<EngineSettings, ConfigError> {
        self.with_lock(true, || {
            let mut normalized = settings.clone();
            normalized.normalize();

            let content = serde_json::to_vec_pretty(&normalized)?;
            atomic_write_bytes(&self.settings_path, &content)?;

            info!("Settings saved to {:?}", self.settings_path);
            Ok(normalized)
        })
    }

    /// Deletes the settings file and returns the defaults
    pub fn reset(&self) -> Result<EngineSettings, ConfigError> {
        self.with_lock(true, || {
            if self.settings_path.exists() {
                fs::remove_file(&self.settings_path)?;
                info!("Settings file deleted");
            }
            Ok(EngineSettings::default())
        })
    }
}

/// Writes `bytes` to a sibling temp file, syncs it, then swaps it into place
pub fn atomic_write_bytes(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = sibling_path(path, "tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    atomic_replace(path, &tmp_path)
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| suffix.to_string());
    path.with_file_name(format!("{file_name}.{suffix}"))
}

fn atomic_replace(dest: &Path, src_tmp: &Path) -> std::io::Result<()> {
    if !dest.exists() {
        return fs::rename(src_tmp, dest);
    }

    // Rename-over-existing is not reliable on every platform; swap through a backup.
    let bak = sibling_path(dest, "bak");
    if bak.exists() {
        let _ = fs::remove_file(&bak);
    }

    fs::rename(dest, &bak)?;
    match fs::rename(src_tmp, dest) {
        Ok(()) => {
            let _ = fs::remove_file(&bak);
            Ok(())
        }
        Err(e) => {
            let _ = fs::rename(&bak, dest);
            let _ = fs::remove_file(src_tmp);
            Err(e)
        }
    }
}
