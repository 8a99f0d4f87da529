use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::theme::Theme;

const SETTINGS_FILENAME: &str = "discovery_settings.ron";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to create state directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write settings to {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSettings {
    #[serde(default)]
    theme: Theme,
}

/// Theme preference stored as a ron file in the state directory.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILENAME)
    }

    /// The stored theme, or the default when nothing usable is stored.
    pub fn load(&self) -> Theme {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Theme::default(),
            Err(err) => {
                engine_warn!("Failed to read settings from {:?}: {}", path, err);
                return Theme::default();
            }
        };

        match ron::from_str::<PersistedSettings>(&content) {
            Ok(settings) => {
                engine_info!("Loaded theme {} from {:?}", settings.theme.label(), path);
                settings.theme
            }
            Err(err) => {
                engine_warn!("Failed to parse settings from {:?}: {}", path, err);
                Theme::default()
            }
        }
    }

    /// Write the theme through to disk, replacing the file atomically.
    pub fn set(&self, theme: Theme) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let settings = PersistedSettings { theme };
        let content = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::new())?;

        let path = self.path();
        write_atomic(&self.dir, &path, &content).map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })
    }
}

fn write_atomic(dir: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
