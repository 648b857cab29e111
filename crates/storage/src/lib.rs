use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::{
    fs,
    path::PathBuf,
};

/// A saved game on disk, identified by its file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavegameEntry {
    pub name: String,
    pub modified: DateTime<Utc>,
}

/// Plain-file savegame store. Games live as `<root>/<name>.json`; the
/// content is opaque to this crate (it is whatever the engine's `serialize`
/// returned).
#[derive(Debug, Clone)]
pub struct SavegameStore {
    root: PathBuf,
}

const SAVEGAME_EXT: &str = "json";

impl SavegameStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Lists saved games, newest first. A store that has never been written
    /// to has no root directory; that is an empty list, not an error.
    pub fn list(&self) -> Result<Vec<SavegameEntry>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to list savegames in {}", self.root.display()))
            }
        };

        let mut games = Vec::new();
        for entry in entries {
            let entry = entry.context("failed to read savegame directory entry")?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SAVEGAME_EXT) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            games.push(SavegameEntry {
                name: name.to_string(),
                modified,
            });
        }
        games.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(games)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.savegame_path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read savegame {}", path.display()))
    }

    /// Writes a savegame, creating the store directory first if needed.
    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.savegame_path(name)?;
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create savegame dir {}", self.root.display()))?;
        fs::write(&path, content)
            .with_context(|| format!("failed to write savegame {}", path.display()))
    }

    fn savegame_path(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            bail!("savegame name must not be empty");
        }
        if name.contains(['/', '\\']) || name.contains("..") {
            bail!("savegame name must not contain path components: {name:?}");
        }
        Ok(self.root.join(format!("{name}.{SAVEGAME_EXT}")))
    }
}

#[cfg(test)]
mod tests;
