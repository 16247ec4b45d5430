//! Preset locations on disk.
//!
//! User presets live in `attacca/presets` under the platform config
//! directory reported by [`dirs::config_dir`]:
//!
//! | Platform | User presets |
//! |----------|--------------|
//! | Linux | `~/.config/attacca/presets/` |
//! | macOS | `~/Library/Application Support/attacca/presets/` |
//! | Windows | `%APPDATA%\attacca\presets\` |
//!
//! A read-only system directory is searched after the user one.

use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_NAME: &str = "attacca";
const PRESETS_SUBDIR: &str = "presets";
const PRESET_EXTENSION: &str = "toml";

/// User presets directory. Falls back to `./attacca/presets` when the
/// platform has no config directory.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// System-wide presets directory.
pub fn system_presets_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Create the user presets directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Locate a preset file.
///
/// `name` may be a path to an existing file, or a bare name (with or without
/// `.toml`) looked up in the user directory, then the system directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir(), system_presets_dir()])
}

fn find_preset_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Some(direct);
    }
    let file_name = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.{PRESET_EXTENSION}")
    };
    dirs.iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// `.toml` files in the user presets directory, sorted.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// `.toml` files in the system presets directory, sorted.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// User presets followed by system presets.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXTENSION))
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use attacca_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/presets/kick_snap.toml"));
/// assert_eq!(name.as_deref(), Some("kick_snap"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dirs_are_namespaced() {
        assert!(user_presets_dir().ends_with("attacca/presets"));
        assert!(system_presets_dir().ends_with("attacca/presets"));
    }

    #[test]
    fn find_by_direct_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kick.toml");
        fs::write(&path, "name = \"kick\"").unwrap();
        assert_eq!(find_preset(path.to_str().unwrap()), Some(path));
    }

    #[test]
    fn find_by_name_in_search_dirs() {
        let user = TempDir::new().unwrap();
        let system = TempDir::new().unwrap();
        fs::write(system.path().join("room.toml"), "").unwrap();
        fs::write(user.path().join("kick.toml"), "").unwrap();
        fs::write(system.path().join("kick.toml"), "").unwrap();

        let dirs = [user.path().to_path_buf(), system.path().to_path_buf()];
        assert_eq!(
            find_preset_in("kick", &dirs),
            Some(user.path().join("kick.toml"))
        );
        assert_eq!(
            find_preset_in("room.toml", &dirs),
            Some(system.path().join("room.toml"))
        );
        assert_eq!(find_preset_in("snare", &dirs), None);
    }

    #[test]
    fn list_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.toml"), "").unwrap();
        fs::write(temp.path().join("a.toml"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp.path().join("dir.toml")).unwrap();

        let presets = list_presets_in_dir(temp.path());
        let names: Vec<_> = presets
            .iter()
            .filter_map(|p| preset_name_from_path(p))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn list_missing_dir_is_empty() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/attacca/12345")).is_empty());
    }
}
