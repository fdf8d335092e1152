use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Per-user directory holding custom word lists
    pub fn words_dir() -> Option<PathBuf> {
        if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
            if !data_home.is_empty() {
                return Some(PathBuf::from(data_home).join("glowl").join("words"));
            }
        }
        ProjectDirs::from("", "", "glowl").map(|proj_dirs| proj_dirs.data_dir().join("words"))
    }

    /// Resolve `file` inside the words directory, falling back to `file` itself
    /// when no home directory can be determined.
    pub fn word_file(file: &Path) -> PathBuf {
        match Self::words_dir() {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }
}
