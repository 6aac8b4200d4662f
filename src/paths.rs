use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "QuickLinks";
pub const LINKS_FILE_NAME: &str = "quick_links.json";

#[derive(Debug, Clone)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // `%APPDATA%` on Windows, `~/.config` on Linux, `~/Library/Application Support` on macOS.
    pub fn platform_default() -> Result<Self, String> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| "could not resolve a per-user config directory".to_string())?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn links_file(&self) -> PathBuf {
        self.root.join(LINKS_FILE_NAME)
    }

    pub fn ensure(&self) -> Result<&Path, String> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            format!(
                "failed to create storage directory {}: {e}",
                self.root.display()
            )
        })?;
        Ok(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_file_lives_under_root() {
        let paths = AppPaths::new("/tmp/ql");
        assert_eq!(paths.links_file(), PathBuf::from("/tmp/ql/quick_links.json"));
    }

    #[test]
    fn ensure_creates_missing_directory() {
        let root = std::env::temp_dir()
            .join(format!("quicklinks-paths-{}", uuid::Uuid::new_v4()))
            .join(APP_DIR_NAME);
        let paths = AppPaths::new(&root);
        assert!(!root.exists());
        paths.ensure().expect("directory should be created");
        assert!(root.is_dir());
        let _ = std::fs::remove_dir_all(root.parent().expect("parent"));
    }
}
