// ~/deskdraw/src/paths.rs

use std::path::PathBuf;

use crate::utility::exe_root_dir;

/// Root of the on-disk resource layout:
///
/// ```text
/// resources/
///   cache/settings.json
///   tmp/original_wallpaper.png
///   tmp/temp.png
///   fonts/*.{ttf,otf}
///   icons/
/// ```
pub fn resources_root() -> PathBuf {
    exe_root_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("resources")
}

pub fn cache_dir() -> PathBuf {
    resources_root().join("cache")
}

pub fn tmp_dir() -> PathBuf {
    resources_root().join("tmp")
}

pub fn fonts_dir() -> PathBuf {
    resources_root().join("fonts")
}

pub fn icons_dir() -> PathBuf {
    resources_root().join("icons")
}

pub fn settings_file() -> PathBuf {
    cache_dir().join("settings.json")
}

/// Copy of the wallpaper that was active when the process started. Written
/// once at startup, read at shutdown, intentionally left on disk afterwards.
pub fn snapshot_file() -> PathBuf {
    tmp_dir().join("original_wallpaper.png")
}

pub fn temp_wallpaper_file() -> PathBuf {
    tmp_dir().join("temp.png")
}

pub fn log_file() -> PathBuf {
    exe_root_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskdraw.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_anchored_under_resources() {
        let root = resources_root();
        assert!(settings_file().starts_with(&root));
        assert!(snapshot_file().starts_with(&root));
        assert!(temp_wallpaper_file().starts_with(&root));
        assert!(fonts_dir().starts_with(&root));
        assert!(icons_dir().starts_with(&root));
    }

    #[test]
    fn fixed_file_names() {
        assert!(settings_file().ends_with("cache/settings.json"));
        assert!(snapshot_file().ends_with("tmp/original_wallpaper.png"));
        assert!(temp_wallpaper_file().ends_with("tmp/temp.png"));
    }
}
