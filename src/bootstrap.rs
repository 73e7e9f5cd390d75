// ~/deskdraw/src/bootstrap.rs

use std::fs;

use crate::{data_loaders::settings, fonts, info, paths, DEBUG_NAME};

/// Prepare the on-disk environment before the first render: resource
/// directories, a loadable default font, and a settings document. Any failure
/// here is fatal; nothing has overwritten the user's wallpaper yet.
pub fn prepare_environment() -> Result<(), String> {
    info!("[{}] === Bootstrap starting ===", DEBUG_NAME);

    for dir in [
        paths::cache_dir(),
        paths::tmp_dir(),
        paths::fonts_dir(),
        paths::icons_dir(),
    ] {
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
    }
    info!("[{}] Resource layout ready at {}", DEBUG_NAME, paths::resources_root().display());

    // Exercises the full resolution chain, including the built-in fallback.
    let _ = fonts::load_font("font", 40.0)?;
    info!("[{}] Startup font check passed", DEBUG_NAME);

    settings::ensure_exists()?;

    info!("[{}] Bootstrap complete", DEBUG_NAME);
    Ok(())
}
