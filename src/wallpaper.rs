use std::{
    ffi::c_void,
    fs,
    path::{Path, PathBuf},
};

use windows::Win32::UI::WindowsAndMessaging::{
    SystemParametersInfoW, SPIF_SENDWININICHANGE, SPIF_UPDATEINIFILE, SPI_GETDESKWALLPAPER,
    SPI_SETDESKWALLPAPER, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use crate::{info, paths, utility::to_wstring, warn, DEBUG_NAME};

const MAX_WALLPAPER_PATH: usize = 260;

/// Copy the wallpaper that is active right now into the fixed snapshot path.
/// Best effort: a failed snapshot only means restore() will be a no-op later.
pub fn snapshot_current() {
    let snapshot = paths::snapshot_file();
    if let Some(parent) = snapshot.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let Some(current) = current_wallpaper_path() else {
        warn!("[{}][WALLPAPER] Could not determine current wallpaper; nothing to snapshot", DEBUG_NAME);
        return;
    };

    match fs::copy(&current, &snapshot) {
        Ok(bytes) => info!(
            "[{}][WALLPAPER] Snapshotted {} ({bytes} bytes) -> {}",
            DEBUG_NAME,
            current.display(),
            snapshot.display()
        ),
        Err(e) => warn!(
            "[{}][WALLPAPER] Failed to snapshot {}: {e}",
            DEBUG_NAME,
            current.display()
        ),
    }
}

/// Persist the rendered frame to the fixed temp path and hand it to the OS.
/// The file write is fatal on failure; the OS set call is fire-and-forget.
pub fn apply(image_bytes: &[u8]) -> Result<(), String> {
    let target = paths::temp_wallpaper_file();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    fs::write(&target, image_bytes)
        .map_err(|e| format!("Failed to write wallpaper image {}: {e}", target.display()))?;

    match std::path::absolute(&target) {
        Ok(abs) => set_desktop_wallpaper(&abs),
        Err(e) => warn!(
            "[{}][WALLPAPER] Could not absolutize {}: {e}",
            DEBUG_NAME,
            target.display()
        ),
    }
    Ok(())
}

/// Put the pre-existing wallpaper back. No-op when no snapshot was taken.
/// The snapshot file itself stays on disk.
pub fn restore_original() {
    let snapshot = paths::snapshot_file();
    if !snapshot.exists() {
        return;
    }

    match std::path::absolute(&snapshot) {
        Ok(abs) => {
            info!("[{}][WALLPAPER] Restoring original wallpaper from {}", DEBUG_NAME, abs.display());
            set_desktop_wallpaper(&abs);
        }
        Err(e) => warn!(
            "[{}][WALLPAPER] Could not absolutize snapshot {}: {e}",
            DEBUG_NAME,
            snapshot.display()
        ),
    }
}

/// SPI_SETDESKWALLPAPER with registry update + change broadcast. Failures are
/// logged and otherwise indistinguishable from success by design; the next
/// tick will try again anyway.
fn set_desktop_wallpaper(path: &Path) {
    let wide = to_wstring(&path.to_string_lossy());
    let result = unsafe {
        SystemParametersInfoW(
            SPI_SETDESKWALLPAPER,
            0,
            Some(wide.as_ptr() as *mut c_void),
            SPIF_UPDATEINIFILE | SPIF_SENDWININICHANGE,
        )
    };
    if let Err(e) = result {
        warn!("[{}][WALLPAPER] SPI_SETDESKWALLPAPER failed for {}: {e}", DEBUG_NAME, path.display());
    }
}

/// Ask the OS where the active wallpaper file lives.
fn current_wallpaper_path() -> Option<PathBuf> {
    let mut buffer = [0u16; MAX_WALLPAPER_PATH];
    let result = unsafe {
        SystemParametersInfoW(
            SPI_GETDESKWALLPAPER,
            buffer.len() as u32,
            Some(buffer.as_mut_ptr() as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    if let Err(e) = result {
        warn!("[{}][WALLPAPER] SPI_GETDESKWALLPAPER failed: {e}", DEBUG_NAME);
        return None;
    }

    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    if len == 0 {
        return None;
    }
    Some(PathBuf::from(String::from_utf16_lossy(&buffer[..len])))
}
