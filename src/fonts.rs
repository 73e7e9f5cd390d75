use std::{
    env,
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use ab_glyph::{FontArc, PxScale};

use crate::{info, paths, warn, DEBUG_NAME};

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// System faces tried, in order, when nothing usable sits in resources/fonts/.
/// Segoe UI ships with every supported Windows version, so in practice the
/// first candidate wins.
const BUILTIN_CANDIDATES: [&str; 4] = ["segoeui.ttf", "arial.ttf", "calibri.ttf", "tahoma.ttf"];

static BUILTIN: OnceLock<Option<FontArc>> = OnceLock::new();

pub struct FontHandle {
    pub font: FontArc,
    pub scale: PxScale,
}

/// Resolve a logical font name at the given pixel size. Resolution failures
/// are logged and swallowed by falling back to the built-in default face; the
/// only error condition is a machine with no loadable default at all.
pub fn load_font(name: &str, size: f32) -> Result<FontHandle, String> {
    let scale = PxScale::from(size);

    for path in candidate_paths(name) {
        if !path.exists() {
            continue;
        }
        match load_font_file(&path) {
            Ok(font) => return Ok(FontHandle { font, scale }),
            Err(e) => warn!("[{}] Failed to load font {}: {e}", DEBUG_NAME, path.display()),
        }
    }

    warn!(
        "[{}] Font not found: resources/fonts/{}(.ttf|.otf); using built-in default",
        DEBUG_NAME, name
    );
    builtin_default().map(|font| FontHandle { font, scale })
}

/// The built-in default face, parsed once and shared.
pub fn builtin_default() -> Result<FontArc, String> {
    BUILTIN
        .get_or_init(|| {
            let windir = env::var("WINDIR").unwrap_or_else(|_| r"C:\Windows".to_string());
            for candidate in BUILTIN_CANDIDATES {
                let path = Path::new(&windir).join("Fonts").join(candidate);
                match load_font_file(&path) {
                    Ok(font) => {
                        info!("[{}] Built-in default font: {}", DEBUG_NAME, path.display());
                        return Some(font);
                    }
                    Err(_) => continue,
                }
            }
            None
        })
        .clone()
        .ok_or_else(|| {
            format!(
                "No built-in default font available (tried {})",
                BUILTIN_CANDIDATES.join(", ")
            )
        })
}

/// Paths tried for a logical name: the name itself when it already carries a
/// font extension, otherwise `<name>.ttf` then `<name>.otf`.
pub(crate) fn candidate_paths(name: &str) -> Vec<PathBuf> {
    let dir = paths::fonts_dir();
    let lower = name.to_ascii_lowercase();

    if FONT_EXTENSIONS.iter().any(|ext| lower.ends_with(&format!(".{ext}"))) {
        return vec![dir.join(name)];
    }

    FONT_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .collect()
}

fn load_font_file(path: &Path) -> Result<FontArc, String> {
    let data = fs::read(path).map_err(|e| format!("read failed: {e}"))?;
    FontArc::try_from_vec(data).map_err(|e| format!("parse failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_extension_yields_single_candidate() {
        let candidates = candidate_paths("font.otf");
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].ends_with("fonts/font.otf"));
    }

    #[test]
    fn bare_name_tries_ttf_then_otf() {
        let candidates = candidate_paths("font");
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].ends_with("fonts/font.ttf"));
        assert!(candidates[1].ends_with("fonts/font.otf"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let candidates = candidate_paths("Heading.TTF");
        assert_eq!(candidates.len(), 1);
    }
}
