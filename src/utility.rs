use std::{
    env,
    ffi::OsStr,
    os::windows::ffi::OsStrExt,
    path::{Path, PathBuf},
};

pub fn to_wstring(s: &str) -> Vec<u16> {
    OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Directory the running executable lives in. Everything the process touches
/// (resources/, log file) is anchored here so behavior does not depend on the
/// working directory the app was launched from.
pub fn exe_root_dir() -> Option<PathBuf> {
    let exe_path = env::current_exe().ok()?;
    exe_path.parent().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_wstring_is_nul_terminated() {
        let wide = to_wstring("temp.png");
        assert_eq!(wide.last(), Some(&0u16));
        assert_eq!(wide.len(), "temp.png".len() + 1);
    }

    #[test]
    fn exe_root_dir_resolves() {
        assert!(exe_root_dir().is_some());
    }
}
