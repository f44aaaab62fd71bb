use std::env;
use std::path::PathBuf;

pub fn home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    if let Ok(profile) = env::var("USERPROFILE") {
        return Some(PathBuf::from(profile));
    }
    let drive = env::var("HOMEDRIVE").ok();
    let path = env::var("HOMEPATH").ok();
    match (drive, path) {
        (Some(drive), Some(path)) => Some(PathBuf::from(format!("{drive}{path}"))),
        _ => None,
    }
}

/// Directory rendered images are written to when no `--out-dir` is given.
pub fn default_output_dir() -> PathBuf {
    if let Ok(dir) = env::var("MEMEGEN_OUT_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(".")
}
