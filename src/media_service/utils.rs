use dirs::home_dir;
use std::{
    env,
    path::{Component, Path, PathBuf},
};

pub fn expand_home(path: PathBuf) -> PathBuf {
    if let Some(home_dir) = home_dir()
        && path.starts_with("~")
    {
        let stripped_path = path.strip_prefix("~").unwrap_or(&path);
        return home_dir.join(stripped_path);
    }
    path
}

/// Expands `~` and joins relative paths onto the current directory.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let expanded_path = expand_home(path.to_path_buf());
    if expanded_path.is_absolute() {
        Ok(expanded_path)
    } else {
        Ok(env::current_dir()?.join(expanded_path))
    }
}

/// Lexically removes `.` and `..` segments. Does not touch the filesystem,
/// so symbolic links are left unresolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Replaces the extension with `png` unless it already is one (case-insensitive).
pub fn coerce_png_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => path.to_path_buf(),
        _ => path.with_extension("png"),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Keeps the trailing part of long tool output, which is where the actual error usually is.
pub fn tail_text(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - max_chars).collect();
    format!("...{tail}")
}
