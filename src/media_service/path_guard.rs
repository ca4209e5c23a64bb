use crate::{
    error::{ServiceError, ServiceResult},
    media_service::{
        MediaService,
        utils::{absolute_path, normalize_path},
    },
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Resolves a configured root to the canonical form candidates are compared against.
/// Roots that cannot be resolved are kept in normalized form so that they still
/// show up in the allow-list, they just never match an existing file.
pub(crate) fn resolve_root(dir: &str) -> ServiceResult<PathBuf> {
    let absolute = absolute_path(Path::new(dir))?;
    match absolute.canonicalize() {
        Ok(canonical) => {
            if !canonical.is_dir() {
                tracing::warn!(root = dir, "permitted root is not a directory");
            }
            Ok(canonical)
        }
        Err(err) => {
            tracing::warn!(root = dir, %err, "permitted root could not be resolved");
            Ok(normalize_path(&absolute))
        }
    }
}

/// Canonical form of `path`. For paths that do not exist yet, the deepest existing
/// ancestor is canonicalized and the missing tail is appended to it.
pub(crate) fn resolve_candidate(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = absolute_path(path)?;
    if let Ok(canonical) = absolute.canonicalize() {
        return Ok(canonical);
    }

    let normalized = normalize_path(&absolute);
    let mut existing = normalized.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return Ok(missing
                .iter()
                .rev()
                .fold(canonical, |resolved, part| resolved.join(part)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(normalized),
        }
    }
}

impl MediaService {
    /// The permitted roots exactly as they were configured.
    pub fn allowed_directories(&self) -> &[String] {
        &self.allowed_directories
    }

    pub fn permitted_roots(&self) -> &[PathBuf] {
        &self.permitted_roots
    }

    /// True when `path` resolves inside one of the permitted roots.
    ///
    /// Containment is checked per path component, so a root of `/data/foo`
    /// does not admit `/data/foobar`.
    pub fn is_permitted(&self, path: &Path) -> bool {
        resolve_candidate(path)
            .map(|resolved| self.is_contained(&resolved))
            .unwrap_or(false)
    }

    /// Validates that `path` is inside a permitted root and exists, returning its canonical form.
    ///
    /// Containment is checked before existence, deliberately the reverse of an
    /// existence-first check: a path outside every root is reported as not permitted
    /// whether it exists or not, so nothing outside the roots is revealed.
    pub fn check_path(&self, path: &Path) -> ServiceResult<PathBuf> {
        let resolved = resolve_candidate(path)?;
        if !self.is_contained(&resolved) {
            return Err(self.not_permitted(path));
        }
        if !resolved.exists() {
            return Err(ServiceError::NotFound(path.to_path_buf()));
        }
        Ok(resolved)
    }

    /// Validates a path that is about to be written. The path itself may not exist yet.
    pub(crate) fn check_output_path(&self, path: &Path) -> ServiceResult<PathBuf> {
        let resolved = resolve_candidate(path)?;
        if !self.is_contained(&resolved) {
            return Err(self.not_permitted(path));
        }
        Ok(resolved)
    }

    fn is_contained(&self, resolved: &Path) -> bool {
        self.permitted_roots
            .iter()
            .any(|root| resolved.starts_with(root))
    }

    pub(crate) fn not_permitted(&self, path: &Path) -> ServiceError {
        ServiceError::NotPermitted {
            path: path.to_path_buf(),
            allowed: if self.allowed_directories.is_empty() {
                "no permitted directories are configured".to_string()
            } else {
                self.allowed_directories.join(", ")
            },
        }
    }
}
