//! Uploaded File
//!
//! An incoming file held in memory until it is written into the uploads
//! directory. Only the stored file name outlives the request.

use std::path::{Path, PathBuf};

use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    extension: String,
    bytes: Bytes,
}

impl UploadedFile {
    /// Split `original_name` into a slugified name and its extension.
    ///
    /// Directory components in the client-supplied name are discarded. The
    /// extension keeps its case; only non-alphanumeric characters are dropped.
    pub fn new(original_name: &str, bytes: impl Into<Bytes>) -> Self {
        let file_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, sanitize_extension(ext)),
            _ => (file_name, String::new()),
        };

        Self {
            name: slugify(stem),
            extension,
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Replace the name verbatim, keeping the extension.
    ///
    /// Callers validate `name` with [`is_safe_file_name`] first.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// `name.ext`, or just `name` when the upload had no extension
    pub fn name_with_extension(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Write into `dir` (created if missing) and return the full path.
    ///
    /// Not transactional: a failed write may leave a partial file behind.
    pub async fn save(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.name_with_extension());
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// Lowercase, keep `[a-z0-9_-]`, collapse everything else into single dashes
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "file".to_string()
    } else {
        slug
    }
}

/// A single path component: non-empty, no separators or NUL, not `.`/`..`
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn sanitize_extension(ext: &str) -> String {
    ext.chars().filter(char::is_ascii_alphanumeric).collect()
}
