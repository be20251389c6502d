//! Post Configuration

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PostConfig {
    /// Directory uploaded images are written into
    pub uploads_dir: PathBuf,
    /// Public URL prefix under which `uploads_dir` is served
    pub uploads_url: String,
    /// Number of random digits appended to stored image names
    pub image_suffix_digits: usize,
    pub max_upload_bytes: usize,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from("public/uploads"),
            uploads_url: "/uploads".to_string(),
            image_suffix_digits: 10,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl PostConfig {
    pub fn with_uploads_dir(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            ..Default::default()
        }
    }

    /// Public URL of a stored image file name
    pub fn image_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.uploads_url.trim_end_matches('/'), file_name)
    }
}
