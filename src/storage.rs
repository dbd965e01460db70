//! Resume storage boundary. The managed object store itself lives behind
//! the [`FileStorage`] trait; this module owns the upload policy and the
//! name/path plumbing around it. Applications only ever hold the resulting
//! public URL (`resume_ref`).

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::{validation_error, Result};

/// Constraints applied before handing a file to the object store.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_size_mb: usize,
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: 5,
            allowed_types: vec!["application/pdf".to_string()],
        }
    }
}

impl UploadPolicy {
    /// Policy with the size ceiling taken from the process configuration.
    pub fn from_config() -> Self {
        Self {
            max_size_mb: crate::config::get_config().upload_max_mb,
            ..Default::default()
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_size_mb * 1024 * 1024
    }

    /// Rejects files over the size ceiling or outside the type allow-list,
    /// naming the violated constraint.
    pub fn check(&self, size: usize, content_type: &str) -> Result<()> {
        if size > self.max_bytes() {
            return Err(validation_error(
                "file",
                "size",
                &format!("file is too large, at most {} MB allowed", self.max_size_mb),
            ));
        }
        if !self.allowed_types.iter().any(|t| t == content_type) {
            return Err(validation_error(
                "file",
                "content_type",
                &format!(
                    "file type not allowed, accepted: {}",
                    self.allowed_types.join(", ")
                ),
            ));
        }
        Ok(())
    }
}

/// External object-storage collaborator. `upload` returns the public URL
/// the rest of the system treats as opaque.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload(&self, data: Bytes, object_name: &str, folder: &str) -> Result<String>;
    async fn remove(&self, public_url: &str) -> Result<()>;
}

/// Derives a unique, URL-safe object name: millisecond timestamp prefix,
/// everything outside `[A-Za-z0-9.-]` replaced by underscores.
pub fn sanitize_object_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}", crate::utils::time::now().timestamp_millis(), cleaned)
}

/// Extracts the object path from a public URL, given the bucket it lives in.
pub fn object_path(public_url: &str, bucket: &str) -> Result<String> {
    let url = Url::parse(public_url)
        .map_err(|e| validation_error("url", "format", &format!("invalid URL: {}", e)))?;
    let marker = format!("/{}/", bucket);
    match url.path().split_once(&marker) {
        Some((_, path)) if !path.is_empty() => Ok(path.to_string()),
        _ => Err(validation_error(
            "url",
            "format",
            &format!("URL does not point into bucket '{}'", bucket),
        )),
    }
}

/// Human-readable byte counts for the admin storage panel.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{} {}", (value * 100.0).round() / 100.0, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_enforces_size_ceiling() {
        let policy = UploadPolicy::default();
        assert!(policy.check(policy.max_bytes(), "application/pdf").is_ok());
        let err = policy
            .check(policy.max_bytes() + 1, "application/pdf")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn policy_enforces_type_allow_list() {
        let policy = UploadPolicy::default();
        assert!(policy.check(1024, "application/pdf").is_ok());
        assert!(policy.check(1024, "image/png").unwrap_err().is_validation());
    }

    #[test]
    fn object_names_are_url_safe() {
        let name = sanitize_object_name("mi currículum (final).pdf");
        let suffix = name.split_once('_').unwrap().1;
        assert_eq!(suffix, "mi_curr_culum__final_.pdf");
    }

    #[test]
    fn object_path_extraction() {
        let url = "https://backend.example.com/storage/v1/object/public/cvs/uploads/123_cv.pdf";
        assert_eq!(object_path(url, "cvs").unwrap(), "uploads/123_cv.pdf");
        assert!(object_path(url, "logos").unwrap_err().is_validation());
        assert!(object_path("not a url", "cvs").unwrap_err().is_validation());
    }

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
    }
}
