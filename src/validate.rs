//! File validation policy for attachment candidates.
//!
//! Pure checks on a file's size and extension, run at the boundary before a
//! workflow is invoked. Nothing here touches the filesystem - callers pass
//! the name and size they already have.

/// Maximum attachment size accepted by the client-side policy: 100 MiB.
///
/// Distinct from the server-side cap, which Jira typically enforces at
/// around 20 MB and reports as HTTP 413.
pub const MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// File extensions accepted by the default policy, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "txt", "mp4"];

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Outcome of validating a candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileValidation {
    /// The file passes the size and extension checks.
    Valid,
    /// The file exceeds the size limit.
    FileTooLarge(String),
    /// The file's extension is missing or not in the allowed set.
    UnsupportedFormat(String),
}

impl FileValidation {
    /// The rejection message, or `None` when the file is valid.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FileValidation::Valid => None,
            FileValidation::FileTooLarge(msg) => Some(msg),
            FileValidation::UnsupportedFormat(msg) => Some(msg),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FileValidation::Valid)
    }
}

/// Validate a file against the default policy.
pub fn validate_file(file_name: &str, file_size_bytes: u64) -> FileValidation {
    validate_file_with_policy(
        file_name,
        file_size_bytes,
        MAX_FILE_SIZE_BYTES,
        SUPPORTED_EXTENSIONS,
    )
}

/// Validate a file against an explicit size limit and extension list.
///
/// The size check runs first: an oversized file is rejected as
/// `FileTooLarge` regardless of its extension. Sizes in the message are
/// whole megabytes (integer division). The extension is the substring after
/// the last `.` in the name, lowercased; names without a dot have no
/// extension and are rejected as `UnsupportedFormat`.
pub fn validate_file_with_policy(
    file_name: &str,
    file_size_bytes: u64,
    max_size_bytes: u64,
    allowed_extensions: &[&str],
) -> FileValidation {
    if file_size_bytes > max_size_bytes {
        let size_mb = file_size_bytes / BYTES_PER_MB;
        let max_mb = max_size_bytes / BYTES_PER_MB;
        return FileValidation::FileTooLarge(format!(
            "File is too large: {}MB. Maximum allowed size: {}MB",
            size_mb, max_mb
        ));
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if extension.is_empty() || !allowed_extensions.iter().any(|e| *e == extension) {
        let supported = allowed_extensions.join(", ");
        return FileValidation::UnsupportedFormat(format!(
            "Unsupported file format. Supported: {}",
            supported
        ));
    }

    FileValidation::Valid
}
