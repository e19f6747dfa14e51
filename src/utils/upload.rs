use bytes::Bytes;

const MB: usize = 1024 * 1024;

/// A file picked by the user, held in memory until the form is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased extension including the dot, e.g. `.pdf`.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rfind('.')
            .map(|idx| self.file_name[idx..].to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UploadRules {
    pub max_bytes: usize,
    pub mime_types: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

pub const RESUME_RULES: UploadRules = UploadRules {
    max_bytes: 5 * MB,
    mime_types: &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ],
    extensions: &[".pdf", ".doc", ".docx"],
};

pub const LOGO_RULES: UploadRules = UploadRules {
    max_bytes: 2 * MB,
    mime_types: &["image/jpeg", "image/png", "image/webp", "image/svg+xml"],
    extensions: &[".jpg", ".jpeg", ".png", ".webp", ".svg"],
};

pub const FEATURED_IMAGE_RULES: UploadRules = UploadRules {
    max_bytes: 2 * MB,
    mime_types: &["image/jpeg", "image/png", "image/webp"],
    extensions: &[".jpg", ".jpeg", ".png", ".webp"],
};

/// Size ceiling first, then MIME type with the extension as a fallback for
/// clients that report a generic type.
pub fn validate_upload(file: &UploadFile, rules: &UploadRules) -> Result<(), String> {
    if file.size() > rules.max_bytes {
        return Err(format!("File size exceeds {}MB.", rules.max_bytes / MB));
    }
    if rules.mime_types.contains(&file.content_type.as_str()) {
        return Ok(());
    }
    match file.extension() {
        Some(ext) if rules.extensions.contains(&ext.as_str()) => Ok(()),
        _ => Err(format!(
            "Invalid file type. Allowed: {}.",
            rules.extensions.join(", ")
        )),
    }
}
