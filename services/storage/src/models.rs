use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FileMetadata {
    pub id: String,
    pub owner_id: i64,
    pub original_name: String,
    pub content_type: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

/// A file part received from a multipart upload.
#[derive(Debug)]
pub struct Upload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Upload {
    /// The declared content type, or one guessed from the file name.
    pub fn resolved_content_type(&self) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => mime_guess::from_path(&self.original_name)
                .first_or_octet_stream()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>) -> Upload {
        Upload {
            original_name: name.into(),
            content_type: content_type.map(String::from),
            data: Vec::new(),
        }
    }

    #[test]
    fn declared_content_type_wins() {
        assert_eq!(upload("a.png", Some("image/webp")).resolved_content_type(), "image/webp");
    }

    #[test]
    fn content_type_guessed_from_name() {
        assert_eq!(upload("a.png", None).resolved_content_type(), "image/png");
        assert_eq!(upload("a.txt", Some(" ")).resolved_content_type(), "text/plain");
        assert_eq!(upload("blob", None).resolved_content_type(), "application/octet-stream");
    }
}
