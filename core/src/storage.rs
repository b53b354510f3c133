//! Persisting comment collections as JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ApiError;
use crate::types::Comment;

/// `user-{user_id}-post-{post_id}-comments.json`
pub fn comments_file_name(user_id: u64, post_id: u64) -> String {
    format!("user-{user_id}-post-{post_id}-comments.json")
}

/// Write `comments` as a compact JSON array into `dir`, replacing any
/// existing file for the same pair of ids. Returns the written path.
pub fn write_comments(
    dir: &Path,
    comments: &[Comment],
    user_id: u64,
    post_id: u64,
) -> Result<PathBuf, ApiError> {
    let path = dir.join(comments_file_name(user_id, post_id));
    let json =
        serde_json::to_string(comments).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), count = comments.len(), "wrote comments");
    Ok(path)
}

pub fn read_comments(path: &Path) -> Result<Vec<Comment>, ApiError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comments() -> Vec<Comment> {
        serde_json::from_value(json!([
            { "postId": 10, "id": 46, "name": "first", "email": "a@b.io", "body": "hello" },
            { "postId": 10, "id": 47, "name": "second", "email": "c@d.io", "body": "world", "likes": 3 }
        ]))
        .unwrap()
    }

    #[test]
    fn file_name_uses_both_ids() {
        assert_eq!(comments_file_name(1, 10), "user-1-post-10-comments.json");
    }

    #[test]
    fn written_comments_read_back_equal() {
        let dir = tempfile::tempdir().unwrap();
        let original = comments();
        let path = write_comments(dir.path(), &original, 1, 10).unwrap();
        assert_eq!(path, dir.path().join("user-1-post-10-comments.json"));
        assert_eq!(read_comments(&path).unwrap(), original);
    }

    #[test]
    fn sparse_comments_persist_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let raw = r#"[{"postId":1,"body":"hi"},{"id":1}]"#;
        let sparse: Vec<Comment> = serde_json::from_str(raw).unwrap();

        let path = write_comments(dir.path(), &sparse, 1, 1).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), raw);
        assert_eq!(read_comments(&path).unwrap(), sparse);
    }

    #[test]
    fn empty_collection_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_comments(dir.path(), &[], 2, 0).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(read_comments(&path).unwrap().is_empty());
    }

    #[test]
    fn rewrite_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        write_comments(dir.path(), &comments(), 1, 10).unwrap();
        let path = write_comments(dir.path(), &comments()[..1], 1, 10).unwrap();
        assert_eq!(read_comments(&path).unwrap().len(), 1);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_comments(&missing, &comments(), 1, 1).unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }

    #[test]
    fn corrupt_file_is_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(comments_file_name(1, 1));
        fs::write(&path, "{not json").unwrap();
        let err = read_comments(&path).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
