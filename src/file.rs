//! Reading configuration documents from disk.
//!
//! Paths may start with `~`, which expands to the user's home directory.
//! A document whose first non-blank character is `{` is JSON; anything else
//! goes through the configuration-language parser. Both produce the same
//! [`Table`] shape.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::HclError;
use crate::parser::parse;
use crate::tree::Table;

/// Expand a leading `~` to the home directory.
///
/// Paths that don't start with `~`, or `~user` forms, are returned unchanged.
/// When no home directory can be determined the path is also left alone.
pub fn expand_path(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::UserDirs::new() {
        Some(user) => user.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Read a document file, treating a missing file as absent.
///
/// Only actual I/O errors (permissions, directories, etc.) are propagated.
pub fn read_document(path: &Path) -> Result<Option<String>, HclError> {
    let path = expand_path(path);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using empty configuration");
            Ok(None)
        }
        Err(e) => Err(HclError::IoError { path, source: e }),
    }
}

pub fn is_json(text: &str) -> bool {
    text.trim_start().starts_with('{')
}

/// Parse document text into a tree.
pub fn parse_document(text: &str) -> Result<Table, HclError> {
    if is_json(text) {
        let json: serde_json::Value = serde_json::from_str(text).map_err(|e| HclError::Syntax {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?;
        return Table::from_json(json);
    }
    Ok(Table::from(parse(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;
    use crate::value::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plain_paths_are_unchanged() {
        let p = PathBuf::from("/etc/app/config.hcl");
        assert_eq!(expand_path(&p), p);
        let rel = PathBuf::from("config.hcl");
        assert_eq!(expand_path(&rel), rel);
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(user) = directories::UserDirs::new() else {
            return;
        };
        let expanded = expand_path(Path::new("~/app/config.hcl"));
        assert_eq!(expanded, user.home_dir().join("app/config.hcl"));
    }

    #[test]
    fn tilde_user_form_is_unchanged() {
        let p = PathBuf::from("~other/config.hcl");
        assert_eq!(expand_path(&p), p);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let result = read_document(&dir.path().join("nonexistent.hcl")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.hcl");
        fs::write(&path, "port = 3000\n").unwrap();
        assert_eq!(read_document(&path).unwrap().as_deref(), Some("port = 3000\n"));
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        match read_document(dir.path()).unwrap_err() {
            HclError::IoError { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("Expected IoError, got: {other:?}"),
        }
    }

    #[test]
    fn json_documents_are_detected() {
        assert!(is_json("  \n{\"a\": 1}"));
        assert!(!is_json("a = 1"));
        assert!(!is_json(""));
    }

    #[test]
    fn parses_json_document() {
        let t = parse_document(r#" { "group": { "inner": "y" } } "#).unwrap();
        match t.get("group") {
            Some(Node::Groups(groups)) => assert_eq!(
                groups[0].get("inner"),
                Some(&Node::Value(Value::Str("y".into())))
            ),
            other => panic!("Expected Groups, got: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            parse_document("{ \"a\": }"),
            Err(HclError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn parses_language_document() {
        let t = parse_document("a = 1").unwrap();
        assert_eq!(t.get("a"), Some(&Node::Value(Value::Number(1.0))));
    }
}
