use std::collections::HashMap;
use std::path::{Path, PathBuf};

use photobank_core::{Document, Value};

use crate::{docx, LoadError};

/// Reads a knowledge document and returns its plain text.
///
/// `.txt` and `.md` are read as UTF-8, `.docx` is unpacked and flattened.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref().to_path_buf();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let content = match extension.as_str() {
        "txt" | "md" => tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?,
        "docx" => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?;
            tokio::task::spawn_blocking(move || docx::extract_text(&bytes))
                .await
                .map_err(|err| parse_error(&path, err))?
                .map_err(|err| parse_error(&path, err))?
        }
        _ => {
            return Err(LoadError::UnsupportedExtension { path, extension });
        }
    };

    Ok(to_document(path, content))
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn to_document(path: PathBuf, content: String) -> Document {
    let source = path.to_string_lossy().to_string();
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), Value::String(source.clone()));

    Document {
        id: source,
        content,
        metadata,
    }
}
