//! Locating and loading syntax-tree documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::ast::Ast;
use crate::error::{IoError, Result};

pub const DOCUMENT_EXTENSION: &str = "json";

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Document files under `path`, sorted. A file path is returned as is;
/// directories are walked recursively, skipping hidden entries.
pub fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(IoError::path_not_found(path).into());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(IoError::invalid_path(path).into());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(&entry.file_name().to_string_lossy()));
    for entry in walker {
        let entry = entry.map_err(|e| IoError::directory_scan_error(path, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == DOCUMENT_EXTENSION);
        if matches {
            trace!(path = %entry.path().display(), "found document");
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!(root = %path.display(), count = files.len(), "collected documents");
    Ok(files)
}

/// Reads and lowers one document into a translation unit.
pub fn load_unit(path: &Path) -> Result<Ast> {
    let content = fs::read_to_string(path).map_err(|e| IoError::read_error(path, e))?;
    let source_name = path.display().to_string();
    let ast = Ast::from_json(&source_name, &content)?;
    debug!(path = %source_name, nodes = ast.len(), "loaded unit");
    Ok(ast)
}
