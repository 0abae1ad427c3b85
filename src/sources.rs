// src/sources.rs

//! Keyword and target site list loading.
//!
//! Each list comes from either a literal CLI value or a line-delimited file;
//! blank lines are dropped, order is preserved.

use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// Load an ordered value list from a literal or a file.
///
/// `what` names the list ("keyword", "site") in error messages. Missing
/// input, an unreadable file, and a file with no usable lines are all
/// configuration errors.
pub fn load_values(literal: Option<&str>, file: Option<&Path>, what: &str) -> Result<Vec<String>> {
    if let Some(value) = literal {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::config(format!("{what} is empty")));
        }
        return Ok(vec![value.to_string()]);
    }

    let Some(path) = file else {
        return Err(AppError::config(format!(
            "no {what} given: pass a value or a {what} file"
        )));
    };

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("cannot read {what} file {}: {e}", path.display()))
    })?;

    let values: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if values.is_empty() {
        return Err(AppError::config(format!(
            "{what} file {} has no usable lines",
            path.display()
        )));
    }
    Ok(values)
}

/// Keywords to run campaigns for.
pub fn load_keywords(literal: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    load_values(literal, file, "keyword")
}

/// Target sites to look for in result listings.
pub fn load_sites(literal: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    load_values(literal, file, "site")
}
