//! Configuration loading with defaults

use std::collections::BTreeSet;
use std::path::Path;

use crate::errors::{Result, WalkthroughError};
use crate::fs;
use crate::schemas::{Config, GraphFile, PageGraph};

/// The group-change enrollment walkthrough shipped with the binary
pub const BUILTIN_GRAPH: &str = include_str!("../../walkthroughs/group_change.json");

/// Load configuration, falling back to defaults.
///
/// Keys missing from the file take their default values.
///
/// # Arguments
/// * `path` - Optional path to a config JSON file
///
/// # Returns
/// The resolved configuration
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config: Config = fs::read_json(path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Load a page graph from a file, or the built-in graph when `path` is `None`.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file is not a valid graph file
/// * `ConfigError` - If a validation rule cannot be compiled
pub fn load_graph(path: Option<&Path>) -> Result<PageGraph> {
    match path {
        Some(path) => {
            let file: GraphFile = fs::read_json(path)?;
            let graph = compile(file)
                .map_err(|e| WalkthroughError::wrap(e, format!("graph {}", path.display())))?;
            tracing::info!(path = %path.display(), pages = graph.len(), "loaded page graph");
            Ok(graph)
        }
        None => builtin_graph(),
    }
}

/// Parse and compile a page graph from JSON text
pub fn parse_graph(json: &str) -> Result<PageGraph> {
    let file: GraphFile =
        serde_json::from_str(json).map_err(|e| WalkthroughError::InvalidJson(e.to_string()))?;
    compile(file)
}

/// The bundled group-change graph
pub fn builtin_graph() -> Result<PageGraph> {
    parse_graph(BUILTIN_GRAPH)
        .map_err(|e| WalkthroughError::wrap(e, "built-in walkthrough"))
}

fn compile(file: GraphFile) -> Result<PageGraph> {
    warn_unknown_references(&file);
    file.into_graph()
}

/// Conditions over undeclared fields are tolerated; they just never match
fn warn_unknown_references(file: &GraphFile) {
    let declared: BTreeSet<&str> = file
        .pages
        .iter()
        .flat_map(|p| p.fields.iter().map(|f| f.name.as_str()))
        .collect();
    for (page, field) in file.condition_references() {
        if !declared.contains(field) {
            tracing::warn!(page, field, "condition references an undeclared field");
        }
    }
}
