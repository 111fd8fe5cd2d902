//! Pages command - list the pages of a walkthrough

use std::path::Path;

use serde::Serialize;

use crate::config::load_graph;
use crate::errors::{Result, WalkthroughError};
use crate::schemas::PageGraph;

/// One row of the page listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub fields: usize,
    pub conditional: bool,
    pub is_completion_page: bool,
}

pub fn summarize(graph: &PageGraph) -> Vec<PageSummary> {
    graph
        .pages()
        .iter()
        .enumerate()
        .map(|(index, page)| PageSummary {
            index,
            id: page.id.clone(),
            title: page.title.clone(),
            fields: page.fields.len(),
            conditional: !matches!(page.show_when, crate::schemas::Visibility::Always),
            is_completion_page: page.is_completion_page,
        })
        .collect()
}

pub fn format_table(rows: &[PageSummary]) -> String {
    let id_width = rows.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);
    let mut out = format!("{:>3}  {:<id_width$}  {:>6}  TITLE\n", "#", "ID", "FIELDS");
    for row in rows {
        let mut flags = String::new();
        if row.conditional {
            flags.push_str(" (conditional)");
        }
        if row.is_completion_page {
            flags.push_str(" (completion)");
        }
        out.push_str(&format!(
            "{:>3}  {:<id_width$}  {:>6}  {}{}\n",
            row.index, row.id, row.fields, row.title, flags
        ));
    }
    out
}

/// List pages of the given graph, or the built-in one
pub async fn run(graph: Option<&Path>, json: bool) -> Result<()> {
    let graph = load_graph(graph)?;
    let rows = summarize(&graph);
    if json {
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| WalkthroughError::InvalidJson(e.to_string()))?;
        println!("{}", text);
    } else {
        print!("{}", format_table(&rows));
    }
    Ok(())
}
