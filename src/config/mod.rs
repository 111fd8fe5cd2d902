//! Configuration and page-graph loading

mod loader;

pub use loader::{builtin_graph, load_config, load_graph, parse_graph, BUILTIN_GRAPH};
