//! CLI command implementations

pub mod pages;
pub mod walk;
