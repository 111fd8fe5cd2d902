//! Walkthrough - guided provider enrollment engine
//!
//! This library provides the core of the walkthrough, including:
//! - Schema definitions for answers, page graphs, provider records and config
//! - The engine: field evaluation, validation, navigation and branch points
//! - The provider ledger and outreach tracking
//! - Page-graph loading, with the group-change walkthrough built in
//! - Plain-text report export
//! - A line-oriented terminal driver

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod fs;
pub mod prompt;
pub mod schemas;

// Re-export commonly used types
pub use domain::{Session, Transition};
pub use errors::{Result, WalkthroughError};
pub use prompt::{Prompter, ScriptedPrompter};
pub use schemas::{AnswerSet, AnswerValue, BranchConfig, Config, PageGraph, ProviderStatus};
