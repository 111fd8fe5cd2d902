//! Schema types for the walkthrough
//!
//! Answer values, page graphs, provider records and configuration.

mod answers;
mod condition;
mod config;
mod graph_file;
mod page;
mod provider;

pub use answers::{AnswerSet, AnswerValue};
pub use condition::Condition;
pub use config::{BranchConfig, Config};
pub use graph_file::{FieldSpec, GraphFile, OptionsSpec, PageSpec, Rule, TextSpec};
pub use page::{
    Derivation, Dynamic, Field, FieldKind, Page, PageGraph, PageMetadata, ResourceLink,
    ValueCheck, Visibility,
};
pub use provider::{ProviderRecord, ProviderStatus};
