//! council — ask one question to several AI providers concurrently,
//! compare their answers, and optionally synthesize a verdict.
//!
//! The core (`catalog`, `council`, `llm`, `errors`) takes an explicit
//! credential set and returns plain data; credential sourcing, terminal
//! interaction, and HTTP routing live in the `cli`, `api`, and `config`
//! collaborator modules.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod council;
pub mod errors;
pub mod llm;

pub use council::types::{
    AggregateResult, CredentialSet, ModelDescriptor, Provider, ProviderCatalog, QueryResult,
    Selection,
};
pub use errors::CouncilError;
