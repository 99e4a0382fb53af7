pub mod dispatch;
pub mod synthesize;
pub mod types;

pub use dispatch::dispatch;
pub use synthesize::synthesize;
pub use types::{
    AggregateResult, CredentialSet, ModelDescriptor, Provider, ProviderCatalog, QueryResult,
    Selection,
};
