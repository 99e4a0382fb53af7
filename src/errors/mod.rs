pub mod classification;
pub mod types;

pub use classification::{describe_failure, is_quota_error, quota_remediation};
pub use types::CouncilError;
