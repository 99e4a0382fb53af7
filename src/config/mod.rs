pub mod credentials;

pub use credentials::{credentials_from_env, mask_key};
