// exported modules
pub mod armapi;
pub mod error;
pub mod extract;
pub mod model;
pub mod sandbox_url;

// re-exports
pub use armapi::{ArmClient, TenantResolver};
pub use error::*;
pub use extract::{extract_fields, LabelMapping};
pub use model::*;
pub use sandbox_url::SandboxUrlParts;

// internal modules
mod util;
