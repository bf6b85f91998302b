pub mod credential;
pub mod field;
pub mod provider;

pub use credential::*;
pub use field::*;
pub use provider::*;
