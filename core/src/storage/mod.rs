pub mod error;
pub mod location;
pub mod sandbox;

pub use error::{Error, Result};
pub use location::*;
pub use sandbox::*;
