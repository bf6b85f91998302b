pub mod action;
pub mod browser;
pub mod output;
pub mod rewrite;
pub mod source;
pub mod storage;
pub mod style;

pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
