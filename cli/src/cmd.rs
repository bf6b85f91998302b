pub mod ps;

use std::path::PathBuf;

use bear_core::output::OutputFormat;
use bear_sandbox::{CredentialScope, Provider};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Sandbox credential file to use instead of the default location
    #[arg(long, global = true)]
    pub credential_file: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Cloud playground sandbox credentials
    Ps(ps::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Ps(args) => ps::exec(args, self).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgProvider {
    Aws,
    Azure,
}

impl From<ArgProvider> for Provider {
    fn from(value: ArgProvider) -> Self {
        use ArgProvider::*;
        match value {
            Aws => Provider::Aws,
            Azure => Provider::Azure,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgScope {
    /// Every known variable
    #[default]
    Full,
    /// Only what the Terraform providers read
    Terraform,
}

impl From<ArgScope> for CredentialScope {
    fn from(value: ArgScope) -> Self {
        use ArgScope::*;
        match value {
            Full => CredentialScope::Full,
            Terraform => CredentialScope::Terraform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgOutput {
    Env,
    Json,
    Table,
}

impl From<ArgOutput> for OutputFormat {
    fn from(value: ArgOutput) -> Self {
        use ArgOutput::*;
        match value {
            Env => OutputFormat::Env,
            Json => OutputFormat::Json,
            Table => OutputFormat::Table,
        }
    }
}
