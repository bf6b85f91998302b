pub mod create_cred;
pub mod get_cred;
pub mod init_cred;
pub mod login_by_cred;
pub mod purge_cred;

use anyhow::Context as _;
use bear_core::{
    action,
    browser::SystemBrowser,
    output::{self, OutputFormat},
};
use bear_sandbox::{EnvMap, SandboxCredential};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: PsSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum PsSubcommand {
    /// Extract a credential from the sandbox page and store it
    CreateCred(create_cred::Args),
    /// Print the stored credential
    GetCred(get_cred::Args),
    /// Point infrastructure code at the stored sandbox
    InitCred(init_cred::Args),
    /// Open the cloud console with ARM_* variables or the stored credential
    LoginByCred(login_by_cred::Args),
    /// Delete the stored credential
    PurgeCred(purge_cred::Args),
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    use PsSubcommand::*;
    match &args.cmd {
        CreateCred(args) => create_cred::exec(args, global_args).await,
        GetCred(args) => get_cred::exec(args, global_args),
        InitCred(args) => init_cred::exec(args, global_args),
        LoginByCred(args) => login_by_cred::exec(args, global_args),
        PurgeCred(args) => purge_cred::exec(args, global_args),
    }
}

pub(crate) fn print_env(env: &EnvMap, format: OutputFormat) -> SubcmdResult {
    let s = output::render(env, format).context("Failed to render credential")?;
    println!("{}", s.trim_end());
    Ok(())
}

/// Opens the console, then keeps the password on the clipboard until ENTER.
pub(crate) fn login_and_wait<C>(cred: &C) -> SubcmdResult
where
    C: SandboxCredential + ?Sized,
{
    let browser = SystemBrowser::new();
    action::login_with_credential(cred, &browser)?;
    util::wait_for_enter(&util::login_prompt(cred.user())).context("Failed to read stdin")
}
