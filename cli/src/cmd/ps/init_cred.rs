use std::path::PathBuf;

use bear_core::{action, print_success, storage::SandboxStore};

use crate::{
    cmd::{GlobalArgs, SubcmdResult},
    config::GlobalConfig,
    util,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// File or directory holding the infrastructure code
    #[arg(long)]
    pub path: PathBuf,

    /// Credential file to read the resource group from
    #[arg(long)]
    pub sandbox_path: Option<PathBuf>,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let store = match &args.sandbox_path {
        Some(path) => SandboxStore::at(path),
        None => GlobalConfig::from_file_and_args(global_args).store()?,
    };

    let outcome = action::init_credential(&args.path, &store)?;

    for path in &outcome.rewrite.rewritten {
        println!("rewritten: {}", util::replace_homedir_to_tilde(path).display());
    }
    for path in &outcome.removed_state_files {
        println!("removed:   {}", util::replace_homedir_to_tilde(path).display());
    }
    print_success!(
        "Rewrote {} of {} file(s), removed {} state file(s)",
        outcome.rewrite.rewritten.len(),
        outcome.rewrite.scanned,
        outcome.removed_state_files.len()
    );
    Ok(())
}
