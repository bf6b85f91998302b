use bear_core::{action, print_success};

use crate::{
    cmd::{GlobalArgs, SubcmdResult},
    config::GlobalConfig,
    util,
};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let store = GlobalConfig::from_file_and_args(global_args).store()?;
    let path = util::replace_homedir_to_tilde(store.path());

    if action::purge_credential(&store)? {
        print_success!("Removed sandbox credential {:?}", path);
    } else {
        println!("No sandbox credential at {:?}", path);
    }
    Ok(())
}
