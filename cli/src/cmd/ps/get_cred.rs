use bear_core::action;
use bear_sandbox::SandboxCredential as _;

use crate::{
    cmd::{ArgOutput, ArgScope, GlobalArgs, SubcmdResult},
    config::GlobalConfig,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Open the cloud console afterwards
    #[arg(long)]
    pub login: bool,

    #[arg(short, long)]
    pub output: Option<ArgOutput>,

    #[arg(short, long, value_enum, default_value_t)]
    pub scope: ArgScope,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let format = args.output.map_or(cfg.output, Into::into);

    let record = action::load_credential(&cfg.store()?)?;
    super::print_env(&record.to_scoped_env_map(args.scope.into()), format)?;

    if args.login {
        super::login_and_wait(&record)?;
    }
    Ok(())
}
