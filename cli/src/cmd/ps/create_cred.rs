use std::path::PathBuf;

use anyhow::Context as _;
use bear_core::{action, source::HtmlSource};
use bear_sandbox::{ArmClient, SandboxCredential as _};

use crate::{
    cmd::{ArgOutput, ArgProvider, ArgScope, GlobalArgs, SubcmdResult},
    config::GlobalConfig,
    util,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Saved sandbox page. The clipboard is read when omitted
    #[arg(long)]
    pub html_path: Option<PathBuf>,

    #[arg(long)]
    pub cloud_provider: Option<ArgProvider>,

    /// Open the cloud console afterwards
    #[arg(long)]
    pub login: bool,

    #[arg(short, long)]
    pub output: Option<ArgOutput>,

    #[arg(short, long, value_enum, default_value_t)]
    pub scope: ArgScope,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = GlobalConfig::from_file_and_args(global_args);
    let provider = args.cloud_provider.map_or(cfg.provider, Into::into);
    let format = args.output.map_or(cfg.output, Into::into);

    let source = HtmlSource::from_path(args.html_path.clone());
    let html = source.read().context("Failed to read sandbox page")?;

    let store = cfg.store()?;
    let record = action::create_credential(&html, provider, &ArmClient::new(), &store).await?;
    log::info!(
        "Saved {} sandbox credential to {:?}",
        provider,
        util::replace_homedir_to_tilde(store.path())
    );

    super::print_env(&record.to_scoped_env_map(args.scope.into()), format)?;

    if args.login {
        super::login_and_wait(&record)?;
    }
    Ok(())
}
