use bear_core::{
    action,
    browser::{self, LoginRequest, SystemBrowser, Website, AZURE_PORTAL_URL},
};
use bear_sandbox::SandboxCredential as _;
use serde::Deserialize;

use crate::{
    cmd::{GlobalArgs, SubcmdResult},
    config::GlobalConfig,
    util,
};

#[derive(Debug, clap::Args)]
pub struct Args {}

/// `ARM_USERNAME`, `ARM_PASSWORD` and optionally `ARM_SANDBOX_URL`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArmLoginEnv {
    pub username: String,
    pub password: String,

    #[serde(default)]
    pub sandbox_url: String,
}

impl ArmLoginEnv {
    pub const PREFIX: &str = "ARM_";

    pub fn from_env() -> Option<Self> {
        Self::from_vars(std::env::vars())
    }

    /// `None` unless both username and password are non-empty.
    pub fn from_vars<I>(vars: I) -> Option<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        match envy::prefixed(Self::PREFIX).from_iter::<_, Self>(vars) {
            Ok(env) if !env.username.is_empty() && !env.password.is_empty() => Some(env),
            Ok(_) => None,
            Err(e) => {
                log::debug!("No usable {}* login variables: {}", Self::PREFIX, e);
                None
            }
        }
    }

    pub fn login_request(&self) -> LoginRequest {
        let sandbox_url = match self.sandbox_url.as_str() {
            "" => AZURE_PORTAL_URL,
            url => url,
        };
        LoginRequest::new(Website::AzurePortal, &self.username, &self.password, sandbox_url)
    }
}

pub fn exec(_: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let browser = SystemBrowser::new();

    let username = if let Some(env) = ArmLoginEnv::from_env() {
        log::info!("Logging in with {}* environment variables", ArmLoginEnv::PREFIX);
        browser::login(&browser, &env.login_request())?;
        env.username
    } else {
        let store = GlobalConfig::from_file_and_args(global_args).store()?;
        let record = action::login_from_store(&store, &browser)?;
        record.user().to_owned()
    };

    util::wait_for_enter(&util::login_prompt(&username))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn reads_prefixed_variables() {
        let env = ArmLoginEnv::from_vars(vars(&[
            ("ARM_USERNAME", "bob"),
            ("ARM_PASSWORD", "pw"),
            ("ARM_SANDBOX_URL", "https://portal.azure.com/#@t/"),
            ("USERNAME", "someone-else"),
        ]))
        .unwrap();
        assert_eq!(env.username, "bob");
        assert_eq!(env.password, "pw");
        assert_eq!(env.login_request().landing_url(), AZURE_PORTAL_URL);
        assert!(env.login_request().validate().is_ok());
    }

    #[test]
    fn sandbox_url_is_optional() {
        let env =
            ArmLoginEnv::from_vars(vars(&[("ARM_USERNAME", "bob"), ("ARM_PASSWORD", "pw")])).unwrap();
        assert_eq!(env.sandbox_url, "");
        assert_eq!(env.login_request().sandbox_url, AZURE_PORTAL_URL);
    }

    #[test]
    fn missing_or_empty_credentials_fall_back() {
        assert_eq!(ArmLoginEnv::from_vars(vars(&[("ARM_USERNAME", "bob")])), None);
        assert_eq!(
            ArmLoginEnv::from_vars(vars(&[("ARM_USERNAME", "bob"), ("ARM_PASSWORD", "")])),
            None
        );
    }
}
