use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use bear_core::{
    output::OutputFormat,
    storage::{self, location::APP_NAME, SandboxStore, UserConfigDir},
};
use bear_sandbox::Provider;

use crate::{cmd::GlobalArgs, util};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Falls back to `<config dir>/bear/ps/sandbox_cred.json`
    pub credential_file: Option<PathBuf>,

    /// Default for `create-cred --cloud-provider`
    pub provider: Provider,

    pub output: OutputFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            credential_file: None,
            provider: Provider::Azure,
            output: OutputFormat::default(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "bear.toml";

    pub fn filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn from_file_or_default() -> Self {
        let Some(path) = Self::filepath() else {
            return GlobalConfig::default();
        };
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        Self::from_toml(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        let GlobalArgs {
            subcmd: _,
            credential_file,
        } = args;

        if let Some(path) = credential_file {
            self.credential_file = Some(path.clone());
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }

    pub fn store(&self) -> Result<SandboxStore, storage::Error> {
        match &self.credential_file {
            Some(path) => Ok(SandboxStore::at(path)),
            None => SandboxStore::new(&UserConfigDir),
        }
    }
}
