use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::extract::{LabelMapping, AWS_LABELS, AZURE_LABELS};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    Aws,
    Azure,
}

impl Provider {
    pub fn label_mapping(&self) -> &'static LabelMapping {
        use Provider::*;
        match self {
            Aws => &AWS_LABELS,
            Azure => &AZURE_LABELS,
        }
    }

    /// Fields that every extraction for this provider yields, even when empty.
    pub const fn required_fields(&self) -> &'static [Field] {
        use Field::*;
        match self {
            Provider::Aws => &[
                Username,
                Password,
                AccessKeyId,
                SecretAccessKey,
                SandboxUrl,
                Region,
            ],
            Provider::Azure => &[
                User,
                Password,
                ClientId,
                ClientSecret,
                SandboxUrl,
                Region,
                TenantName,
                SubscriptionId,
                ResourceGroup,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CredentialScope {
    #[default]
    Full,
    Terraform,
}
