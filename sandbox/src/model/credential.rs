use std::collections::BTreeMap;

use ::maplit::btreemap;
use ::serde::{Deserialize, Serialize};

use super::{
    field::{Field, RawFieldMap},
    provider::{CredentialScope, Provider},
};

/// Environment variable table.
/// e.g. `[ "AWS_REGION" => "us-east-1", "AWS_ACCESS_KEY_ID" => "AKIA..." ]`
pub type EnvMap = BTreeMap<&'static str, String>;

/// Value stored for `resourceProviderRegistrations` on every new Azure credential.
pub const RESOURCE_PROVIDER_REGISTRATIONS_NONE: &str = "none";

pub trait SandboxCredential {
    fn provider(&self) -> Provider;

    fn user(&self) -> &str;

    fn password(&self) -> &str;

    fn sandbox_url(&self) -> &str;

    fn to_env_map(&self) -> EnvMap;

    /// The subset of [`SandboxCredential::to_env_map`] that Terraform reads.
    fn to_terraform_env_map(&self) -> EnvMap;

    fn to_scoped_env_map(&self, scope: CredentialScope) -> EnvMap {
        match scope {
            CredentialScope::Terraform => self.to_terraform_env_map(),
            CredentialScope::Full => self.to_env_map(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsSandboxCredential {
    pub sandbox_url: String,
    pub user: String,
    pub password: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl AwsSandboxCredential {
    pub fn from_fields(fields: &RawFieldMap) -> Self {
        Self {
            sandbox_url: fields.get(Field::SandboxUrl).to_owned(),
            user: fields.get(Field::Username).to_owned(),
            password: fields.get(Field::Password).to_owned(),
            access_key_id: fields.get(Field::AccessKeyId).to_owned(),
            secret_access_key: fields.get(Field::SecretAccessKey).to_owned(),
            region: fields.get(Field::Region).to_owned(),
        }
    }
}

impl SandboxCredential for AwsSandboxCredential {
    fn provider(&self) -> Provider {
        Provider::Aws
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn sandbox_url(&self) -> &str {
        &self.sandbox_url
    }

    fn to_env_map(&self) -> EnvMap {
        btreemap! {
            "AWS_ACCESS_KEY_ID" => self.access_key_id.clone(),
            "AWS_SECRET_ACCESS_KEY" => self.secret_access_key.clone(),
            "AWS_REGION" => self.region.clone(),
            "AWS_SANDBOX_URL" => self.sandbox_url.clone(),
            "AWS_USERNAME" => self.user.clone(),
            "AWS_PASSWORD" => self.password.clone(),
        }
    }

    fn to_terraform_env_map(&self) -> EnvMap {
        btreemap! {
            "AWS_ACCESS_KEY_ID" => self.access_key_id.clone(),
            "AWS_SECRET_ACCESS_KEY" => self.secret_access_key.clone(),
            "AWS_REGION" => self.region.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureSandboxCredential {
    pub sandbox_url: String,
    pub tenant_name: String,
    pub user: String,
    pub password: String,
    pub resource_group: String,
    pub resource_provider_registrations: String,
    pub subscription_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl AzureSandboxCredential {
    /// Builds the credential from extracted fields.
    /// `tenant_id` is left empty; it is not part of the HTML receipt.
    pub fn from_fields(fields: &RawFieldMap) -> Self {
        Self {
            sandbox_url: fields.get(Field::SandboxUrl).to_owned(),
            tenant_name: fields.get(Field::TenantName).to_owned(),
            user: fields.get(Field::User).to_owned(),
            password: fields.get(Field::Password).to_owned(),
            resource_group: fields.get(Field::ResourceGroup).to_owned(),
            resource_provider_registrations: RESOURCE_PROVIDER_REGISTRATIONS_NONE.to_owned(),
            subscription_id: fields.get(Field::SubscriptionId).to_owned(),
            tenant_id: String::new(),
            client_id: fields.get(Field::ClientId).to_owned(),
            client_secret: fields.get(Field::ClientSecret).to_owned(),
        }
    }
}

impl SandboxCredential for AzureSandboxCredential {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    fn user(&self) -> &str {
        &self.user
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn sandbox_url(&self) -> &str {
        &self.sandbox_url
    }

    fn to_env_map(&self) -> EnvMap {
        btreemap! {
            "ARM_SUBSCRIPTION_ID" => self.subscription_id.clone(),
            "ARM_TENANT_ID" => self.tenant_id.clone(),
            "ARM_CLIENT_ID" => self.client_id.clone(),
            "ARM_CLIENT_SECRET" => self.client_secret.clone(),
            "ARM_SANDBOX_URL" => self.sandbox_url.clone(),
            "ARM_TENANT_NAME" => self.tenant_name.clone(),
            "ARM_USERNAME" => self.user.clone(),
            "ARM_PASSWORD" => self.password.clone(),
            "ARM_RESOURCE_GROUP" => self.resource_group.clone(),
            "ARM_RESOURCE_PROVIDER_REGISTRATIONS" => self.resource_provider_registrations.clone(),
        }
    }

    fn to_terraform_env_map(&self) -> EnvMap {
        btreemap! {
            "ARM_SUBSCRIPTION_ID" => self.subscription_id.clone(),
            "ARM_TENANT_ID" => self.tenant_id.clone(),
            "ARM_CLIENT_ID" => self.client_id.clone(),
            "ARM_CLIENT_SECRET" => self.client_secret.clone(),
            "ARM_RESOURCE_PROVIDER_REGISTRATIONS" => self.resource_provider_registrations.clone(),
        }
    }
}

/// A persisted sandbox credential of either provider.
///
/// Serialized flat, with a `"provider"` discriminator next to the record's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum CredentialRecord {
    Aws(AwsSandboxCredential),
    Azure(AzureSandboxCredential),
}

impl CredentialRecord {
    pub fn from_fields(provider: Provider, fields: &RawFieldMap) -> Self {
        match provider {
            Provider::Aws => Self::Aws(AwsSandboxCredential::from_fields(fields)),
            Provider::Azure => Self::Azure(AzureSandboxCredential::from_fields(fields)),
        }
    }

    pub fn as_azure(&self) -> Option<&AzureSandboxCredential> {
        match self {
            Self::Azure(c) => Some(c),
            Self::Aws(_) => None,
        }
    }

    fn inner(&self) -> &dyn SandboxCredential {
        match self {
            Self::Aws(c) => c,
            Self::Azure(c) => c,
        }
    }
}

impl SandboxCredential for CredentialRecord {
    fn provider(&self) -> Provider {
        self.inner().provider()
    }

    fn user(&self) -> &str {
        self.inner().user()
    }

    fn password(&self) -> &str {
        self.inner().password()
    }

    fn sandbox_url(&self) -> &str {
        self.inner().sandbox_url()
    }

    fn to_env_map(&self) -> EnvMap {
        self.inner().to_env_map()
    }

    fn to_terraform_env_map(&self) -> EnvMap {
        self.inner().to_terraform_env_map()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn azure() -> AzureSandboxCredential {
        AzureSandboxCredential {
            sandbox_url: "https://x/#@t/".to_owned(),
            tenant_name: "t".to_owned(),
            user: "bob".to_owned(),
            password: "pw".to_owned(),
            resource_group: "rg".to_owned(),
            resource_provider_registrations: "none".to_owned(),
            subscription_id: "sub".to_owned(),
            tenant_id: "tid".to_owned(),
            client_id: "cid".to_owned(),
            client_secret: "secret".to_owned(),
        }
    }

    #[test]
    fn aws_env_maps_use_fixed_names() {
        let cred = AwsSandboxCredential {
            access_key_id: "AKIA".to_owned(),
            secret_access_key: "sk".to_owned(),
            region: "us-east-1".to_owned(),
            ..Default::default()
        };
        let full: Vec<_> = cred.to_env_map().into_keys().collect();
        assert_eq!(
            full,
            [
                "AWS_ACCESS_KEY_ID",
                "AWS_PASSWORD",
                "AWS_REGION",
                "AWS_SANDBOX_URL",
                "AWS_SECRET_ACCESS_KEY",
                "AWS_USERNAME",
            ]
        );
        assert_eq!(
            cred.to_scoped_env_map(CredentialScope::Terraform),
            btreemap! {
                "AWS_ACCESS_KEY_ID" => "AKIA".to_owned(),
                "AWS_SECRET_ACCESS_KEY" => "sk".to_owned(),
                "AWS_REGION" => "us-east-1".to_owned(),
            }
        );
    }

    #[test]
    fn azure_terraform_scope_drops_login_fields() {
        let cred = azure();
        let tf = cred.to_scoped_env_map(CredentialScope::Terraform);
        assert_eq!(tf.len(), 5);
        assert_eq!(tf["ARM_TENANT_ID"], "tid");
        assert!(!tf.contains_key("ARM_PASSWORD"));

        let full = cred.to_scoped_env_map(CredentialScope::Full);
        assert_eq!(full.len(), 10);
        assert_eq!(full["ARM_RESOURCE_GROUP"], "rg");
        assert_eq!(full["ARM_USERNAME"], "bob");
    }

    #[test]
    fn azure_from_fields_marks_registrations_none() {
        let mut fields = RawFieldMap::with_required_fields(Provider::Azure);
        fields.insert(Field::User, "bob");
        let cred = AzureSandboxCredential::from_fields(&fields);
        assert_eq!(cred.user, "bob");
        assert_eq!(cred.resource_provider_registrations, "none");
        assert_eq!(cred.tenant_id, "");
    }

    #[test]
    fn record_json_is_flat_with_provider_tag() {
        let record = CredentialRecord::Azure(azure());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "provider": "azure",
                "sandboxUrl": "https://x/#@t/",
                "tenantName": "t",
                "user": "bob",
                "password": "pw",
                "resourceGroup": "rg",
                "resourceProviderRegistrations": "none",
                "subscriptionId": "sub",
                "tenantId": "tid",
                "clientId": "cid",
                "clientSecret": "secret",
            })
        );
    }

    #[test]
    fn record_restores_aws_variant() {
        let s = r#"{"provider":"aws","accessKeyId":"AKIA","region":"us-west-2"}"#;
        let record: CredentialRecord = serde_json::from_str(s).unwrap();
        assert_eq!(record.provider(), Provider::Aws);
        assert_eq!(record.to_terraform_env_map()["AWS_REGION"], "us-west-2");
        assert!(record.as_azure().is_none());
    }
}
