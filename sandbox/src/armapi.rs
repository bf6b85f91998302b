//! Azure Resource Manager calls needed to complete a sandbox credential.

use ::async_trait::async_trait;
use ::once_cell::sync::Lazy;
use ::reqwest::StatusCode;
use ::serde::Deserialize;
use url::Url;

use crate::{error::*, util};

pub const LOGIN_HOST: &str = "https://login.microsoftonline.com";
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
pub static SUBSCRIPTIONS_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://management.azure.com/subscriptions?api-version=2025-04-01").unwrap()
});

/// Resolves the tenant id (a GUID) of an Azure sandbox from its client credentials.
#[async_trait]
pub trait TenantResolver {
    async fn resolve_tenant_id(
        &self,
        tenant_name: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    #[serde(default)]
    value: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Subscription {
    #[serde(default)]
    tenant_id: String,
}

pub struct ArmClient {
    http: reqwest::Client,
}

impl Default for ArmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ArmClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn token_url(tenant_name: &str) -> Result<Url> {
        util::parse_url(format!("{}/{}/oauth2/v2.0/token", LOGIN_HOST, tenant_name))
    }

    /// Client-credentials token exchange for the management API.
    pub async fn fetch_access_token(
        &self,
        tenant_name: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let url = Self::token_url(tenant_name)?;
        let url_str = url.to_string();
        let form = [
            ("client_id", client_id),
            ("scope", MANAGEMENT_SCOPE),
            ("client_secret", client_secret),
            ("grant_type", "client_credentials"),
        ];
        let resp = self.http.post(url).form(&form).send().await?;

        // The token endpoint explains failures in the JSON body, so parse it either way.
        let status = resp.status();
        let body: TokenResponse = resp.json().await?;
        match body.access_token {
            Some(token) if status == StatusCode::OK => Ok(token),
            _ if !body.error_description.is_empty() => Err(Error::NoAccessToken {
                tenant: tenant_name.to_owned(),
                description: body.error_description,
            }),
            _ => Err(Error::UnexpectedResponseCode {
                got: status,
                expected: StatusCode::OK,
                requested_url: url_str,
            }),
        }
    }

    /// Tenant id of the first subscription visible to `token`, or an empty string if there is none.
    pub async fn fetch_tenant_id(&self, token: &str) -> Result<String> {
        let url = SUBSCRIPTIONS_URL.clone();
        let url_str = url.to_string();
        let resp = self.http.get(url).bearer_auth(token).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedResponseCode {
                got: status,
                expected: StatusCode::OK,
                requested_url: url_str,
            });
        }

        let list: SubscriptionList = resp.json().await?;
        Ok(self::first_tenant_id(list))
    }
}

fn first_tenant_id(list: SubscriptionList) -> String {
    list.value
        .into_iter()
        .next()
        .map(|s| s.tenant_id)
        .unwrap_or_default()
}

#[async_trait]
impl TenantResolver for ArmClient {
    async fn resolve_tenant_id(
        &self,
        tenant_name: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<String> {
        let token = self
            .fetch_access_token(tenant_name, client_id, client_secret)
            .await?;
        self.fetch_tenant_id(&token).await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_token_url() {
        let url = ArmClient::token_url("contoso.onmicrosoft.com").unwrap();
        assert_eq!(
            url.as_str(),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com/oauth2/v2.0/token"
        );
    }

    #[test]
    fn tenant_id_of_first_subscription() {
        let list: SubscriptionList = serde_json::from_str(
            r#"{"value":[{"tenantId":"t-1","displayName":"a"},{"tenantId":"t-2"}]}"#,
        )
        .unwrap();
        assert_eq!(first_tenant_id(list), "t-1");

        let empty: SubscriptionList = serde_json::from_str(r#"{"value":[]}"#).unwrap();
        assert_eq!(first_tenant_id(empty), "");

        let missing: SubscriptionList = serde_json::from_str("{}").unwrap();
        assert_eq!(first_tenant_id(missing), "");
    }

    #[test]
    fn token_response_error_body() {
        let body: TokenResponse = serde_json::from_str(
            r#"{"error":"invalid_client","error_description":"AADSTS7000215: Invalid client secret"}"#,
        )
        .unwrap();
        assert_eq!(body.access_token, None);
        assert!(body.error_description.starts_with("AADSTS"));
    }
}
