use std::path::{Path, PathBuf};

use bear_sandbox::{
    extract_fields, AzureSandboxCredential, CredentialRecord, Provider, SandboxCredential,
    TenantResolver,
};

use crate::browser::{self, BrowserLauncher, LoginRequest};
use crate::error::*;
use crate::rewrite::{self, ResourceGroupRewriter, RewriteReport};
use crate::storage::SandboxStore;

/// Extracts a credential from the sandbox page, completes it and saves it.
pub async fn create_credential<R>(
    html: &str,
    provider: Provider,
    resolver: &R,
    store: &SandboxStore,
) -> Result<CredentialRecord>
where
    R: TenantResolver + ?Sized,
{
    let fields = extract_fields(html, provider);
    let mut record = CredentialRecord::from_fields(provider, &fields);

    if let CredentialRecord::Azure(cred) = &mut record {
        self::resolve_tenant_id(cred, resolver).await;
    }

    store
        .save(&record)
        .context("Failed to save sandbox credential")?;
    Ok(record)
}

/// Fills `tenant_id` in place. A failed lookup leaves it empty.
async fn resolve_tenant_id<R>(cred: &mut AzureSandboxCredential, resolver: &R)
where
    R: TenantResolver + ?Sized,
{
    if cred.tenant_name.is_empty() || cred.client_id.is_empty() || cred.client_secret.is_empty() {
        log::warn!("Skipping tenant id lookup: tenant name or client credentials not found");
        return;
    }
    match resolver
        .resolve_tenant_id(&cred.tenant_name, &cred.client_id, &cred.client_secret)
        .await
    {
        Ok(tenant_id) => cred.tenant_id = tenant_id,
        Err(e) => log::warn!(
            "Failed to resolve tenant id of '{}': {}",
            cred.tenant_name,
            e
        ),
    }
}

pub fn load_credential(store: &SandboxStore) -> Result<CredentialRecord> {
    Ok(store.load()?)
}

/// Returns `false` if there was no stored credential.
pub fn purge_credential(store: &SandboxStore) -> Result<bool> {
    store.purge().context("Failed to purge sandbox credential")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOutcome {
    pub rewrite: RewriteReport,
    pub removed_state_files: Vec<PathBuf>,
}

/// Points the infrastructure code under `root` at the stored sandbox:
/// rewrites stale resource groups, then deletes Terraform state files.
pub fn init_credential(root: &Path, store: &SandboxStore) -> Result<InitOutcome> {
    let rewriter = ResourceGroupRewriter::from_store(store)?;

    let rewrite = rewriter
        .rewrite_path(root)
        .with_context(|| format!("Failed to rewrite resource group under {:?}", root))?;

    let removed_state_files = rewrite::remove_terraform_state_files(root)
        .with_context(|| format!("Failed to remove Terraform state files under {:?}", root))?;

    Ok(InitOutcome {
        rewrite,
        removed_state_files,
    })
}

pub fn login_with_credential<C>(cred: &C, launcher: &dyn BrowserLauncher) -> Result<()>
where
    C: SandboxCredential + ?Sized,
{
    let req = LoginRequest::from_credential(cred);
    browser::login(launcher, &req).with_context(|| format!("Failed to log in to {}", req.website))
}

/// Logs in with the stored credential. Fails if not logged in.
pub fn login_from_store(store: &SandboxStore, launcher: &dyn BrowserLauncher) -> Result<CredentialRecord> {
    let record = store.load()?;
    self::login_with_credential(&record, launcher)?;
    Ok(record)
}
