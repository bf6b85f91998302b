use bear_sandbox::*;

const AZURE_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<body>
  <section class="credentials">
    <div class="row">
      <label for="Username">Username</label>
      <input id="Username" value="bob" readonly>
    </div>
    <div class="row">
      <label for="Password">Password</label>
      <input id="Password" value="secret" type="password" readonly>
    </div>
    <div class="row">
      <input id="Application Client ID" value="00000000-aaaa-bbbb-cccc-111111111111">
      <input id="Secret" value="cl1ent~s3cret">
    </div>
    <div class="row">
      <strong>Sandbox URL</strong>
      <span>https://x/?region=eastus#@tenantA/subscriptions/S1/resourceGroups/RG1</span>
    </div>
  </section>
</body>
</html>
"#;

#[test]
fn azure_page_end_to_end() {
    let fields = extract_fields(AZURE_PAGE, Provider::Azure);

    assert_eq!(fields.get(Field::User), "bob");
    assert_eq!(fields.get(Field::Password), "secret");
    assert_eq!(fields.get(Field::Region), "eastus");
    assert_eq!(fields.get(Field::TenantName), "tenantA");
    assert_eq!(fields.get(Field::SubscriptionId), "S1");
    assert_eq!(fields.get(Field::ResourceGroup), "RG1");
    assert_eq!(
        fields.get(Field::ClientId),
        "00000000-aaaa-bbbb-cccc-111111111111"
    );
    assert_eq!(fields.get(Field::ClientSecret), "cl1ent~s3cret");
    assert_eq!(
        fields.get(Field::SandboxUrl),
        "https://x/?region=eastus#@tenantA/subscriptions/S1/resourceGroups/RG1"
    );

    let cred = CredentialRecord::from_fields(Provider::Azure, &fields);
    let env = cred.to_env_map();
    assert_eq!(env["ARM_USERNAME"], "bob");
    assert_eq!(env["ARM_RESOURCE_GROUP"], "RG1");
    assert_eq!(env["ARM_TENANT_NAME"], "tenantA");
    assert_eq!(env["ARM_TENANT_ID"], "");
}

#[test]
fn minimal_snippet_end_to_end() {
    let html = r#"<input id="Username" value="bob"><input id="Password" value="secret"><strong>Sandbox URL</strong><span>https://x/?region=eastus#@tenantA/subscriptions/S1/resourceGroups/RG1</span>"#;
    let fields = extract_fields(html, Provider::Azure);

    assert_eq!(fields.get(Field::User), "bob");
    assert_eq!(fields.get(Field::Password), "secret");
    assert_eq!(fields.get(Field::Region), "eastus");
    assert_eq!(fields.get(Field::TenantName), "tenantA");
    assert_eq!(fields.get(Field::SubscriptionId), "S1");
    assert_eq!(fields.get(Field::ResourceGroup), "RG1");
}

#[test]
fn aws_page_end_to_end() {
    let html = r#"
        <input id="Username" value="cloud_user">
        <input id="Password" value="pw">
        <input id="Access Key Id" value="AKIAEXAMPLE">
        <input id="Secret Access Key" value="wJalrXUtnFEMI/K7MDENG">
        <p><strong>Sandbox URL</strong>
           <span>https://123456789012.signin.aws.amazon.com/console?region=us-east-1</span></p>
    "#;
    let fields = extract_fields(html, Provider::Aws);
    let cred = CredentialRecord::from_fields(Provider::Aws, &fields);

    assert_eq!(cred.provider(), Provider::Aws);
    assert_eq!(
        cred.to_scoped_env_map(CredentialScope::Terraform),
        maplit::btreemap! {
            "AWS_ACCESS_KEY_ID" => "AKIAEXAMPLE".to_owned(),
            "AWS_SECRET_ACCESS_KEY" => "wJalrXUtnFEMI/K7MDENG".to_owned(),
            "AWS_REGION" => "us-east-1".to_owned(),
        }
    );
    assert_eq!(cred.user(), "cloud_user");
}

#[test]
fn azure_labels_do_not_apply_to_aws() {
    let fields = extract_fields(AZURE_PAGE, Provider::Aws);
    assert_eq!(fields.get(Field::Username), "bob");
    assert_eq!(fields.get(Field::AccessKeyId), "");
    assert!(!fields.contains(Field::ClientId));
}
