use std::collections::BTreeMap;

use super::provider::Provider;

/// Normalized credential field name.
/// Displayed as the upper snake case key, e.g. `ACCESS_KEY_ID`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Field {
    Username,
    User,
    Password,
    AccessKeyId,
    SecretAccessKey,
    SandboxUrl,
    Region,
    SubscriptionId,
    ResourceGroup,
    TenantName,
    ClientId,
    ClientSecret,
}

/// Flat table of extracted credential values.
/// e.g. `[ USER => "bob", PASSWORD => "***", REGION => "eastus" ]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldMap(BTreeMap<Field, String>);

impl RawFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map in which all of `provider`'s required fields are present and empty.
    pub fn with_required_fields(provider: Provider) -> Self {
        let mut m = Self::new();
        for &f in provider.required_fields() {
            m.insert(f, "");
        }
        m
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    /// Returns the value of `field`, or an empty string if it was never found.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(&k, v)| (k, v.as_str()))
    }
}

impl FromIterator<(Field, String)> for RawFieldMap {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
