use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::model::{Field, Provider, RawFieldMap};

static RE_REGION_QUERY: Lazy<Regex> = lazy_regex!(r"[?&]region=([^&]+)");

const SEGMENT_SUBSCRIPTIONS: &str = "subscriptions";
const SEGMENT_RESOURCE_GROUPS: &str = "resourceGroups";

/// Identifiers embedded in a sandbox URL.
///
/// Azure portal links carry them in the fragment, e.g.
/// `https://portal.azure.com/#@tenant/resource/subscriptions/<sub>/resourceGroups/<rg>/overview`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxUrlParts {
    pub region: Option<String>,
    pub tenant_name: Option<String>,
    pub subscription_id: Option<String>,
    pub resource_group: Option<String>,
}

impl SandboxUrlParts {
    pub fn parse(url: &str, provider: Provider) -> Self {
        let mut parts = Self {
            region: self::region(url).map(str::to_owned),
            ..Self::default()
        };
        if provider == Provider::Azure {
            if let Some((_, fragment)) = url.split_once('#') {
                parts.parse_azure_fragment(fragment);
            }
        }
        parts
    }

    fn parse_azure_fragment(&mut self, fragment: &str) {
        if let Some(rest) = fragment.strip_prefix('@') {
            // Without a '/' there is no end to the tenant name.
            if let Some(end) = rest.find('/') {
                self.tenant_name = Some(rest[..end].to_owned());
            }
        }

        // Repeated keys: the last one wins.
        let segments: Vec<&str> = fragment.split('/').collect();
        for (i, &seg) in segments.iter().enumerate() {
            let Some(&next) = segments.get(i + 1) else {
                break
            };
            match seg {
                SEGMENT_SUBSCRIPTIONS => self.subscription_id = Some(next.to_owned()),
                SEGMENT_RESOURCE_GROUPS => self.resource_group = Some(next.to_owned()),
                _ => (),
            }
        }
    }

    /// Writes every identifier found into `fields`, leaving the rest untouched.
    pub fn merge_into(self, fields: &mut RawFieldMap) {
        let Self {
            region,
            tenant_name,
            subscription_id,
            resource_group,
        } = self;

        for (field, value) in [
            (Field::Region, region),
            (Field::TenantName, tenant_name),
            (Field::SubscriptionId, subscription_id),
            (Field::ResourceGroup, resource_group),
        ] {
            if let Some(v) = value {
                fields.insert(field, v);
            }
        }
    }
}

/// Returns the `region` query parameter of a sandbox URL.
/// The fragment is not searched.
///
/// ```
/// use bear_sandbox::sandbox_url::region;
///
/// assert_eq!(region("https://console.aws.amazon.com/?region=us-east-1"), Some("us-east-1"));
/// assert_eq!(region("https://x/?a=1&region=eastus&b=2"), Some("eastus"));
/// assert_eq!(region("https://x/?region=eastus#@t/x"), Some("eastus"));
/// assert_eq!(region("https://x/?myregion=eastus"), None);
/// assert_eq!(region("https://x/#/?region=eastus"), None);
/// ```
pub fn region(url: &str) -> Option<&str> {
    let query_part = url.split_once('#').map_or(url, |(before, _)| before);
    RE_REGION_QUERY
        .captures(query_part)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
