//! Credential scraping from the sandbox page HTML.

use scraper::{ElementRef, Html};

use crate::{
    model::{Field, Provider, RawFieldMap},
    sandbox_url::SandboxUrlParts,
    util::{self, ElementRefExt as _},
};

/// Text of the label that precedes the sandbox URL on the page.
pub const SANDBOX_URL_LABEL: &str = "Sandbox URL";

/// Fixed table from an `<input>` element's `id` to the field it carries.
#[derive(Debug)]
pub struct LabelMapping {
    entries: &'static [(&'static str, Field)],
}

impl LabelMapping {
    pub const fn new(entries: &'static [(&'static str, Field)]) -> Self {
        Self { entries }
    }

    pub fn field_for_id(&self, id: &str) -> Option<Field> {
        self.entries
            .iter()
            .find_map(|&(label, field)| (label == id).then_some(field))
    }

    pub fn entries(&self) -> &'static [(&'static str, Field)] {
        self.entries
    }
}

pub static AWS_LABELS: LabelMapping = LabelMapping::new(&[
    ("Username", Field::Username),
    ("Password", Field::Password),
    ("Access Key Id", Field::AccessKeyId),
    ("Secret Access Key", Field::SecretAccessKey),
]);

pub static AZURE_LABELS: LabelMapping = LabelMapping::new(&[
    ("Username", Field::User),
    ("Password", Field::Password),
    ("Application Client ID", Field::ClientId),
    ("Secret", Field::ClientSecret),
]);

/// Extracts the credential fields of `provider` from the sandbox page.
///
/// Never fails: malformed HTML is parsed leniently and every field the page
/// does not carry is reported as an empty string.
pub fn extract_fields(html: &str, provider: Provider) -> RawFieldMap {
    let doc = Html::parse_document(html);
    let mut fields = RawFieldMap::with_required_fields(provider);

    scrape_inputs(&doc, provider, &mut fields);

    let sandbox_urls = scrape_sandbox_urls(&doc);
    if sandbox_urls.is_empty() {
        log::info!("No '{}' label found in the given HTML", SANDBOX_URL_LABEL);
    }
    for url in sandbox_urls {
        SandboxUrlParts::parse(&url, provider).merge_into(&mut fields);
        fields.insert(Field::SandboxUrl, url);
    }

    fields
}

fn scrape_inputs(doc: &Html, provider: Provider, fields: &mut RawFieldMap) {
    let sel_input = util::selector_must_parsed("input[id]");
    let mapping = provider.label_mapping();

    for input in doc.select(&sel_input) {
        let el = input.value();
        let Some(id) = el.id() else {
            continue
        };
        let Some(field) = mapping.field_for_id(id) else {
            log::trace!("Ignoring unmapped input id '{}'", id);
            continue
        };
        log::debug!("Found {} in <input id=\"{}\">", field, id);
        fields.insert(field, el.attr("value").unwrap_or_default());
    }
}

/// Returns the text next to every `Sandbox URL` label, in document order.
fn scrape_sandbox_urls(doc: &Html) -> Vec<String> {
    let sel_label = util::selector_must_parsed("strong");

    doc.select(&sel_label)
        .filter(|label| label.trimmed_text() == SANDBOX_URL_LABEL)
        .map(|label| {
            label
                .parent_element()
                .and_then(first_span)
                .map(|span| span.trimmed_text())
                .unwrap_or_default()
        })
        .collect()
}

fn first_span(container: ElementRef) -> Option<ElementRef> {
    let sel_span = util::selector_must_parsed("span");
    container.select(&sel_span).next()
}
