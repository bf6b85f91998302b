use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::*;

pub fn selector_must_parsed(sel: &'static str) -> Selector {
    Selector::parse(sel).expect("Failed to parse  `&'static str`  selector")
}

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

pub trait ElementRefExt<'a> {
    /// Concatenated inner text with surrounding whitespace removed.
    fn trimmed_text(&self) -> String;

    /// The element that structurally contains this one, if any.
    /// Borrows from the document, not from `self`.
    fn parent_element(&self) -> Option<ElementRef<'a>>;
}

impl<'a> ElementRefExt<'a> for ElementRef<'a> {
    fn trimmed_text(&self) -> String {
        self.text().collect::<String>().trim().to_owned()
    }

    fn parent_element(&self) -> Option<ElementRef<'a>> {
        self.parent().and_then(ElementRef::wrap)
    }
}
