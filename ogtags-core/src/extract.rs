use std::collections::BTreeMap;

use scraper::{Html, Selector};

/// Open Graph properties keyed without their `og:` prefix.
pub type OgTags = BTreeMap<String, String>;

pub const OG_PREFIX: &str = "og:";

/// Collects every `<meta property="og:*" content="...">` in the document.
///
/// A missing `content` attribute yields an empty value. When a property
/// appears more than once, the last one in document order wins.
pub fn extract_og_tags(html: &str) -> OgTags {
    let mut tags = OgTags::new();
    let Ok(selector) = Selector::parse("meta[property]") else {
        return tags;
    };

    let document = Html::parse_document(html);
    for el in document.select(&selector) {
        let Some(name) = el
            .value()
            .attr("property")
            .and_then(|p| p.strip_prefix(OG_PREFIX))
        else {
            continue;
        };
        let content = el.value().attr("content").unwrap_or_default();
        tags.insert(name.to_string(), content.to_string());
    }
    tags
}
