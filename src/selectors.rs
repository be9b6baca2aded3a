use scraper::Selector;

use crate::error::ConvertErr;

fn parse(selector: &str) -> Result<Selector, ConvertErr> {
    Selector::parse(selector).map_err(|e| ConvertErr::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Fixed queries against the export markup, compiled once per run.
pub struct Selectors {
    pub title: Selector,
    pub time: Selector,
    pub author: Selector,
    pub subtitle: Selector,
    pub description: Selector,
    pub canonical: Selector,
    pub image_placeholder: Selector,
    pub embed_anchor: Selector,
    pub embed_title: Selector,
    pub embed_thumbnail: Selector,
    pub title_headings: Selector,
    pub image: Selector,
    pub section: Selector,
    pub tag: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self, ConvertErr> {
        Ok(Self {
            title: parse("title")?,
            time: parse("time")?,
            author: parse(".p-author.h-card")?,
            subtitle: parse(".p-summary[data-field='subtitle']")?,
            description: parse(".p-summary[data-field='description']")?,
            canonical: parse(".p-canonical")?,
            image_placeholder: parse(".aspectRatioPlaceholder")?,
            embed_anchor: parse(".graf .markup--mixtapeEmbed-anchor")?,
            embed_title: parse("strong")?,
            embed_thumbnail: parse(".graf a.mixtapeImage")?,
            title_headings: parse("h3.graf--title, h1")?,
            image: parse("img")?,
            section: parse("div.section-inner")?,
            tag: parse("ul.tags > li > a")?,
        })
    }
}
