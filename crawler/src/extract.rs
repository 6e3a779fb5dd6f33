use crate::error::ExtractError;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref SEL_TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref SEL_TEXT: Selector = Selector::parse("p, h1").expect("valid selector");
    static ref SEL_LINK: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// Title, text blocks and raw hrefs of one page. Text is lowercased with
/// whitespace runs collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub text_blocks: Vec<String>,
    pub links: Vec<String>,
}

fn clean_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

pub fn extract(html: &str) -> Result<ExtractedPage, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::ParseError("empty document".into()));
    }
    let doc = Html::parse_document(html);
    let title = doc.select(&SEL_TITLE).next().map(clean_text).unwrap_or_default();
    let text_blocks = doc
        .select(&SEL_TEXT)
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .collect();
    let links = doc
        .select(&SEL_LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty() && !h.starts_with('#'))
        .map(str::to_string)
        .collect();
    Ok(ExtractedPage { title, text_blocks, links })
}
