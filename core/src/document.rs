use crate::normalize::NormalizedUrl;
use serde::{Deserialize, Serialize};

/// One successfully fetched page, as handed from the crawler to the keyword pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub url: NormalizedUrl,
    pub title: String,
    /// Paragraph and heading text in document order.
    pub text_blocks: Vec<String>,
}

impl PageDocument {
    pub fn new(url: NormalizedUrl, title: impl Into<String>, text_blocks: Vec<String>) -> Self {
        Self { url, title: title.into(), text_blocks }
    }

    /// Text blocks joined so that every block ends a sentence.
    pub fn body(&self) -> String {
        self.text_blocks.join(". ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    pub url: NormalizedUrl,
    pub keywords: Vec<String>, // highest score first
}
