use crate::document::PageDocument;
use crate::normalize::NormalizedUrl;
use crate::rake::run_pipeline;
use crate::tfidf::{low_weight_terms, score_corpus, IdfMode, TermDocument};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which token sequence stands for a document in the TF-IDF pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermSource {
    /// The page's RAKE keywords, one term per phrase.
    #[default]
    Keywords,
    /// Every non-stopword word of the page body.
    Words,
    /// Like `Words`, stemmed.
    StemmedWords,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub term_source: TermSource,
    pub idf: IdfMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub url: NormalizedUrl,
    pub title: String,
    pub keywords: Vec<String>,
    /// Heaviest term first.
    pub tfidf: Vec<WeightedTerm>,
    pub low_weight: Vec<String>,
}

/// Extracts keywords from every document, then weights the surviving corpus.
/// Documents whose keyword pipeline fails are logged and left out.
pub fn analyze_corpus(docs: &[PageDocument], options: &AnalysisOptions) -> Vec<DocumentReport> {
    let mut kept = Vec::with_capacity(docs.len());
    for doc in docs {
        match run_pipeline(doc) {
            Ok(kw) => kept.push((doc, kw.keywords)),
            Err(e) => tracing::warn!(url = %doc.url, error = %e, "skipping document"),
        }
    }

    let corpus: Vec<TermDocument> = kept
        .iter()
        .map(|(doc, keywords)| TermDocument {
            url: doc.url.clone(),
            terms: match options.term_source {
                TermSource::Keywords => keywords.clone(),
                TermSource::Words => tokenize(&doc.body(), false),
                TermSource::StemmedWords => tokenize(&doc.body(), true),
            },
        })
        .collect();
    let tables = score_corpus(&corpus, options.idf);
    tracing::info!(documents = docs.len(), analyzed = tables.len(), "corpus analyzed");

    kept.into_iter()
        .zip(tables)
        .map(|((doc, keywords), table)| {
            let low_weight = low_weight_terms(&table).terms;
            let mut tfidf: Vec<WeightedTerm> = table
                .scores
                .into_iter()
                .map(|(term, weight)| WeightedTerm { term, weight })
                .collect();
            tfidf.sort_by(|a, b| {
                b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal).then_with(|| a.term.cmp(&b.term))
            });
            DocumentReport { url: doc.url.clone(), title: doc.title.clone(), keywords, tfidf, low_weight }
        })
        .collect()
}
