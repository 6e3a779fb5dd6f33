use crate::normalize::NormalizedUrl;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A document reduced to the sequence of terms it contains.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDocument {
    pub url: NormalizedUrl,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TfidfTable {
    pub url: NormalizedUrl,
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowWeightTerms {
    pub url: NormalizedUrl,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfMode {
    /// idf = log10(N / df)
    #[default]
    Standard,
    /// idf = log10(1 + N / df)
    Smoothed,
}

impl IdfMode {
    fn idf(self, n: usize, df: usize) -> f64 {
        let ratio = n as f64 / df.max(1) as f64;
        match self {
            IdfMode::Standard => ratio.log10(),
            IdfMode::Smoothed => (1.0 + ratio).log10(),
        }
    }
}

/// Weights every term of every document by tf·idf, where tf is the term's
/// share of its document and idf is taken over the whole corpus.
pub fn score_corpus(corpus: &[TermDocument], mode: IdfMode) -> Vec<TfidfTable> {
    let mut counts: Vec<HashMap<&str, u32>> = Vec::with_capacity(corpus.len());
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in corpus {
        let mut tf_counts: HashMap<&str, u32> = HashMap::new();
        for term in &doc.terms {
            *tf_counts.entry(term.as_str()).or_insert(0) += 1;
        }
        for term in tf_counts.keys() {
            *df.entry(*term).or_insert(0) += 1;
        }
        counts.push(tf_counts);
    }
    tracing::debug!(num_docs = corpus.len(), num_terms = df.len(), "scoring corpus");

    let n = corpus.len();
    corpus
        .iter()
        .zip(counts)
        .map(|(doc, tf_counts)| {
            let total = doc.terms.len() as f64;
            let scores = tf_counts
                .into_iter()
                .map(|(term, count)| {
                    let tf = count as f64 / total;
                    (term.to_string(), tf * mode.idf(n, df[term]))
                })
                .collect();
            TfidfTable { url: doc.url.clone(), scores }
        })
        .collect()
}

/// Flags terms whose weight falls below `mean - 0.7 * sd` of the table, using
/// the sample standard deviation. Tables with fewer than two terms flag nothing.
pub fn low_weight_terms(table: &TfidfTable) -> LowWeightTerms {
    let n = table.scores.len();
    let mut terms = Vec::new();
    if n >= 2 {
        let mean = table.scores.values().sum::<f64>() / n as f64;
        let variance = table.scores.values().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let cutoff = mean - 0.7 * variance.sqrt();
        terms = table
            .scores
            .iter()
            .filter(|(_, v)| **v < cutoff)
            .map(|(t, _)| t.clone())
            .collect();
        terms.sort();
    }
    LowWeightTerms { url: table.url.clone(), terms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_url;

    fn doc(path: &str, terms: &[&str]) -> TermDocument {
        TermDocument {
            url: normalize_url(&format!("https://example.com/{path}")).unwrap(),
            terms: terms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-12 }

    #[test]
    fn weights_follow_tf_times_idf() {
        let corpus = vec![
            doc("a", &["rust", "crawler", "rust", "tokio"]),
            doc("b", &["rust", "keywords"]),
        ];
        let tables = score_corpus(&corpus, IdfMode::Standard);
        assert_eq!(tables.len(), 2);
        let a = &tables[0].scores;
        // rust is everywhere, so its idf is zero
        assert!(close(a["rust"], 0.0));
        assert!(close(a["crawler"], 0.25 * 2f64.log10()));
        assert!(close(a["tokio"], 0.25 * 2f64.log10()));
        let b = &tables[1].scores;
        assert!(close(b["keywords"], 0.5 * 2f64.log10()));
        assert_eq!(tables[1].url.as_str(), "example.com/b");
    }

    #[test]
    fn smoothed_idf_never_reaches_zero() {
        let corpus = vec![doc("a", &["rust"]), doc("b", &["rust"])];
        let tables = score_corpus(&corpus, IdfMode::Smoothed);
        assert!(close(tables[0].scores["rust"], 2f64.log10()));
    }

    #[test]
    fn empty_documents_yield_empty_tables() {
        let tables = score_corpus(&[doc("a", &[]), doc("b", &["x"])], IdfMode::Standard);
        assert!(tables[0].scores.is_empty());
        assert_eq!(tables[1].scores.len(), 1);
        assert!(score_corpus(&[], IdfMode::Standard).is_empty());
    }

    #[test]
    fn flags_terms_well_below_mean() {
        let url = normalize_url("https://example.com/a").unwrap();
        let scores = [("low", 0.0), ("mid", 0.5), ("high", 0.55), ("top", 0.6)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let flagged = low_weight_terms(&TfidfTable { url, scores });
        assert_eq!(flagged.terms, vec!["low"]);
    }

    #[test]
    fn uniform_or_tiny_tables_flag_nothing() {
        let url = normalize_url("https://example.com/a").unwrap();
        let single = TfidfTable { url: url.clone(), scores: [("only".to_string(), 0.3)].into_iter().collect() };
        assert!(low_weight_terms(&single).terms.is_empty());
        let uniform = TfidfTable {
            url,
            scores: ["a", "b", "c"].iter().map(|t| (t.to_string(), 0.25)).collect(),
        };
        assert!(low_weight_terms(&uniform).terms.is_empty());
    }
}
