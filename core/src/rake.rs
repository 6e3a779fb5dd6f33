//! Rapid Automatic Keyword Extraction over a single page.
//!
//! The pipeline runs in five stages, each consuming the previous stage's value:
//! punctuation split, stopword split, co-occurrence graph, word scores, phrase
//! scores. [`filter`] then keeps the top third of the scored phrases.

use crate::document::{Keywords, PageDocument};
use crate::normalize::NormalizedUrl;
use crate::tokenizer::is_stopword;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RakeError {
    #[error("input is empty or whitespace only")]
    EmptyInput,
    #[error("malformed co-occurrence graph at {word:?}")]
    MalformedGraph { word: String },
    #[error("url mismatch: scores for {scores} but phrases for {phrases}")]
    UrlMismatch { scores: NormalizedUrl, phrases: NormalizedUrl },
    #[error("word {0:?} was never scored")]
    UnknownWord(String),
    #[error("{unused} of {scored} scored words appear in no phrase")]
    UnusedWords { scored: usize, unused: usize },
}

const SENTENCE_DELIMITERS: [char; 4] = ['.', ',', '?', '!'];

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedText {
    pub url: NormalizedUrl,
    pub delimited: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoOccurrenceGraph {
    pub url: NormalizedUrl,
    pub graph: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordScores {
    pub url: NormalizedUrl,
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermScores {
    pub url: NormalizedUrl,
    pub scores: HashMap<String, f64>,
}

/// Runs every stage over the page's text blocks. Stopwords match in any case.
pub fn run_pipeline(doc: &PageDocument) -> Result<Keywords, RakeError> {
    let sentences = delimit_by_punct(doc.url.clone(), &doc.body().to_lowercase())?;
    let phrases = delimit_by_stop(sentences)?;
    let graph = co_occurrence(&phrases)?;
    let words = deg_freq(graph)?;
    let terms = term_scoring(words, &phrases)?;
    Ok(filter(terms))
}

/// Splits raw text into sentence fragments at `. , ? !`.
pub fn delimit_by_punct(url: NormalizedUrl, text: &str) -> Result<ProcessedText, RakeError> {
    if text.trim().is_empty() {
        return Err(RakeError::EmptyInput);
    }
    let delimited = text
        .split(SENTENCE_DELIMITERS)
        .map(str::trim)
        .filter(|s| s.chars().count() > 1)
        .map(str::to_string)
        .collect();
    Ok(ProcessedText { url, delimited })
}

/// Splits sentence fragments into candidate phrases at stopwords.
pub fn delimit_by_stop(doc: ProcessedText) -> Result<ProcessedText, RakeError> {
    let mut phrases = Vec::new();
    for sentence in &doc.delimited {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        match words.len() {
            0 => return Err(RakeError::EmptyInput),
            1 => {
                if !is_stopword(words[0]) {
                    phrases.push(words[0].to_string());
                }
            }
            _ => {
                for run in words.split(|w| is_stopword(w)) {
                    if !run.is_empty() {
                        phrases.push(run.join(" "));
                    }
                }
            }
        }
    }
    Ok(ProcessedText { url: doc.url, delimited: phrases })
}

/// Builds the word co-occurrence graph. A word occurring k times in a phrase
/// gets k self-edges plus one edge to each other distinct word of the phrase.
pub fn co_occurrence(doc: &ProcessedText) -> Result<CoOccurrenceGraph, RakeError> {
    let mut graph: HashMap<String, Vec<String>> = HashMap::new();
    let mut tokenized = Vec::with_capacity(doc.delimited.len());
    for phrase in &doc.delimited {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() {
            return Err(RakeError::EmptyInput);
        }
        for w in &words {
            graph.entry((*w).to_string()).or_default();
        }
        tokenized.push(words);
    }

    for words in tokenized {
        // distinct words in first-seen order, with their counts
        let mut distinct: Vec<(&str, usize)> = Vec::new();
        for w in words {
            match distinct.iter_mut().find(|(d, _)| *d == w) {
                Some((_, n)) => *n += 1,
                None => distinct.push((w, 1)),
            }
        }
        for &(word, count) in &distinct {
            let edges = graph.entry(word.to_string()).or_default();
            if count == 1 {
                edges.extend(distinct.iter().map(|(d, _)| d.to_string()));
            } else {
                edges.extend(std::iter::repeat(word.to_string()).take(count));
                edges.extend(distinct.iter().filter(|(d, _)| *d != word).map(|(d, _)| d.to_string()));
            }
        }
    }
    Ok(CoOccurrenceGraph { url: doc.url.clone(), graph })
}

/// Scores each word as degree / frequency.
pub fn deg_freq(graph: CoOccurrenceGraph) -> Result<WordScores, RakeError> {
    let mut scores = HashMap::with_capacity(graph.graph.len());
    for (word, edges) in graph.graph {
        let degree = edges.len();
        let frequency = edges.iter().filter(|e| **e == word).count();
        if degree == 0 || frequency == 0 {
            return Err(RakeError::MalformedGraph { word });
        }
        scores.insert(word, degree as f64 / frequency as f64);
    }
    Ok(WordScores { url: graph.url, scores })
}

/// Sums word scores per phrase and checks that the phrases and the word table
/// describe exactly the same vocabulary.
pub fn term_scoring(words: WordScores, phrases: &ProcessedText) -> Result<TermScores, RakeError> {
    if words.url != phrases.url {
        return Err(RakeError::UrlMismatch { scores: words.url, phrases: phrases.url.clone() });
    }
    let mut used: HashSet<&str> = HashSet::new();
    let mut scores: HashMap<String, f64> = HashMap::new();
    for phrase in &phrases.delimited {
        let mut seen_in_phrase: HashSet<&str> = HashSet::new();
        let mut total = 0.0;
        for word in phrase.split_whitespace() {
            let score = words
                .scores
                .get(word)
                .ok_or_else(|| RakeError::UnknownWord(word.to_string()))?;
            used.insert(word);
            if seen_in_phrase.insert(word) {
                total += score;
            }
        }
        scores.insert(phrase.clone(), total);
    }
    if used.len() != words.scores.len() {
        return Err(RakeError::UnusedWords {
            scored: words.scores.len(),
            unused: words.scores.len().saturating_sub(used.len()),
        });
    }
    Ok(TermScores { url: words.url, scores })
}

/// Keeps the top `n/3 + 1` phrases, or all of them when there are three or
/// fewer. Equal scores are ordered lexicographically.
pub fn filter(terms: TermScores) -> Keywords {
    let mut ranked: Vec<(String, f64)> = terms.scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(&b.0))
    });
    let keep = if ranked.len() <= 3 { ranked.len() } else { ranked.len() / 3 + 1 };
    ranked.truncate(keep);
    Keywords { url: terms.url, keywords: ranked.into_iter().map(|(phrase, _)| phrase).collect() }
}
