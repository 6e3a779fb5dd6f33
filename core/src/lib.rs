pub mod analysis;
pub mod document;
pub mod normalize;
pub mod rake;
pub mod tfidf;
pub mod tokenizer;

pub use analysis::{analyze_corpus, AnalysisOptions, DocumentReport, TermSource, WeightedTerm};
pub use document::{Keywords, PageDocument};
pub use normalize::{normalize_url, InvalidUrl, NormalizedUrl};
pub use rake::{run_pipeline, RakeError};
pub use tfidf::{low_weight_terms, score_corpus, IdfMode, LowWeightTerms, TermDocument, TfidfTable};
