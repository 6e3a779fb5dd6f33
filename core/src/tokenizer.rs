use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","could","couldnt","couldve",
            "did","didnt","do","does","doesnt","doing","don","dont","down","during",
            "each","few","for","from","further",
            "had","has","hasnt","have","havent","having","he","hed","hell","her","here","hers","herself","hes","him","himself","his","how",
            "i","id","if","ill","im","in","into","is","isnt","it","itd","itll","its","itself","ive",
            "just","let","lets","me","more","most","must","mustnt","my","myself",
            "no","nor","not","now","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "s","same","she","shed","shell","shes","should","shouldnt","shouldve","so","some","such",
            "t","than","that","thats","the","their","theirs","them","themselves","then","there","theres","these","they","theyd","theyll","theyre","theyve","this","those","through","to","too",
            "under","until","up","very",
            "was","wasnt","we","wed","were","weve","what","whats","when","where","which","while","who","whom","whos","why","will","with","wont","would","wouldnt","wouldve",
            "you","youd","youll","your","youre","yours","yourself","yourselves","youve"
        ];
        words.iter().copied().collect()
    };
}

/// Function words that delimit candidate phrases. Apostrophes are ignored so
/// that "don't" and "dont" are both stopwords.
pub fn is_stopword(token: &str) -> bool {
    if STOPWORDS.contains(token) { return true; }
    token.contains('\'') && STOPWORDS.contains(token.replace('\'', "").as_str())
}

/// Tokenize text into lowercase NFKC words, dropping stopwords. With `stem`
/// set, each word is reduced by the English Snowball stemmer.
pub fn tokenize(text: &str, stem: bool) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for mat in RE.find_iter(&normalized) {
        let token = mat.as_str();
        if is_stopword(token) { continue; }
        if stem {
            tokens.push(STEMMER.stem(token).to_string());
        } else {
            tokens.push(token.to_string());
        }
    }
    tokens
}
