use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use textcore::{analyze_corpus, normalize_url, AnalysisOptions, DocumentReport, PageDocument};
use walkdir::WalkDir;

/// A page record as written by the crawler. `body` is accepted in place of
/// `text_blocks` for hand-written inputs.
#[derive(Debug, Deserialize)]
struct InputDoc {
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    text_blocks: Vec<String>,
    #[serde(default)]
    body: Option<String>,
}

impl InputDoc {
    fn into_page(self) -> Result<PageDocument> {
        let url = normalize_url(&self.url)
            .or_else(|_| normalize_url(&format!("http://{}", self.url)))
            .with_context(|| format!("bad url in input: {}", self.url))?;
        let mut blocks = self.text_blocks;
        if blocks.is_empty() {
            blocks.extend(self.body);
        }
        Ok(PageDocument::new(url, self.title, blocks))
    }
}

/// Collects `.json`/`.jsonl` files under `input`, or `input` itself when it is a file.
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn load_pages(input: &Path) -> Result<Vec<PageDocument>> {
    let mut pages = Vec::new();
    for file in input_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut pages)?;
        } else {
            load_json(&file, &mut pages)?;
        }
    }
    tracing::info!(num_docs = pages.len(), "loaded pages");
    Ok(pages)
}

fn load_jsonl(file: &Path, pages: &mut Vec<PageDocument>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        pages.push(doc.into_page()?);
    }
    Ok(())
}

fn load_json(file: &Path, pages: &mut Vec<PageDocument>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                pages.push(doc.into_page()?);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            pages.push(doc.into_page()?);
        }
        _ => tracing::warn!(file = %file.display(), "ignoring json that is neither object nor array"),
    }
    Ok(())
}

/// Loads every page under `input` and writes one report per analyzed page to `output`.
pub fn build_reports(input: &Path, output: &Path, options: &AnalysisOptions) -> Result<Vec<DocumentReport>> {
    let pages = load_pages(input)?;
    let reports = analyze_corpus(&pages, options);
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut out = std::io::BufWriter::new(File::create(output)?);
    for report in &reports {
        serde_json::to_writer(&mut out, report)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    tracing::info!(reports = reports.len(), output = %output.display(), "reports written");
    Ok(reports)
}
