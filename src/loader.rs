// File: src/loader.rs
use crate::core::types::WordRecord;
use crate::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Translation used when a dictionary entry carries none.
pub const NO_TRANSLATION: &str = "无翻译";

/// One entry of the JSON dictionary file.
#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    name: Option<String>,
    #[serde(default)]
    trans: Value,
    usphone: Option<String>,
    ukphone: Option<String>,
}

/// Picks the translation out of a `trans` field that may be a list
/// (first element wins), a plain string, or missing.
pub fn resolve_translation(trans: &Value) -> String {
    match trans {
        Value::Array(items) => match items.first() {
            Some(first) => resolve_translation(first),
            None => NO_TRANSLATION.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => NO_TRANSLATION.to_string(),
        other => other.to_string(),
    }
}

pub fn parse_dictionary(json: &str) -> Result<Vec<WordRecord>> {
    let entries: Vec<DictionaryEntry> = serde_json::from_str(json)?;
    Ok(into_records(entries))
}

pub fn load_dictionary(path: &Path) -> Result<Vec<WordRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let entries: Vec<DictionaryEntry> = serde_json::from_reader(reader)?;
    log::info!("read {} dictionary entries from {}", entries.len(), path.display());
    Ok(into_records(entries))
}

fn into_records(entries: Vec<DictionaryEntry>) -> Vec<WordRecord> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let Some(name) = entry.name else {
                log::warn!("skipping dictionary entry without a name");
                return None;
            };
            Some(WordRecord {
                term: name,
                translation: resolve_translation(&entry.trans),
                pronunciation_us: entry.usphone,
                pronunciation_uk: entry.ukphone,
            })
        })
        .collect()
}
