use crate::error::CatalogError;
use crate::logger;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A learnable word with its picture and optional context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordItem {
    pub word: String,
    pub image_ref: String,
    pub example: Option<String>,
    pub translation: Option<String>,
}

impl WordItem {
    pub fn new(word: &str, image_ref: &str) -> Self {
        Self {
            word: word.to_string(),
            image_ref: image_ref.to_string(),
            example: None,
            translation: None,
        }
    }

    pub fn matches(&self, word: &str) -> bool {
        same_word(&self.word, word)
    }
}

/// Words are keyed case-insensitively throughout the session.
pub fn same_word(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// Every field optional so missing ones can be reported by record index.
#[derive(Debug, Deserialize)]
struct RawRecord {
    word: Option<String>,
    #[serde(alias = "imageRef", alias = "image_ref")]
    image: Option<String>,
    example: Option<String>,
    translation: Option<String>,
}

/// The ordered, read-only word list for one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<WordItem>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::Missing {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        logger::log(&format!(
            "Loaded {} words from {}",
            catalog.len(),
            path.display()
        ));
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawRecord> = serde_json::from_str(content)?;
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let word = required(record.word, index, "word")?;
            let image_ref = required(record.image, index, "image")?;
            if !seen.insert(word.to_lowercase()) {
                return Err(CatalogError::DuplicateWord(word));
            }
            items.push(WordItem {
                word,
                image_ref,
                example: non_blank(record.example),
                translation: non_blank(record.translation),
            });
        }

        Ok(Self { items })
    }

    pub fn from_items(items: Vec<WordItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordItem> {
        self.items.get(index)
    }

    pub fn lookup(&self, word: &str) -> Option<&WordItem> {
        self.items.iter().find(|item| item.matches(word))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordItem> {
        self.items.iter()
    }
}

fn required(value: Option<String>, index: usize, field: &'static str) -> Result<String, CatalogError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CatalogError::MissingField { index, field }),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
