//! Course catalog service.
//!
//! The catalog lists offerable classes for search and autocomplete. It is an
//! explicit value with a readiness state rather than a global: consumers hold
//! a [`Catalog`], load it when the data arrives, and get
//! [`CatalogError::NotReady`] if they search before that.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Most classes a student may pick for one schedule request.
pub const MAX_SELECTED_CLASSES: usize = 7;

/// Catalog failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog has not been loaded yet.
    #[error("catalog is not loaded yet")]
    NotReady,
    /// Loading failed earlier; searches cannot succeed.
    #[error("catalog failed to load: {0}")]
    Failed(String),
    /// The catalog document is not a list of classes.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The selection already holds the maximum number of classes.
    #[error("at most {max} classes can be selected")]
    SelectionFull { max: usize },
}

/// One offerable class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Department mnemonic, e.g. `"CS"`.
    #[serde(alias = "Mnemonic")]
    pub mnemonic: String,
    /// Course number, e.g. `"2100"`.
    #[serde(alias = "Number", deserialize_with = "string_or_number")]
    pub number: String,
    /// Course title.
    #[serde(alias = "Title")]
    pub title: String,
}

impl CatalogEntry {
    /// Creates an entry.
    pub fn new(
        mnemonic: impl Into<String>,
        number: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            number: number.into(),
            title: title.into(),
        }
    }

    /// Class identifier as used in schedules, e.g. `"CS 2100"`.
    pub fn code(&self) -> String {
        format!("{} {}", self.mnemonic, self.number)
    }

    fn matches(&self, needle: &str) -> bool {
        format!("{} {} {}", self.mnemonic, self.number, self.title)
            .to_lowercase()
            .contains(needle)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Loading state of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// Waiting for data.
    #[default]
    Pending,
    /// Loaded and searchable.
    Ready(Vec<CatalogEntry>),
    /// Loading failed.
    Failed(String),
}

/// Searchable course catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    state: CatalogState,
}

impl Catalog {
    /// Creates a catalog waiting for data.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Creates a ready catalog from entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            state: CatalogState::Ready(entries),
        }
    }

    /// Loads the catalog from a JSON array of classes.
    ///
    /// On failure the catalog moves to [`CatalogState::Failed`] and the
    /// error is returned. Returns the number of entries loaded.
    pub fn load_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        match serde_json::from_str::<Vec<CatalogEntry>>(json) {
            Ok(entries) => {
                let count = entries.len();
                log::debug!("catalog loaded with {count} classes");
                self.state = CatalogState::Ready(entries);
                Ok(count)
            }
            Err(e) => {
                log::warn!("catalog load failed: {e}");
                self.state = CatalogState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Records that fetching the catalog failed.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.state = CatalogState::Failed(reason.into());
    }

    /// Current state.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Whether the catalog can be searched.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, CatalogState::Ready(_))
    }

    fn entries(&self) -> Result<&[CatalogEntry], CatalogError> {
        match &self.state {
            CatalogState::Ready(entries) => Ok(entries),
            CatalogState::Pending => Err(CatalogError::NotReady),
            CatalogState::Failed(reason) => Err(CatalogError::Failed(reason.clone())),
        }
    }

    /// Case-insensitive substring search over `"<mnemonic> <number> <title>"`.
    ///
    /// A blank term matches nothing. Otherwise the term is matched as typed,
    /// surrounding spaces included.
    pub fn search(&self, term: &str) -> Result<Vec<&CatalogEntry>, CatalogError> {
        let entries = self.entries()?;
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = term.to_lowercase();
        Ok(entries.iter().filter(|e| e.matches(&needle)).collect())
    }

    /// Exact lookup by mnemonic and number.
    pub fn find(&self, mnemonic: &str, number: &str) -> Result<Option<&CatalogEntry>, CatalogError> {
        Ok(self
            .entries()?
            .iter()
            .find(|e| e.mnemonic.eq_ignore_ascii_case(mnemonic) && e.number == number))
    }
}

/// Classes picked for a schedule request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSelection {
    classes: Vec<CatalogEntry>,
}

impl ClassSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. Returns `Ok(false)` if it is already selected.
    pub fn add(&mut self, entry: CatalogEntry) -> Result<bool, CatalogError> {
        if self
            .classes
            .iter()
            .any(|c| c.mnemonic == entry.mnemonic && c.number == entry.number)
        {
            return Ok(false);
        }
        if self.classes.len() >= MAX_SELECTED_CLASSES {
            return Err(CatalogError::SelectionFull {
                max: MAX_SELECTED_CLASSES,
            });
        }
        self.classes.push(entry);
        Ok(true)
    }

    /// Removes the class at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CatalogEntry> {
        (index < self.classes.len()).then(|| self.classes.remove(index))
    }

    /// Selected classes in pick order.
    pub fn classes(&self) -> &[CatalogEntry] {
        &self.classes
    }

    /// Class codes (`"CS 2100"`) in pick order.
    pub fn codes(&self) -> Vec<String> {
        self.classes.iter().map(CatalogEntry::code).collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
