//! Keyword catalog loading.
//!
//! The catalog is split across two files:
//!
//! - a YAML document listing phrases per group:
//!
//!   ```yaml
//!   scam_keywords:
//!     urgency: ["act now", "limited time"]
//!     crypto: ["pump and dump", "bitcoin"]
//!   ```
//!
//! - a JSON object giving each group a weight: `{ "urgency": 0.2, "crypto": 0.3 }`.
//!
//! Groups keep the order they are listed in, so a phrase repeated across
//! groups ends up with the weight of the group listed last.
//!
//! Every phrase is normalized with the same [`TextNormalizer`] that is later
//! applied to scanned text, and carries its group's weight into the automaton.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, File, FileFormat, Value, ValueKind};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::keywords::KeywordsConfig;
use crate::data_structures::aho_corasick::{PatternTrie, Result as AutomatonResult};
use crate::error::keywords::KeywordError;
use crate::text::TextNormalizer;

/// Result type for keyword catalog operations.
pub type KeywordResult<T> = Result<T, KeywordError>;

/// Group name to phrases, in the order the keyword groups file lists them.
pub type KeywordGroups = IndexMap<String, Vec<String>>;

/// Group name to weight, as found in the weights file.
pub type GroupWeights = BTreeMap<String, f64>;

// Phrases stay raw values so scalars like `100` or `true` are rejected
// instead of being coerced to strings.
#[derive(Debug, Deserialize)]
struct KeywordGroupsFile {
    scam_keywords: IndexMap<String, Vec<Value>>,
}

/// Normalized phrases with their weights, ready to build an automaton from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordCatalog {
    entries: Vec<(String, f64)>,
}

impl KeywordCatalog {
    /// Loads and normalizes the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`KeywordError`] if either file is missing, unreadable or malformed.
    pub fn load(config: &KeywordsConfig, normalizer: &dyn TextNormalizer) -> KeywordResult<Self> {
        let weights = load_group_weights(&config.weights_path)?;
        let groups = load_keyword_groups(&config.keywords_path)?;
        let catalog = Self::from_groups(&groups, &weights, config.default_weight, normalizer);

        tracing::debug!(
            groups = groups.len(),
            phrases = catalog.len(),
            "Keyword catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from already parsed groups and weights.
    ///
    /// Groups and phrases are visited in listed order. Group
    /// names are matched against weights case-insensitively; a group without
    /// a weight uses `default_weight`. Phrases that normalize to nothing are
    /// skipped.
    pub fn from_groups(
        groups: &KeywordGroups,
        weights: &GroupWeights,
        default_weight: f64,
        normalizer: &dyn TextNormalizer,
    ) -> Self {
        let weights: BTreeMap<String, f64> = weights
            .iter()
            .map(|(group, &weight)| (group.to_lowercase(), weight))
            .collect();

        let mut entries = Vec::new();
        for (group, phrases) in groups {
            let weight = match weights.get(&group.to_lowercase()) {
                Some(&weight) => weight,
                None => {
                    tracing::debug!(group = %group, default_weight, "Group has no weight, using default");
                    default_weight
                }
            };

            for phrase in phrases {
                let normalized = normalizer.normalize(phrase);
                if normalized.is_empty() {
                    tracing::warn!(group = %group, phrase = %phrase, "Skipping phrase that normalizes to nothing");
                    continue;
                }
                entries.push((normalized, weight));
            }
        }

        Self { entries }
    }

    /// Normalized phrases and weights in catalog order. May contain repeats;
    /// the automaton keeps the last weight for a repeated phrase.
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// Number of entries, counting repeats.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Constructs the automaton trie for this catalog.
    pub fn build_trie(&self) -> AutomatonResult<PatternTrie<f64>> {
        PatternTrie::construct(
            self.entries
                .iter()
                .map(|(phrase, weight)| (phrase.as_str(), *weight)),
        )
    }
}

/// Reads the JSON group weights file.
///
/// # Errors
///
/// Fails if the file is missing, unreadable, not a JSON object of numbers,
/// or contains a negative or non-finite weight.
pub fn load_group_weights(path: &Path) -> KeywordResult<GroupWeights> {
    if !path.exists() {
        return Err(KeywordError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| KeywordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let weights: GroupWeights =
        serde_json::from_str(&content).map_err(|source| KeywordError::InvalidWeights {
            path: path.to_path_buf(),
            source,
        })?;

    for (group, &weight) in &weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(KeywordError::InvalidWeight {
                group: group.clone(),
                weight,
            });
        }
    }

    Ok(weights)
}

/// Reads the YAML keyword groups file.
///
/// # Errors
///
/// Fails if the file is missing or does not contain a `scam_keywords`
/// mapping of group names to lists of string phrases.
pub fn load_keyword_groups(path: &Path) -> KeywordResult<KeywordGroups> {
    if !path.exists() {
        return Err(KeywordError::FileNotFound(path.to_path_buf()));
    }

    let invalid = |message: String| KeywordError::InvalidGroups {
        path: path.to_path_buf(),
        message,
    };

    let file: KeywordGroupsFile = Config::builder()
        .add_source(File::from(path).format(FileFormat::Yaml))
        .build()
        .map_err(|e| invalid(e.to_string()))?
        .try_deserialize()
        .map_err(|e| invalid(e.to_string()))?;

    file.scam_keywords
        .into_iter()
        .map(|(group, values)| {
            let phrases = values
                .into_iter()
                .map(|value| match value.kind {
                    ValueKind::String(phrase) => Ok(phrase),
                    other => Err(invalid(format!(
                        "phrase `{other}` in group '{group}' is not a string"
                    ))),
                })
                .collect::<KeywordResult<Vec<_>>>()?;
            Ok((group, phrases))
        })
        .collect()
}
