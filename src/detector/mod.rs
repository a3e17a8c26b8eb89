//! Scam keyword detection.
//!
//! The [`Detector`] ties the pieces of the scanner together: text is
//! normalized, streamed through the keyword automaton, and the weights of all
//! matches are aggregated into a bounded score.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::config::scan::ScanConfig;
use crate::config::KiloConfig;
use crate::data_structures::aho_corasick::{AutomatonSearcher, PatternTrie};
use crate::error::scan::ScanError;
use crate::error::KiloResult;
use crate::keywords::KeywordCatalog;
use crate::persistence::AutomatonStore;
use crate::scoring::ScoreAggregator;
use crate::text::{SimpleNormalizer, TextNormalizer};

/// One keyword occurrence. Positions are inclusive character indices into
/// the normalized text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordHit {
    /// The matched (normalized) keyword
    pub keyword: String,
    /// Weight of the keyword's group
    pub weight: f64,
    /// Index of the first matched character
    pub start: usize,
    /// Index of the last matched character
    pub end: usize,
}

/// Result of scanning one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    /// Every keyword occurrence, ordered by end position
    pub hits: Vec<KeywordHit>,
    /// Rounded sum of all hit weights
    pub total: f64,
    /// `total` clamped to the configured maximum
    pub score: f64,
}

/// Result of scanning one file.
#[derive(Debug)]
pub struct FileReport {
    /// The scanned file
    pub path: PathBuf,
    /// The scan report, or why the file could not be scanned
    pub result: Result<ScanReport, ScanError>,
}

/// Keyword-based scam detector.
///
/// Cloning is cheap and clones share the automaton.
#[derive(Clone)]
pub struct Detector {
    searcher: AutomatonSearcher<f64>,
    normalizer: Arc<dyn TextNormalizer>,
    aggregator: ScoreAggregator,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("patterns", &self.searcher.trie().pattern_count())
            .field("aggregator", &self.aggregator)
            .finish()
    }
}

impl Detector {
    /// Wires a detector from its parts.
    pub fn new(
        searcher: AutomatonSearcher<f64>,
        normalizer: Arc<dyn TextNormalizer>,
        aggregator: ScoreAggregator,
    ) -> Self {
        Self {
            searcher,
            normalizer,
            aggregator,
        }
    }

    /// Builds a detector from configuration.
    ///
    /// The automaton is read from `automaton.cache_path` when that file exists
    /// and `automaton.rebuild` is off. Otherwise it is constructed from the
    /// keyword catalog and, if a cache path is configured, written there.
    ///
    /// # Errors
    ///
    /// Fails if the keyword catalog cannot be loaded, contains an invalid
    /// phrase, or the constructed automaton cannot be saved.
    pub fn from_config(config: &KiloConfig) -> KiloResult<Self> {
        let normalizer: Arc<dyn TextNormalizer> = Arc::new(SimpleNormalizer::new());
        let trie = load_or_build_automaton(config, normalizer.as_ref())?;

        Ok(Self::new(
            AutomatonSearcher::new(trie),
            normalizer,
            ScoreAggregator::from_config(&config.scoring),
        ))
    }

    /// The underlying searcher.
    pub fn searcher(&self) -> &AutomatonSearcher<f64> {
        &self.searcher
    }

    /// Rounded sum of the weights of every keyword occurrence in `text`.
    /// Not clamped.
    pub fn check_keywords(&self, text: &str) -> f64 {
        let start = Instant::now();
        let normalized = self.normalizer.normalize(text);
        let total = self
            .aggregator
            .total(self.searcher.search(&normalized).map(|m| *m.payload));

        tracing::debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            total,
            "Keyword check finished"
        );
        total
    }

    /// Scam likelihood of `text`, clamped to the configured maximum.
    pub fn calculate_score(&self, text: &str) -> f64 {
        self.aggregator.clamp(self.check_keywords(text))
    }

    /// Scans `text` and reports every hit along with the total and score.
    pub fn scan(&self, text: &str) -> ScanReport {
        let normalized = self.normalizer.normalize(text);
        let hits: Vec<KeywordHit> = self
            .searcher
            .search(&normalized)
            .map(|m| KeywordHit {
                keyword: m.keyword.to_string(),
                weight: *m.payload,
                start: m.start,
                end: m.end,
            })
            .collect();

        let total = self.aggregator.total(hits.iter().map(|hit| hit.weight));
        let score = self.aggregator.clamp(total);

        tracing::debug!(hits = hits.len(), total, score, "Text scanned");
        ScanReport { hits, total, score }
    }

    /// Scans files concurrently.
    ///
    /// At most `limits.max_concurrency` files are in flight at once. Reports
    /// come back in the order of `paths`; a file that cannot be scanned gets
    /// an error report and does not affect the others.
    pub async fn scan_files(&self, paths: Vec<PathBuf>, limits: &ScanConfig) -> Vec<FileReport> {
        let max_size = limits.max_file_size_bytes;

        stream::iter(paths)
            .map(|path| {
                let detector = self.clone();
                async move {
                    let result = detector.scan_file(&path, max_size).await;
                    if let Err(e) = &result {
                        tracing::warn!(path = %path.display(), error = %e, "File not scanned");
                    }
                    FileReport { path, result }
                }
            })
            .buffered(limits.max_concurrency.max(1))
            .collect()
            .await
    }

    async fn scan_file(self, path: &Path, max_size: u64) -> Result<ScanReport, ScanError> {
        let io_error = |source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = tokio::fs::metadata(path).await.map_err(io_error)?.len();
        if size > max_size {
            return Err(ScanError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_size,
            });
        }

        let text = tokio::fs::read_to_string(path).await.map_err(io_error)?;
        tokio::task::spawn_blocking(move || self.scan(&text))
            .await
            .map_err(|e| ScanError::TaskFailed(e.to_string()))
    }
}

/// Loads the cached automaton or constructs a fresh one from the keyword catalog.
///
/// An unreadable or invalid cache is logged and replaced.
pub fn load_or_build_automaton(
    config: &KiloConfig,
    normalizer: &dyn TextNormalizer,
) -> KiloResult<PatternTrie<f64>> {
    let cache_path = config.automaton.cache_path.as_deref();

    if let Some(path) = cache_path.filter(|p| p.exists() && !config.automaton.rebuild) {
        let start = Instant::now();
        match AutomatonStore::load(path) {
            Ok(trie) => {
                tracing::debug!(
                    path = %path.display(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Automaton loaded from cache"
                );
                return Ok(trie);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cached automaton unusable, rebuilding");
            }
        }
    }

    build_automaton(config, normalizer, cache_path)
}

/// Constructs the automaton from the keyword catalog and saves it to `output`
/// when given.
pub fn build_automaton(
    config: &KiloConfig,
    normalizer: &dyn TextNormalizer,
    output: Option<&Path>,
) -> KiloResult<PatternTrie<f64>> {
    let start = Instant::now();
    let catalog = KeywordCatalog::load(&config.keywords, normalizer)?;
    let trie = catalog.build_trie()?;

    tracing::debug!(
        patterns = trie.pattern_count(),
        nodes = trie.node_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Automaton constructed"
    );

    if let Some(path) = output {
        AutomatonStore::save(path, &trie)?;
    }
    Ok(trie)
}
