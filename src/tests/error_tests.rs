//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::aho_corasick::AhoCorasickError;
use crate::error::{
    config::ConfigError, get_error_reporting, scan::ScanError, set_error_reporter,
    store::StoreError, ErrorContext, ErrorReporter, KiloError, KiloResult, TracingErrorReporter,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = KiloError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors keep their source message.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let kilo_error = KiloError::Io(io_error);
    assert!(format!("{kilo_error}").contains("file not found"));

    let store_error = StoreError::InvalidAutomaton(AhoCorasickError::NotConstructed);
    let kilo_error = KiloError::from(store_error);
    let message = kilo_error.to_string();
    assert_eq!(
        message,
        "Automaton store error: Stored automaton is invalid: Automaton has not been constructed"
    );
}

/// Test that component errors convert with `?`.
#[test]
fn test_error_conversions() {
    fn config_failure() -> KiloResult<()> {
        Err(ConfigError::NotInitialized)?
    }
    fn automaton_failure() -> KiloResult<()> {
        Err(AhoCorasickError::EmptyPattern)?
    }
    fn scan_failure() -> KiloResult<()> {
        Err(ScanError::TaskFailed("cancelled".to_string()))?
    }

    assert!(matches!(config_failure(), Err(KiloError::Config(_))));
    assert!(matches!(
        automaton_failure(),
        Err(KiloError::Automaton(AhoCorasickError::EmptyPattern))
    ));
    assert!(matches!(scan_failure(), Err(KiloError::Scan(_))));
}

/// Test the scan error messages name the offending file.
#[test]
fn test_scan_error_display() {
    let error = ScanError::FileTooLarge {
        path: PathBuf::from("big.txt"),
        size: 20,
        limit: 10,
    };
    let message = error.to_string();
    assert!(message.contains("big.txt"));
    assert!(message.contains("20"));
    assert!(message.contains("10"));
}

/// Mock error reporter for testing.
#[derive(Debug)]
struct MockErrorReporter {
    reported_count: AtomicUsize,
}

impl MockErrorReporter {
    fn new() -> Self {
        Self {
            reported_count: AtomicUsize::new(0),
        }
    }

    fn reported_count(&self) -> usize {
        self.reported_count.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, _context: ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that the global error reporter works correctly.
///
/// Note: This test should be run in isolation because it modifies global state.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(MockErrorReporter::new());
    set_error_reporter(reporter.clone());

    let error = KiloError::Custom("test error".to_string());
    get_error_reporting().report(ErrorContext::new(error, "test_component"));

    assert!(reporter.reported_count() >= 1);
}

/// Test that the default tracing error reporter can be used without a subscriber.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let context = ErrorContext::new(KiloError::Custom("test error".to_string()), "test_component")
        .with_span_trace();

    // No ErrorLayer is installed, so no trace is attached
    assert!(context.trace.is_none());

    // Just make sure this doesn't panic
    reporter.report(context);
}
