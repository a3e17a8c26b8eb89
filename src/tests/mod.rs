//! Test modules for Kilo Scan.
//!
//! This module contains the cross-component test suites:
//! - Configuration loading and validation
//! - Error types and global error reporting
//! - Detector construction from on-disk catalogs and cached automatons
//! - Shared fixtures and proptest strategies

pub mod config_tests;
pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, keyword_strategy, TestFixture};
