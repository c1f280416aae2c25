//! Integration tests for Catalog Walker

mod walk_tests;
