//! Unit tests for region extraction
