//! Unit tests for answer-key generation

mod generator_tests;
