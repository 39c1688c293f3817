//! Unit tests for the replacement building blocks.
