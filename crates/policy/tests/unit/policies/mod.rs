//! Policy tests.
//!
//! Each policy is exercised through `TestCache`, plus direct calls on crafted
//! sets where the test needs a specific line state.

/// Factory and boundary checks.
pub mod factory;
