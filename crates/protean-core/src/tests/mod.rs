//! Unit tests for `protean_core` types.

mod type_key_tests;
mod types_tests;
mod value_tests;
