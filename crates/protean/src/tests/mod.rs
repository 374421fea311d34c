//! Unit and behaviour tests for the `protean` facade.

mod config_tests;
mod telemetry_tests;
