//! Shared test support: fixtures and the mock runner

pub mod fixtures;
pub mod mock_runner;
