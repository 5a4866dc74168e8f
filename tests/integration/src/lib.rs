//! Integration test support
//!
//! Scenario tests drive the service layer end to end over real gateway
//! backends; nothing is mocked except an unreachable store where
//! degradation is under test.

pub mod fixtures;
pub mod helpers;

pub use helpers::TestApp;
