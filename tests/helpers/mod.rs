//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Code Legends client.
//! It includes a mock REST API server, fixtures, and test context setup.

#![allow(dead_code)]

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
