//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_drivers;

pub use mock_drivers::{ImageBehavior, MockImageDriver, MockResponse, MockTextDriver};
