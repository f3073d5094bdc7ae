#![allow(dead_code)]

pub mod actions;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use setup::{sample_event, TestApp, TestAppBuilder, ADMIN_PASSWORD};
