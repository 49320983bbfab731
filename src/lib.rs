//! Huecards - dominant-color image cards
//!
//! Image upload server that tags every image with its dominant color.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
