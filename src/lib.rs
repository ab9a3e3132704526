//! Terminal viewer for encoded source metrics reports.
//!
//! A report arrives as base64 text wrapping a gzip-compressed JSON document.
//! [`loader`] turns it into a [`model::Dataset`]; the remaining modules derive
//! everything the explorer and the summary command show from that dataset.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod loader;
pub mod model;
pub mod nav;
pub mod prefs;
pub mod signature;
pub mod sort;
pub mod summary;
pub mod tables;
pub mod tree;
pub mod tui;

pub use error::DecodeError;
pub use loader::{load, load_with, LoaderOptions};
pub use model::Dataset;
