// src/lib.rs

pub mod charts;
pub mod cli;
pub mod data_generator;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod metrics;
pub mod observation;
pub mod physics;
pub mod presentation;
pub mod report;
pub mod scenario;
pub mod summary;

pub use error::{AnalysisError, Result};
