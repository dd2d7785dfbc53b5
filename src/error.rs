//! Error types for the building viewer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a building descriptor.
///
/// Only unreadable files and text that is not JSON at all end up here;
/// missing or malformed values inside a descriptor are coerced instead.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Failed to read the descriptor file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not have the building shape.
    #[error("invalid building descriptor: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

/// Errors that can occur when exporting a projected scene.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

/// Errors raised while fetching a sensor reading.
///
/// These never leave the sensor board; the poller logs them and retries on
/// its next tick.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("request to '{api}' failed: {message}")]
    Request { api: String, message: String },

    #[error("response has no '{0}' property")]
    MissingProperty(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors in user supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewport '{0}', expected WIDTHxHEIGHT")]
    InvalidViewport(String),
}
