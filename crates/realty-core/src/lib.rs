//! Realty Core - Domain models, configuration, and port definitions
//!
//! This crate contains the shared domain types of the proximity feature engine,
//! the error type used by every library crate, and the traits that external
//! collaborators (geocoder, trained model, prediction sink) implement.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{RealtyError, Result};
