//! # Duelsmith
//!
//! A library to render Yu-Gi-Oh! style trading card images from structured
//! card descriptions.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod data;
pub mod decode;
pub mod error;
pub mod image;
pub mod layer;
pub mod logs;
pub mod pipeline;
pub mod preview;
pub mod text;

pub use error::{Error, Result};
