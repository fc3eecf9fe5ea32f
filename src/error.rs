//! Common error types.

use std::fmt;
use std::path::Path;

/// A shortcut type equivalent to `Result<T, duelsmith::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
#[derive(Debug)]
pub enum Error {
    CardOpen(String, String),
    CardParse(String, String),
    ConfigOpen(String, String),
    ConfigParse(String, String),
    FontLoad(String),
    InvalidCString(String),
    NoEnvVariable(&'static str),
    VipsError(String),
    CairoError(String),
    ImageConversion(&'static str, &'static str),
    ImageCacheMiss(String),
}

impl Error {
    pub fn card_open(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::CardOpen(path.as_ref().display().to_string(), e.to_string())
    }

    pub fn card_parse(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::CardParse(path.as_ref().display().to_string(), e.to_string())
    }

    pub fn config_open(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::ConfigOpen(path.as_ref().display().to_string(), e.to_string())
    }

    pub fn config_parse(path: impl AsRef<Path>, e: impl fmt::Display) -> Self {
        Self::ConfigParse(path.as_ref().display().to_string(), e.to_string())
    }

    pub fn font_load(key: impl Into<String>) -> Self {
        Self::FontLoad(key.into())
    }

    pub fn invalid_c_string(s: impl Into<String>) -> Self {
        Self::InvalidCString(s.into())
    }

    pub fn no_env_variable(name: &'static str) -> Self {
        Self::NoEnvVariable(name)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CardOpen(p, e) => write!(f, "failed to open card description `{p}`: {e}"),
            Error::CardParse(p, e) => write!(f, "failed to parse card description `{p}`: {e}"),
            Error::ConfigOpen(p, e) => write!(f, "failed to open configuration `{p}`: {e}"),
            Error::ConfigParse(p, e) => write!(f, "failed to parse configuration `{p}`: {e}"),
            Error::FontLoad(k) => write!(f, "failed to load font `{k}`"),
            Error::InvalidCString(s) => write!(f, "invalid C string `{s}`"),
            Error::NoEnvVariable(v) => write!(f, "missing environment variable: {v}"),
            Error::VipsError(e) => write!(f, "libvips error: {e}"),
            Error::CairoError(e) => write!(f, "cairo error: {e}"),
            Error::ImageConversion(from, to) => {
                write!(f, "failed to convert image from {from} to {to}")
            }
            Error::ImageCacheMiss(k) => write!(f, "image `{k}` was never cached"),
        }
    }
}
