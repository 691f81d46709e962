//! Filesystem helpers for aiphelper
//!
//! Provides the well-known locations of the files the tool maintains,
//! safe text I/O with atomic replacement, and format-agnostic loading of
//! the optional settings file.

pub mod config;
pub mod error;
pub mod io;
pub mod paths;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{CACHE_FILE_MODE, MANAGED_FILE_MODE};
pub use paths::{HOME_ENV, HomeLayout, ManagedFile, default_settings_file};
