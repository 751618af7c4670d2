// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::Config;
pub use crate::core::engine::DictionaryService;
pub use crate::core::types::Word;
pub use crate::error::{DictError, Result};
