// src/core/mod.rs

pub mod char_index;
pub mod dictionary;
pub mod encoder;
pub mod engine;
pub mod types;
