//! Main module for litlog library functionality

pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod testing;
pub mod value;
