// src/lib.rs

//! canvas-sync Library
//!
//! Copies assignment deadlines from a Canvas calendar feed into a Notion
//! tasks database.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(feature = "lambda")]
pub mod lambda;
