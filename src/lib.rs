// src/lib.rs

//! AI/ML job listing aggregator library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod sources;
pub mod storage;
pub mod utils;
