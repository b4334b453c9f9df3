//! # dupescout Library
//!
//! Near-duplicate detection over image and video-clip embeddings.
//! Turns radius-search results into connected components and collapses
//! them into per-file-pair duplicate records with clip-level evidence.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod index;
pub mod processing;
pub mod storage;
pub mod ui;
