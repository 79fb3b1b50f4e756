//! # Export Usage Chart
//!
//! Turns a ChatGPT data-export archive into a stacked bar chart of
//! approximate token usage by conversational role.
//!
//! ## Overview
//!
//! The whole tool is one linear pipeline:
//! - Extract `conversations.json` from the export ZIP
//! - Parse the conversation log into flat message records
//! - Estimate tokens per message with a characters-per-token heuristic
//! - Aggregate token counts by time bucket and role
//! - Render the table as an SVG chart or directly in the terminal
//!
//! Token counts are approximations (`ceil(chars / K)`), not a real
//! tokenizer; they are good enough to see where usage went.

/// Time-bucketed, role-stacked token aggregation
pub mod aggregate;

/// ZIP extraction of the conversation log
pub mod archive;

/// Stacked bar chart rendering to SVG
pub mod chart;

/// Command-line argument parsing and configuration
pub mod cli;

/// Terminal rendering of the aggregated table
pub mod display;

/// Typed errors for archive extraction and export parsing
pub mod error;

/// Characters-per-token usage estimation
pub mod estimate;

/// Logging setup (stderr plus optional plain-text log file)
pub mod logging;

/// Data models for the export schema and flattened message records
pub mod models;

/// Conversation log parsing into message records
pub mod parser;

/// End-to-end pipeline orchestration
pub mod pipeline;
