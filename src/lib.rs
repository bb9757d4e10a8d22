//! Code Complexity Analyzer (CCA) Library
//!
//! A Rust library for AI-powered complexity analysis of source code via
//! the Gemini generative-language API.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod extract;
pub mod gemini;
pub mod parser;
pub mod prompt;

pub use analysis::{AnalysisRecord, AnalysisRequest, TaskKind, NOT_SPECIFIED};
pub use config::Config;
pub use extract::{extract_text, ExtractError};
pub use gemini::GeminiClient;
pub use parser::{parse_complexity_analysis, parse_optimization_suggestions};
