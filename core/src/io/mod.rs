//! Textual input parsing and result rendering
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parser;
pub mod report;

pub use self::parser::ProblemInstance;
pub use self::report::{render_json, render_text};
