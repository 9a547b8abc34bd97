//! Execution of independent max-flow queries
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod batch;

pub use self::batch::solve_batch;
