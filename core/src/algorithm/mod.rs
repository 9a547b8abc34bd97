//! Algorithm framework
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod traits;

pub use self::graph::*;
pub use self::traits::*;
