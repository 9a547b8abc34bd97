//! Flow invariant checks and exhaustive oracles
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod correctness;

pub use self::correctness::{brute_force_min_cut, check_invariants, BRUTE_FORCE_VERTEX_LIMIT};
