//! Feature vector column layout
//!
//! The dense vector feeds a positionally indexed classifier, so its column
//! order is a versioned contract. Layout version 1, sections in order,
//! bracketed ones only when enabled:
//!
//! | # | columns | width |
//! |---|---------|-------|
//! | 1 | `has_connective` | 1 |
//! | 2 | `W2V_A1_<i>` | primary dim |
//! | 3 | `DEPS_A1_<i>` [second space] | second dim |
//! | 4 | `W2V_CON_<i>` [connective features] | primary dim |
//! | 5 | `DEPS_CON_<i>` [connective features + second space] | second dim |
//! | 6 | `W2V_A2_<i>` | primary dim |
//! | 7 | `DEPS_A2_<i>` [second space] | second dim |
//! | 8 | `sim_arg1arg2` | 1 |
//! | 9 | `<prefix>max_sim_aligned`, `<prefix>max_sim_avg_top<k>` | 1 + k values |
//! | 10 | `<prefix>sim_pos_arg1_<L1>_arg2_<L2>` | one per axis |
//! | 11 | `A1A2_CONNSIMS_<i>` [candidates] | one per candidate |
//!
//! Sparse maps use exactly these names as keys.

use serde::Serialize;

pub const LAYOUT_VERSION: u32 = 1;

pub const HAS_CONNECTIVE: &str = "has_connective";
pub const PRIMARY_ARG1: &str = "W2V_A1_";
pub const SECOND_ARG1: &str = "DEPS_A1_";
pub const PRIMARY_CONNECTIVE: &str = "W2V_CON_";
pub const SECOND_CONNECTIVE: &str = "DEPS_CON_";
pub const PRIMARY_ARG2: &str = "W2V_A2_";
pub const SECOND_ARG2: &str = "DEPS_A2_";
pub const ARG1_ARG2_DISTANCE: &str = "sim_arg1arg2";
pub const CONNECTIVE_CANDIDATE: &str = "A1A2_CONNSIMS_";

/// Column names of one assembler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    pub version: u32,
    pub columns: Vec<String>,
}

impl FeatureLayout {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

pub(crate) fn vector_columns(prefix: &str, dim: usize) -> impl Iterator<Item = String> + '_ {
    (0..dim).map(move |i| format!("{prefix}{i}"))
}
