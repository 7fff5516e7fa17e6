//! Assembler configuration
//!
//! [`AssemblerOptions`] selects which feature sections are produced; the
//! resulting column order is documented in [`crate::layout`]. Every field
//! has a default, so a partial JSON document is a valid configuration.

use discsim_core::{RecordSchema, Result, Vector};
use discsim_similarity::alignment::validate_k_values;
use discsim_similarity::{AxisProfile, DEFAULT_K_VALUES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerOptions {
    /// Add averaged vectors from a second space (e.g. dependency-based embeddings)
    pub use_second_embedding_space: bool,
    /// Add the averaged connective vector(s)
    pub include_connective_features: bool,
    /// Compare the Arg1/Arg2 midpoint against each candidate, in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connective_candidates: Option<Vec<Vector>>,
    /// Also return the named sparse map
    pub emit_sparse_features: bool,
    /// k values of the top-k alignment metric, ascending
    pub alignment_k_values: Vec<usize>,
    pub axis_profile: AxisProfile,
    /// Prefix for alignment and POS-axis feature names
    pub feature_prefix: String,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            use_second_embedding_space: false,
            include_connective_features: true,
            connective_candidates: None,
            emit_sparse_features: false,
            alignment_k_values: DEFAULT_K_VALUES.to_vec(),
            axis_profile: AxisProfile::default(),
            feature_prefix: String::new(),
        }
    }
}

impl AssemblerOptions {
    pub fn validate(&self) -> Result<()> {
        validate_k_values(&self.alignment_k_values)?;
        self.axis_profile.validate()?;
        Ok(())
    }

    pub fn candidate_count(&self) -> usize {
        self.connective_candidates.as_ref().map_or(0, Vec::len)
    }
}

/// Options plus record schema, as loaded from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub schema: RecordSchema,
    pub options: AssemblerOptions,
}

impl FeatureConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FeatureConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()?;
        self.options.validate()
    }
}
