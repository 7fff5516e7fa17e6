//! POS-conditioned semantic similarity
//!
//! Each [`AxisSpec`] pairs a tag class for Arg1 with a tag class for Arg2.
//! For every axis, the in-vocabulary tokens of each side are filtered by
//! their class and the two word groups are compared through
//! [`EmbeddingSpace::group_similarity`]. An axis whose filtered group is
//! empty on either side scores exactly 0.0.
//!
//! Axis order defines column identity in the feature vector, so the tables
//! in [`AxisProfile`] must never be reordered once a classifier is trained
//! on them.

use crate::block::{FeatureBlock, SparseFeatureMap};
use ahash::AHashSet;
use discsim_core::vocab::project;
use discsim_core::{EmbeddingSpace, Error, Result, TagClass, TaggedToken};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One similarity axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub arg1: TagClass,
    pub arg2: TagClass,
    /// Overrides the `arg1_<L1>_arg2_<L2>` part of the feature name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AxisSpec {
    pub fn new(arg1: impl Into<TagClass>, arg2: impl Into<TagClass>) -> Self {
        Self {
            arg1: arg1.into(),
            arg2: arg2.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label suffix, e.g. `arg1_NN_arg2_ALL`
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("arg1_{}_arg2_{}", self.arg1.label(), self.arg2.label()),
        }
    }

    /// Sparse feature key, e.g. `sim_pos_arg1_NN_arg2_NN`
    pub fn feature_name(&self, prefix: &str) -> String {
        format!("{prefix}sim_pos_{}", self.label())
    }
}

/// Named axis tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "snake_case")]
pub enum AxisProfile {
    /// Six symmetric and six asymmetric axes, plus four modal axes when enabled
    Legacy {
        #[serde(default = "default_include_modal")]
        include_modal: bool,
    },
    /// Broader table including verb/noun crossings and tag unions
    Experimental,
    /// The two best-scoring axes from the experimental table
    Best,
    /// Caller-supplied table
    Custom { axes: Vec<AxisSpec> },
}

fn default_include_modal() -> bool {
    true
}

impl Default for AxisProfile {
    fn default() -> Self {
        AxisProfile::Legacy {
            include_modal: true,
        }
    }
}

const LEGACY_AXES: &[(&str, &str)] = &[
    ("NN", "NN"),
    ("J", "J"),
    ("VB", "VB"),
    ("RB", "RB"),
    ("DT", "DT"),
    ("PR", "PR"),
    ("NN", "J"),
    ("J", "NN"),
    ("RB", "VB"),
    ("VB", "RB"),
    ("PR", "NN"),
    ("NN", "PR"),
];

const MODAL_AXES: &[(&str, &str)] = &[("MD", "VB"), ("VB", "MD"), ("", "MD"), ("MD", "")];

const EXPERIMENTAL_AXES: &[(&str, &str)] = &[
    ("NN", "NN"),
    ("J", "J"),
    ("VB", "VB"),
    ("RB", "RB"),
    ("DT", "DT"),
    ("PR", "PR"),
    ("VB", "NN"),
    ("NN", "VB"),
    ("VB", "J"),
    ("J", "VB"),
    ("VB", "W"),
    ("W", "VB"),
    ("NN", "J"),
    ("J", "NN"),
    ("RB", "VB"),
    ("VB", "RB"),
    ("PR", "NN"),
    ("NN", "PR"),
    ("MD", "VB"),
    ("VB", "MD"),
    ("DT", "VB"),
];

const EXPERIMENTAL_UNIONS: &[&[&str]] = &[&["VB", "N", "J", "MD"], &["VB", "RB"], &["VB", "MD"]];

const BEST_AXES: &[(&str, &str)] = &[("MD", "VB"), ("RB", "RB")];

fn pairs(table: &'static [(&'static str, &'static str)]) -> impl Iterator<Item = AxisSpec> {
    table.iter().map(|(a, b)| AxisSpec::new(*a, *b))
}

impl AxisProfile {
    /// The ordered axis list this profile stands for
    pub fn axes(&self) -> Vec<AxisSpec> {
        match self {
            AxisProfile::Legacy { include_modal } => {
                let mut axes: Vec<AxisSpec> = pairs(LEGACY_AXES).collect();
                if *include_modal {
                    axes.extend(pairs(MODAL_AXES));
                }
                axes
            }
            AxisProfile::Experimental => pairs(EXPERIMENTAL_AXES)
                .chain(EXPERIMENTAL_UNIONS.iter().map(|union| {
                    AxisSpec::new(
                        TagClass::any_of(union.iter().copied()),
                        TagClass::any_of(union.iter().copied()),
                    )
                }))
                .collect(),
            AxisProfile::Best => pairs(BEST_AXES).collect(),
            AxisProfile::Custom { axes } => axes.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_axes(&self.axes())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: AxisProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Rejects axis lists whose feature names collide; the sparse map holds
/// one key per dense column.
pub fn validate_axes(axes: &[AxisSpec]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(axes.len());
    for axis in axes {
        let label = axis.label();
        if !seen.insert(label.clone()) {
            return Err(Error::InvalidConfig(format!("duplicate axis label '{label}'")));
        }
    }
    Ok(())
}

/// Computes one similarity per configured axis
#[derive(Debug, Clone)]
pub struct AxisSimilarityEngine {
    axes: Vec<AxisSpec>,
    prefix: String,
}

impl AxisSimilarityEngine {
    pub fn new(axes: Vec<AxisSpec>) -> Result<Self> {
        validate_axes(&axes)?;
        Ok(Self {
            axes,
            prefix: String::new(),
        })
    }

    pub fn from_profile(profile: &AxisProfile) -> Result<Self> {
        Self::new(profile.axes())
    }

    /// Prefix prepended to every feature name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn axes(&self) -> &[AxisSpec] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Feature names in column order
    pub fn feature_names(&self) -> Vec<String> {
        self.axes
            .iter()
            .map(|axis| axis.feature_name(&self.prefix))
            .collect()
    }

    /// Score every axis for the token sequences of Arg1 (`tokens_a`) and
    /// Arg2 (`tokens_b`). The result has exactly one column per axis.
    pub fn compute<S>(&self, tokens_a: &[TaggedToken], tokens_b: &[TaggedToken], space: &S) -> FeatureBlock
    where
        S: EmbeddingSpace + ?Sized,
    {
        // Projected once; every axis filters the same in-vocabulary tokens
        let known_a = project(tokens_a, space);
        let known_b = project(tokens_b, space);

        let mut block = FeatureBlock::with_capacity(self.axes.len());
        for axis in &self.axes {
            let words_a = select(&known_a, &axis.arg1);
            let words_b = select(&known_b, &axis.arg2);

            let similarity = if words_a.is_empty() || words_b.is_empty() {
                0.0
            } else {
                space.group_similarity(&words_a, &words_b)
            };

            trace!(
                axis = %axis.label(),
                arg1_words = words_a.len(),
                arg2_words = words_b.len(),
                similarity,
                "axis similarity"
            );
            block.push(axis.feature_name(&self.prefix), similarity);
        }
        block
    }
}

fn select<'a>(tokens: &[&'a TaggedToken], class: &TagClass) -> Vec<&'a str> {
    tokens
        .iter()
        .filter(|t| class.matches(&t.tag))
        .map(|t| t.word.as_str())
        .collect()
}

/// Ordered values plus the matching sparse map for `axes`.
///
/// Fails with [`Error::InvalidConfig`] when two axes share a feature name.
pub fn compute_axis_similarities<S>(
    tokens_a: &[TaggedToken],
    tokens_b: &[TaggedToken],
    space: &S,
    axes: &[AxisSpec],
) -> Result<(Vec<f32>, SparseFeatureMap)>
where
    S: EmbeddingSpace + ?Sized,
{
    let block = AxisSimilarityEngine::new(axes.to_vec())?.compute(tokens_a, tokens_b, space);
    let sparse = block.to_sparse();
    Ok((block.into_values(), sparse))
}
