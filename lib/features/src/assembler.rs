//! Relation record feature assembly
//!
//! One [`FeatureAssembler`] serves every configuration: single or dual
//! embedding space, with or without connective features, dense-only or
//! dense plus sparse output. Build it once, then call
//! [`extract`](FeatureAssembler::extract) per record; it holds no mutable
//! state and can be shared across threads.

use crate::layout::{
    vector_columns, FeatureLayout, ARG1_ARG2_DISTANCE, CONNECTIVE_CANDIDATE, HAS_CONNECTIVE,
    LAYOUT_VERSION, PRIMARY_ARG1, PRIMARY_ARG2, PRIMARY_CONNECTIVE, SECOND_ARG1, SECOND_ARG2,
    SECOND_CONNECTIVE,
};
use crate::options::AssemblerOptions;
use crate::sanitize::{sanitize_block, sanitize_sparse};
use discsim_core::token::words_of;
use discsim_core::vocab::project_words;
use discsim_core::{
    EmbeddingSpace, Error, RecordSchema, RelationRecord, ResolvedRelation, Result, TokenResolver,
};
use discsim_similarity::{
    AlignmentMetrics, AlignmentSimilarityEngine, AxisSimilarityEngine, FeatureBlock,
    SparseFeatureMap,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Features of one relation record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFeatures {
    pub dense: Vec<f32>,
    /// Present when `emit_sparse_features` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparse: Option<SparseFeatureMap>,
}

pub struct FeatureAssembler<'a> {
    primary: &'a dyn EmbeddingSpace,
    secondary: Option<&'a dyn EmbeddingSpace>,
    schema: RecordSchema,
    options: AssemblerOptions,
    axis_engine: AxisSimilarityEngine,
    alignment_engine: AlignmentSimilarityEngine,
}

impl fmt::Debug for FeatureAssembler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureAssembler")
            .field("primary_dim", &self.primary.dim())
            .field("secondary_dim", &self.secondary.map(|s| s.dim()))
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> FeatureAssembler<'a> {
    pub fn builder(primary: &'a dyn EmbeddingSpace) -> AssemblerBuilder<'a> {
        AssemblerBuilder::new(primary)
    }

    /// Assembler with default options over a single space
    pub fn new(primary: &'a dyn EmbeddingSpace) -> Result<Self> {
        Self::builder(primary).build()
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Width of the dense vector
    pub fn width(&self) -> usize {
        let primary = self.primary.dim();
        let secondary = self.secondary.map_or(0, |s| s.dim());
        let per_span = primary + secondary;
        let spans = if self.options.include_connective_features { 3 } else { 2 };

        1 + spans * per_span
            + 1
            + self.alignment_engine.len()
            + self.axis_engine.len()
            + self.options.candidate_count()
    }

    /// Column names for this configuration
    pub fn layout(&self) -> FeatureLayout {
        let primary = self.primary.dim();
        let secondary = self.secondary.map(|s| s.dim());

        let mut columns = Vec::with_capacity(self.width());
        columns.push(HAS_CONNECTIVE.to_string());
        columns.extend(vector_columns(PRIMARY_ARG1, primary));
        if let Some(dim) = secondary {
            columns.extend(vector_columns(SECOND_ARG1, dim));
        }
        if self.options.include_connective_features {
            columns.extend(vector_columns(PRIMARY_CONNECTIVE, primary));
            if let Some(dim) = secondary {
                columns.extend(vector_columns(SECOND_CONNECTIVE, dim));
            }
        }
        columns.extend(vector_columns(PRIMARY_ARG2, primary));
        if let Some(dim) = secondary {
            columns.extend(vector_columns(SECOND_ARG2, dim));
        }
        columns.push(ARG1_ARG2_DISTANCE.to_string());
        columns.extend(self.alignment_engine.feature_names());
        columns.extend(self.axis_engine.feature_names());
        columns.extend(vector_columns(CONNECTIVE_CANDIDATE, self.options.candidate_count()));

        FeatureLayout {
            version: LAYOUT_VERSION,
            columns,
        }
    }

    /// Resolve `record` against `resolver` and assemble its features.
    ///
    /// Fails only when the record does not resolve; the whole record is
    /// rejected, never a partial vector.
    pub fn extract<R>(&self, record: &RelationRecord, resolver: &R) -> Result<RecordFeatures>
    where
        R: TokenResolver + ?Sized,
    {
        let resolved = record.resolve(resolver)?;
        let features = self.assemble(&resolved);
        debug!(
            doc_id = %record.doc_id,
            arg1 = resolved.arg1.len(),
            arg2 = resolved.arg2.len(),
            connective = resolved.connective.len(),
            columns = features.dense.len(),
            "extracted record features"
        );
        Ok(features)
    }

    /// Read a record laid out per the assembler's schema, then [`extract`](Self::extract) it
    pub fn extract_value<R>(&self, record: &Value, resolver: &R) -> Result<RecordFeatures>
    where
        R: TokenResolver + ?Sized,
    {
        let record = RelationRecord::from_value(record, &self.schema)?;
        self.extract(&record, resolver)
    }

    /// Dense vector only
    pub fn extract_dense<R>(&self, record: &RelationRecord, resolver: &R) -> Result<Vec<f32>>
    where
        R: TokenResolver + ?Sized,
    {
        let resolved = record.resolve(resolver)?;
        Ok(self.assemble_block(&resolved).into_values())
    }

    /// Assemble features for arguments that are already resolved
    pub fn assemble(&self, resolved: &ResolvedRelation) -> RecordFeatures {
        let block = self.assemble_block(resolved);

        let sparse = if self.options.emit_sparse_features {
            let mut sparse = block.to_sparse();
            sanitize_sparse(&mut sparse);
            Some(sparse)
        } else {
            None
        };

        RecordFeatures {
            dense: block.into_values(),
            sparse,
        }
    }

    fn assemble_block(&self, resolved: &ResolvedRelation) -> FeatureBlock {
        let arg1_words = words_of(&resolved.arg1);
        let arg2_words = words_of(&resolved.arg2);
        let connective_words = words_of(&resolved.connective);

        let mut block = FeatureBlock::with_capacity(self.width());
        let has_connective = if resolved.connective.is_empty() { 0.0 } else { 1.0 };
        block.push(HAS_CONNECTIVE, has_connective);

        let arg1_vector = self.primary.average_vector(&arg1_words);
        let arg2_vector = self.primary.average_vector(&arg2_words);

        block.push_vector(PRIMARY_ARG1, arg1_vector.as_slice());
        if let Some(second) = self.secondary {
            block.push_vector(SECOND_ARG1, second.average_vector(&arg1_words).as_slice());
        }

        if self.options.include_connective_features {
            block.push_vector(
                PRIMARY_CONNECTIVE,
                self.primary.average_vector(&connective_words).as_slice(),
            );
            if let Some(second) = self.secondary {
                block.push_vector(
                    SECOND_CONNECTIVE,
                    second.average_vector(&connective_words).as_slice(),
                );
            }
        }

        block.push_vector(PRIMARY_ARG2, arg2_vector.as_slice());
        if let Some(second) = self.secondary {
            block.push_vector(SECOND_ARG2, second.average_vector(&arg2_words).as_slice());
        }

        let known_arg1 = project_words(&arg1_words, self.primary);
        let known_arg2 = project_words(&arg2_words, self.primary);

        let distance = if known_arg1.is_empty() || known_arg2.is_empty() {
            0.0
        } else {
            arg1_vector.cosine_distance(&arg2_vector)
        };
        block.push(ARG1_ARG2_DISTANCE, distance);

        block.append(
            self.alignment_engine
                .compute(&known_arg1, &known_arg2, self.primary),
        );
        block.append(
            self.axis_engine
                .compute(&resolved.arg1, &resolved.arg2, self.primary),
        );

        if let Some(candidates) = &self.options.connective_candidates {
            let midpoint = arg1_vector.midpoint(&arg2_vector);
            for (i, candidate) in candidates.iter().enumerate() {
                block.push(
                    format!("{CONNECTIVE_CANDIDATE}{i}"),
                    midpoint.cosine_similarity(candidate),
                );
            }
        }

        let replaced = sanitize_block(&mut block);
        if replaced > 0 {
            warn!(replaced, "replaced indeterminate feature values with 0.0");
        }

        block
    }
}

/// Builder for [`FeatureAssembler`]
pub struct AssemblerBuilder<'a> {
    primary: &'a dyn EmbeddingSpace,
    secondary: Option<&'a dyn EmbeddingSpace>,
    schema: RecordSchema,
    options: AssemblerOptions,
    metrics: Option<Arc<dyn AlignmentMetrics>>,
}

impl<'a> AssemblerBuilder<'a> {
    pub fn new(primary: &'a dyn EmbeddingSpace) -> Self {
        Self {
            primary,
            secondary: None,
            schema: RecordSchema::default(),
            options: AssemblerOptions::default(),
            metrics: None,
        }
    }

    /// Second embedding space; only consulted when the options ask for it
    pub fn secondary(mut self, space: &'a dyn EmbeddingSpace) -> Self {
        self.secondary = Some(space);
        self
    }

    pub fn schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn options(mut self, options: AssemblerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default alignment metric definitions
    pub fn alignment_metrics(mut self, metrics: Arc<dyn AlignmentMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Result<FeatureAssembler<'a>> {
        self.schema.validate()?;
        self.options.validate()?;

        let secondary = if self.options.use_second_embedding_space {
            Some(self.secondary.ok_or_else(|| {
                Error::InvalidConfig("second embedding space requested but not supplied".into())
            })?)
        } else {
            None
        };

        if let Some(candidates) = &self.options.connective_candidates {
            let expected = self.primary.dim();
            if let Some(bad) = candidates.iter().find(|c| c.dim() != expected) {
                return Err(Error::InvalidDimension {
                    expected,
                    actual: bad.dim(),
                });
            }
        }

        let prefix = self.options.feature_prefix.clone();
        let axis_engine =
            AxisSimilarityEngine::from_profile(&self.options.axis_profile)?.with_prefix(prefix.clone());
        let mut alignment_engine =
            AlignmentSimilarityEngine::new(self.options.alignment_k_values.clone())?.with_prefix(prefix);
        if let Some(metrics) = self.metrics {
            alignment_engine = alignment_engine.with_metrics(metrics);
        }

        Ok(FeatureAssembler {
            primary: self.primary,
            secondary,
            schema: self.schema,
            options: self.options,
            axis_engine,
            alignment_engine,
        })
    }
}
