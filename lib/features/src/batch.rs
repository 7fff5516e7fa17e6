//! Parallel extraction over many records
//!
//! Records are independent, so a batch fans out over the rayon pool.
//! Results come back in input order; a failing record yields its own
//! `Err` without affecting the others.

use crate::assembler::{FeatureAssembler, RecordFeatures};
use crate::raw::{extract_raw, RawTokens};
use discsim_core::{RelationRecord, Result, TokenResolver};
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

pub fn extract_batch<R>(
    assembler: &FeatureAssembler<'_>,
    records: &[RelationRecord],
    resolver: &R,
) -> Vec<Result<RecordFeatures>>
where
    R: TokenResolver + ?Sized,
{
    let results: Vec<_> = records
        .par_iter()
        .enumerate()
        .map(|(i, record)| {
            assembler.extract(record, resolver).inspect_err(|e| {
                debug!(index = i, doc_id = %record.doc_id, error = %e, "record rejected");
            })
        })
        .collect();

    log_summary(&results);
    results
}

/// Like [`extract_batch`], reading each record with the assembler's schema
pub fn extract_batch_values<R>(
    assembler: &FeatureAssembler<'_>,
    records: &[Value],
    resolver: &R,
) -> Vec<Result<RecordFeatures>>
where
    R: TokenResolver + ?Sized,
{
    let results: Vec<_> = records
        .par_iter()
        .enumerate()
        .map(|(i, record)| {
            assembler.extract_value(record, resolver).inspect_err(|e| {
                debug!(index = i, error = %e, "record rejected");
            })
        })
        .collect();

    log_summary(&results);
    results
}

pub fn extract_raw_batch<R>(records: &[RelationRecord], resolver: &R) -> Vec<Result<RawTokens>>
where
    R: TokenResolver + ?Sized,
{
    records
        .par_iter()
        .map(|record| extract_raw(record, resolver))
        .collect()
}

fn log_summary<T>(results: &[Result<T>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(records = results.len(), failed, "feature batch finished");
}
