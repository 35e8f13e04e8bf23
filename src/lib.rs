//! News verdict pipeline.
//!
//! A submitted text is classified as real or fake by a pre-trained model, then
//! corroborated through a claim search and, when that finds nothing, an
//! article similarity search. The outcomes are fused into a [`models::Verdict`]
//! carrying the evidence and two warning flags.

pub mod artifacts;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod telemetry;
