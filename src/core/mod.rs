// src/core/mod.rs

// The analysis library: data model, validation, fact collection and the
// pure scoring engine, tied together by `analyzer`.

/// Subjects, fact records, flags, scores and the final `Assessment`.
pub mod models;

/// Validation, collection and boundary errors.
pub mod error;

/// Input checks run before any fact collection.
pub mod validation;

/// Catalogue of every red and green flag with its long description.
pub mod knowledge_base;

/// Allow-lists and known-subject lookups.
pub mod reputation;

/// Score, flags, verdict and recommendations. Pure functions only.
pub mod engine;

/// Concurrent fact sources and the collector.
pub mod scanner;

pub mod analyzer;
