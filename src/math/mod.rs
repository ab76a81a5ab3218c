//! Mathematical utilities for the solver

/// Temperature-weighted sampling and weight normalization
pub mod probability;
/// Deterministic string-seeded random number generation
pub mod random;
