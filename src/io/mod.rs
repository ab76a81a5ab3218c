/// Plain-text tile catalog parsing
pub mod catalog;
/// Command-line interface and run orchestration
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Text export of resolved grids
pub mod export;
/// Caller-pinned cells
pub mod prefill;
/// Terminal progress display
pub mod progress;
