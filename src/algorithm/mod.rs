/// Border-matching compatibility between tiles
pub mod adjacency;
/// Contradiction policies and region repair
pub mod deadlock;
/// Full-distribution strategy with bounded propagation
pub mod eager;
/// Session orchestration and engine configuration
pub mod executor;
/// Resolved-id strategy driven by the frontier
pub mod frontier;
/// Neighbor recomputation and depth-bounded propagation
pub mod propagation;
/// Strategy trait shared by the propagation engines
pub mod strategy;
/// Cross-direction neighbor voting
pub mod votes;
