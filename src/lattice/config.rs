//! Configuration for lattice relaxation.

use serde::{Deserialize, Serialize};

/// Parameters of the Lloyd relaxation applied to the jittered grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Number of Lloyd's relaxation iterations.
    pub lloyd_iterations: usize,
    /// Cells with an absolute area below this keep their site unchanged.
    pub min_cell_area: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            lloyd_iterations: 4,
            min_cell_area: 1e-12,
        }
    }
}

impl LatticeConfig {
    /// Configuration that keeps the jittered grid as-is.
    pub fn unrelaxed() -> Self {
        Self {
            lloyd_iterations: 0,
            ..Default::default()
        }
    }
}
