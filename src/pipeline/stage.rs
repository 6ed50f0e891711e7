//! Generation stages and their tracing spans.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info_span};

/// Unique identifier for generation stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Jittered grid, Lloyd relaxation and triangulation (cached per seed and resolution).
    Lattice,
    /// Shape pose and elevation sampling.
    Elevation,
    /// Moisture dials and sampling.
    Moisture,
    /// Band lookup per region.
    Biomes,
}

impl StageId {
    pub const ALL: [StageId; 4] = [
        StageId::Lattice,
        StageId::Elevation,
        StageId::Moisture,
        StageId::Biomes,
    ];

    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Lattice => "lattice",
            StageId::Elevation => "elevation",
            StageId::Moisture => "moisture",
            StageId::Biomes => "biomes",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Runs `work` inside a span named after the stage and logs its duration.
pub(crate) fn run_stage<T>(id: StageId, work: impl FnOnce() -> T) -> T {
    let _span = info_span!("stage", stage = id.name()).entered();
    let start = Instant::now();
    let out = work();
    debug!(
        stage = id.name(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "stage complete"
    );
    out
}
