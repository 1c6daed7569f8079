//! Grid sweep over query positions with angular-error statistics.
//!
//! Each grid cell gets its own retina and homing vector, compared against the
//! true direction back to the session's home. Cells are independent, so the
//! sweep runs in parallel when the `parallel` feature is enabled.

use crate::angle::circular_difference;
use crate::session::HomingSession;
use crate::types::PlanarVector;
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Rectangular sweep: cell `(ix, iy)` sits at `(ix * step, iy * step)` for
/// `ix` in `x_min..=x_max` and `iy` in `y_min..=y_max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub step: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            x_min: -7,
            x_max: 7,
            y_min: -7,
            y_max: 7,
            step: 1.0,
        }
    }
}

/// Largest sweep a config may request.
pub const MAX_GRID_CELLS: usize = 1_000_000;

impl GridSpec {
    pub fn columns(&self) -> usize {
        span_len(self.x_min, self.x_max)
    }

    pub fn rows(&self) -> usize {
        span_len(self.y_min, self.y_max)
    }

    /// Total number of cells, `None` if it does not fit in `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.columns().checked_mul(self.rows())
    }

    /// Rejects non-positive steps and sweeps above [`MAX_GRID_CELLS`].
    pub fn validate(&self) -> Result<(), String> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(format!("Grid step must be positive (got {})", self.step));
        }
        match self.cell_count() {
            Some(n) if n <= MAX_GRID_CELLS => Ok(()),
            _ => Err(format!(
                "Grid {}..={} x {}..={} exceeds {MAX_GRID_CELLS} cells",
                self.x_min, self.x_max, self.y_min, self.y_max
            )),
        }
    }

    /// Cell indices in row-major order, `y` ascending.
    pub fn indices(&self) -> Vec<(i32, i32)> {
        (self.y_min..=self.y_max)
            .flat_map(|iy| (self.x_min..=self.x_max).map(move |ix| (ix, iy)))
            .collect()
    }

    pub fn position(&self, ix: i32, iy: i32) -> PlanarVector {
        PlanarVector::new(ix as f64 * self.step, iy as f64 * self.step)
    }
}

fn span_len(min: i32, max: i32) -> usize {
    usize::try_from((i64::from(max) - i64::from(min) + 1).max(0)).unwrap_or(usize::MAX)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellStatus {
    /// Homing vector computed and compared against the true direction.
    Evaluated,
    /// Cell coincides with home; there is no direction to compare against.
    AtHome,
    /// All contributions cancelled out to the zero vector.
    Undetermined,
    /// Retina or homing computation failed for this cell.
    Failed { reason: String },
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOutcome {
    pub ix: i32,
    pub iy: i32,
    pub position: PlanarVector,
    pub homing: Option<PlanarVector>,
    pub expected_direction_deg: Option<f64>,
    pub angular_error_deg: Option<f64>,
    pub status: CellStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStats {
    pub cells: usize,
    pub evaluated: usize,
    pub at_home: usize,
    pub undetermined: usize,
    pub failed: usize,
    pub mean_error_deg: Option<f64>,
    pub max_error_deg: Option<f64>,
    pub rms_error_deg: Option<f64>,
}

impl ErrorStats {
    pub fn from_cells(cells: &[CellOutcome]) -> Self {
        let mut stats = ErrorStats {
            cells: cells.len(),
            ..Default::default()
        };
        let mut errors = Vec::with_capacity(cells.len());
        for cell in cells {
            match &cell.status {
                CellStatus::Evaluated => stats.evaluated += 1,
                CellStatus::AtHome => stats.at_home += 1,
                CellStatus::Undetermined => stats.undetermined += 1,
                CellStatus::Failed { .. } => stats.failed += 1,
            }
            if let Some(err) = cell.angular_error_deg {
                errors.push(err);
            }
        }
        if !errors.is_empty() {
            let n = errors.len() as f64;
            stats.mean_error_deg = Some(errors.iter().sum::<f64>() / n);
            stats.max_error_deg = errors.iter().copied().reduce(f64::max);
            stats.rms_error_deg = Some((errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt());
        }
        stats
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReport {
    pub grid: GridSpec,
    pub home: PlanarVector,
    pub elapsed_ms: f64,
    pub stats: ErrorStats,
    pub cells: Vec<CellOutcome>,
}

/// Homing vector and error for a single grid cell.
pub fn evaluate_cell(session: &HomingSession, grid: &GridSpec, ix: i32, iy: i32) -> CellOutcome {
    let position = grid.position(ix, iy);
    let to_home = session.home() - position;
    let mut outcome = CellOutcome {
        ix,
        iy,
        position,
        homing: None,
        expected_direction_deg: None,
        angular_error_deg: None,
        status: CellStatus::Evaluated,
    };

    let homing = match session.homing_vector(position) {
        Ok(v) => v,
        Err(err) => {
            warn!("grid cell ({ix}, {iy}) at ({:.3}, {:.3}): {err}", position.x, position.y);
            outcome.status = CellStatus::Failed {
                reason: err.to_string(),
            };
            return outcome;
        }
    };
    outcome.homing = Some(homing);

    if to_home.is_zero() {
        outcome.status = CellStatus::AtHome;
        return outcome;
    }
    let expected = to_home.direction();
    outcome.expected_direction_deg = Some(expected.to_degrees());

    if homing.is_zero() {
        outcome.status = CellStatus::Undetermined;
        return outcome;
    }
    outcome.angular_error_deg = Some(circular_difference(homing.direction(), expected).to_degrees());
    outcome
}

/// Evaluates every cell of `grid` against the session snapshot.
pub fn evaluate_grid(session: &HomingSession, grid: &GridSpec) -> GridReport {
    let started = Instant::now();
    let cells = evaluate_cells(session, grid, grid.indices());
    let stats = ErrorStats::from_cells(&cells);
    GridReport {
        grid: *grid,
        home: session.home(),
        elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        stats,
        cells,
    }
}

#[cfg(feature = "parallel")]
fn evaluate_cells(session: &HomingSession, grid: &GridSpec, indices: Vec<(i32, i32)>) -> Vec<CellOutcome> {
    use rayon::prelude::*;

    indices
        .into_par_iter()
        .map(|(ix, iy)| evaluate_cell(session, grid, ix, iy))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_cells(session: &HomingSession, grid: &GridSpec, indices: Vec<(i32, i32)>) -> Vec<CellOutcome> {
    indices
        .into_iter()
        .map(|(ix, iy)| evaluate_cell(session, grid, ix, iy))
        .collect()
}
