use crate::error::HomingError;
use crate::homing::{HomingComputation, HomingParams, HomingReport};
use crate::retina::{RetinaOptions, RetinaView};
use crate::types::{Landmark, PlanarVector};
use log::debug;

/// Landmark set, home snapshot and parameters for one homing session.
///
/// Everything is fixed at construction; queries only read. A session can be
/// shared across threads by reference.
#[derive(Clone, Debug)]
pub struct HomingSession {
    landmarks: Vec<Landmark>,
    snapshot: RetinaView,
    retina: RetinaOptions,
    engine: HomingComputation,
}

impl HomingSession {
    /// Records the snapshot at `home` with default parameters.
    pub fn new(landmarks: Vec<Landmark>, home: PlanarVector) -> Result<Self, HomingError> {
        Self::with_options(landmarks, home, RetinaOptions::default(), HomingParams::default())
    }

    pub fn with_options(
        landmarks: Vec<Landmark>,
        home: PlanarVector,
        retina: RetinaOptions,
        params: HomingParams,
    ) -> Result<Self, HomingError> {
        let snapshot = RetinaView::build_with_options(home, &landmarks, &retina)?;
        debug!(
            "session: {} landmarks, snapshot at ({:.3}, {:.3})",
            landmarks.len(),
            home.x,
            home.y
        );
        Ok(Self {
            landmarks,
            snapshot,
            retina,
            engine: HomingComputation::new(params),
        })
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn home(&self) -> PlanarVector {
        self.snapshot.position()
    }

    pub fn snapshot(&self) -> &RetinaView {
        &self.snapshot
    }

    pub fn params(&self) -> &HomingParams {
        self.engine.params()
    }

    /// Retina seen from `position` under this session's options.
    pub fn view_from(&self, position: PlanarVector) -> Result<RetinaView, HomingError> {
        RetinaView::build_with_options(position, &self.landmarks, &self.retina)
    }

    /// Normalized homing direction from `position`.
    pub fn homing_vector(&self, position: PlanarVector) -> Result<PlanarVector, HomingError> {
        let current = self.view_from(position)?;
        self.engine.run(&current, &self.snapshot)
    }

    /// Homing direction from `position` with the per-feature breakdown.
    pub fn homing_report(&self, position: PlanarVector) -> Result<HomingReport, HomingError> {
        let current = self.view_from(position)?;
        self.engine.run_with_diagnostics(&current, &self.snapshot)
    }
}
