//! Homing vector synthesis.
//!
//! Every snapshot feature is matched to the nearest current feature of the
//! same kind. The matched current feature then contributes a turn vector and
//! an approach vector, both parameterized by the snapshot feature. The sum of
//! all contributions, normalized, is the homing direction.

use crate::error::{FeatureKind, HomingError, RetinaRole};
use crate::feature::{approach_vector, turn_vector_with, AngularFeature, DEFAULT_APPROACH_WEIGHT};
use crate::retina::RetinaView;
use crate::types::PlanarVector;
use log::debug;
use serde::{Deserialize, Serialize};

const KINDS: [FeatureKind; 2] = [FeatureKind::Dark, FeatureKind::Light];

/// Tunable weighting of the homing cues.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingParams {
    /// Length of each approach vector; turn vectors have unit length.
    pub approach_weight: f64,
    /// Reverse the turn side for current features wider than π.
    pub flip_turn_for_wide_features: bool,
}

impl Default for HomingParams {
    fn default() -> Self {
        Self {
            approach_weight: DEFAULT_APPROACH_WEIGHT,
            flip_turn_for_wide_features: false,
        }
    }
}

/// One snapshot feature, its match in the current retina, and what the pair
/// contributed to the homing sum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FeatureMatch {
    pub kind: FeatureKind,
    pub snapshot: AngularFeature,
    pub matched: AngularFeature,
    pub turn: PlanarVector,
    pub approach: PlanarVector,
}

impl FeatureMatch {
    #[inline]
    pub fn contribution(&self) -> PlanarVector {
        self.turn + self.approach
    }
}

/// Homing result together with the per-feature breakdown.
#[derive(Clone, Debug, Serialize)]
pub struct HomingReport {
    /// Normalized homing direction (zero when the sum cancels out).
    pub vector: PlanarVector,
    /// Sum of all contributions before normalization.
    pub raw_sum: PlanarVector,
    pub matches: Vec<FeatureMatch>,
}

/// Stateless comparison of a current retina against a snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomingComputation {
    params: HomingParams,
}

impl HomingComputation {
    pub fn new(params: HomingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HomingParams {
        &self.params
    }

    /// Homing direction from `current` toward the snapshot location, using
    /// default parameters.
    pub fn compute(current: &RetinaView, snapshot: &RetinaView) -> Result<PlanarVector, HomingError> {
        Self::default().run(current, snapshot)
    }

    /// Homing direction with this instance's parameters.
    pub fn run(&self, current: &RetinaView, snapshot: &RetinaView) -> Result<PlanarVector, HomingError> {
        let sum = self
            .matches(current, snapshot)?
            .fold(PlanarVector::ZERO, |acc, m| acc + m.contribution());
        let vector = sum.normalize();
        debug!(
            "homing at ({:.3}, {:.3}): raw=({:.4}, {:.4}) direction={:.2}°",
            current.position().x,
            current.position().y,
            sum.x,
            sum.y,
            vector.direction().to_degrees()
        );
        Ok(vector)
    }

    /// Like [`HomingComputation::run`] but also returns every matched pair.
    pub fn run_with_diagnostics(
        &self,
        current: &RetinaView,
        snapshot: &RetinaView,
    ) -> Result<HomingReport, HomingError> {
        let matches: Vec<FeatureMatch> = self.matches(current, snapshot)?.collect();
        let raw_sum = matches
            .iter()
            .fold(PlanarVector::ZERO, |acc, m| acc + m.contribution());
        Ok(HomingReport {
            vector: raw_sum.normalize(),
            raw_sum,
            matches,
        })
    }

    fn matches<'a>(
        &'a self,
        current: &'a RetinaView,
        snapshot: &'a RetinaView,
    ) -> Result<impl Iterator<Item = FeatureMatch> + 'a, HomingError> {
        for kind in KINDS {
            if snapshot.features(kind).is_empty() {
                return Err(HomingError::EmptyFeatureSet {
                    kind,
                    role: RetinaRole::Snapshot,
                });
            }
            if current.features(kind).is_empty() {
                return Err(HomingError::EmptyFeatureSet {
                    kind,
                    role: RetinaRole::Current,
                });
            }
        }

        Ok(KINDS.into_iter().flat_map(move |kind| {
            let candidates = current.features(kind);
            snapshot.features(kind).iter().filter_map(move |remembered| {
                remembered
                    .find_closest(candidates)
                    .map(|matched| self.pair(kind, *matched, *remembered))
            })
        }))
    }

    fn pair(&self, kind: FeatureKind, matched: AngularFeature, remembered: AngularFeature) -> FeatureMatch {
        FeatureMatch {
            kind,
            snapshot: remembered,
            matched,
            turn: turn_vector_with(&matched, &remembered, self.params.flip_turn_for_wide_features),
            approach: approach_vector(&matched, &remembered, self.params.approach_weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::circular_difference;
    use crate::types::Landmark;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn reference_landmarks() -> Vec<Landmark> {
        [(3.5, 2.0), (3.5, -2.0), (0.0, -4.0)]
            .iter()
            .map(|&(x, y)| Landmark::new(PlanarVector::new(x, y), 1.0).unwrap())
            .collect()
    }

    #[test]
    fn identical_retinas_yield_zero_vector() {
        let view = RetinaView::build(PlanarVector::new(-2.0, 1.5), &reference_landmarks()).unwrap();
        let v = HomingComputation::compute(&view, &view.clone()).unwrap();
        assert_eq!(v, PlanarVector::ZERO);
    }

    #[test]
    fn displaced_query_points_back_home() {
        let landmarks = reference_landmarks();
        let snapshot = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let current = RetinaView::build(PlanarVector::new(2.0, 0.0), &landmarks).unwrap();
        let v = HomingComputation::compute(&current, &snapshot).unwrap();
        assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-12);
        let expected = PlanarVector::new(-2.0, 0.0).direction();
        assert!(
            circular_difference(v.direction(), expected) < FRAC_PI_2,
            "direction {:.1}°",
            v.direction().to_degrees()
        );
    }

    #[test]
    fn diagnostics_list_every_snapshot_feature() {
        let landmarks = reference_landmarks();
        let snapshot = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let current = RetinaView::build(PlanarVector::new(0.0, 2.0), &landmarks).unwrap();
        let engine = HomingComputation::default();
        let report = engine.run_with_diagnostics(&current, &snapshot).unwrap();

        let dark = report.matches.iter().filter(|m| m.kind == FeatureKind::Dark).count();
        let light = report.matches.iter().filter(|m| m.kind == FeatureKind::Light).count();
        assert_eq!(dark, snapshot.dark_features().len());
        assert_eq!(light, snapshot.light_features().len());

        let plain = engine.run(&current, &snapshot).unwrap();
        assert_abs_diff_eq!(report.vector.x, plain.x, epsilon = 1e-12);
        assert_abs_diff_eq!(report.vector.y, plain.y, epsilon = 1e-12);
        for m in &report.matches {
            assert!(m.turn.is_zero() || (m.turn.magnitude() - 1.0).abs() < 1e-12);
            assert!(m.approach.is_zero() || (m.approach.magnitude() - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn approach_weight_is_applied() {
        let landmarks = reference_landmarks();
        let snapshot = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let current = RetinaView::build(PlanarVector::new(-1.0, -1.0), &landmarks).unwrap();
        let engine = HomingComputation::new(HomingParams {
            approach_weight: 0.5,
            ..Default::default()
        });
        let report = engine.run_with_diagnostics(&current, &snapshot).unwrap();
        assert!(report
            .matches
            .iter()
            .all(|m| m.approach.is_zero() || (m.approach.magnitude() - 0.5).abs() < 1e-12));
    }

    #[test]
    fn empty_retina_is_rejected() {
        let landmarks = reference_landmarks();
        let snapshot = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let empty = RetinaView::build(PlanarVector::ZERO, &[]).unwrap();

        let err = HomingComputation::compute(&empty, &snapshot).unwrap_err();
        assert_eq!(
            err,
            HomingError::EmptyFeatureSet {
                kind: FeatureKind::Dark,
                role: RetinaRole::Current,
            }
        );
        let err = HomingComputation::compute(&snapshot, &empty).unwrap_err();
        assert_eq!(
            err,
            HomingError::EmptyFeatureSet {
                kind: FeatureKind::Dark,
                role: RetinaRole::Snapshot,
            }
        );
    }

    #[test]
    fn missing_light_features_are_rejected() {
        // Coincident landmarks start at the same angle, so every gap is
        // degenerate and the retina has no background features at all.
        let landmark = Landmark::new(PlanarVector::new(3.0, 1.0), 1.0).unwrap();
        let landmarks = [landmark, landmark];
        let current = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let snapshot = RetinaView::build(PlanarVector::new(0.0, 3.0), &landmarks).unwrap();
        assert!(current.light_features().is_empty());
        let err = HomingComputation::compute(&current, &snapshot).unwrap_err();
        assert_eq!(
            err,
            HomingError::EmptyFeatureSet {
                kind: FeatureKind::Light,
                role: RetinaRole::Snapshot,
            }
        );
    }
}
