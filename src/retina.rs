//! Panoramic retina built from a landmark set at one observer position.
//!
//! Dark features are the landmark silhouettes sorted by angular center. Light
//! features fill the circular gaps between consecutive dark features,
//! including the wrap gap from the last silhouette back to the first.
//!
//! Overlapping silhouettes leave gaps with no visible background. What to do
//! with those is governed by [`LightGapPolicy`]; the default drops them.

use crate::error::{FeatureKind, HomingError};
use crate::feature::AngularFeature;
use crate::types::{Landmark, PlanarVector};
use log::debug;
use serde::{Deserialize, Serialize};

/// Handling of light gaps closed off by overlapping silhouettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightGapPolicy {
    /// Omit a gap when the silhouettes on either side of it overlap at its
    /// edge, including when one silhouette lies inside the other.
    #[default]
    SkipDegenerate,
    /// Always emit the gap from the raw boundary angles, even when the
    /// silhouettes overlap.
    KeepRaw,
}

/// Retina construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetinaOptions {
    pub light_gaps: LightGapPolicy,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetinaView {
    position: PlanarVector,
    dark: Vec<AngularFeature>,
    light: Vec<AngularFeature>,
}

impl RetinaView {
    /// Builds the retina seen from `position` with default options.
    pub fn build(position: PlanarVector, landmarks: &[Landmark]) -> Result<Self, HomingError> {
        Self::build_with_options(position, landmarks, &RetinaOptions::default())
    }

    pub fn build_with_options(
        position: PlanarVector,
        landmarks: &[Landmark],
        options: &RetinaOptions,
    ) -> Result<Self, HomingError> {
        let mut dark = landmarks
            .iter()
            .map(|landmark| AngularFeature::from_landmark(position, landmark))
            .collect::<Result<Vec<_>, _>>()?;
        dark.sort_by(|a, b| a.center().total_cmp(&b.center()));

        let (light, skipped) = light_gaps(&dark, options.light_gaps);
        debug!(
            "retina at ({:.3}, {:.3}): dark={} light={} skipped_gaps={}",
            position.x,
            position.y,
            dark.len(),
            light.len(),
            skipped
        );

        Ok(Self {
            position,
            dark,
            light,
        })
    }

    #[inline]
    pub fn position(&self) -> PlanarVector {
        self.position
    }

    /// Silhouettes, sorted by center.
    #[inline]
    pub fn dark_features(&self) -> &[AngularFeature] {
        &self.dark
    }

    /// Background gaps; gap `i` starts where dark feature `i` ends.
    #[inline]
    pub fn light_features(&self) -> &[AngularFeature] {
        &self.light
    }

    pub fn features(&self, kind: FeatureKind) -> &[AngularFeature] {
        match kind {
            FeatureKind::Dark => &self.dark,
            FeatureKind::Light => &self.light,
        }
    }
}

/// Derives the light features between circularly adjacent dark features.
/// Returns the features and the number of gaps that were dropped.
fn light_gaps(dark: &[AngularFeature], policy: LightGapPolicy) -> (Vec<AngularFeature>, usize) {
    match dark {
        [] => (Vec::new(), 0),
        // A lone silhouette leaves the rest of the circle as one gap.
        [only] => (vec![AngularFeature::new(only.end(), only.start())], 0),
        _ => {
            let mut light = Vec::with_capacity(dark.len());
            let mut skipped = 0usize;
            for (i, current) in dark.iter().enumerate() {
                let next = &dark[(i + 1) % dark.len()];
                if policy == LightGapPolicy::SkipDegenerate && gap_is_closed(current, next) {
                    skipped += 1;
                    continue;
                }
                light.push(AngularFeature::new(current.end(), next.start()));
            }
            (light, skipped)
        }
    }
}

/// No background shows between `current` and `next` when either silhouette
/// covers the other's edge of the gap. This also catches a narrow silhouette
/// nested inside a wider one.
fn gap_is_closed(current: &AngularFeature, next: &AngularFeature) -> bool {
    next.contains(current.end()) || current.contains(next.start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn landmark(x: f64, y: f64, diameter: f64) -> Landmark {
        Landmark::new(PlanarVector::new(x, y), diameter).unwrap()
    }

    fn reference_landmarks() -> Vec<Landmark> {
        vec![
            landmark(3.5, 2.0, 1.0),
            landmark(3.5, -2.0, 1.0),
            landmark(0.0, -4.0, 1.0),
        ]
    }

    #[test]
    fn one_dark_and_one_light_feature_per_landmark() {
        let view = RetinaView::build(PlanarVector::ZERO, &reference_landmarks()).unwrap();
        assert_eq!(view.dark_features().len(), 3);
        assert_eq!(view.light_features().len(), 3);
        for f in view.dark_features().iter().chain(view.light_features()) {
            assert!(f.width() > 0.0 && f.width() <= TAU, "bad width {}", f.width());
        }
    }

    #[test]
    fn dark_features_are_sorted_by_center() {
        let view = RetinaView::build(PlanarVector::new(-1.0, 2.0), &reference_landmarks()).unwrap();
        let centers: Vec<f64> = view.dark_features().iter().map(|f| f.center()).collect();
        assert!(centers.windows(2).all(|w| w[0] <= w[1]), "{centers:?}");
    }

    #[test]
    fn dark_and_light_partition_the_circle() {
        let view = RetinaView::build(PlanarVector::new(1.0, -1.0), &reference_landmarks()).unwrap();
        let total: f64 = view
            .dark_features()
            .iter()
            .chain(view.light_features())
            .map(|f| f.width())
            .sum();
        assert_abs_diff_eq!(total, TAU, epsilon = 1e-9);

        let dark = view.dark_features();
        for (i, gap) in view.light_features().iter().enumerate() {
            assert_eq!(gap.start(), dark[i].end());
            assert_eq!(gap.end(), dark[(i + 1) % dark.len()].start());
        }
    }

    #[test]
    fn single_landmark_leaves_one_light_feature() {
        let view = RetinaView::build(PlanarVector::ZERO, &[landmark(0.0, 3.0, 2.0)]).unwrap();
        assert_eq!(view.dark_features().len(), 1);
        assert_eq!(view.light_features().len(), 1);
        let dark = view.dark_features()[0];
        let light = view.light_features()[0];
        assert_abs_diff_eq!(light.width(), TAU - dark.width(), epsilon = 1e-12);
    }

    #[test]
    fn no_landmarks_builds_empty_retina() {
        let view = RetinaView::build(PlanarVector::ZERO, &[]).unwrap();
        assert!(view.dark_features().is_empty());
        assert!(view.light_features().is_empty());
    }

    #[test]
    fn overlapping_silhouettes_drop_the_inner_gap() {
        let landmarks = [landmark(3.0, 1.0, 1.0), landmark(3.0, 1.3, 1.0)];
        let view = RetinaView::build(PlanarVector::ZERO, &landmarks).unwrap();
        let dark = view.dark_features();
        assert!(dark[0].overlaps(&dark[1]));
        assert_eq!(view.light_features().len(), 1);
        // The surviving gap is the wide background behind the observer.
        assert_eq!(view.light_features()[0].start(), dark[1].end());
        assert!(view.light_features()[0].width() > std::f64::consts::PI);
    }

    fn nested_landmarks() -> Vec<Landmark> {
        let at = |bearing_deg: f64, distance: f64, diameter: f64| {
            Landmark::new(PlanarVector::from_polar(bearing_deg.to_radians(), distance), diameter).unwrap()
        };
        // A far narrow silhouette at 50° sits inside a near wide one centered at 52°.
        vec![at(50.0, 10.0, 0.5), at(52.0, 2.0, 2.8), at(200.0, 10.0, 0.5)]
    }

    #[test]
    fn nested_silhouette_drops_the_enclosed_gap() {
        let view = RetinaView::build(PlanarVector::ZERO, &nested_landmarks()).unwrap();
        let dark = view.dark_features();
        assert_eq!(dark.len(), 3);
        assert!(dark[1].contains(dark[0].start()) && dark[1].contains(dark[0].end()));

        let light = view.light_features();
        assert_eq!(light.len(), 2);
        assert_eq!(light[0].start(), dark[1].end());
        assert_eq!(light[1].start(), dark[2].end());
        let total: f64 = light.iter().map(|f| f.width()).sum();
        assert!(total <= TAU, "light total {:.1}°", total.to_degrees());
    }

    #[test]
    fn nested_silhouette_gap_survives_keep_raw() {
        let options = RetinaOptions {
            light_gaps: LightGapPolicy::KeepRaw,
        };
        let view = RetinaView::build_with_options(PlanarVector::ZERO, &nested_landmarks(), &options).unwrap();
        assert_eq!(view.light_features().len(), 3);
    }

    #[test]
    fn keep_raw_policy_emits_every_gap() {
        let landmarks = [landmark(3.0, 1.0, 1.0), landmark(3.0, 1.3, 1.0)];
        let options = RetinaOptions {
            light_gaps: LightGapPolicy::KeepRaw,
        };
        let view = RetinaView::build_with_options(PlanarVector::ZERO, &landmarks, &options).unwrap();
        assert_eq!(view.light_features().len(), 2);
    }

    #[test]
    fn observer_inside_landmark_fails() {
        let err = RetinaView::build(PlanarVector::new(3.5, 2.1), &reference_landmarks()).unwrap_err();
        assert!(matches!(err, HomingError::ObserverInsideLandmark { .. }));
    }

    #[test]
    fn features_by_kind() {
        let view = RetinaView::build(PlanarVector::ZERO, &reference_landmarks()).unwrap();
        assert_eq!(view.features(FeatureKind::Dark), view.dark_features());
        assert_eq!(view.features(FeatureKind::Light), view.light_features());
    }
}
