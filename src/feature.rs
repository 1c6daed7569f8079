//! Angular features: arcs on the observer's circular retina.
//!
//! A feature spans counter-clockwise from `start` to `end`, both stored in
//! [0, 2π). When `start > end` the arc wraps through zero. Dark features are
//! landmark silhouettes, light features the background gaps between them.
//!
//! The two vector-generating operations take both features explicitly: the
//! `current` feature (matched in the retina at the query position) and the
//! `remembered` feature (from the snapshot). The resulting vectors are always
//! expressed relative to the current feature's bearing.

use crate::angle::{chord_proxy, forward_span, lies_clockwise, normalize_full};
use crate::error::HomingError;
use crate::types::{Landmark, PlanarVector};
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Weight of the approach cue relative to the unit turn cue.
pub const DEFAULT_APPROACH_WEIGHT: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AngularFeature {
    start: f64,
    end: f64,
}

impl AngularFeature {
    /// Builds a feature from raw boundary angles, normalizing both into [0, 2π).
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: normalize_full(start),
            end: normalize_full(end),
        }
    }

    /// Convenience constructor taking degrees.
    pub fn from_degrees(start_deg: f64, end_deg: f64) -> Self {
        Self::new(start_deg.to_radians(), end_deg.to_radians())
    }

    /// Silhouette of `landmark` as seen from `observer`.
    ///
    /// An observer exactly at the landmark center sees a point feature. Any
    /// other position strictly inside the disk is rejected.
    pub fn from_landmark(observer: PlanarVector, landmark: &Landmark) -> Result<Self, HomingError> {
        let to_center = landmark.center() - observer;
        let hypotenuse = to_center.magnitude();
        let opposite = landmark.radius();

        let half_width = if hypotenuse == 0.0 {
            0.0
        } else if opposite > hypotenuse {
            return Err(HomingError::ObserverInsideLandmark {
                observer,
                landmark_center: landmark.center(),
                radius: opposite,
            });
        } else {
            (opposite / hypotenuse).asin()
        };

        let bearing = to_center.direction();
        Ok(Self::new(bearing - half_width, bearing + half_width))
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// True if the arc passes through the 0 rad point.
    #[inline]
    pub fn wraps_zero(&self) -> bool {
        self.start > self.end
    }

    #[inline]
    pub fn width(&self) -> f64 {
        forward_span(self.start, self.end)
    }

    #[inline]
    pub fn center(&self) -> f64 {
        normalize_full(self.start + self.width() / 2.0)
    }

    /// Whether the two arcs share at least one angle (touching counts).
    ///
    /// Each arc is unrolled onto the real line as `[start, start + width]`;
    /// the other arc is tested in place and shifted by one full turn either
    /// way, which covers every wraparound combination.
    pub fn overlaps(&self, other: &AngularFeature) -> bool {
        let (a0, a1) = self.unrolled();
        let (b0, b1) = other.unrolled();
        [-TAU, 0.0, TAU]
            .iter()
            .any(|shift| a0 <= b1 + shift && b0 + shift <= a1)
    }

    /// Whether `angle` lies on the arc, endpoints included.
    pub fn contains(&self, angle: f64) -> bool {
        forward_span(self.start, normalize_full(angle)) <= self.width()
    }

    /// Candidate whose center is angularly nearest to this feature's center.
    ///
    /// Distance is `sin(|Δcenter| / 2)`; ties keep the earliest candidate.
    /// Returns `None` for an empty slice.
    pub fn find_closest<'a>(&self, candidates: &'a [AngularFeature]) -> Option<&'a AngularFeature> {
        let center = self.center();
        let mut iter = candidates.iter();
        let mut closest = iter.next()?;
        let mut shortest = chord_proxy(center, closest.center());
        for candidate in iter {
            let distance = chord_proxy(center, candidate.center());
            if distance < shortest {
                shortest = distance;
                closest = candidate;
            }
        }
        Some(closest)
    }

    fn unrolled(&self) -> (f64, f64) {
        (self.start, self.start + self.width())
    }
}

/// Unit vector perpendicular to `current`'s bearing, turning it toward the
/// bearing at which `remembered` was seen. Zero when the centers coincide.
pub fn turn_vector(current: &AngularFeature, remembered: &AngularFeature) -> PlanarVector {
    turn_vector_with(current, remembered, false)
}

/// [`turn_vector`] with an optional side flip for features wider than π.
pub fn turn_vector_with(
    current: &AngularFeature,
    remembered: &AngularFeature,
    flip_wide: bool,
) -> PlanarVector {
    let center = current.center();
    let target = remembered.center();
    if target == center {
        return PlanarVector::ZERO;
    }

    let mut push_ccw = lies_clockwise(center, target);
    if flip_wide && current.width() > PI {
        push_ccw = !push_ccw;
    }

    if push_ccw {
        PlanarVector::from_polar(center + FRAC_PI_2, 1.0)
    } else {
        PlanarVector::from_polar(center - FRAC_PI_2, 1.0)
    }
}

/// Radial vector of length `weight` along `current`'s bearing: toward the
/// feature when it was remembered wider, away when remembered narrower, zero
/// when the widths match.
pub fn approach_vector(current: &AngularFeature, remembered: &AngularFeature, weight: f64) -> PlanarVector {
    let width = current.width();
    let remembered_width = remembered.width();
    if remembered_width == width {
        return PlanarVector::ZERO;
    }

    let bearing = current.center();
    if remembered_width > width {
        PlanarVector::from_polar(bearing, weight)
    } else {
        PlanarVector::from_polar(bearing + PI, weight)
    }
}
