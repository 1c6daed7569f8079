use crate::types::PlanarVector;
use serde::Serialize;

/// Which half of a retina a feature belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Landmark silhouette.
    Dark,
    /// Background gap between two silhouettes.
    Light,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Dark => f.write_str("dark"),
            FeatureKind::Light => f.write_str("light"),
        }
    }
}

/// Which retina of a homing comparison was found lacking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RetinaRole {
    Current,
    Snapshot,
}

/// Reasons why a retina or homing vector cannot be computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HomingError {
    InvalidDiameter {
        diameter: f64,
    },
    ObserverInsideLandmark {
        observer: PlanarVector,
        landmark_center: PlanarVector,
        radius: f64,
    },
    EmptyFeatureSet {
        kind: FeatureKind,
        role: RetinaRole,
    },
}

impl std::fmt::Display for HomingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomingError::InvalidDiameter { diameter } => {
                write!(f, "landmark diameter must be positive (got {diameter})")
            }
            HomingError::ObserverInsideLandmark {
                observer,
                landmark_center,
                radius,
            } => write!(
                f,
                "observer ({:.3}, {:.3}) lies inside landmark at ({:.3}, {:.3}) with radius {:.3}",
                observer.x, observer.y, landmark_center.x, landmark_center.y, radius
            ),
            HomingError::EmptyFeatureSet { kind, role } => {
                let role = match role {
                    RetinaRole::Current => "current",
                    RetinaRole::Snapshot => "snapshot",
                };
                write!(f, "{role} retina has no {kind} features to match")
            }
        }
    }
}

impl std::error::Error for HomingError {}
