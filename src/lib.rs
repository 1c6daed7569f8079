#![doc = include_str!("../README.md")]

// Core retina model and homing.
pub mod angle;
pub mod error;
pub mod feature;
pub mod homing;
pub mod retina;
pub mod session;
pub mod types;

// Evaluation and tooling support.
pub mod config;
pub mod evaluation;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{FeatureKind, HomingError, RetinaRole};
pub use crate::feature::{approach_vector, turn_vector, AngularFeature};
pub use crate::homing::{HomingComputation, HomingParams, HomingReport};
pub use crate::retina::{LightGapPolicy, RetinaOptions, RetinaView};
pub use crate::session::HomingSession;
pub use crate::types::{Landmark, PlanarVector};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use retina_homing::prelude::*;
///
/// # fn main() -> Result<(), HomingError> {
/// let landmarks = vec![
///     Landmark::new(PlanarVector::new(3.5, 2.0), 1.0)?,
///     Landmark::new(PlanarVector::new(3.5, -2.0), 1.0)?,
///     Landmark::new(PlanarVector::new(0.0, -4.0), 1.0)?,
/// ];
/// let session = HomingSession::new(landmarks, PlanarVector::ZERO)?;
/// let v = session.homing_vector(PlanarVector::new(2.0, 0.0))?;
/// println!("home is {:.1}° away", v.direction().to_degrees());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{HomingComputation, HomingError, HomingSession, Landmark, PlanarVector, RetinaView};
}
