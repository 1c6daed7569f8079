use retina_homing::{HomingSession, Landmark, PlanarVector};

/// Three unit-diameter landmarks around a home at the origin.
pub fn reference_landmarks() -> Vec<Landmark> {
    [(3.5, 2.0), (3.5, -2.0), (0.0, -4.0)]
        .iter()
        .map(|&(x, y)| Landmark::new(PlanarVector::new(x, y), 1.0).expect("positive diameter"))
        .collect()
}

pub fn reference_session() -> HomingSession {
    HomingSession::new(reference_landmarks(), PlanarVector::ZERO).expect("home outside all landmarks")
}

/// Landmarks scattered on a ring of radius `radius` around the origin.
#[allow(dead_code)]
pub fn ring_landmarks(count: usize, radius: f64, diameter: f64) -> Vec<Landmark> {
    (0..count)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / count as f64 + 0.3;
            Landmark::new(PlanarVector::from_polar(angle, radius), diameter).expect("positive diameter")
        })
        .collect()
}
