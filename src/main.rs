use retina_homing::prelude::*;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), HomingError> {
    // Reference scenario: three unit-diameter landmarks, snapshot at the origin.
    let landmarks = vec![
        Landmark::new(PlanarVector::new(3.5, 2.0), 1.0)?,
        Landmark::new(PlanarVector::new(3.5, -2.0), 1.0)?,
        Landmark::new(PlanarVector::new(0.0, -4.0), 1.0)?,
    ];
    let session = HomingSession::new(landmarks, PlanarVector::ZERO)?;

    for (x, y) in [(2.0, 0.0), (-2.0, 0.0), (0.0, 2.0), (0.0, -2.0), (-3.0, 3.0)] {
        let position = PlanarVector::new(x, y);
        let v = session.homing_vector(position)?;
        let ideal = (session.home() - position).direction();
        println!(
            "from ({x:5.1}, {y:5.1}): homing={:6.1}° ideal={:6.1}°",
            v.direction().to_degrees(),
            ideal.to_degrees()
        );
    }
    Ok(())
}
