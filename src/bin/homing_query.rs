use retina_homing::config;
use retina_homing::io::to_report_json;
use retina_homing::PlanarVector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        return Err(usage());
    }
    let config = config::load_config(Path::new(&args[1]))?;
    let x = parse_coord(&args[2], "x")?;
    let y = parse_coord(&args[3], "y")?;
    let verbose = args.iter().skip(4).any(|a| a == "--verbose");

    let session = config.build_session()?;
    let position = PlanarVector::new(x, y);
    let report = session
        .homing_report(position)
        .map_err(|e| format!("Homing failed at ({x}, {y}): {e}"))?;

    let v = report.vector;
    if v.is_zero() {
        println!("No detectable displacement at ({x}, {y})");
    } else {
        println!(
            "Homing direction: {:.2}° (vector [{:.4}, {:.4}])",
            v.direction().to_degrees(),
            v.x,
            v.y
        );
    }
    if verbose {
        println!("{}", to_report_json(&report)?);
    }
    Ok(())
}

fn parse_coord(raw: &str, name: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid {name} coordinate: {raw}"))
}

fn usage() -> String {
    "Usage: homing_query <config.json> <x> <y> [--verbose]".to_string()
}
