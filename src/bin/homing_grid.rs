use retina_homing::config;
use retina_homing::evaluation::{self, CellStatus, GridReport};
use retina_homing::io::write_report;
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
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;
    let session = config.build_session()?;

    let mut report = evaluation::evaluate_grid(&session, &config.grid);
    print_text_summary(&report);

    if let Some(path) = &config.output.report_json {
        if !config.output.include_cells() {
            report.cells.clear();
        }
        write_report(path, &report)?;
        println!("\nJSON report written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(report: &GridReport) {
    let stats = &report.stats;
    println!("Grid evaluation");
    println!(
        "  home: ({:.3}, {:.3})  grid: {}x{} step={}",
        report.home.x,
        report.home.y,
        report.grid.columns(),
        report.grid.rows(),
        report.grid.step
    );
    println!(
        "  cells={} evaluated={} at_home={} undetermined={} failed={} elapsed_ms={:.3}",
        stats.cells, stats.evaluated, stats.at_home, stats.undetermined, stats.failed, report.elapsed_ms
    );
    println!(
        "  angular error (deg): mean={} max={} rms={}",
        format_opt(stats.mean_error_deg),
        format_opt(stats.max_error_deg),
        format_opt(stats.rms_error_deg)
    );

    println!("\nHoming directions (deg, y descending):");
    let columns = report.grid.columns().max(1);
    for row in report.cells.chunks(columns).rev() {
        let line = row
            .iter()
            .map(|cell| match (&cell.status, cell.homing) {
                (CellStatus::Evaluated, Some(v)) => format!("{:6.1}", v.direction().to_degrees()),
                (CellStatus::AtHome, _) => format!("{:>6}", "H"),
                (CellStatus::Failed { .. }, _) => format!("{:>6}", "x"),
                _ => format!("{:>6}", "-"),
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {line}");
    }
}

fn format_opt(val: Option<f64>) -> String {
    val.map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn usage() -> String {
    "Usage: homing_grid <config.json>".to_string()
}
