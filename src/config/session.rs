use crate::evaluation::GridSpec;
use crate::homing::HomingParams;
use crate::retina::RetinaOptions;
use crate::session::HomingSession;
use crate::types::{Landmark, PlanarVector};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct LandmarkConfig {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl LandmarkConfig {
    pub fn to_landmark(&self) -> Result<Landmark, String> {
        Landmark::new(PlanarVector::new(self.x, self.y), self.diameter)
            .map_err(|e| format!("Invalid landmark at ({}, {}): {e}", self.x, self.y))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where `homing_grid` writes its JSON report.
    pub report_json: Option<PathBuf>,
    /// Include the per-cell breakdown in the report.
    pub include_cells: Option<bool>,
}

impl OutputConfig {
    pub fn include_cells(&self) -> bool {
        self.include_cells.unwrap_or(true)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SessionConfig {
    pub landmarks: Vec<LandmarkConfig>,
    #[serde(default)]
    pub home: PlanarVector,
    #[serde(default)]
    pub homing: HomingParams,
    #[serde(default)]
    pub retina: RetinaOptions,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SessionConfig {
    pub fn landmarks(&self) -> Result<Vec<Landmark>, String> {
        if self.landmarks.is_empty() {
            return Err("Config lists no landmarks".to_string());
        }
        self.landmarks.iter().map(LandmarkConfig::to_landmark).collect()
    }

    /// Validates the landmarks and grid, then records the home snapshot.
    pub fn build_session(&self) -> Result<HomingSession, String> {
        self.grid.validate()?;
        HomingSession::with_options(self.landmarks()?, self.home, self.retina, self.homing)
            .map_err(|e| format!("Failed to record snapshot: {e}"))
    }
}

pub fn load_config(path: &Path) -> Result<SessionConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<SessionConfig, serde_json::Error> {
    serde_json::from_str(data)
}
