//! config types.

use url::Url;

/// The production RIPE Atlas API base URL.
pub const ATLAS_BASE_URL: &str = "https://atlas.ripe.net/";

/// Configuration for the netmet measurement tools.
///
/// All state the tool reads or writes lives under `data_dir`; nothing
/// is hardcoded at module level so tests can point each run at a
/// scratch directory and a mock server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Atlas API.
    pub base_url: Url,

    /// Directory holding the datasets and result files.
    pub data_dir: std::path::PathBuf,
}

impl Config {
    /// Get a config pointing at the given API base and data directory.
    pub fn new(base_url: Url, data_dir: std::path::PathBuf) -> Self {
        Self { base_url, data_dir }
    }

    /// Get a config pointing at the production Atlas API.
    pub fn production(data_dir: std::path::PathBuf) -> Self {
        Self {
            base_url: Url::parse(ATLAS_BASE_URL)
                .expect("invalid atlas base url"),
            data_dir,
        }
    }

    /// The primary vantage-point dataset.
    pub fn vps_dataset(&self) -> std::path::PathBuf {
        self.data_dir.join("vps.json")
    }

    /// The primary target dataset.
    pub fn targets_dataset(&self) -> std::path::PathBuf {
        self.data_dir.join("targets.json")
    }

    /// The correction (fallback) vantage-point dataset. The inventory
    /// fetcher writes here; the selector reads it when the primaries
    /// are absent.
    pub fn vps_correction(&self) -> std::path::PathBuf {
        self.data_dir.join("vps_correction.json")
    }

    /// The correction (fallback) target dataset.
    pub fn targets_correction(&self) -> std::path::PathBuf {
        self.data_dir.join("targets_correction.json")
    }

    /// The append-only measurement log.
    pub fn measurement_log(&self) -> std::path::PathBuf {
        self.data_dir.join("measurements.json")
    }

    /// The per-measurement result file.
    pub fn results_file(&self, measurement_id: u64) -> std::path::PathBuf {
        self.data_dir.join(format!("results_{measurement_id}.json"))
    }

    /// The per-measurement description file written by `describe`.
    pub fn description_file(
        &self,
        measurement_id: u64,
    ) -> std::path::PathBuf {
        self.data_dir
            .join(format!("description_{measurement_id}.json"))
    }
}
