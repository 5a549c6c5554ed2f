//! Probe inventory fetching.

use crate::{dump_dataset, Config};
use netmet_api::{NmError, NmResult, ProbeRecord};

/// Which inventory a fetched dataset feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Probes measurements are launched from.
    VantagePoint,

    /// Probes measurements are directed at.
    Target,
}

impl Role {
    /// Server-side filters for this role's listing request.
    ///
    /// The two roles intentionally use different parameter sets:
    /// vantage points are additionally restricted to public probes.
    /// This asymmetry is kept as-is, not unified.
    fn query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Role::VantagePoint => &[("status", "1"), ("is_public", "true")],
            Role::Target => &[("status", "1")],
        }
    }

    /// The country this role's inventory defaults to.
    pub fn default_country(&self) -> &'static str {
        match self {
            Role::VantagePoint => "UA",
            Role::Target => "RU",
        }
    }

    fn correction_path(&self, config: &Config) -> std::path::PathBuf {
        match self {
            Role::VantagePoint => config.vps_correction(),
            Role::Target => config.targets_correction(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Role::VantagePoint => "vantage point",
            Role::Target => "target",
        }
    }
}

/// Fetch all usable probes in a country for the given role and persist
/// them as that role's correction dataset.
///
/// The platform's listing is filtered down to probes that are connected
/// and have an IPv4 address, preserving the platform's order. An empty
/// listing or an empty filtered set is an error; a partially usable
/// listing is not.
pub fn fetch_connected_probes(
    config: &Config,
    role: Role,
    country_code: &str,
) -> NmResult<Vec<ProbeRecord>> {
    let raw = netmet_client::blocking_probe_list(
        config.base_url.clone(),
        country_code,
        role.query(),
    )?;

    let filtered: Vec<ProbeRecord> =
        raw.into_iter().filter(|p| p.is_usable()).collect();

    if filtered.is_empty() {
        return Err(NmError::empty_dataset(format!(
            "{} dataset for {country_code}",
            role.name(),
        )));
    }

    tracing::info!(
        "retrieved {} connected {} probes from {country_code}",
        filtered.len(),
        role.name(),
    );

    dump_dataset(&role.correction_path(config), &filtered)?;

    Ok(filtered)
}
