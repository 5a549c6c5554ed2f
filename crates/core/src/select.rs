//! Random vantage-point / target pair selection.

use crate::{load_dataset, Config};
use netmet_api::{NmError, NmResult, ProbeRecord};
use rand::Rng;

/// Pick one uniformly random vantage point and one uniformly random
/// target from the persisted datasets.
///
/// Randomizing the pair spreads our measurements, so no single probe
/// pair gets overloaded.
///
/// If either primary dataset file is absent, BOTH roles switch to the
/// correction datasets. The fallback is all-or-nothing rather than
/// per-file, so the pair always comes from one consistent snapshot.
pub fn select_random_pair(
    config: &Config,
) -> NmResult<(ProbeRecord, ProbeRecord)> {
    let (vps, targets) = match (
        load_dataset(&config.vps_dataset()),
        load_dataset(&config.targets_dataset()),
    ) {
        (Ok(vps), Ok(targets)) => (vps, targets),
        (Err(err), _) | (_, Err(err)) if err.is_absent() => {
            tracing::info!("using vps and targets from the correction");
            (
                load_dataset(&config.vps_correction())?,
                load_dataset(&config.targets_correction())?,
            )
        }
        (Err(err), _) | (_, Err(err)) => return Err(err),
    };

    if vps.is_empty() {
        return Err(NmError::empty_dataset("vantage points"));
    }
    if targets.is_empty() {
        return Err(NmError::empty_dataset("targets"));
    }

    let mut rng = rand::thread_rng();
    let vp = vps[rng.gen_range(0..vps.len())].clone();
    let target = targets[rng.gen_range(0..targets.len())].clone();

    tracing::info!(
        vp = vp.id,
        target = target.id,
        "selected random vp/target pair"
    );

    Ok((vp, target))
}
