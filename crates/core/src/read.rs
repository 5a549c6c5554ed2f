//! Measurement retrieval and traceroute rendering.

use crate::{dump_json, Config};
use netmet_api::{Hop, HopReply, NmError, NmResult};

/// Fetch a measurement's result and render its traceroute.
///
/// The description is fetched first; if it carries no `result` URL the
/// call fails without a second request. Only the first record of the
/// results array is used, this tool does not aggregate multi-probe
/// results. Source, destination and type are read from the result
/// object itself, which is where the platform places them for
/// traceroute records (not from the description). The first result is
/// persisted iff its hop list is non-empty.
pub fn read_measurement(config: &Config, measurement_id: u64) -> NmResult<Vec<Hop>> {
    let description = netmet_client::blocking_measurement_describe(
        config.base_url.clone(),
        measurement_id,
    )?;

    let result_url = description
        .result
        .ok_or_else(|| NmError::missing_field("result"))?;
    let result_url = url::Url::parse(&result_url).map_err(|e| {
        NmError::transport_src("invalid measurement result url", e)
    })?;

    let results = netmet_client::blocking_result_fetch(result_url)?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| NmError::empty_response("measurement results"))?;

    tracing::info!("measurement source : {:?}", first.src_addr);
    tracing::info!("measurement dst    : {:?}", first.dst_addr);
    tracing::info!("measurement type   : {:?}", first.kind);

    tracing::info!("traceroute results");
    for line in render_hops(&first.result) {
        tracing::info!("{line}");
    }

    let hops = first.result.clone();
    if !hops.is_empty() {
        dump_json(&config.results_file(measurement_id), &first)?;
    }

    Ok(hops)
}

/// Fetch a measurement's description, log it and persist it verbatim.
pub fn describe_measurement(
    config: &Config,
    measurement_id: u64,
) -> NmResult<serde_json::Value> {
    let description = netmet_client::blocking_measurement_describe_raw(
        config.base_url.clone(),
        measurement_id,
    )?;

    tracing::info!("measurement description");
    if let serde_json::Value::Object(map) = &description {
        for (key, val) in map {
            tracing::info!("{key} : {val}");
        }
    }

    dump_json(&config.description_file(measurement_id), &description)?;

    Ok(description)
}

/// Render a hop list, one line per hop: the hop index, then each reply
/// as a round-trip time in ms or a `*` timeout marker.
pub fn render_hops(hops: &[Hop]) -> Vec<String> {
    hops.iter()
        .map(|hop| {
            let mut line = format!("{:>3}", hop.hop);
            for reply in &hop.result {
                match reply {
                    HopReply::Reply { rtt, .. } => {
                        line.push_str(&format!("  {rtt} ms"));
                    }
                    HopReply::Timeout { x } => {
                        line.push_str(&format!("  {x}"));
                    }
                    HopReply::Other(_) => line.push_str("  ?"),
                }
            }
            line
        })
        .collect()
}
