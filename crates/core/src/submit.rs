//! Measurement submission.

use crate::{append_record, Config};
use netmet_api::{
    Credentials, MeasurementDefinition, MeasurementRecord,
    MeasurementRequest, NmError, NmResult, ProbeRecord, ProbeSelection,
};

/// The per-submission measurement parameters.
#[derive(Debug, Clone)]
pub struct SubmitParams {
    /// Destination port.
    pub port: u16,

    /// Transport protocol, e.g. `"ICMP"` or `"UDP"`.
    pub protocol: String,

    /// Measurement kind, e.g. `"traceroute"`.
    pub kind: String,
}

impl Default for SubmitParams {
    fn default() -> Self {
        Self {
            port: 34543,
            protocol: "ICMP".into(),
            kind: "traceroute".into(),
        }
    }
}

/// Submit a one-off measurement from `vp` towards `target`.
///
/// The submitted definition always requests exactly one probe. The
/// record appended to the measurement log, and returned here, carries
/// the identifier obtained from this submission's response, never a
/// value from an earlier run.
pub fn submit_measurement(
    config: &Config,
    credentials: &Credentials,
    target: &ProbeRecord,
    vp: &ProbeRecord,
    params: &SubmitParams,
) -> NmResult<MeasurementRecord> {
    let target_addr = target
        .address_v4
        .clone()
        .ok_or_else(|| NmError::missing_field("target address_v4"))?;
    let vp_addr = vp
        .address_v4
        .as_deref()
        .ok_or_else(|| NmError::missing_field("vp address_v4"))?;

    tracing::info!(
        "performing {} measurement from {vp_addr} to {target_addr}",
        params.kind,
    );

    let request = MeasurementRequest {
        definitions: vec![MeasurementDefinition::new(
            target_addr,
            params.port,
            params.protocol.clone(),
            params.kind.clone(),
        )],
        probes: vec![ProbeSelection::single(vp.id)],
        is_oneoff: true,
        bill_to: credentials.username.clone(),
    };

    let ids = netmet_client::blocking_measurement_submit(
        config.base_url.clone(),
        &credentials.secret_key,
        &request,
    )?;

    let measurement_id = *ids
        .first()
        .ok_or_else(|| NmError::missing_field("measurements"))?;

    let record = MeasurementRecord {
        measurement_id,
        measurement_description: request,
    };

    append_record(&config.measurement_log(), &record)?;

    tracing::info!(measurement_id, "measurement uuid (for retrieval)");

    Ok(record)
}
