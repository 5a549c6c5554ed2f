//! A blocking client for the RIPE Atlas v2 REST API.
//!
//! One function per endpoint the netmet tools touch: the probe listing,
//! the measurement description, the result URL embedded in a
//! description, and the measurement submission POST.

#![deny(missing_docs)]

use netmet_api::{
    MeasurementDescription, MeasurementRequest, MeasurementResult, NmError,
    NmResult, ProbeRecord,
};
use url::Url;

/// The deserialized shape of the probe listing endpoint.
#[derive(serde::Deserialize)]
struct ProbePage {
    #[serde(default)]
    results: Vec<ProbeRecord>,
}

/// The deserialized shape of a submission response.
#[derive(serde::Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    measurements: Option<Vec<u64>>,
}

fn fetch_body(req: ureq::Request, what: &str) -> NmResult<String> {
    let body = req
        .call()
        .map_err(|e| {
            NmError::transport_src(format!("failed to fetch {what}"), e)
        })?
        .into_string()
        .map_err(|e| {
            NmError::transport_src(format!("failed to read {what} body"), e)
        })?;

    if body.is_empty() {
        return Err(NmError::empty_response(what));
    }

    Ok(body)
}

/// List probes, filtered server side by country code plus any extra
/// query parameters (status / public flags).
///
/// Note the `blocking_` prefix. This is a hint to the caller that if the
/// function is used in an async context, it should be treated as a
/// blocking operation.
pub fn blocking_probe_list(
    mut server_url: Url,
    country_code: &str,
    extra: &[(&str, &str)],
) -> NmResult<Vec<ProbeRecord>> {
    server_url.set_path("api/v2/probes/");

    let mut req = ureq::get(server_url.as_str())
        .query("country_code", country_code);
    for (k, v) in extra {
        req = req.query(k, v);
    }

    let body = fetch_body(req, "probe list")?;

    let page: ProbePage = serde_json::from_str(&body).map_err(|e| {
        NmError::transport_src("failed to decode probe list", e)
    })?;

    if page.results.is_empty() {
        return Err(NmError::empty_response("probe list results"));
    }

    tracing::debug!(count = page.results.len(), "fetched probe list");

    Ok(page.results)
}

/// Fetch the description of a measurement by id.
pub fn blocking_measurement_describe(
    server_url: Url,
    measurement_id: u64,
) -> NmResult<MeasurementDescription> {
    let body = describe_body(server_url, measurement_id)?;

    serde_json::from_str(&body).map_err(|e| {
        NmError::transport_src("failed to decode measurement description", e)
    })
}

/// Fetch the description of a measurement by id, undecoded.
///
/// The `describe` subcommand persists the description verbatim rather
/// than through the typed struct, so nothing is dropped on disk.
pub fn blocking_measurement_describe_raw(
    server_url: Url,
    measurement_id: u64,
) -> NmResult<serde_json::Value> {
    let body = describe_body(server_url, measurement_id)?;

    let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        NmError::transport_src("failed to decode measurement description", e)
    })?;

    match &value {
        serde_json::Value::Null => {
            Err(NmError::empty_response("measurement description"))
        }
        serde_json::Value::Object(map) if map.is_empty() => {
            Err(NmError::empty_response("measurement description"))
        }
        _ => Ok(value),
    }
}

fn describe_body(mut server_url: Url, measurement_id: u64) -> NmResult<String> {
    server_url.set_path(&format!("api/v2/measurements/{measurement_id}/"));

    fetch_body(
        ureq::get(server_url.as_str()),
        "measurement description",
    )
}

/// Fetch the result records behind a description's result URL.
///
/// The returned list may be empty; the reader decides whether that is
/// an error.
pub fn blocking_result_fetch(
    result_url: Url,
) -> NmResult<Vec<MeasurementResult>> {
    let body = fetch_body(
        ureq::get(result_url.as_str()),
        "measurement results",
    )?;

    serde_json::from_str(&body).map_err(|e| {
        NmError::transport_src("failed to decode measurement results", e)
    })
}

/// Submit a measurement request, authenticated by the account API key.
///
/// Returns the measurement identifiers the platform allocated for this
/// submission, in response order.
pub fn blocking_measurement_submit(
    mut server_url: Url,
    secret_key: &str,
    request: &MeasurementRequest,
) -> NmResult<Vec<u64>> {
    server_url.set_path("api/v2/measurements/");

    let encoded = serde_json::to_string(request).map_err(|e| {
        NmError::transport_src("failed to encode measurement request", e)
    })?;

    let body = ureq::post(server_url.as_str())
        .query("key", secret_key)
        .set("content-type", "application/json")
        .send_string(&encoded)
        .map_err(|e| {
            NmError::transport_src("failed to submit measurement", e)
        })?
        .into_string()
        .map_err(|e| {
            NmError::transport_src("failed to read submission response", e)
        })?;

    if body.is_empty() {
        return Err(NmError::empty_response("submission response"));
    }

    let response: SubmitResponse =
        serde_json::from_str(&body).map_err(|e| {
            NmError::transport_src("failed to decode submission response", e)
        })?;

    response
        .measurements
        .ok_or_else(|| NmError::missing_field("measurements"))
}
