use netmet_api::{
    MeasurementDefinition, MeasurementRequest, NmError, ProbeSelection,
};
use netmet_client::*;
use netmet_test_utils::{enable_tracing, MockAtlasSrv};

fn probe_json(id: u64, address_v4: Option<&str>, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "address_v4": address_v4,
        "asn_v4": 29632,
        "status": { "id": 1, "name": status },
        "country_code": "UA",
        "is_public": true,
    })
}

fn request() -> MeasurementRequest {
    MeasurementRequest {
        definitions: vec![MeasurementDefinition::new(
            "1.2.3.4".into(),
            34543,
            "ICMP".into(),
            "traceroute".into(),
        )],
        probes: vec![ProbeSelection::single(699)],
        is_oneoff: true,
        bill_to: "netmet-user".into(),
    }
}

#[test]
fn probe_list_sends_filters_and_decodes() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_probes(serde_json::json!({
        "count": 2,
        "results": [
            probe_json(621, Some("178.252.197.138"), "Connected"),
            probe_json(699, Some("62.205.157.197"), "Connected"),
        ],
    }));

    let probes = blocking_probe_list(
        srv.server_url(),
        "UA",
        &[("status", "1"), ("is_public", "true")],
    )
    .unwrap();

    assert_eq!(2, probes.len());
    assert_eq!(621, probes[0].id);
    assert_eq!(699, probes[1].id);

    let seen = srv.seen();
    assert_eq!(1, seen.len());
    assert!(seen[0].path_and_query.starts_with("/api/v2/probes/?"));
    assert!(seen[0].path_and_query.contains("country_code=UA"));
    assert!(seen[0].path_and_query.contains("status=1"));
    assert!(seen[0].path_and_query.contains("is_public=true"));
}

#[test]
fn probe_list_empty_results_errors() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_probes(serde_json::json!({ "count": 0, "results": [] }));

    let err = blocking_probe_list(srv.server_url(), "UA", &[]).unwrap_err();
    assert!(matches!(err, NmError::EmptyResponse { .. }));
}

#[test]
fn describe_exposes_result_url() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_description(serde_json::json!({
        "id": 38333397,
        "type": "traceroute",
        "result": "https://atlas.ripe.net/api/v2/measurements/38333397/results/",
    }));

    let description =
        blocking_measurement_describe(srv.server_url(), 38333397).unwrap();

    assert_eq!(Some(38333397), description.id);
    assert_eq!(
        Some("https://atlas.ripe.net/api/v2/measurements/38333397/results/"),
        description.result.as_deref(),
    );

    let seen = srv.seen();
    assert_eq!(1, seen.len());
    assert_eq!("/api/v2/measurements/38333397/", seen[0].path_and_query);
}

#[test]
fn describe_raw_empty_object_errors() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_description(serde_json::json!({}));

    let err =
        blocking_measurement_describe_raw(srv.server_url(), 1).unwrap_err();
    assert!(matches!(err, NmError::EmptyResponse { .. }));
}

#[test]
fn submit_posts_exact_body_and_returns_ids() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_submit_response(serde_json::json!({ "measurements": [12345] }));

    let request = request();
    let ids = blocking_measurement_submit(
        srv.server_url(),
        "super-secret",
        &request,
    )
    .unwrap();
    assert_eq!(vec![12345], ids);

    let seen = srv.seen();
    assert_eq!(1, seen.len());
    assert_eq!("POST", seen[0].method);
    assert!(seen[0].path_and_query.contains("key=super-secret"));

    let sent: serde_json::Value =
        serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(serde_json::to_value(&request).unwrap(), sent);
}

#[test]
fn submit_without_measurements_field_errors() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    srv.set_submit_response(serde_json::json!({ "error": "bad request" }));

    let err = blocking_measurement_submit(
        srv.server_url(),
        "super-secret",
        &request(),
    )
    .unwrap_err();
    assert!(matches!(err, NmError::MissingField { .. }));
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    enable_tracing();

    let srv = MockAtlasSrv::new().unwrap();
    let server_url = srv.server_url();
    drop(srv);

    let err = blocking_probe_list(server_url, "UA", &[]).unwrap_err();
    assert!(matches!(err, NmError::Transport { .. }));
}
