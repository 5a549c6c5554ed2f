//! RIPE Atlas measurement types: submissions, descriptions and results.

/// One measurement definition as submitted to the platform.
///
/// The packet parameters (`af`, `packets`, `size`) and the dns/probe-id
/// flags are fixed for all netmet measurements; target, protocol, type
/// and port vary per submission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementDefinition {
    /// The destination address of the measurement.
    pub target: String,

    /// Address family, always 4.
    pub af: u8,

    /// Packets per hop, always 3.
    pub packets: u32,

    /// Packet size in bytes, always 48.
    pub size: u32,

    /// Platform tags attached to the measurement.
    pub tags: Vec<String>,

    /// Free-form description shown in the platform UI.
    pub description: String,

    /// Whether the probe should resolve the target itself.
    pub resolve_on_probe: bool,

    /// Skip the platform-side dns check.
    pub skip_dns_check: bool,

    /// Include the probe id in result payloads.
    pub include_probe_id: bool,

    /// Destination port.
    pub port: u16,

    /// Measurement kind, e.g. `"traceroute"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Transport protocol, e.g. `"ICMP"` or `"UDP"`.
    pub protocol: String,
}

impl MeasurementDefinition {
    /// Build a definition with the netmet fixed parameters and the
    /// given variable ones.
    pub fn new(target: String, port: u16, protocol: String, kind: String) -> Self {
        Self {
            target,
            af: 4,
            packets: 3,
            size: 48,
            tags: vec!["netmethr".into()],
            description: "Netmet".into(),
            resolve_on_probe: false,
            skip_dns_check: true,
            include_probe_id: false,
            port,
            kind,
            protocol,
        }
    }
}

/// The probe selection block of a submission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbeSelection {
    /// The selected probe id.
    pub value: u64,

    /// Selection kind, always `"probes"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Number of probes requested, always 1.
    pub requested: u32,
}

impl ProbeSelection {
    /// Select exactly one probe by id.
    pub fn single(probe_id: u64) -> Self {
        Self {
            value: probe_id,
            kind: "probes".into(),
            requested: 1,
        }
    }
}

/// The full POST body for `/api/v2/measurements/`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementRequest {
    /// The measurement definitions; netmet always submits exactly one.
    pub definitions: Vec<MeasurementDefinition>,

    /// The probe selection; netmet always requests exactly one probe.
    pub probes: Vec<ProbeSelection>,

    /// Run once rather than periodically.
    pub is_oneoff: bool,

    /// The account billed for the measurement.
    pub bill_to: String,
}

/// One submitted measurement as appended to the measurement log:
/// the identifier the platform returned plus the exact request sent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementRecord {
    /// The identifier obtained from this submission's response.
    pub measurement_id: u64,

    /// The request body that produced it.
    pub measurement_description: MeasurementRequest,
}

/// A measurement description as returned by
/// `GET /api/v2/measurements/<id>/`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MeasurementDescription {
    /// The measurement identifier.
    #[serde(default)]
    pub id: Option<u64>,

    /// URL at which the measurement results can be fetched.
    ///
    /// Absent on the wire when the platform has no results endpoint for
    /// this measurement; the reader treats that as a missing field.
    #[serde(default)]
    pub result: Option<String>,

    /// Remaining description metadata, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One reply within a traceroute hop: either a timed answer or a
/// timeout marker (`{"x": "*"}` on the wire).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum HopReply {
    /// A timeout marker.
    Timeout {
        /// The marker itself, `"*"`.
        x: String,
    },

    /// A timed reply.
    Reply {
        /// Address the reply came from, when known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,

        /// Round-trip time in milliseconds.
        rtt: f64,

        /// Remaining reply properties, passed through untouched.
        #[serde(flatten)]
        extra: serde_json::Map<String, serde_json::Value>,
    },

    /// Anything else the platform may send (errors, late packets).
    Other(serde_json::Value),
}

/// One traceroute hop: an index and the replies received at that ttl.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hop {
    /// Hop index, starting at 1.
    pub hop: u32,

    /// The replies for this hop.
    #[serde(default)]
    pub result: Vec<HopReply>,

    /// Remaining hop properties, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One measurement result record as fetched from the description's
/// result URL. For traceroute measurements the source, destination and
/// type live on this object, not on the description.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MeasurementResult {
    /// The source address of the measurement.
    #[serde(default)]
    pub src_addr: Option<String>,

    /// The destination address of the measurement.
    #[serde(default)]
    pub dst_addr: Option<String>,

    /// The measurement kind, e.g. `"traceroute"`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// The ordered traceroute hop list.
    #[serde(default)]
    pub result: Vec<Hop>,

    /// Remaining result properties, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn definition_wire_format() {
        let def = MeasurementDefinition::new(
            "1.2.3.4".into(),
            34543,
            "ICMP".into(),
            "traceroute".into(),
        );
        let wire = serde_json::to_value(&def).unwrap();
        assert_eq!(
            serde_json::json!({
                "target": "1.2.3.4",
                "af": 4,
                "packets": 3,
                "size": 48,
                "tags": ["netmethr"],
                "description": "Netmet",
                "resolve_on_probe": false,
                "skip_dns_check": true,
                "include_probe_id": false,
                "port": 34543,
                "type": "traceroute",
                "protocol": "ICMP",
            }),
            wire,
        );
    }

    #[test]
    fn hop_replies_decode_mixed() {
        let raw = serde_json::json!({
            "hop": 3,
            "result": [
                { "from": "10.0.0.1", "rtt": 12.887, "size": 28, "ttl": 253 },
                { "x": "*" },
                { "from": "10.0.0.2", "rtt": 13.1, "size": 28, "ttl": 253 },
            ]
        });

        let hop: Hop = serde_json::from_value(raw).unwrap();
        assert_eq!(3, hop.hop);
        assert!(matches!(
            hop.result[0],
            HopReply::Reply { rtt, .. } if rtt == 12.887
        ));
        assert!(matches!(hop.result[1], HopReply::Timeout { .. }));
        assert!(matches!(hop.result[2], HopReply::Reply { .. }));
    }

    #[test]
    fn result_fields_live_on_the_result_object() {
        let raw = serde_json::json!({
            "src_addr": "5.6.7.8",
            "dst_addr": "1.2.3.4",
            "type": "traceroute",
            "proto": "ICMP",
            "result": [
                { "hop": 1, "result": [{ "from": "5.6.7.1", "rtt": 0.5 }] }
            ]
        });

        let result: MeasurementResult = serde_json::from_value(raw).unwrap();
        assert_eq!(Some("5.6.7.8"), result.src_addr.as_deref());
        assert_eq!(Some("1.2.3.4"), result.dst_addr.as_deref());
        assert_eq!(Some("traceroute"), result.kind.as_deref());
        assert_eq!(1, result.result.len());
    }
}
