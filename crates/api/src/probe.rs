//! RIPE Atlas probe records.

/// The connection status block on a probe record.
#[derive(
    Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default,
)]
pub struct ProbeStatus {
    /// Status name as reported by the platform, e.g. `"Connected"`.
    pub name: String,

    /// Remaining status properties, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One probe as returned by the `/api/v2/probes/` listing.
///
/// Only the fields the tool actually inspects are typed. Everything else
/// the platform sends (asn, geometry, tags, uptime, ...) is kept in
/// `extra` so that persisted datasets round-trip without loss.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbeRecord {
    /// Platform-assigned probe identity.
    pub id: u64,

    /// The probe's public IPv4 address, if it has one.
    pub address_v4: Option<String>,

    /// Connection status.
    pub status: ProbeStatus,

    /// ISO country code the probe is registered in.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Whether the probe is publicly listed.
    #[serde(default)]
    pub is_public: Option<bool>,

    /// Remaining platform metadata, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProbeRecord {
    /// True if this probe can serve as a vantage point or target:
    /// connected, with a non-empty IPv4 address.
    pub fn is_usable(&self) -> bool {
        self.status.name == "Connected"
            && self
                .address_v4
                .as_deref()
                .map(|a| !a.is_empty())
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn probe(status: &str, address_v4: Option<&str>) -> ProbeRecord {
        ProbeRecord {
            id: 699,
            address_v4: address_v4.map(Into::into),
            status: ProbeStatus {
                name: status.into(),
                extra: Default::default(),
            },
            country_code: Some("UA".into()),
            is_public: Some(true),
            extra: Default::default(),
        }
    }

    #[test]
    fn usable_requires_connected_and_v4() {
        assert!(probe("Connected", Some("62.205.157.197")).is_usable());
        assert!(!probe("Disconnected", Some("62.205.157.197")).is_usable());
        assert!(!probe("Connected", None).is_usable());
        assert!(!probe("Connected", Some("")).is_usable());
        assert!(!probe("Abandoned", None).is_usable());
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = serde_json::json!({
            "id": 699,
            "address_v4": "62.205.157.197",
            "address_v6": null,
            "asn_v4": 29632,
            "country_code": "UA",
            "is_public": true,
            "status": {
                "id": 1,
                "name": "Connected",
                "since": "2023-10-02T00:10:25Z"
            },
            "total_uptime": 371163962,
            "type": "Probe"
        });

        let probe: ProbeRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(699, probe.id);
        assert!(probe.is_usable());
        assert_eq!(
            serde_json::json!(29632),
            *probe.extra.get("asn_v4").unwrap()
        );

        let back = serde_json::to_value(&probe).unwrap();
        assert_eq!(raw, back);
    }
}
