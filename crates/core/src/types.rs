use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CqError, Result};

/// Discriminator of metadata entries that carry call quality payloads.
pub const CALL_QUALITY_TAG: &str = "CALL_QUALITY_STATS";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    #[serde(rename = "callId", alias = "callid", default)]
    pub call_id: String,
    #[serde(rename = "UserId", alias = "userId", default)]
    pub user_id: String,
    #[serde(rename = "OrganizationId", alias = "organizationId", default)]
    pub organization_id: String,
    #[serde(
        rename = "metadata",
        alias = "Metadata",
        default,
        deserialize_with = "null_as_default"
    )]
    pub metadata: Vec<CallMetadata>,
}

impl Call {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(CqError::Parse)
    }

    /// Entries tagged as call quality stats, in input order.
    pub fn call_quality_entries(&self) -> impl Iterator<Item = &CallMetadata> {
        self.metadata.iter().filter(|m| m.is_call_quality())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallMetadata {
    #[serde(rename = "metadataType", default)]
    pub metadata_type: String,
    #[serde(rename = "columnQualifier", default)]
    pub column_qualifier: String,
    /// Raw values, each one a serialized JSON fragment. A `null` value reads
    /// as an empty string.
    #[serde(
        rename = "Metadata",
        alias = "metadata",
        default,
        deserialize_with = "null_values_as_empty"
    )]
    pub metadata: BTreeMap<String, String>,
}

impl CallMetadata {
    pub fn is_call_quality(&self) -> bool {
        self.metadata_type == CALL_QUALITY_TAG
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSource {
    #[serde(deserialize_with = "null_as_default")]
    pub total_audio_energy: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_samples_duration: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioTrack {
    #[serde(deserialize_with = "null_as_default")]
    pub jitter_buffer_delay: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub jitter_buffer_emitted_count: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_audio_energy: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_samples_received: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_samples_duration: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundRtp {
    #[serde(deserialize_with = "null_as_default")]
    pub packets_received: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub packets_lost: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub track: AudioTrack,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticData {
    pub inbound_rms: f64,
    pub outbound_rms: f64,
}

fn null_values_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: BTreeMap<String, Option<String>> = null_as_default(deserializer)?;
    Ok(values
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_call() {
        let json = br#"{
            "callId": "c-1",
            "UserId": "u-1",
            "OrganizationId": "o-1",
            "metadata": [
                {"metadataType": "CALL_QUALITY_STATS", "columnQualifier": "cq", "Metadata": {"a": "1"}},
                {"metadataType": "OTHER", "columnQualifier": "x", "Metadata": {"b": "2"}}
            ]
        }"#;

        let call = Call::from_slice(json).unwrap();
        assert_eq!(call.call_id, "c-1");
        assert_eq!(call.user_id, "u-1");
        assert_eq!(call.organization_id, "o-1");
        assert_eq!(call.metadata.len(), 2);
        assert_eq!(call.metadata[0].column_qualifier, "cq");
        assert_eq!(call.metadata[0].metadata["a"], "1");
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let call = Call::from_slice(br#"{"metadata": null}"#).unwrap();
        assert_eq!(call, Call::default());

        let call =
            Call::from_slice(br#"{"metadata": [{"metadataType": "CALL_QUALITY_STATS", "Metadata": null}]}"#)
                .unwrap();
        assert!(call.metadata[0].metadata.is_empty());
    }

    #[test]
    fn test_null_metadata_value_reads_as_empty() {
        let json = br#"{"metadata": [{"metadataType": "CALL_QUALITY_STATS", "Metadata": {"a": null, "b": "1"}}]}"#;

        let call = Call::from_slice(json).unwrap();
        assert_eq!(call.metadata[0].metadata["a"], "");
        assert_eq!(call.metadata[0].metadata["b"], "1");
    }

    #[test]
    fn test_null_stats_fields_default() {
        let rtp: InboundRtp = serde_json::from_str(
            r#"{"packetsLost": null, "packetsReceived": 3, "track": {"totalAudioEnergy": 4, "totalSamplesDuration": null}}"#,
        )
        .unwrap();
        assert_eq!(rtp.packets_lost, 0);
        assert_eq!(rtp.packets_received, 3);
        assert_eq!(rtp.track.total_audio_energy, 4.0);
        assert_eq!(rtp.track.total_samples_duration, 0.0);

        let rtp: InboundRtp = serde_json::from_str(r#"{"track": null}"#).unwrap();
        assert_eq!(rtp.track, AudioTrack::default());

        let src: MediaSource =
            serde_json::from_str(r#"{"totalAudioEnergy": null, "totalSamplesDuration": 2}"#).unwrap();
        assert_eq!(src.total_audio_energy, 0.0);
        assert_eq!(src.total_samples_duration, 2.0);
    }

    #[test]
    fn test_alternate_field_spellings() {
        let json = br#"{"callid": "c", "userId": "u", "organizationId": "o",
            "Metadata": [{"metadataType": "T", "metadata": {"k": "v"}}]}"#;

        let call = Call::from_slice(json).unwrap();
        assert_eq!(call.call_id, "c");
        assert_eq!(call.user_id, "u");
        assert_eq!(call.organization_id, "o");
        assert_eq!(call.metadata[0].metadata["k"], "v");
    }

    #[test]
    fn test_call_quality_entries_filters_by_tag() {
        let call = Call {
            metadata: vec![
                CallMetadata {
                    metadata_type: "OTHER".to_string(),
                    ..Default::default()
                },
                CallMetadata {
                    metadata_type: CALL_QUALITY_TAG.to_string(),
                    column_qualifier: "first".to_string(),
                    ..Default::default()
                },
                CallMetadata {
                    metadata_type: "call_quality_stats".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let matching: Vec<_> = call.call_quality_entries().collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].column_qualifier, "first");
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        let err = Call::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, CqError::Parse(_)));
        assert!(!err.is_io());
        assert!(err.to_string().starts_with("failed to parse json"));
    }

    #[test]
    fn test_non_string_metadata_value_is_parse_error() {
        let json = br#"{"metadata": [{"metadataType": "CALL_QUALITY_STATS", "Metadata": {"a": 1}}]}"#;
        assert!(matches!(Call::from_slice(json), Err(CqError::Parse(_))));
    }
}
