//! Synthetic audio level metrics derived from the WebRTC stats payloads.

use serde::de::DeserializeOwned;

use crate::types::{Call, InboundRtp, MediaSource, SyntheticData};

pub const INBOUND_RTP_KEY: &str = "inbound-rtp";
pub const MEDIA_SOURCE_KEY: &str = "media-source";

/// Root mean square level from accumulated energy over a duration.
///
/// A zero duration is not guarded against and yields a non-finite result.
pub fn rms(energy: f64, duration: f64) -> f64 {
    (energy / duration).sqrt()
}

/// Level of the first inbound track in an `inbound-rtp` payload
pub fn inbound_rms(payload: &str) -> Option<f64> {
    first_record::<InboundRtp>(INBOUND_RTP_KEY, payload)
        .map(|rtp| rms(rtp.track.total_audio_energy, rtp.track.total_samples_duration))
}

/// Level of the first source in a `media-source` payload
pub fn outbound_rms(payload: &str) -> Option<f64> {
    first_record::<MediaSource>(MEDIA_SOURCE_KEY, payload)
        .map(|src| rms(src.total_audio_energy, src.total_samples_duration))
}

/// Compute both metrics over every call quality entry.
///
/// Entries are visited in order and a later entry that yields a value
/// overrides an earlier one. Anything missing or unparsable stays at zero.
pub fn synthesize(call: &Call) -> SyntheticData {
    let mut data = SyntheticData::default();
    for entry in call.call_quality_entries() {
        if let Some(value) = entry.metadata.get(INBOUND_RTP_KEY).and_then(|p| inbound_rms(p)) {
            data.inbound_rms = value;
        }
        if let Some(value) = entry.metadata.get(MEDIA_SOURCE_KEY).and_then(|p| outbound_rms(p)) {
            data.outbound_rms = value;
        }
    }
    data
}

fn first_record<T: DeserializeOwned + Default>(key: &str, payload: &str) -> Option<T> {
    // a null record reads as all zero fields
    match serde_json::from_str::<Vec<Option<T>>>(payload) {
        Ok(records) => records.into_iter().next().map(Option::unwrap_or_default),
        Err(e) => {
            log::debug!("ignoring unparsable {key} payload: {e}");
            None
        }
    }
}
