use serde_json::{Map, Value};

use crate::{
    synthetic::synthesize,
    types::{Call, CallMetadata},
};

pub const SYNTHETIC_DATA_KEY: &str = "synthetic-data";

/// Turn one raw metadata value into an output value.
///
/// Values whose first non-blank character is `[` or `"` are already JSON and
/// are passed through with their numbers kept as written. Everything else is
/// emitted as a string.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('[') || trimmed.starts_with('"')) {
        return Value::String(raw.to_string());
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("value looks like JSON but does not parse, keeping it as a string: {e}");
            Value::String(raw.to_string())
        }
    }
}

/// Insert one field per key of a call quality entry
pub fn flatten_entry(entry: &CallMetadata, out: &mut Map<String, Value>) {
    for (key, raw) in &entry.metadata {
        out.insert(key.clone(), coerce_value(raw));
    }
}

/// Build the flat output object for a call.
///
/// Later entries win on duplicate keys. `synthetic-data` is always present
/// and replaces any metadata field of the same name.
pub fn flatten_call(call: &Call) -> Map<String, Value> {
    let mut out = Map::new();
    let mut matched = 0;
    for entry in call.call_quality_entries() {
        flatten_entry(entry, &mut out);
        matched += 1;
    }
    log::debug!(
        "{matched} of {} metadata entries are call quality stats, {} fields",
        call.metadata.len(),
        out.len()
    );

    let synthetic = synthesize(call);
    // serde_json maps non-finite floats to null
    let synthetic = serde_json::to_value(synthetic).unwrap_or(Value::Null);
    out.insert(SYNTHETIC_DATA_KEY.to_string(), synthetic);
    out
}
