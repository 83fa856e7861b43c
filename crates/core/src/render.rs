use serde_json::{Map, Value};

use crate::error::{CqError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    #[default]
    Compact,
    Pretty,
}

/// Serialize the flattened object in one pass
pub fn render(fields: &Map<String, Value>, style: OutputStyle) -> Result<String> {
    let rendered = match style {
        OutputStyle::Compact => serde_json::to_string(fields),
        OutputStyle::Pretty => serde_json::to_string_pretty(fields),
    };
    rendered.map_err(CqError::Render)
}
