//! Plain-data export of a text element for presets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::TextBlockConfig;
use crate::line::{Alignment, TextFrame};

/// Everything needed to restore a text element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSnapshot {
    pub raw_text: String,
    #[serde(default)]
    pub config: TextBlockConfig,
    /// Alignment overrides by line index
    #[serde(default)]
    pub alignments: BTreeMap<usize, Alignment>,
    /// Frame at export time
    #[serde(default)]
    pub frame: TextFrame,
}

impl TextSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
