use crate::Result;
use crate::context::Profile;
use crate::formatters::Section;
use serde_json::{Map, Value};

/// Configuration for JSON output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Part of the profile to emit
    pub section: Section,
}

/// The selected part of the profile as a JSON value.
///
/// A single section is emitted bare; `All` keeps the top-level keys.
fn select(profile: &Profile, section: Section) -> Result<Value> {
    let value = match section {
        Section::All => serde_json::to_value(profile)?,
        Section::Technical => serde_json::to_value(&profile.technical)?,
        Section::Content => serde_json::to_value(&profile.content)?,
        Section::Author => serde_json::to_value(&profile.author)?,
        Section::Discussion => serde_json::to_value(&profile.discussion)?,
    };
    Ok(value)
}

/// Convert a profile to JSON
pub fn profile_to_json(profile: &Profile, config: &JsonConfig) -> Result<String> {
    let value = select(profile, config.section)?;

    if config.pretty { Ok(serde_json::to_string_pretty(&value)?) } else { Ok(serde_json::to_string(&value)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, profile: &Profile) -> Result<String> {
        profile_to_json(profile, &self.config)
    }

    /// Wraps a failure message the way a remote caller expects it.
    pub fn error(&self, message: &str) -> String {
        let mut map = Map::new();
        map.insert("error".to_string(), Value::String(message.to_string()));
        Value::Object(map).to_string()
    }
}
