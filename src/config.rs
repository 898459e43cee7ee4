use serde::Deserialize;

/// Construction-time encoder switches.
///
/// Each coercion the encoder applies to text values can be toggled
/// independently. Temporal casts default to on; UUID casting defaults to off
/// because not every driver accepts a native UUID object.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(rename = "castUUID")]
    pub cast_uuid: bool,
    #[serde(rename = "castDate")]
    pub cast_date: bool,
    #[serde(rename = "castTime")]
    pub cast_time: bool,
    #[serde(rename = "castDatetime")]
    pub cast_datetime: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            cast_uuid: false,
            cast_date: true,
            cast_time: true,
            cast_datetime: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_switches() {
        let config = BridgeConfig::default();
        assert!(!config.cast_uuid);
        assert!(config.cast_date);
        assert!(config.cast_time);
        assert!(config.cast_datetime);
    }

    #[test]
    fn deserializes_partial_config() {
        let config: BridgeConfig = serde_json::from_str(r#"{"castUUID": true}"#).unwrap();
        assert!(config.cast_uuid);
        assert!(config.cast_datetime);
    }
}
