/// Device constraints requested at stream acquisition time. The device may
/// negotiate a different native resolution; captured frames carry the
/// negotiated dimensions, not these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct CaptureParams {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    640
}

fn default_height() -> u32 {
    480
}

impl Default for CaptureParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_fields() {
        let params: CaptureParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, CaptureParams::default());
        assert_eq!(params.width, 640);
        assert_eq!(params.height, 480);
    }
}
