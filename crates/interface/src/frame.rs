use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;

/// Raster encodings the capture pipeline recognizes, detected by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Jpeg,
    Png,
}

impl FrameFormat {
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// A single encoded still at the device's native dimensions, ready for
/// one-shot transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub width: u32,
    pub height: u32,
    pub format: FrameFormat,
    pub data: Bytes,
}

impl EncodedFrame {
    /// `None` if the buffer does not sniff as a known raster format.
    pub fn new(width: u32, height: u32, data: Bytes) -> Option<Self> {
        let format = FrameFormat::sniff(&data)?;
        Some(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Wire payload: `data:<mime>;base64,<payload>`. The inference service
    /// splits on the first comma and base64-decodes the remainder.
    pub fn to_data_url(&self) -> String {
        let mut out = String::with_capacity(self.data.len() / 3 * 4 + 32);
        out.push_str("data:");
        out.push_str(self.format.mime());
        out.push_str(";base64,");
        BASE64.encode_string(&self.data, &mut out);
        out
    }
}

/// Inverse of [`EncodedFrame::to_data_url`], for tests and tooling that play
/// the service side of the exchange.
pub fn decode_data_url(url: &str) -> Result<(FrameFormat, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingPrefix)?;
    let (_, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;
    let data = BASE64.decode(payload)?;
    let format = FrameFormat::sniff(&data).ok_or(DataUrlError::UnknownFormat)?;
    Ok((format, data))
}

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingPrefix,
    #[error("data URL has no payload")]
    MissingPayload,
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a recognized raster format")]
    UnknownFormat,
}
