use std::str::FromStr;

/// Reserved prediction values meaning "no usable classification."
///
/// These never reach the transcript. The set is fixed; wire casing is
/// accepted case-insensitively, and `Display` renders the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Sentinel {
    #[strum(serialize = "no hand detected")]
    NoHand,
    #[strum(serialize = "uncertain")]
    Uncertain,
    #[strum(serialize = "error")]
    Error,
    #[strum(serialize = "pending")]
    Pending,
}

/// One inbound classification payload, sorted into accepted label vs.
/// reserved sentinel at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Sign(String),
    Sentinel(Sentinel),
}

impl Prediction {
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Sentinel::from_str(trimmed) {
            Ok(sentinel) => Self::Sentinel(sentinel),
            Err(_) => Self::Sign(trimmed.to_string()),
        }
    }

    /// Whether this prediction may be pushed into the transcript.
    pub fn is_committable(&self) -> bool {
        match self {
            Self::Sign(label) => !label.is_empty(),
            Self::Sentinel(_) => false,
        }
    }
}

impl Default for Prediction {
    fn default() -> Self {
        Self::Sentinel(Sentinel::Pending)
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sign(label) => f.write_str(label),
            Self::Sentinel(sentinel) => write!(f, "{sentinel}"),
        }
    }
}

impl serde::Serialize for Prediction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
