use sign_interface::Prediction;

/// One accepted transcript entry: a classified sign label or the space
/// token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase", tag = "type", content = "label")]
pub enum Token {
    Sign(String),
    Space,
}

/// The ordered, user-editable sequence of accepted tokens forming the output
/// text. Append-only except for `delete_last`; no random-access edits.
///
/// Every operation is synchronous and total — this structure never observes
/// an error, by construction. Sentinel filtering happens in `append`, so no
/// reserved value can ever land here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptLog {
    tokens: Vec<Token>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an accepted label as a new trailing token. No-op (returning
    /// `false`) for sentinels and empty labels.
    pub fn append(&mut self, prediction: &Prediction) -> bool {
        if !prediction.is_committable() {
            return false;
        }
        self.tokens.push(Token::Sign(prediction.to_string()));
        true
    }

    /// Unconditionally pushes a space token, independent of label state.
    pub fn insert_space(&mut self) {
        self.tokens.push(Token::Space);
    }

    /// Removes the trailing token if present; no-op on an empty transcript.
    pub fn delete_last(&mut self) {
        self.tokens.pop();
    }

    /// In-order concatenation of the token sequence.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Sign(label) => out.push_str(label),
                Token::Space => out.push(' '),
            }
        }
        out
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sign_interface::{Prediction, Sentinel};

    #[test]
    fn append_pushes_accepted_labels_in_order() {
        let mut log = TranscriptLog::new();
        assert!(log.append(&Prediction::from_raw("H")));
        assert!(log.append(&Prediction::from_raw("I")));
        assert_eq!(log.text(), "HI");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn append_refuses_every_sentinel() {
        let mut log = TranscriptLog::new();
        for sentinel in [
            Sentinel::NoHand,
            Sentinel::Uncertain,
            Sentinel::Error,
            Sentinel::Pending,
        ] {
            assert!(!log.append(&Prediction::Sentinel(sentinel)));
        }
        assert!(!log.append(&Prediction::Sign(String::new())));
        assert!(log.is_empty());
        assert_eq!(log.text(), "");
    }

    #[test]
    fn insert_space_appends_exactly_one_space_token() {
        let mut log = TranscriptLog::new();
        log.insert_space();
        assert_eq!(log.tokens(), &[Token::Space]);
        assert_eq!(log.text(), " ");

        // Independent of current label state: works on top of sentinels too.
        log.insert_space();
        assert_eq!(log.text(), "  ");
    }

    #[test]
    fn delete_last_on_empty_is_a_noop() {
        let mut log = TranscriptLog::new();
        log.delete_last();
        assert!(log.is_empty());
        assert_eq!(log.text(), "");
    }

    #[test]
    fn space_then_delete_round_trip() {
        let mut log = TranscriptLog::new();
        log.append(&Prediction::from_raw("A"));
        log.insert_space();
        assert_eq!(log.text(), "A ");

        log.delete_last();
        assert_eq!(log.text(), "A");

        log.delete_last();
        assert_eq!(log.text(), "");
    }
}
