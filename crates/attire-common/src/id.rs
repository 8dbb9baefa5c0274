//! Identifiers used to correlate model sessions and prompt requests in logs.

use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Short 8-hex-digit id for a single prompt submission.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    uuid.as_bytes()[..4]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Identity of one model session, from creation until it is destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_v4_uuid() {
        let parsed = uuid::Uuid::parse_str(&new_id()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn correlation_id_is_eight_hex_digits() {
        let cid = new_correlation_id();
        assert_eq!(cid.len(), 8);
        assert!(cid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_ids_are_distinct() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_displays_as_inner_string() {
        let sid = SessionId::default();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        assert_eq!(json, format!("\"{}\"", sid.as_str()));
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sid);
    }
}
