use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_PORT: &str = "22";
pub const DEFAULT_IDENTITY: &str = "id_rsa";

/// A saved SSH destination.
///
/// Field order matches the on-disk key order. Records written by older
/// versions may lack `identity` and `port`; those load as empty strings and
/// are kept that way until the record is edited. Every field also accepts a
/// number or `null`, so one odd value never hides the rest of the file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub domain: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub identity: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub port: String,
}

/// Reads a string field, accepting numbers and booleans as their text and
/// `null` (or anything structured) as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

impl ConnectionRecord {
    pub fn effective_port(&self) -> &str {
        if self.port.is_empty() {
            DEFAULT_PORT
        } else {
            &self.port
        }
    }

    pub fn effective_identity(&self) -> &str {
        if self.identity.is_empty() {
            DEFAULT_IDENTITY
        } else {
            &self.identity
        }
    }

    /// `username@domain`, as passed to ssh.
    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.domain)
    }
}
