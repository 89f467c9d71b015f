use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate an ed25519 keypair for a voter
pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
    let mut csprng = rand::rngs::OsRng {};
    let secret = SigningKey::generate(&mut csprng);
    let public = secret.verifying_key();
    (secret, public)
}

/// Seconds since the unix epoch, with sub-second precision
pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Serialize to JSON with every object's keys sorted, recursively.
///
/// The output depends only on the value, never on field declaration or insertion order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&canonicalize(value))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Unordered {
        zeta: u32,
        alpha: Vec<Inner>,
    }

    #[derive(Serialize)]
    struct Inner {
        y: &'static str,
        b: bool,
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value = Unordered {
            zeta: 7,
            alpha: vec![Inner { y: "why", b: true }],
        };

        let bytes = canonical_json(&value).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"alpha":[{"b":true,"y":"why"}],"zeta":7}"#
        );
    }

    #[test]
    fn test_generate_keypair() {
        let (secret, public) = generate_keypair();
        assert_eq!(secret.verifying_key(), public);

        let (_, other) = generate_keypair();
        assert_ne!(public, other);
    }
}
