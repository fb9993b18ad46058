//! Redaction of sensitive fields in structured log payloads.
//!
//! The policy is substring-based and intentionally conservative: a key
//! containing `key` redacts unrelated fields such as `keyboardLayout`.
//! Over-redaction is preferred to under-redaction.

use serde_json::{Map, Value};

/// Marker substituted for every sensitive value.
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Fixed string returned when a payload cannot be sanitized or serialised.
pub const SANITIZE_FALLBACK: &str = "[unserialisable payload]";

/// Maximum object/array nesting the sanitizer will walk.
pub const MAX_SANITIZE_DEPTH: usize = 32;

const DEFAULT_SENSITIVE_PATTERNS: [&str; 6] =
    ["password", "token", "apikey", "secret", "key", "auth"];

/// Errors raised while sanitizing a payload.
///
/// These never escape the logger façade; [`RedactionPolicy::render`] folds
/// them into [`SANITIZE_FALLBACK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    /// Payload nesting exceeded [`MAX_SANITIZE_DEPTH`].
    #[error("payload nesting exceeds the sanitization depth limit")]
    DepthExceeded,
    /// The sanitized payload failed to serialise.
    #[error("sanitized payload failed to serialise")]
    Serialisation,
}

/// Ordered list of case-insensitive substrings marking a key as sensitive.
///
/// # Examples
/// ```
/// use backend::logging::RedactionPolicy;
/// use serde_json::json;
///
/// let policy = RedactionPolicy::default();
/// let clean = policy.sanitize(&json!({"password": "pw", "user": "a"})).unwrap();
/// assert_eq!(clean, json!({"password": "[REDACTED]", "user": "a"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionPolicy {
    patterns: Vec<String>,
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_PATTERNS)
    }
}

impl RedactionPolicy {
    /// Build a policy from the given substrings; matching is case-insensitive.
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|pattern| pattern.into().to_lowercase())
                .collect(),
        }
    }

    /// Extend the policy with one more substring.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into().to_lowercase());
        self
    }

    fn is_sensitive(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        self.patterns
            .iter()
            .any(|pattern| lowered.contains(pattern.as_str()))
    }

    /// Produce a sanitized copy of `payload`.
    ///
    /// Keys whose lowercase form contains a listed substring have their value
    /// replaced with [`REDACTED_MARKER`] regardless of the value's type;
    /// nested mappings are sanitized recursively; array elements are walked
    /// so element mappings get the same treatment; everything else passes
    /// through unchanged.
    pub fn sanitize(&self, payload: &Value) -> Result<Value, SanitizeError> {
        self.sanitize_at(payload, 0)
    }

    fn sanitize_at(&self, value: &Value, depth: usize) -> Result<Value, SanitizeError> {
        if depth > MAX_SANITIZE_DEPTH {
            return Err(SanitizeError::DepthExceeded);
        }

        match value {
            Value::Object(map) => {
                let mut sanitized = Map::with_capacity(map.len());
                for (key, entry) in map {
                    let replacement = if self.is_sensitive(key) {
                        Value::String(REDACTED_MARKER.to_owned())
                    } else {
                        self.sanitize_at(entry, depth + 1)?
                    };
                    sanitized.insert(key.clone(), replacement);
                }
                Ok(Value::Object(sanitized))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.sanitize_at(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    /// Sanitize `payload` and serialise it to indented, human-readable text.
    ///
    /// Any failure yields [`SANITIZE_FALLBACK`] instead of propagating.
    pub fn render(&self, payload: &Value) -> String {
        let Ok(sanitized) = self.sanitize(payload) else {
            return SANITIZE_FALLBACK.to_owned();
        };
        serde_json::to_string_pretty(&sanitized)
            .unwrap_or_else(|_| SANITIZE_FALLBACK.to_owned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("password", json!("pw"))]
    #[case("Token", json!(42))]
    #[case("apiKey", json!(true))]
    #[case("clientSecret", json!({"inner": "value"}))]
    #[case("authHeader", json!(null))]
    #[case("keyboardLayout", json!("qwerty"))]
    fn sensitive_keys_redact_any_value_type(#[case] key: &str, #[case] value: Value) {
        let policy = RedactionPolicy::default();
        let sanitized = policy
            .sanitize(&json!({ key: value }))
            .expect("sanitize succeeds");
        assert_eq!(sanitized[key], json!(REDACTED_MARKER));
    }

    #[rstest]
    fn nested_mappings_are_sanitized_recursively() {
        let policy = RedactionPolicy::default();
        let payload = json!({
            "user": "a",
            "password": "p",
            "nested": {"authToken": "t", "ok": true}
        });
        let sanitized = policy.sanitize(&payload).expect("sanitize succeeds");
        assert_eq!(
            sanitized,
            json!({
                "user": "a",
                "password": REDACTED_MARKER,
                "nested": {"authToken": REDACTED_MARKER, "ok": true}
            })
        );
    }

    #[rstest]
    fn array_elements_are_walked() {
        let policy = RedactionPolicy::default();
        let payload = json!({"items": [{"secretNote": "x"}, {"label": "y"}]});
        let sanitized = policy.sanitize(&payload).expect("sanitize succeeds");
        assert_eq!(
            sanitized,
            json!({"items": [{"secretNote": REDACTED_MARKER}, {"label": "y"}]})
        );
    }

    #[rstest]
    fn sanitization_is_idempotent() {
        let policy = RedactionPolicy::default();
        let payload = json!({
            "user": "a",
            "password": "p",
            "nested": {"authToken": "t", "ok": true}
        });
        let once = policy.sanitize(&payload).expect("first pass succeeds");
        let twice = policy.sanitize(&once).expect("second pass succeeds");
        assert_eq!(once, twice);
    }

    #[rstest]
    fn scalars_pass_through_unchanged() {
        let policy = RedactionPolicy::default();
        let payload = json!({"count": 3, "active": false, "note": null, "name": "a"});
        let sanitized = policy.sanitize(&payload).expect("sanitize succeeds");
        assert_eq!(sanitized, payload);
    }

    #[rstest]
    fn over_deep_payload_renders_fallback() {
        let policy = RedactionPolicy::default();
        let mut payload = json!({"leaf": true});
        for _ in 0..(MAX_SANITIZE_DEPTH + 8) {
            payload = json!({"nested": payload});
        }
        assert_eq!(
            policy.sanitize(&payload),
            Err(SanitizeError::DepthExceeded)
        );
        assert_eq!(policy.render(&payload), SANITIZE_FALLBACK);
    }

    #[rstest]
    fn render_produces_indented_text() {
        let policy = RedactionPolicy::default();
        let rendered = policy.render(&json!({"user": "a", "password": "p"}));
        assert!(rendered.contains('\n'));
        assert!(rendered.contains(REDACTED_MARKER));
        assert!(!rendered.contains("\"p\""));
    }

    #[rstest]
    fn custom_patterns_extend_the_policy() {
        let policy = RedactionPolicy::default().with_pattern("ssn");
        let sanitized = policy
            .sanitize(&json!({"beneficiarySsn": "123-45-6789"}))
            .expect("sanitize succeeds");
        assert_eq!(sanitized["beneficiarySsn"], json!(REDACTED_MARKER));
    }
}
