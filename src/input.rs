//! Framing of translation requests
//!
//! A request arrives either as a JSON object on stdin
//! (`{"text": ..., "source": ..., "target": ...}`), as raw text on stdin with
//! the locales as positional arguments, or entirely as positional arguments
//! `<source> <target> <text>`.

use crate::mt::{DEFAULT_SOURCE, DEFAULT_TARGET};
use serde::Deserialize;
use thiserror::Error;

/// Usage line shown when the positional arguments are incomplete
pub const USAGE: &str =
    "Usage: latex-translate <source> <target> <text> OR echo '{\"text\": ...}' | latex-translate";

/// Errors raised while framing a request
#[derive(Error, Debug)]
pub enum InputError {
    /// Required arguments are missing or malformed
    #[error("{0}")]
    Usage(String),
    /// Reading the payload failed
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// A framed `(text, source, target)` request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default = "default_source", deserialize_with = "null_as_source")]
    pub source: String,
    #[serde(default = "default_target", deserialize_with = "null_as_target")]
    pub target: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_source<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_source))
}

fn null_as_target<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_target))
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Frame a request from the process inputs
    ///
    /// A piped stdin carries the payload and the positional arguments only
    /// supply locales. On a terminal, `<source> <target> <text>` is required.
    pub fn frame<F>(
        positional: &[String],
        stdin_is_terminal: bool,
        read_payload: F,
    ) -> Result<Self, InputError>
    where
        F: FnOnce() -> std::io::Result<String>,
    {
        if stdin_is_terminal {
            return Self::from_args(positional);
        }

        let payload = read_payload()?;
        Ok(Self::from_stdin(&payload, positional))
    }

    /// Frame a request from a stdin payload
    ///
    /// A JSON object is read as `{text, source, target}`. Anything else is
    /// taken as raw text, minus its trailing line break, with the locales
    /// from the first two positional arguments when present.
    pub fn from_stdin(payload: &str, positional: &[String]) -> Self {
        let framed = serde_json::from_str::<serde_json::Value>(payload)
            .ok()
            .filter(serde_json::Value::is_object)
            .and_then(|value| serde_json::from_value(value).ok());
        if let Some(request) = framed {
            return request;
        }

        Self::new(
            payload.trim_end_matches(['\r', '\n']),
            positional.first().map(String::as_str).unwrap_or(DEFAULT_SOURCE),
            positional.get(1).map(String::as_str).unwrap_or(DEFAULT_TARGET),
        )
    }

    /// Frame a request from `<source> <target> <text>`
    pub fn from_args(positional: &[String]) -> Result<Self, InputError> {
        match positional {
            [source, target, text, ..] => Ok(Self::new(
                text.as_str(),
                source.as_str(),
                target.as_str(),
            )),
            _ => Err(InputError::Usage(USAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_json_payload() {
        let request = TranslationRequest::from_stdin(
            r#"{"text": "Soit $x$", "source": "fr", "target": "hi"}"#,
            &[],
        );
        assert_eq!(request, TranslationRequest::new("Soit $x$", "fr", "hi"));
    }

    #[test]
    fn test_json_payload_defaults() {
        let request = TranslationRequest::from_stdin(r#"{"text": "Hola"}"#, &[]);
        assert_eq!(request, TranslationRequest::new("Hola", "auto", "en"));

        let request = TranslationRequest::from_stdin(r#"{}"#, &[]);
        assert_eq!(request, TranslationRequest::new("", "auto", "en"));
    }

    #[test]
    fn test_json_nulls_fall_back_to_defaults() {
        let request = TranslationRequest::from_stdin(
            r#"{"text": null, "source": null, "target": null}"#,
            &[],
        );
        assert_eq!(request, TranslationRequest::new("", "auto", "en"));
    }

    #[test]
    fn test_json_positional_args_ignored() {
        let request =
            TranslationRequest::from_stdin(r#"{"text": "Hi", "target": "de"}"#, &args(&["fr", "es"]));
        assert_eq!(request, TranslationRequest::new("Hi", "auto", "de"));
    }

    #[test]
    fn test_raw_payload_uses_positional_locales() {
        let request = TranslationRequest::from_stdin("Bonjour $x$", &args(&["fr", "en"]));
        assert_eq!(request, TranslationRequest::new("Bonjour $x$", "fr", "en"));
    }

    #[test]
    fn test_raw_payload_trailing_line_break_trimmed() {
        let request = TranslationRequest::from_stdin("Line one\nline two\r\n", &[]);
        assert_eq!(request.text, "Line one\nline two");

        let request = TranslationRequest::from_stdin("  indented $x$  \n\n", &[]);
        assert_eq!(request.text, "  indented $x$  ");
    }

    #[test]
    fn test_raw_payload_defaults() {
        let request = TranslationRequest::from_stdin("Hallo", &args(&["de"]));
        assert_eq!(request, TranslationRequest::new("Hallo", "de", "en"));

        let request = TranslationRequest::from_stdin("Hallo", &[]);
        assert_eq!(request, TranslationRequest::new("Hallo", "auto", "en"));
    }

    #[test]
    fn test_non_object_json_is_raw_text() {
        let request = TranslationRequest::from_stdin("42", &[]);
        assert_eq!(request.text, "42");

        let request = TranslationRequest::from_stdin(r#""quoted""#, &[]);
        assert_eq!(request.text, r#""quoted""#);
    }

    #[test]
    fn test_object_with_wrong_types_is_raw_text() {
        let payload = r#"{"text": 5}"#;
        let request = TranslationRequest::from_stdin(payload, &[]);
        assert_eq!(request.text, payload);
    }

    #[test]
    fn test_frame_piped_stdin_wins_over_positional_text() {
        let request = TranslationRequest::frame(&args(&["fr", "de", "ignored"]), false, || {
            Ok("Soit $x$\n".to_string())
        })
        .unwrap();
        assert_eq!(request, TranslationRequest::new("Soit $x$", "fr", "de"));
    }

    #[test]
    fn test_frame_piped_json() {
        let request = TranslationRequest::frame(&[], false, || {
            Ok(r#"{"text": "Hola", "target": "fr"}"#.to_string())
        })
        .unwrap();
        assert_eq!(request, TranslationRequest::new("Hola", "auto", "fr"));
    }

    #[test]
    fn test_frame_terminal_uses_positional_args() {
        let request = TranslationRequest::frame(&args(&["en", "hi", "Find $x$"]), true, || {
            panic!("stdin must not be read on a terminal")
        })
        .unwrap();
        assert_eq!(request, TranslationRequest::new("Find $x$", "en", "hi"));
    }

    #[test]
    fn test_frame_terminal_missing_args_is_usage_error() {
        let result = TranslationRequest::frame(&args(&["en"]), true, || Ok(String::new()));
        assert!(matches!(result, Err(InputError::Usage(_))));
    }

    #[test]
    fn test_frame_read_failure() {
        let result = TranslationRequest::frame(&[], false, || {
            Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"))
        });
        match result {
            Err(InputError::Io(e)) => assert_eq!(e.to_string(), "bad utf-8"),
            other => panic!("Expected io error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_args() {
        let request = TranslationRequest::from_args(&args(&["en", "hi", r"Find \(x\)"])).unwrap();
        assert_eq!(request, TranslationRequest::new(r"Find \(x\)", "en", "hi"));
    }

    #[test]
    fn test_from_args_missing_values() {
        match TranslationRequest::from_args(&args(&["en", "hi"])) {
            Err(InputError::Usage(msg)) => assert!(msg.starts_with("Usage:")),
            other => panic!("Expected usage error, got {:?}", other),
        }
        assert!(TranslationRequest::from_args(&[]).is_err());
    }
}
