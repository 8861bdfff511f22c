//! src/net/envelope.rs
//! ============================================================================
//! # Envelope: Tagged Decoding of the `{code, data}` Wire Wrapper
//!
//! The file API wraps every JSON response in `{code, data}` where code 10
//! means success. The wrapper is decoded into [`ApiOutcome`] right here at
//! the wire boundary so the rest of the crate never compares magic numbers.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// The envelope code the server uses for success.
pub const SUCCESS_CODE: i64 = 10;

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    code: i64,
    #[serde(default)]
    data: serde_json::Value,
}

/// Decoded envelope: either the typed payload or the failure code with the
/// raw body kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Failure { code: i64, raw: String },
}

/// Parses `body` as an envelope. A malformed body (not JSON, or `data` not
/// matching `T` on success) is a payload error, indistinguishable in
/// severity from a transport failure.
pub fn parse<T: DeserializeOwned>(body: &str) -> Result<ApiOutcome<T>, AppError> {
    let envelope: RawEnvelope = serde_json::from_str(body)?;
    if envelope.code == SUCCESS_CODE {
        let data: T = serde_json::from_value(envelope.data)?;
        Ok(ApiOutcome::Success(data))
    } else {
        Ok(ApiOutcome::Failure {
            code: envelope.code,
            raw: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::entry::FileEntry;

    #[test]
    fn success_envelope_yields_entries() {
        let body = r#"{"code":10,"data":[{"name":"docs","is_dir":true},{"name":"a.txt","is_dir":false}]}"#;
        let outcome: ApiOutcome<Vec<FileEntry>> = parse(body).unwrap();
        let ApiOutcome::Success(entries) = outcome else {
            panic!("expected success");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "docs");
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
    }

    #[test]
    fn non_success_code_keeps_raw_body() {
        let body = r#"{"code":41,"data":null}"#;
        let outcome: ApiOutcome<Vec<FileEntry>> = parse(body).unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Failure {
                code: 41,
                raw: body.to_string()
            }
        );
    }

    #[test]
    fn missing_data_is_fine_for_ignored_payload() {
        let body = r#"{"code":10}"#;
        let outcome = parse::<serde::de::IgnoredAny>(body).unwrap();
        assert!(matches!(outcome, ApiOutcome::Success(_)));
    }

    #[test]
    fn malformed_body_is_a_payload_error() {
        let result = parse::<Vec<FileEntry>>("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(AppError::Payload(_))));
    }

    #[test]
    fn unknown_entry_fields_pass_through() {
        let body = r#"{"code":10,"data":[{"name":"a.txt","is_dir":false,"owner":"rin"}]}"#;
        let ApiOutcome::Success(entries) = parse::<Vec<FileEntry>>(body).unwrap() else {
            panic!("expected success");
        };
        assert_eq!(entries[0].extra["owner"], "rin");
    }
}
