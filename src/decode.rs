//! Response decoding

use crate::error::{PplxError, PplxResult};
use crate::validation::{Validate, Violation};
use serde::de::DeserializeOwned;

/// Parse `body` as JSON into `T`, then validate the result
///
/// Malformed JSON is a [`PplxError::DecodeError`]; well-formed JSON that fails
/// validation is a [`PplxError::InvalidResponse`].
pub fn decode_validated<T>(body: &[u8]) -> PplxResult<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body).map_err(PplxError::DecodeError)?;
    value.validate().map_err(Violation::into_invalid_response)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ChatCompletionResponse;

    const SAMPLE: &str = r#"{
        "id": "x",
        "model": "mistral-7b-instruct",
        "created": 1,
        "choices": [
            {
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": "Two: Phobos and Deimos."},
                "delta": {"role": "assistant", "content": ""}
            }
        ],
        "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
    }"#;

    #[test]
    fn test_decodes_full_response() {
        let response: ChatCompletionResponse = decode_validated(SAMPLE.as_bytes()).unwrap();
        assert_eq!(response.id, "x");
        assert_eq!(response.created, Some(1));
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].finish_reason, "stop");
        assert_eq!(
            response.first_content(),
            Some("Two: Phobos and Deimos.")
        );
        assert!(response.choices[0].delta.is_some());
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(3));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = decode_validated::<ChatCompletionResponse>(b"{\"id\": ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_wrong_field_type_is_decode_error() {
        let body = br#"{"id":"x","model":"m","created":"yesterday"}"#;
        let err = decode_validated::<ChatCompletionResponse>(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_missing_model_is_invalid_response() {
        let body = br#"{"id":"x","created":1,"choices":[],"usage":{"prompt_tokens":1,"completion_tokens":2,"total_tokens":3}}"#;
        let err = decode_validated::<ChatCompletionResponse>(body).unwrap_err();
        match err {
            PplxError::InvalidResponse { field, .. } => assert_eq!(field, "model"),
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_length_completion_is_accepted() {
        let body = br#"{"id":"x","model":"m","created":1,"choices":[{"index":0,"finish_reason":"length","message":{"role":"assistant","content":""}}],"usage":{"prompt_tokens":5,"completion_tokens":0,"total_tokens":5}}"#;
        let response = decode_validated::<ChatCompletionResponse>(body).unwrap();
        assert!(response.choices[0].is_truncated());
        assert_eq!(response.first_content(), Some(""));
    }

    #[test]
    fn test_zero_usage_is_accepted() {
        let body = br#"{"id":"x","model":"m","created":0,"choices":[],"usage":{"prompt_tokens":0,"completion_tokens":0,"total_tokens":0}}"#;
        let response = decode_validated::<ChatCompletionResponse>(body).unwrap();
        assert_eq!(response.created, Some(0));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(0));
    }

    #[test]
    fn test_missing_created_is_invalid_response() {
        let body = br#"{"id":"x","model":"m","choices":[],"usage":{"prompt_tokens":1,"completion_tokens":2,"total_tokens":3}}"#;
        match decode_validated::<ChatCompletionResponse>(body).unwrap_err() {
            PplxError::InvalidResponse { field, .. } => assert_eq!(field, "created"),
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = br#"{"id":"x","object":"chat.completion","model":"m","created":1,"choices":[],"usage":{"prompt_tokens":1,"completion_tokens":2,"total_tokens":3}}"#;
        assert!(decode_validated::<ChatCompletionResponse>(body).is_ok());
    }
}
