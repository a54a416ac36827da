//! Response envelopes
//!
//! The backend answers either with a bare body or with `{ data, message }`,
//! depending on the endpoint.

use serde::{Deserialize, de::DeserializeOwned};

use medstore::ids::TypedId;

use super::ApiError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped {
        data: T,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// `{ id }` returned by create endpoints.
#[derive(Debug, Deserialize)]
#[serde(bound = "")]
struct Created<T> {
    #[serde(alias = "_id")]
    id: TypedId<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

/// Decode a body that may or may not be wrapped in `data`.
pub(super) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;

    Ok(envelope.into_inner())
}

/// Decode the id handed back by a create endpoint.
pub(super) fn decode_created<T>(body: &[u8]) -> Result<TypedId<T>, ApiError> {
    let created: Created<T> = decode(body)?;

    Ok(created.id)
}

/// Pull `message` out of an error body, if it is JSON and has one.
pub(super) fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use medstore::catalog::{Product, ProductId};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_bare_and_wrapped_lists() -> TestResult {
        let bare = json!([{ "_id": "p1", "productTitle": "ICU Bed" }]).to_string();
        let wrapped = json!({
            "data": [{ "_id": "p1", "productTitle": "ICU Bed" }],
            "message": "ok"
        })
        .to_string();

        let bare: Vec<Product> = decode(bare.as_bytes())?;
        let wrapped: Vec<Product> = decode(wrapped.as_bytes())?;

        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 1);

        Ok(())
    }

    #[test]
    fn decodes_created_ids() -> TestResult {
        let bare = json!({ "id": "p1" }).to_string();
        let wrapped = json!({ "data": { "_id": 42 }, "message": "created" }).to_string();

        let first: ProductId = decode_created(bare.as_bytes())?;
        let second: ProductId = decode_created(wrapped.as_bytes())?;

        assert_eq!(first.as_str(), "p1");
        assert_eq!(second.as_str(), "42");

        Ok(())
    }

    #[test]
    fn missing_id_is_a_decode_error() {
        let result = decode_created::<Product>(br#"{ "message": "created" }"#);

        assert!(
            matches!(result, Err(ApiError::Decode(_))),
            "expected decode error, got {result:?}"
        );
    }

    #[test]
    fn extracts_error_messages() {
        assert_eq!(
            error_message(br#"{ "message": "Model not found" }"#),
            Some("Model not found".to_string())
        );
        assert_eq!(error_message(b"<html>502</html>"), None);
        assert_eq!(error_message(br#"{ "message": "" }"#), None);
    }
}
