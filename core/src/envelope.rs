//! The panel's JSON envelopes.
//!
//! Every application API payload is wrapped either as a single resource,
//! `{"object": "user", "attributes": {...}}`, or as a collection,
//! `{"object": "list", "data": [{"object": "user", "attributes": {...}}, ...]}`.
//! The decoders here unwrap those shapes generically; the `object`
//! discriminator is carried but not checked.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// A single resource wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub object: String,
    pub attributes: T,
}

impl<T> Envelope<T> {
    pub fn new(object: impl Into<String>, attributes: T) -> Self {
        Self {
            object: object.into(),
            attributes,
        }
    }
}

/// A collection wrapper. Element order is the panel's and is kept as is.
///
/// List responses also carry a `meta.pagination` member; it is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub object: String,
    pub data: Vec<Envelope<T>>,
}

impl<T> ListEnvelope<T> {
    pub fn into_attributes(self) -> Vec<T> {
        self.data.into_iter().map(|e| e.attributes).collect()
    }
}

/// Decode `{object, attributes: T}` and return the attributes.
pub fn decode_single<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes).map_err(ApiError::Decode)?;
    Ok(envelope.attributes)
}

/// Decode `{object, data: [{object, attributes: T}]}` into the attributes, in order.
///
/// A single malformed element fails the whole decode.
pub fn decode_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let envelope: ListEnvelope<T> = serde_json::from_slice(bytes).map_err(ApiError::Decode)?;
    Ok(envelope.into_attributes())
}

/// Wrap `value` in a single-resource envelope tagged `object`.
pub fn encode_single<T: Serialize>(object: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(&Envelope::new(object, value)).map_err(ApiError::Encode)
}

/// Wrap `values` in a `"list"` envelope whose elements are tagged `object`.
pub fn encode_list<T: Serialize>(object: &str, values: &[T]) -> Result<Vec<u8>> {
    let envelope = ListEnvelope {
        object: "list".to_string(),
        data: values.iter().map(|v| Envelope::new(object, v)).collect(),
    };
    serde_json::to_vec(&envelope).map_err(ApiError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, User};

    fn user(id: u32, email: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "external_id": null,
            "uuid": "c4022c6c-9bf1-4a23-bff9-519cceb38335",
            "username": format!("user{id}"),
            "email": email,
            "first_name": "First",
            "last_name": "Last",
            "language": "en",
            "root_admin": false,
            "2fa": false,
            "created_at": "2024-01-20T10:00:00+00:00",
            "updated_at": "2024-01-21T11:30:00+00:00"
        }))
        .unwrap()
    }

    #[test]
    fn single_round_trip_returns_the_record() {
        let original = user(7, "seven@example.com");
        let bytes = encode_single("user", &original).unwrap();
        let decoded: User = decode_single(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn list_round_trip_preserves_order() {
        let users = vec![
            user(3, "c@example.com"),
            user(1, "a@example.com"),
            user(2, "b@example.com"),
        ];
        let bytes = encode_list("user", &users).unwrap();
        let decoded: Vec<User> = decode_list(&bytes).unwrap();
        assert_eq!(decoded, users);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let decoded: Vec<Location> = decode_list(br#"{"object":"list","data":[]}"#).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn pagination_meta_is_ignored() {
        let body = br#"{
            "object": "list",
            "data": [{"object": "location", "attributes": {
                "id": 1, "short": "eu", "long": "Europe",
                "created_at": "2024-01-20T10:00:00+00:00",
                "updated_at": "2024-01-20T10:00:00+00:00"
            }}],
            "meta": {"pagination": {"total": 1, "count": 1, "per_page": 50,
                     "current_page": 1, "total_pages": 1, "links": {}}}
        }"#;
        let decoded: Vec<Location> = decode_list(body).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].short, "eu");
    }

    #[test]
    fn truncated_json_is_a_decode_error() {
        let err = decode_single::<User>(br#"{"object":"user","attributes":{"id":1"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let mut value = serde_json::to_value(Envelope::new("user", user(1, "a@example.com"))).unwrap();
        value["attributes"]["id"] = serde_json::json!("one");
        let bytes = serde_json::to_vec(&value).unwrap();
        let err = decode_single::<User>(&bytes).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn missing_attributes_is_a_decode_error() {
        let err = decode_single::<Location>(br#"{"object":"location"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn one_bad_element_fails_the_whole_list() {
        let body = br#"{"object":"list","data":[
            {"object":"location","attributes":{"id":1,"short":"eu","long":null,
              "created_at":"2024-01-20T10:00:00+00:00","updated_at":"2024-01-20T10:00:00+00:00"}},
            {"object":"location","attributes":{"id":"two"}}
        ]}"#;
        let err = decode_list::<Location>(body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        assert!(matches!(decode_single::<User>(b""), Err(ApiError::Decode(_))));
        assert!(matches!(decode_list::<User>(b""), Err(ApiError::Decode(_))));
    }
}
