//! Pure request dispatch for the items handler.
//!
//! Maps a transport-neutral request onto the storage action to run.

use serde_json::{json, Value};

use super::{Item, ItemId, ItemRequestError};

/// Message returned when a requested item does not exist.
pub const ITEM_NOT_FOUND: &str = "Item not found";

/// The parts of an HTTP request the items handler looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRequest {
    pub method: String,
    /// The `{id}` path parameter, when the route has one.
    pub id: Option<String>,
    /// Raw request body. Bytes that are not UTF-8 are reported as an
    /// invalid item, like any other malformed JSON.
    pub body: Option<Vec<u8>>,
}

/// What the handler should do with the repository.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemAction {
    Put(Item),
    Get(ItemId),
    Delete(ItemId),
}

/// Decides which action a request maps to.
///
/// `POST` stores the JSON body, `GET` and `DELETE` act on the path id.
/// Every other method is rejected.
pub fn dispatch(request: ItemRequest) -> Result<ItemAction, ItemRequestError> {
    match request.method.as_str() {
        "POST" => {
            let body = request
                .body
                .filter(|b| !b.iter().all(u8::is_ascii_whitespace))
                .ok_or_else(|| ItemRequestError::InvalidItem("body is empty".to_string()))?;
            let value: Value = serde_json::from_slice(&body)
                .map_err(|e| ItemRequestError::InvalidItem(e.to_string()))?;
            Ok(ItemAction::Put(Item::from_value(value)?))
        }
        "GET" => Ok(ItemAction::Get(path_id(request.id)?)),
        "DELETE" => Ok(ItemAction::Delete(path_id(request.id)?)),
        other => Err(ItemRequestError::MethodNotAllowed(other.to_string())),
    }
}

fn path_id(id: Option<String>) -> Result<ItemId, ItemRequestError> {
    ItemId::new(id.ok_or(ItemRequestError::MissingId)?)
}

/// JSON body used for every items error response.
pub fn error_body(message: impl std::fmt::Display) -> Value {
    json!({ "error": message.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, id: Option<&str>, body: Option<&str>) -> ItemRequest {
        ItemRequest {
            method: method.to_string(),
            id: id.map(str::to_string),
            body: body.map(|b| b.as_bytes().to_vec()),
        }
    }

    #[test]
    fn test_post_yields_put() {
        let action = dispatch(request("POST", None, Some(r#"{"ItemId":"1","v":true}"#))).unwrap();
        match action {
            ItemAction::Put(item) => assert_eq!(item.id().as_str(), "1"),
            other => panic!("expected Put, got {other:?}"),
        }
    }

    #[test]
    fn test_post_ignores_path_id() {
        let action = dispatch(request("POST", Some("2"), Some(r#"{"ItemId":"1"}"#))).unwrap();
        assert!(matches!(action, ItemAction::Put(item) if item.id().as_str() == "1"));
    }

    #[test]
    fn test_post_rejects_bad_bodies() {
        for body in [None, Some(""), Some("   "), Some("{not json"), Some("[]"), Some("{}")] {
            let err = dispatch(request("POST", None, body)).unwrap_err();
            assert!(
                matches!(err, ItemRequestError::InvalidItem(_)),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_post_rejects_non_utf8_body() {
        let err = dispatch(ItemRequest {
            method: "POST".to_string(),
            id: None,
            body: Some(b"{\xFF}".to_vec()),
        })
        .unwrap_err();
        assert!(matches!(err, ItemRequestError::InvalidItem(_)));
    }

    #[test]
    fn test_get_and_delete_use_path_id() {
        assert_eq!(
            dispatch(request("GET", Some("abc"), None)).unwrap(),
            ItemAction::Get(ItemId::new("abc").unwrap())
        );
        assert_eq!(
            dispatch(request("DELETE", Some("abc"), None)).unwrap(),
            ItemAction::Delete(ItemId::new("abc").unwrap())
        );
    }

    #[test]
    fn test_get_without_id_is_rejected() {
        assert_eq!(
            dispatch(request("GET", None, None)),
            Err(ItemRequestError::MissingId)
        );
        assert_eq!(
            dispatch(request("DELETE", Some(""), None)),
            Err(ItemRequestError::MissingId)
        );
    }

    #[test]
    fn test_other_methods_not_allowed() {
        for method in ["PUT", "PATCH", "HEAD", "OPTIONS", "get"] {
            let err = dispatch(request(method, Some("1"), None)).unwrap_err();
            assert_eq!(err, ItemRequestError::MethodNotAllowed(method.to_string()));
        }
    }

    #[test]
    fn test_error_body_shape() {
        assert_eq!(
            error_body(ITEM_NOT_FOUND),
            serde_json::json!({"error": "Item not found"})
        );
    }
}
