//! Wire types for the `/chat` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`. Carries the literal input text, including
/// leading/trailing whitespace and emptiness; no client-side trimming.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// One reply from the assistant, optionally carrying route endpoints and a
/// Waze deep link resolved by the server.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub directions_info: Option<DirectionsInfo>,
}

/// Structured payload describing a route's endpoints plus optional detail.
/// Origin and destination are free-form location descriptors (addresses or
/// place names), not coordinates; the directions provider resolves them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DirectionsInfo {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub waze_url: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub steps: Vec<RouteStepInfo>,
}

/// A single step the server included in `directions_info.steps`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RouteStepInfo {
    pub instruction: String,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_message_verbatim() {
        let req = ChatRequest {
            message: "  take me to the airport  ".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"message":"  take me to the airport  "}"#);
    }

    #[test]
    fn test_empty_message_serializes() {
        let req = ChatRequest {
            message: String::new(),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"message":""}"#);
    }

    #[test]
    fn test_response_without_directions() {
        let json = r#"{"response":"Hello there"}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.response, "Hello there");
        assert!(resp.directions_info.is_none());
    }

    #[test]
    fn test_response_with_directions() {
        let json = r#"{
            "response": "On it",
            "directions_info": {
                "origin": "current location",
                "destination": "airport",
                "waze_url": "https://www.waze.com/ul?q=airport",
                "distance": "12.3 km",
                "duration": "18 mins",
                "steps": [
                    {"instruction": "Head north", "distance": "0.5 km", "duration": "2 mins"}
                ]
            }
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let info = resp.directions_info.unwrap();
        assert_eq!(info.origin, "current location");
        assert_eq!(info.destination, "airport");
        assert_eq!(
            info.waze_url.as_deref(),
            Some("https://www.waze.com/ul?q=airport")
        );
        assert_eq!(info.steps.len(), 1);
        assert_eq!(info.steps[0].instruction, "Head north");
    }

    #[test]
    fn test_response_tolerates_unknown_fields() {
        // Server replies carry extra fields (map_url, polyline, coordinates)
        let json = r#"{
            "response": "On it",
            "directions_info": {
                "origin": "a",
                "destination": "b",
                "map_url": "https://maps.example/static",
                "overview_polyline": "abc123"
            }
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let info = resp.directions_info.unwrap();
        assert!(info.waze_url.is_none());
        assert!(info.steps.is_empty());
    }

    #[test]
    fn test_response_missing_text_is_an_error() {
        let json = r#"{"directions_info": {"origin": "a", "destination": "b"}}"#;
        assert!(serde_json::from_str::<ChatResponse>(json).is_err());
    }
}
