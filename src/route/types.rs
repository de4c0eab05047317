//! Route domain types plus the Directions REST reply schema.

use serde::Deserialize;

/// A resolved driving route ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Resolved start address (may differ from the free-form request).
    pub origin: String,
    /// Resolved end address.
    pub destination: String,
    pub distance: String,
    pub duration: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
}

// ============================================================================
// Directions REST wire schema (only the fields we consume)
// ============================================================================

#[derive(Deserialize, Debug)]
pub(crate) struct DirectionsReply {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<WireRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireRoute {
    pub legs: Vec<WireLeg>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance: WireText,
    pub duration: WireText,
    #[serde(default)]
    pub steps: Vec<WireStep>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireText {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct WireStep {
    pub html_instructions: String,
    pub distance: WireText,
    pub duration: WireText,
}

/// Strips HTML tags from step instructions for terminal display.
/// The provider embeds markup like `<b>` and `<div style="...">`.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                // Block-level markers separate clauses; keep them readable
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    // Collapse the spacing the tag removal introduced
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl From<WireLeg> for PlannedRoute {
    fn from(leg: WireLeg) -> Self {
        let steps = leg
            .steps
            .into_iter()
            .map(|s| RouteStep {
                instruction: strip_tags(&s.html_instructions),
                distance: s.distance.text,
                duration: s.duration.text,
            })
            .collect();
        PlannedRoute {
            origin: leg.start_address,
            destination: leg.end_address,
            distance: leg.distance.text,
            duration: leg.duration.text,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_basic() {
        assert_eq!(strip_tags("Turn <b>left</b> onto Main St"), "Turn left onto Main St");
    }

    #[test]
    fn test_strip_tags_div_markup() {
        let html = r#"Merge onto <b>I-95</b><div style="font-size:0.9em">Toll road</div>"#;
        assert_eq!(strip_tags(html), "Merge onto I-95 Toll road");
    }

    #[test]
    fn test_strip_tags_plain_text_unchanged() {
        assert_eq!(strip_tags("Head north"), "Head north");
    }

    #[test]
    fn test_directions_reply_parses() {
        let json = r#"{
            "status": "OK",
            "routes": [{
                "legs": [{
                    "start_address": "1 Main St",
                    "end_address": "Airport Rd",
                    "distance": {"text": "12.3 km", "value": 12300},
                    "duration": {"text": "18 mins", "value": 1080},
                    "steps": [{
                        "html_instructions": "Head <b>north</b>",
                        "distance": {"text": "0.5 km"},
                        "duration": {"text": "2 mins"}
                    }]
                }]
            }]
        }"#;
        let reply: DirectionsReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.status, "OK");
        let leg = reply
            .routes
            .into_iter()
            .next()
            .unwrap()
            .legs
            .into_iter()
            .next()
            .unwrap();
        let route = PlannedRoute::from(leg);
        assert_eq!(route.origin, "1 Main St");
        assert_eq!(route.duration, "18 mins");
        assert_eq!(route.steps[0].instruction, "Head north");
    }

    #[test]
    fn test_zero_results_reply_parses() {
        let json = r#"{"status": "ZERO_RESULTS", "routes": []}"#;
        let reply: DirectionsReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.status, "ZERO_RESULTS");
        assert!(reply.routes.is_empty());
    }
}
