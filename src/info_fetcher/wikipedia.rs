//! Wire format of the encyclopedia query: request parameters and response parsing.

use crate::info_fetcher::interface::FlowerInfo;
use serde_json::Value;

pub const THUMBNAIL_SIZE: &str = "500";

/// Parameters for one lookup, in the order they are sent.
pub fn query_params(label: &str) -> Vec<(&'static str, String)> {
    vec![
        ("format", "json".to_string()),
        ("action", "query".to_string()),
        ("prop", "extracts|pageimages".to_string()),
        ("exintro", String::new()),
        ("explaintext", String::new()),
        ("titles", label.to_string()),
        ("indexpageids", String::new()),
        ("redirects", "1".to_string()),
        ("pithumbsize", THUMBNAIL_SIZE.to_string()),
    ]
}

/// Reads `query.pageids[0]` and then the extract and thumbnail of that page.
/// Anything missing or malformed comes back as an empty string.
pub fn parse_info(body: &str) -> FlowerInfo {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) => return FlowerInfo::default(),
    };

    let page_id = match &json["query"]["pageids"][0] {
        Value::String(id) => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return FlowerInfo::default(),
    };

    let page = &json["query"]["pages"][page_id.as_str()];

    FlowerInfo {
        description: string_at(&page["extract"]),
        thumbnail_url: string_at(&page["thumbnail"]["source"]),
    }
}

fn string_at(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}
