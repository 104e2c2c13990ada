use serde::Deserialize;

use crate::hints::HintError;
use crate::models::{GLOBAL_PAGE, Hint};

#[derive(Debug, Deserialize)]
struct HintsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    hints: Vec<HintRecord>,
}

#[derive(Debug, Deserialize)]
struct HintRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: String,
}

/// Fetches the hints for `page` from the dashboard API, tagged for the page
/// and the global marker.
pub async fn fetch_hints(base_url: &str, page: &str) -> Result<Vec<Hint>, HintError> {
    let url = format!("{}/api/hints", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .get(&url)
        .query(&[("page", page)])
        .send()
        .await
        .map_err(|e| HintError::ProviderUnavailable(e.to_string()))?
        .error_for_status()
        .map_err(|e| HintError::ProviderUnavailable(e.to_string()))?;

    let body: HintsResponse = response
        .json()
        .await
        .map_err(|e| HintError::ProviderUnavailable(e.to_string()))?;

    if !body.success {
        return Err(HintError::ProviderUnavailable(
            "provider reported failure".into(),
        ));
    }

    Ok(body
        .hints
        .into_iter()
        .filter(|record| !record.id.is_empty())
        .map(|record| Hint {
            id: record.id,
            title: record.title,
            text: record.content,
            pages: vec![page.to_string(), GLOBAL_PAGE.to_string()],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_with_missing_optional_fields() {
        let raw = r#"{"success": true, "hints": [{"id": "shop-limited", "content": "Limited items sell out."}]}"#;
        let body: HintsResponse = serde_json::from_str(raw).unwrap();
        assert!(body.success);
        assert_eq!(body.hints.len(), 1);
        assert_eq!(body.hints[0].id, "shop-limited");
        assert!(body.hints[0].title.is_none());
    }

    #[test]
    fn response_tolerates_unknown_and_absent_fields() {
        let raw = r#"{"success": true, "hints": [{"id": "a", "content": "x", "extra": 1}, {"title": "no id"}], "served_at": "now"}"#;
        let body: HintsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.hints.len(), 2);
        // The record without an id is dropped by fetch_hints, not a parse error.
        assert!(body.hints[1].id.is_empty());
    }

    #[tokio::test]
    async fn unreachable_provider_is_reported_not_panicked() {
        let err = fetch_hints("http://127.0.0.1:9", "shop").await.unwrap_err();
        assert!(matches!(err, HintError::ProviderUnavailable(_)));
    }
}
