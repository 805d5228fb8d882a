use serde::{Deserialize, Serialize};

/// An externally sourced insights item shown on the news page.
///
/// Everything beyond `id` and `title` is optional; the view renders fallback
/// text/imagery for absent fields. No invariants are enforced here because
/// the upstream feed is not under our control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f32>,
}
