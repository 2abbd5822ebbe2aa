//! Score Model (满意度评分)

use serde::{Deserialize, Serialize};

/// Default name recorded when the customer stays anonymous
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous";

/// Customer satisfaction score entity (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Score {
    pub id: i64,
    pub customer_name: String,
    /// Stored as text; kiosks send numbers, emoji or short labels
    pub score: String,
    pub created_at: i64,
}

/// Create score payload (`POST /api/score`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreCreate {
    pub customer_name: Option<String>,
    pub score: Option<serde_json::Value>,
}

impl ScoreCreate {
    /// Score as stored text, `None` when missing or blank
    pub fn score_text(&self) -> Option<String> {
        let text = match self.score.as_ref()? {
            serde_json::Value::Null => return None,
            serde_json::Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Customer name, falling back to [`ANONYMOUS_CUSTOMER`]
    pub fn customer_name_or_default(&self) -> String {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ANONYMOUS_CUSTOMER)
            .to_string()
    }
}
