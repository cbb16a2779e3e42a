use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

// Inbound request types

/// Raw decoded request body. All fields are optional so that presence
/// checks happen in the validator, not the JSON decoder.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub within: Option<Within>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Within {
    pub value: Option<f64>,
}

/// Normalized output of validation, consumed by the upstream client
/// and the feed filter.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub start_date: String,
    pub end_date: String,
    pub within_km: f64,
}

// Upstream feed types

/// Typed decoding of the NeoWs feed payload. Unknown fields are ignored;
/// a feed missing `near_earth_objects` fails to decode.
#[derive(Debug, Clone, Deserialize)]
pub struct NeoFeed {
    #[serde(deserialize_with = "ordered_date_groups")]
    pub near_earth_objects: Vec<DateGroup>,
}

/// One date key of the feed map with its records, in document order.
#[derive(Debug, Clone)]
pub struct DateGroup {
    pub date: String,
    pub objects: Vec<NeoObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeoObject {
    pub name: String,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseApproach {
    pub miss_distance: MissDistance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

// The feed's date keys must be kept in the order the payload supplies
// them; decoding through a map type would re-sort or scramble them.
fn ordered_date_groups<'de, D>(deserializer: D) -> Result<Vec<DateGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DateGroupVisitor;

    impl<'de> Visitor<'de> for DateGroupVisitor {
        type Value = Vec<DateGroup>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of date keys to arrays of near-earth objects")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((date, objects)) = map.next_entry::<String, Vec<NeoObject>>()? {
                groups.push(DateGroup { date, objects });
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_map(DateGroupVisitor)
}

// Response types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub asteroids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

// Error types

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(reqwest::StatusCode),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // The caller only ever sees the generic error flag; the concrete
        // failure goes to the log.
        let status = match &self {
            ApiError::Validation(msg) => {
                tracing::warn!("rejected request: {}", msg);
                axum::http::StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(e) => {
                tracing::error!("upstream call failed: {:?}", e);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::UpstreamStatus(code) => {
                tracing::error!("upstream returned HTTP {}", code);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "error": true });
        (status, axum::Json(body)).into_response()
    }
}
