use std::sync::Arc;

use tracing::warn;

use crate::clients::NeoClient;
use crate::domain::{ApiError, FeedQuery, FilterResult, NeoFeed};

pub struct AsteroidService {
    client: Arc<NeoClient>,
}

impl AsteroidService {
    pub fn new(client: Arc<NeoClient>) -> Self {
        Self { client }
    }

    pub async fn find_within(&self, query: &FeedQuery) -> Result<FilterResult, ApiError> {
        let feed = self
            .client
            .fetch_feed(&query.start_date, &query.end_date)
            .await?;
        Ok(filter_feed(&feed, query.within_km))
    }
}

/// Collects the names of all objects whose first close approach passed
/// strictly closer than `threshold_km`, in feed order. Records without a
/// usable miss distance are skipped with a warning; they never fail the
/// request.
pub fn filter_feed(feed: &NeoFeed, threshold_km: f64) -> FilterResult {
    let mut asteroids = Vec::new();

    for group in &feed.near_earth_objects {
        for object in &group.objects {
            let Some(approach) = object.close_approach_data.first() else {
                warn!(
                    "no close-approach data for {:?} on {}, skipping",
                    object.name, group.date
                );
                continue;
            };

            let km = match approach.miss_distance.kilometers.parse::<f64>() {
                Ok(km) => km,
                Err(_) => {
                    warn!(
                        "unparsable miss distance {:?} for {:?}, skipping",
                        approach.miss_distance.kilometers, object.name
                    );
                    continue;
                }
            };

            if km < threshold_km {
                asteroids.push(object.name.clone());
            }
        }
    }

    FilterResult { asteroids }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(json: serde_json::Value) -> NeoFeed {
        serde_json::from_str(&json.to_string()).unwrap()
    }

    fn record(name: &str, kilometers: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "close_approach_data": [
                { "miss_distance": { "kilometers": kilometers } }
            ]
        })
    }

    #[test]
    fn includes_records_below_threshold() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Eros", "400000")]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert_eq!(result.asteroids, vec!["Eros"]);
    }

    #[test]
    fn excludes_records_above_threshold() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Eros", "600000")]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert!(result.asteroids.is_empty());
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Eros", "500000")]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert!(result.asteroids.is_empty());
    }

    #[test]
    fn zero_threshold_matches_nothing() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Eros", "0"), record("Apophis", "12345.6")]
            }
        }));
        let result = filter_feed(&feed, 0.0);
        assert!(result.asteroids.is_empty());
    }

    #[test]
    fn preserves_feed_order_across_groups() {
        // Raw document with keys out of date order; decoding must not
        // re-sort them.
        let feed: NeoFeed = serde_json::from_str(
            r#"{
                "near_earth_objects": {
                    "2022-01-02": [
                        { "name": "Bennu", "close_approach_data": [{ "miss_distance": { "kilometers": "100" } }] },
                        { "name": "Ryugu", "close_approach_data": [{ "miss_distance": { "kilometers": "200" } }] }
                    ],
                    "2022-01-01": [
                        { "name": "Itokawa", "close_approach_data": [{ "miss_distance": { "kilometers": "300" } }] }
                    ]
                }
            }"#,
        )
        .unwrap();
        let result = filter_feed(&feed, 1000.0);
        assert_eq!(result.asteroids, vec!["Bennu", "Ryugu", "Itokawa"]);
    }

    #[test]
    fn keeps_duplicate_names_from_multiple_groups() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Apophis", "100")],
                "2022-01-02": [record("Apophis", "150")]
            }
        }));
        let result = filter_feed(&feed, 1000.0);
        assert_eq!(result.asteroids, vec!["Apophis", "Apophis"]);
    }

    #[test]
    fn only_first_approach_entry_counts() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [{
                    "name": "Eros",
                    "close_approach_data": [
                        { "miss_distance": { "kilometers": "900000" } },
                        { "miss_distance": { "kilometers": "1" } }
                    ]
                }]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert!(result.asteroids.is_empty());
    }

    #[test]
    fn skips_record_without_approaches() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [
                    { "name": "Ghost", "close_approach_data": [] },
                    record("Eros", "400000")
                ]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert_eq!(result.asteroids, vec!["Eros"]);
    }

    #[test]
    fn skips_record_with_unparsable_distance() {
        let feed = feed(serde_json::json!({
            "near_earth_objects": {
                "2022-01-01": [record("Garbled", "not-a-number"), record("Eros", "400000")]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert_eq!(result.asteroids, vec!["Eros"]);
    }

    #[test]
    fn empty_feed_yields_empty_list() {
        let feed = feed(serde_json::json!({ "near_earth_objects": {} }));
        let result = filter_feed(&feed, 500000.0);
        assert!(result.asteroids.is_empty());
    }

    #[test]
    fn decode_ignores_extra_upstream_fields() {
        let feed = feed(serde_json::json!({
            "element_count": 1,
            "links": { "self": "https://example.invalid/feed" },
            "near_earth_objects": {
                "2022-01-01": [{
                    "name": "Eros",
                    "id": "2000433",
                    "absolute_magnitude_h": 10.31,
                    "close_approach_data": [{
                        "close_approach_date": "2022-01-01",
                        "miss_distance": {
                            "astronomical": "0.002",
                            "kilometers": "400000"
                        }
                    }]
                }]
            }
        }));
        let result = filter_feed(&feed, 500000.0);
        assert_eq!(result.asteroids, vec!["Eros"]);
    }

    #[test]
    fn feed_without_object_map_fails_decode() {
        let parsed: Result<NeoFeed, _> =
            serde_json::from_str(&serde_json::json!({ "element_count": 0 }).to_string());
        assert!(parsed.is_err());
    }
}
