use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DateValidation;
use crate::domain::{ApiError, FeedQuery, FilterRequest};

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

pub struct Validator;

impl Validator {
    /// Checks the raw request and produces the normalized query. No
    /// upstream call happens unless this passes.
    pub fn validate_filter_request(
        request: &FilterRequest,
        mode: DateValidation,
    ) -> Result<FeedQuery, ApiError> {
        let start_date = Self::validate_date("dateStart", request.date_start.as_deref(), mode)?;
        let end_date = Self::validate_date("dateEnd", request.date_end.as_deref(), mode)?;

        let within_km = request
            .within
            .as_ref()
            .and_then(|w| w.value)
            .ok_or_else(|| ApiError::Validation("within.value is required".to_string()))?;
        if within_km < 0.0 {
            return Err(ApiError::Validation(
                "within.value must be non-negative".to_string(),
            ));
        }

        Ok(FeedQuery {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            within_km,
        })
    }

    fn validate_date<'a>(
        field: &str,
        value: Option<&'a str>,
        mode: DateValidation,
    ) -> Result<&'a str, ApiError> {
        let value = value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Validation(format!("{} is required", field)))?;

        if mode == DateValidation::Strict && !DATE_PATTERN.is_match(value) {
            return Err(ApiError::Validation(format!(
                "{} must match YYYY-MM-DD",
                field
            )));
        }

        Ok(value)
    }
}
