//! Paginated list envelope shared by every admin collection endpoint.
//!
//! The backend answers `GET /api/<entity>?page=&limit=&search=` with
//! `{ "data": [...], "totalCount": n, "totalPages": m }`. The envelope is
//! external, so decoding is lenient: a missing or non-array `data` is an empty
//! page, a missing `totalCount` is zero and a missing `totalPages` is derived
//! from the count.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameter names understood by list endpoints.
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_SEARCH: &str = "search";

/// Raw list envelope as it arrives on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub total_count: Option<Value>,
    #[serde(default)]
    pub total_pages: Option<Value>,
}

/// Normalized page of a server-backed collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
        }
    }
}

impl<T> ListResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Problems that make an envelope unusable even under lenient decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The body is not a JSON object at all.
    NotJson(String),
    /// `data` is an array but one of its records does not fit the entity.
    BadRecord { index: usize, reason: String },
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::NotJson(reason) => write!(f, "response is not valid JSON: {}", reason),
            EnvelopeError::BadRecord { index, reason } => {
                write!(f, "record #{} has an unexpected shape: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}

/// `ceil(total_count / page_size)`, never less than one page.
pub fn total_pages_for(total_count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_count.div_ceil(page_size);
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

fn as_count(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ListEnvelope {
    /// Parses a response body. Only a body that is not JSON is rejected here;
    /// shape problems inside the object are handled by [`ListEnvelope::normalize`].
    pub fn parse(body: &str) -> Result<Self, EnvelopeError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_str(body).map_err(|e| EnvelopeError::NotJson(e.to_string()))?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| EnvelopeError::NotJson(e.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// Converts the envelope into a [`ListResult`] for a screen with `page_size`.
    ///
    /// Records beyond `page_size` are dropped so a page never holds more rows
    /// than the screen asked for.
    pub fn normalize<T: DeserializeOwned>(
        self,
        page_size: u32,
    ) -> Result<ListResult<T>, EnvelopeError> {
        let records = match self.data {
            Some(Value::Array(records)) => records,
            _ => Vec::new(),
        };

        let mut items = Vec::with_capacity(records.len().min(page_size as usize));
        for (index, record) in records.into_iter().take(page_size as usize).enumerate() {
            let item = serde_json::from_value(record).map_err(|e| EnvelopeError::BadRecord {
                index,
                reason: e.to_string(),
            })?;
            items.push(item);
        }

        let total_count = as_count(self.total_count.as_ref()).unwrap_or(0);
        let total_pages = match as_count(self.total_pages.as_ref()) {
            Some(pages) if pages > 0 => u32::try_from(pages).unwrap_or(u32::MAX),
            _ => total_pages_for(total_count, page_size),
        };

        Ok(ListResult {
            items,
            total_count,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    fn normalize(body: &str, page_size: u32) -> ListResult<Row> {
        ListEnvelope::parse(body)
            .and_then(|e| e.normalize(page_size))
            .unwrap()
    }

    #[test]
    fn test_total_pages_never_zero() {
        assert_eq!(total_pages_for(0, 10), 1);
        assert_eq!(total_pages_for(10, 10), 1);
        assert_eq!(total_pages_for(11, 10), 2);
        assert_eq!(total_pages_for(7, 0), 7);
    }

    #[test]
    fn test_full_envelope() {
        let result = normalize(
            r#"{"data":[{"id":"a"},{"id":"b"}],"totalCount":12,"totalPages":6}"#,
            2,
        );
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].id, "a");
        assert_eq!(result.total_count, 12);
        assert_eq!(result.total_pages, 6);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let result = normalize(r#"{"data":"oops"}"#, 10);
        assert!(result.items.is_empty());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.total_pages, 1);

        let result = normalize(r#"{"data":[{"id":"x"}],"totalCount":25}"#, 10);
        assert_eq!(result.total_pages, 3);

        let result = normalize("", 10);
        assert_eq!(result, ListResult::default());
    }

    #[test]
    fn test_zero_total_pages_is_clamped() {
        let result = normalize(r#"{"data":[],"totalCount":0,"totalPages":0}"#, 10);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_oversized_page_is_truncated() {
        let result = normalize(
            r#"{"data":[{"id":"1"},{"id":"2"},{"id":"3"}],"totalCount":3}"#,
            2,
        );
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].id, "2");
    }

    #[test]
    fn test_counts_as_strings() {
        let result = normalize(r#"{"data":[],"totalCount":"40","totalPages":"4"}"#, 10);
        assert_eq!(result.total_count, 40);
        assert_eq!(result.total_pages, 4);
    }

    #[test]
    fn test_bad_record_and_bad_json() {
        let err = ListEnvelope::parse(r#"{"data":[{"id":"1"},{"name":"x"}]}"#)
            .unwrap()
            .normalize::<Row>(10)
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::BadRecord { index: 1, .. }));

        assert!(matches!(
            ListEnvelope::parse("<html>"),
            Err(EnvelopeError::NotJson(_))
        ));
    }
}
