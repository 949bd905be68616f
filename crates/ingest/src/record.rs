use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use tagwindow_core::{Event, TagWindowError, Timestamp};

/// Format of the `created_at` field in tweet payloads,
/// e.g. `Thu Oct 29 17:51:01 +0000 2015`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Typed view of the fields we care about in a raw tweet record.
#[derive(Debug, Deserialize)]
struct TweetRecord {
    /// Milliseconds since epoch, serialized as a string.
    timestamp_ms: Option<String>,
    created_at: Option<String>,
    entities: Option<Entities>,
    /// Present on rate-limit control messages instead of tweet fields.
    limit: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Entities {
    #[serde(default)]
    hashtags: Vec<Hashtag>,
}

#[derive(Debug, Deserialize)]
struct Hashtag {
    text: String,
}

/// Parse one line-delimited JSON record into an `Event`.
///
/// Rate-limit markers and schema mismatches are errors for the caller to
/// skip, never fatal. A record with a timestamp but no hashtags is a
/// valid zero-tag event.
pub fn parse_line(line: &str) -> Result<Event, TagWindowError> {
    let record: TweetRecord = serde_json::from_str(line)
        .map_err(|e| TagWindowError::Malformed(e.to_string()))?;

    if record.limit.is_some() {
        return Err(TagWindowError::RateLimit);
    }

    let timestamp = extract_timestamp(&record)?;
    let tags = record
        .entities
        .map(|e| e.hashtags.into_iter().map(|h| h.text).collect())
        .unwrap_or_default();

    Ok(Event::new(timestamp, tags))
}

/// `timestamp_ms` wins; `created_at` is the fallback for payloads that
/// omit the millisecond field.
fn extract_timestamp(record: &TweetRecord) -> Result<Timestamp, TagWindowError> {
    if let Some(ms) = &record.timestamp_ms {
        return ms
            .parse::<Timestamp>()
            .map_err(|_| TagWindowError::Malformed(format!("bad timestamp_ms: {ms}")));
    }
    if let Some(created) = &record.created_at {
        return DateTime::parse_from_str(created, CREATED_AT_FORMAT)
            .map(|dt| dt.timestamp_millis() as Timestamp)
            .map_err(|_| TagWindowError::Malformed(format!("bad created_at: {created}")));
    }
    Err(TagWindowError::Malformed("no timestamp field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tweet_with_hashtags() {
        let line = r#"{"created_at":"Thu Oct 29 17:51:01 +0000 2015","timestamp_ms":"1446141061000","entities":{"hashtags":[{"text":"Spark"},{"text":"Apache"}]}}"#;
        let event = parse_line(line).unwrap();
        assert_eq!(event.timestamp(), 1_446_141_061_000);
        assert_eq!(event.tags(), &["Spark".to_string(), "Apache".to_string()]);
    }

    #[test]
    fn duplicate_hashtags_collapse() {
        let line = r#"{"timestamp_ms":"1000","entities":{"hashtags":[{"text":"a"},{"text":"a"},{"text":"b"}]}}"#;
        let event = parse_line(line).unwrap();
        assert_eq!(event.tag_count(), 2);
    }

    #[test]
    fn missing_hashtags_is_a_zero_tag_event() {
        let line = r#"{"timestamp_ms":"1000"}"#;
        let event = parse_line(line).unwrap();
        assert_eq!(event.tag_count(), 0);
        assert!(event.pairs().is_empty());
    }

    #[test]
    fn rate_limit_marker_is_flagged() {
        let line = r#"{"limit":{"track":262,"timestamp_ms":"1446141062000"}}"#;
        assert!(matches!(parse_line(line), Err(TagWindowError::RateLimit)));
    }

    #[test]
    fn malformed_json_is_flagged() {
        assert!(matches!(
            parse_line("{not json"),
            Err(TagWindowError::Malformed(_))
        ));
    }

    #[test]
    fn record_without_timestamp_is_malformed() {
        let line = r#"{"entities":{"hashtags":[{"text":"x"}]}}"#;
        assert!(matches!(
            parse_line(line),
            Err(TagWindowError::Malformed(_))
        ));
    }

    #[test]
    fn created_at_fallback() {
        let line = r#"{"created_at":"Thu Oct 29 17:51:01 +0000 2015","entities":{"hashtags":[]}}"#;
        let event = parse_line(line).unwrap();
        assert_eq!(event.timestamp(), 1_446_141_061_000);
    }

    #[test]
    fn bad_timestamp_ms_is_malformed() {
        let line = r#"{"timestamp_ms":"not-a-number"}"#;
        assert!(matches!(
            parse_line(line),
            Err(TagWindowError::Malformed(_))
        ));
    }
}
