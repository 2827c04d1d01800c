//! Common Log Format line parsing.
//!
//! This is the only place raw log text is interpreted. One line becomes one
//! [`Record`] or one [`ClfError`]; the caller decides what a failed line
//! costs (the pipeline logs a warning and drops it).

use std::str::FromStr;
use std::sync::OnceLock;

use basalt_events::{LogInstant, Method, Record};
use regex::Regex;
use thiserror::Error;

/// What can go wrong with one input line. Every variant is recoverable:
/// the line is skipped and the stream continues.
#[derive(Debug, Error)]
pub enum ClfError {
    #[error("line does not match the common log format")]
    Malformed,

    #[error("bad timestamp '{text}'")]
    BadTimestamp {
        text: String,
        #[source]
        source: chrono::format::ParseError,
    },

    #[error("unsupported method token '{0}'")]
    UnsupportedMethod(String),

    #[error("request field has no method and path")]
    BadRequest,

    #[error("field '{0}' is neither a number nor '-'")]
    BadNumber(String),
}

// Apache common log format: %h %l %u %t "%r" %>s %b
// Field layout follows the access-log convention: whitespace-separated,
// the timestamp bracketed, the request line quoted, and '-' standing in
// for a missing user, status, or size.
fn clf_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<host>\S+)",     // %h
            r"\s+\S+",             // %l, nobody fills this in
            r"\s+(?P<user>\S+)",   // %u
            r"\s+\[(?P<time>[^\]]+)\]",
            r#"\s+"(?P<request>.*)""#,
            r"\s+(?P<status>\S+)",
            r"\s+(?P<size>\S+)",
            r"\s*$",
        ))
        .expect("the CLF pattern is a valid regex")
    })
}

/// Parses one access-log line into a [`Record`].
pub fn parse_line(line: &str) -> Result<Record, ClfError> {
    let caps = clf_pattern().captures(line).ok_or(ClfError::Malformed)?;

    let time_text = &caps["time"];
    let time = LogInstant::parse(time_text).map_err(|source| ClfError::BadTimestamp {
        text: time_text.to_string(),
        source,
    })?;
    // the parse above guarantees the "<stamp> <offset>" split exists
    let tz = time_text
        .split_once(' ')
        .map(|(_, zone)| zone.to_string())
        .unwrap_or_default();

    // "%r" is `METHOD path PROTO`; the protocol token is not kept.
    let mut request_parts = caps["request"].split_whitespace();
    let method_token = request_parts.next().ok_or(ClfError::BadRequest)?;
    let method = Method::from_token(method_token)
        .ok_or_else(|| ClfError::UnsupportedMethod(method_token.to_string()))?;
    let request = request_parts
        .next()
        .ok_or(ClfError::BadRequest)?
        .to_string();

    let user = match &caps["user"] {
        "-" => None,
        user => Some(user.to_string()),
    };

    Ok(Record {
        host: caps["host"].to_string(),
        user,
        time,
        method,
        request,
        status: dash_number(&caps["status"])?,
        size: dash_number(&caps["size"])?,
        tz,
    })
}

// '-' means the server had nothing to report; normalize it to zero.
fn dash_number<T: FromStr + Default>(field: &str) -> Result<T, ClfError> {
    if field == "-" {
        return Ok(T::default());
    }
    field
        .parse()
        .map_err(|_| ClfError::BadNumber(field.to_string()))
}
