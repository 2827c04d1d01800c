use crate::instant::LogInstant;

/// Request methods the analyzers accept. Any other token is rejected by
/// the parser and the line never reaches an analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Head,
}

impl Method {
    pub fn from_token(token: &str) -> Option<Method> {
        match token {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "HEAD" => Some(Method::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
        }
    }
}

/// One parsed access-log line. Built once by the parser, read by every
/// analyzer, never mutated. `status` and `size` are 0 where the input had
/// a dash; `tz` keeps the raw offset token for re-emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub host: String,
    pub user: Option<String>,
    pub time: LogInstant,
    pub method: Method,
    pub request: String,
    pub status: u16,
    pub size: u64,
    pub tz: String,
}

impl Record {
    /// Status in [500, 600): the server failed, the line is worth keeping.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tokens_round_trip() {
        for token in ["GET", "POST", "HEAD"] {
            assert_eq!(Method::from_token(token).map(|m| m.as_str()), Some(token));
        }
        assert_eq!(Method::from_token("PUT"), None);
        assert_eq!(Method::from_token("get"), None);
    }

    #[test]
    fn status_class_helpers() {
        let mut record = Record {
            host: "remote.host".into(),
            user: None,
            time: LogInstant::parse("01/Jul/1995:00:00:01 -0400").expect("parses"),
            method: Method::Get,
            request: "/index.html".into(),
            status: 500,
            size: 0,
            tz: "-0400".into(),
        };
        assert!(record.is_server_error());
        record.status = 599;
        assert!(record.is_server_error());
        record.status = 404;
        assert!(!record.is_server_error());
        assert!(record.is_not_found());
    }
}
