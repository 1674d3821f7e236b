/// Crawl status definitions for tracking a page analysis lifecycle
///
/// A page record moves through `queued -> running -> {done, error}`. A new
/// crawl may be re-triggered from the initial state or either terminal state,
/// but never while another attempt is running.
use std::fmt;

/// Represents the current status of a page analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlStatus {
    /// Record registered, no crawl attempt started yet
    Queued,

    /// A crawl attempt is in progress
    Running,

    /// The last crawl attempt completed; analysis fields are populated
    Done,

    /// The last crawl attempt failed; `error_message` holds the cause
    Error,
}

impl CrawlStatus {
    /// Returns true if this is a terminal state (done or error)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Returns true if a new crawl attempt may start from this status
    ///
    /// Re-crawls are permitted from the initial state and from both terminal
    /// states. A running attempt must finish first.
    pub fn can_start(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(Self::Queued),
            "running" => Some(Self::Running),
            "done" => Some(Self::Done),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Returns all possible statuses
    pub fn all_statuses() -> Vec<Self> {
        vec![Self::Queued, Self::Running, Self::Done, Self::Error]
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!CrawlStatus::Queued.is_terminal());
        assert!(!CrawlStatus::Running.is_terminal());

        assert!(CrawlStatus::Done.is_terminal());
        assert!(CrawlStatus::Error.is_terminal());
    }

    #[test]
    fn test_can_start() {
        assert!(CrawlStatus::Queued.can_start());
        assert!(CrawlStatus::Done.can_start());
        assert!(CrawlStatus::Error.can_start());

        assert!(!CrawlStatus::Running.can_start());
    }

    #[test]
    fn test_roundtrip_db_string() {
        for status in CrawlStatus::all_statuses() {
            let db_str = status.to_db_string();
            let parsed = CrawlStatus::from_db_string(db_str);
            assert_eq!(Some(status), parsed, "Failed roundtrip for {:?}", status);
        }
    }

    #[test]
    fn test_from_db_string_invalid() {
        assert_eq!(CrawlStatus::from_db_string("fetching"), None);
        assert_eq!(CrawlStatus::from_db_string(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlStatus::Queued), "queued");
        assert_eq!(format!("{}", CrawlStatus::Running), "running");
        assert_eq!(format!("{}", CrawlStatus::Done), "done");
        assert_eq!(format!("{}", CrawlStatus::Error), "error");
    }
}
