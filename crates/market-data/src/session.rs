use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Trading-session state of the Tehran exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketSession {
    Open,
    /// Last half hour before the close
    Closing,
    Closed,
}

impl MarketSession {
    pub fn label(&self) -> &'static str {
        match self {
            MarketSession::Open => "market open",
            MarketSession::Closing => "closing",
            MarketSession::Closed => "market closed",
        }
    }
}

const OPEN_MINUTE: u32 = 9 * 60;
const CLOSING_MINUTE: u32 = 12 * 60 + 30;
const CLOSE_MINUTE: u32 = 13 * 60;

/// Session for a Tehran-local wall-clock time
pub fn market_session(local_time: NaiveTime) -> MarketSession {
    let minute = local_time.hour() * 60 + local_time.minute();
    if (OPEN_MINUTE..CLOSING_MINUTE).contains(&minute) {
        MarketSession::Open
    } else if (CLOSING_MINUTE..CLOSE_MINUTE).contains(&minute) {
        MarketSession::Closing
    } else {
        MarketSession::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_session_windows() {
        assert_eq!(market_session(at(8, 59)), MarketSession::Closed);
        assert_eq!(market_session(at(9, 0)), MarketSession::Open);
        assert_eq!(market_session(at(12, 29)), MarketSession::Open);
        assert_eq!(market_session(at(12, 30)), MarketSession::Closing);
        assert_eq!(market_session(at(12, 59)), MarketSession::Closing);
        assert_eq!(market_session(at(13, 0)), MarketSession::Closed);
        assert_eq!(market_session(at(23, 10)), MarketSession::Closed);
    }
}
