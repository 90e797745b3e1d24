//! Utility functions for minicontacts

use crate::common::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Parse duration string (e.g., "500ms", "5s", "1m", "1h")
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::InvalidConfig("empty duration".into()));
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| Error::InvalidConfig(format!("missing duration unit: {}", s)))?;
    let (num_str, unit) = s.split_at(split);

    let num: u64 = num_str
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("invalid duration: {}", s)))?;

    let secs_per_unit = |factor: u64| {
        num.checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| Error::InvalidConfig(format!("duration out of range: {}", s)))
    };

    let duration = match unit {
        "ms" => Duration::from_millis(num),
        "s" => Duration::from_secs(num),
        "m" => secs_per_unit(60)?,
        "h" => secs_per_unit(3600)?,
        _ => {
            return Err(Error::InvalidConfig(format!(
                "unknown duration unit: {}",
                unit
            )))
        }
    };

    if duration.is_zero() {
        return Err(Error::InvalidConfig(format!("duration must be positive: {}", s)));
    }

    Ok(duration)
}

/// Run `fut` inside a fresh execution window of `limit`.
///
/// The window is dropped as soon as the future settles. Expiry abandons the
/// pending request and reports `Error::Timeout` naming `op`.
pub async fn with_timeout<T, E, F>(op: &str, limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    Error: From<E>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(Error::from),
        Err(_) => {
            tracing::warn!(op, limit_ms = limit.as_millis() as u64, "operation timed out");
            Err(Error::Timeout(format!(
                "{} did not complete within {}ms",
                op,
                limit.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration(" 2m ").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("0s").is_err());
        assert!(matches!(
            parse_duration("307445734561825861m"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(parse_duration("5124095576030432h").is_err());
        assert!(parse_duration("99999999999999999999s").is_err());
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let ok: Result<u32> =
            with_timeout("ok", Duration::from_secs(1), async { Ok::<_, Error>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<()> = with_timeout("query", Duration::from_secs(1), async {
            Err::<(), _>(Error::Query("boom".into()))
        })
        .await;
        assert!(matches!(err, Err(Error::Query(_))));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let start = std::time::Instant::now();
        let res: Result<()> = with_timeout(
            "stuck",
            Duration::from_millis(20),
            std::future::pending::<std::result::Result<(), Error>>(),
        )
        .await;
        assert!(matches!(res, Err(Error::Timeout(_))));
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
