//! # 시간 구간 유틸리티
//!
//! 주문 조회 기간 필터, 대시보드 매출 집계, 월별 분석 버킷에 쓰이는
//! 날짜 계산 함수들입니다. 모든 계산은 UTC 기준입니다.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};

/// 닫힌 구간 `[from, to]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at <= self.to
    }
}

/// 주문 목록 조회에 쓰이는 기간 키
///
/// | 키 | 구간 |
/// |----|------|
/// | `today` | 오늘 00:00 ~ 현재 |
/// | `yesterday` | 어제 00:00 ~ 어제 23:59:59.999 |
/// | `today_and_yesterday` | 어제 00:00 ~ 현재 |
/// | `2d`, `7d`, `15d`, `30d` | N일 전 00:00 ~ 현재 |
/// | `2m`, `5m`, `10m`, `12m` | N개월 전 00:00 ~ 현재 |
/// | `all` 및 그 외 | 1970-01-01 ~ 현재 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRange {
    Today,
    Yesterday,
    TodayAndYesterday,
    Days(i64),
    Months(u32),
    All,
}

impl OrderRange {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "today" => OrderRange::Today,
            "yesterday" => OrderRange::Yesterday,
            "today_and_yesterday" => OrderRange::TodayAndYesterday,
            "2d" => OrderRange::Days(2),
            "7d" => OrderRange::Days(7),
            "15d" => OrderRange::Days(15),
            "30d" => OrderRange::Days(30),
            "2m" => OrderRange::Months(2),
            "5m" => OrderRange::Months(5),
            "10m" => OrderRange::Months(10),
            "12m" => OrderRange::Months(12),
            _ => OrderRange::All,
        }
    }

    pub fn window(&self, now: DateTime<Utc>) -> DateWindow {
        let today = start_of_day(now);
        let yesterday = today - Duration::days(1);

        match self {
            OrderRange::Today => DateWindow { from: today, to: now },
            OrderRange::Yesterday => DateWindow {
                from: yesterday,
                to: today - Duration::milliseconds(1),
            },
            OrderRange::TodayAndYesterday => DateWindow { from: yesterday, to: now },
            OrderRange::Days(days) => DateWindow {
                from: today - Duration::days(*days),
                to: now,
            },
            OrderRange::Months(months) => DateWindow {
                from: today
                    .checked_sub_months(Months::new(*months))
                    .unwrap_or(DateTime::UNIX_EPOCH),
                to: now,
            },
            OrderRange::All => DateWindow { from: DateTime::UNIX_EPOCH, to: now },
        }
    }
}

pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    midnight(at.date_naive())
}

pub fn end_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(at) + Duration::days(1) - Duration::milliseconds(1)
}

/// 주의 시작(일요일 00:00)
pub fn start_of_week(at: DateTime<Utc>) -> DateTime<Utc> {
    let offset = at.weekday().num_days_from_sunday() as i64;
    start_of_day(at) - Duration::days(offset)
}

pub fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(at.year(), at.month(), 1).unwrap_or(at.date_naive());
    midnight(first)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// 월별 집계 버킷 `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    /// `"Mar 2025"` 형식의 라벨
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// 현재 달을 마지막으로 하는 연속된 12개월 버킷을 오래된 순서로 반환합니다.
///
/// 마지막(현재) 달의 끝은 `now`입니다.
pub fn last_twelve_months(now: DateTime<Utc>) -> Vec<MonthBucket> {
    let current_month = start_of_month(now);

    (0..12u32)
        .rev()
        .filter_map(|back| {
            let start = current_month.checked_sub_months(Months::new(back))?;
            let end = if back == 0 {
                now
            } else {
                start.checked_add_months(Months::new(1))?
            };
            Some(MonthBucket {
                label: start.format("%b %Y").to_string(),
                start,
                end,
            })
        })
        .collect()
}

/// BSON 날짜를 chrono UTC 시각으로 변환합니다.
pub fn from_bson(at: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(DateTime::UNIX_EPOCH)
}

pub fn to_bson(at: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(at.timestamp_millis())
}

/// `YYYY-MM-DD` 또는 ISO-8601 날짜-시간 문자열에서 날짜 부분을 읽습니다.
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn deserialize_loose_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
    parse_loose_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("'{}' is not a valid date", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_order_range_from_key() {
        assert_eq!(OrderRange::from_key("today"), OrderRange::Today);
        assert_eq!(OrderRange::from_key("7d"), OrderRange::Days(7));
        assert_eq!(OrderRange::from_key("12m"), OrderRange::Months(12));
        assert_eq!(OrderRange::from_key("all"), OrderRange::All);
        assert_eq!(OrderRange::from_key("3w"), OrderRange::All);
        assert_eq!(OrderRange::from_key(""), OrderRange::All);
    }

    #[test]
    fn test_today_window_ends_now() {
        let now = at(2025, 3, 14, 15, 30);
        let window = OrderRange::Today.window(now);

        assert_eq!(window.from, at(2025, 3, 14, 0, 0));
        assert_eq!(window.to, now);
        assert!(window.contains(at(2025, 3, 14, 9, 0)));
        assert!(!window.contains(at(2025, 3, 13, 23, 59)));
    }

    #[test]
    fn test_yesterday_window_excludes_today() {
        let now = at(2025, 3, 14, 15, 30);
        let window = OrderRange::Yesterday.window(now);

        assert!(window.contains(at(2025, 3, 13, 0, 0)));
        assert!(window.contains(at(2025, 3, 13, 23, 59)));
        assert!(!window.contains(at(2025, 3, 14, 0, 0)));
    }

    #[test]
    fn test_day_and_month_windows() {
        let now = at(2025, 3, 31, 10, 0);

        assert_eq!(OrderRange::Days(7).window(now).from, at(2025, 3, 24, 0, 0));
        // 2월에는 31일이 없으므로 말일로 맞춰짐
        assert_eq!(OrderRange::Months(1).window(now).from, at(2025, 2, 28, 0, 0));
        assert_eq!(OrderRange::Months(12).window(now).from, at(2024, 3, 31, 0, 0));
        assert_eq!(OrderRange::All.window(now).from, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_start_of_week_is_sunday() {
        // 2025-03-14 는 금요일
        assert_eq!(start_of_week(at(2025, 3, 14, 12, 0)), at(2025, 3, 9, 0, 0));
        // 일요일은 자기 자신
        assert_eq!(start_of_week(at(2025, 3, 9, 18, 0)), at(2025, 3, 9, 0, 0));
    }

    #[test]
    fn test_day_and_month_bounds() {
        let now = at(2025, 3, 14, 15, 30);

        assert_eq!(start_of_month(now), at(2025, 3, 1, 0, 0));
        assert_eq!(end_of_day(now), at(2025, 3, 15, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn test_last_twelve_months_are_contiguous() {
        let now = at(2025, 3, 14, 15, 30);
        let buckets = last_twelve_months(now);

        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].label, "Apr 2024");
        assert_eq!(buckets[0].start, at(2024, 4, 1, 0, 0));
        assert_eq!(buckets[11].label, "Mar 2025");
        assert_eq!(buckets[11].end, now);

        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_bson_conversion_keeps_millis() {
        let at = Utc.with_ymd_and_hms(2025, 3, 12, 15, 30, 0).unwrap() + Duration::milliseconds(250);

        assert_eq!(from_bson(to_bson(at)), at);
        assert_eq!(to_bson(at).timestamp_millis(), at.timestamp_millis());
    }

    #[test]
    fn test_parse_loose_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1);

        assert_eq!(parse_loose_date("2025-03-01"), expected);
        assert_eq!(parse_loose_date("2025-03-01T18:30:00.000Z"), expected);
        assert_eq!(parse_loose_date("01/03/2025"), None);
        assert_eq!(parse_loose_date(""), None);
    }

    #[test]
    fn test_last_twelve_months_crosses_year() {
        let buckets = last_twelve_months(at(2025, 1, 5, 0, 0));

        assert_eq!(buckets[0].label, "Feb 2024");
        assert_eq!(buckets[10].label, "Dec 2024");
        assert_eq!(buckets[11].label, "Jan 2025");
    }
}
