//! 时间来源
//!
//! 工单的创建/关闭时间以及学期、公告的"今天"判断都从这里取时间，
//! 测试中替换为 [`FixedClock`]。

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    /// 当前时间 (UTC)
    fn now(&self) -> DateTime<Utc>;

    /// 当前日期 (UTC)
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// 今天零点的 unix 时间戳
    fn start_of_today(&self) -> i64 {
        day_start_timestamp(self.today())
    }
}

/// 某一天零点 (UTC) 的 unix 时间戳
pub fn day_start_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时钟，可手动调整
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// 固定在某天的某个时刻
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let now = date
            .and_hms_opt(hour, minute, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_default();
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.write() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.read().map(|guard| *guard).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advance() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let clock = FixedClock::at(date, 23, 30);
        assert_eq!(clock.today(), date);

        clock.advance(Duration::hours(1));
        assert_eq!(clock.today(), date.succ_opt().unwrap());
    }

    #[test]
    fn test_start_of_today() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        let clock = FixedClock::at(date, 12, 0);
        assert_eq!(clock.start_of_today(), 86_400);
    }
}
