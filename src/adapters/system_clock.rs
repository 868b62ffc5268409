use chrono::{Local, NaiveDate};

use crate::ports::Clock;

/// システム時計アダプタ
///
/// ローカルタイムゾーンの今日の日付を返す。本番の唯一の時計実装。
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
