use chrono::NaiveDate;

/// 時計ポート
///
/// 「今日の日付」はこのシステム唯一の環境入力。決定的なテストのために
/// アダプタとして注入可能にする。貸出日・返却期限・返却日はすべて
/// このポート経由で取得した日付から決まる。
pub trait Clock: Send + Sync {
    /// 今日の日付（時刻は持たない）
    fn today(&self) -> NaiveDate;
}
