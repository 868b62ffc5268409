use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Loan, MemberId};

/// 会員ごとの貸出統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoanStats {
    /// 全貸出数（返却済みを含む）
    pub total: u32,
    /// 未返却の貸出数
    pub active: u32,
}

/// 純粋関数：会員ごとの貸出統計を集計する
///
/// 貸出を1回走査し、会員IDごとに`total`と`active`を数える。
///
/// 不変条件：
/// - `total` = その会員のこれまでの全貸出数。貸出ごとに必ず加算される
/// - `active` = そのうち未返却のもの。常に`active <= total`
/// - 会員の貸出履歴（`list_loans_by_member`）の件数と`total`は一致する
pub fn compute_loan_stats<'a>(
    loans: impl IntoIterator<Item = &'a Loan>,
) -> HashMap<MemberId, LoanStats> {
    let mut stats: HashMap<MemberId, LoanStats> = HashMap::new();

    for loan in loans {
        let entry = stats.entry(loan.member_id).or_default();
        entry.total += 1;
        if loan.is_active() {
            entry.active += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Isbn, LoanId, create_loan, mark_returned};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(id: u64, member: u64) -> Loan {
        create_loan(
            LoanId::new(id),
            Isbn::new("9780134685991"),
            MemberId::new(member),
            date(2024, 3, 1),
        )
    }

    #[test]
    fn test_stats_empty_when_no_loans() {
        let stats = compute_loan_stats([]);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_stats_count_total_and_active_separately() {
        let active = loan(1, 1);
        let returned = mark_returned(&loan(2, 1), date(2024, 3, 5)).unwrap();
        let other_member = loan(3, 2);

        let loans = [active, returned, other_member];
        let stats = compute_loan_stats(loans.iter());

        // 返却済みの貸出もtotalには必ず数えられる
        let first = stats[&MemberId::new(1)];
        assert_eq!(first.total, 2);
        assert_eq!(first.active, 1);

        let second = stats[&MemberId::new(2)];
        assert_eq!(second.total, 1);
        assert_eq!(second.active, 1);
    }

    #[test]
    fn test_stats_member_with_only_returned_loans_still_appears() {
        let returned = mark_returned(&loan(1, 1), date(2024, 3, 5)).unwrap();
        let stats = compute_loan_stats(std::iter::once(&returned));

        let entry = stats[&MemberId::new(1)];
        assert_eq!(entry.total, 1);
        assert_eq!(entry.active, 0);
    }
}
