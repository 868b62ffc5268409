use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Isbn, LoanId, MemberId, ReturnLoanError};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出レコード - 1冊の書籍の1回の貸出
///
/// ビジネスルール：
/// - 貸出日はストアの時計による「今日」
/// - 返却期限は貸出日 + 14日（固定ポリシー）
/// - `returned_on`が`None`の間は貸出中（アクティブ）
/// - 返却は一度きり。返却済みの貸出は恒久的にクローズされ、再貸出も取り消しもできない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    // 識別子
    pub id: LoanId,

    // 他レコードへの参照（キーのみ）
    pub isbn: Isbn,
    pub member_id: MemberId,

    // 貸出管理の責務
    pub loaned_on: NaiveDate,
    pub due_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    /// 貸出中か（返却日が未記録か）
    pub fn is_active(&self) -> bool {
        self.returned_on.is_none()
    }
}

/// 純粋関数：貸出を作成する
///
/// 返却期限は貸出日 + 14日。返却日は未記録（アクティブ状態）で始まる。
/// 副作用なし。新しいLoanを返す。
pub fn create_loan(id: LoanId, isbn: Isbn, member_id: MemberId, loaned_on: NaiveDate) -> Loan {
    Loan {
        id,
        isbn,
        member_id,
        loaned_on,
        due_on: loaned_on + Duration::days(LOAN_PERIOD_DAYS),
        returned_on: None,
    }
}

/// 純粋関数：貸出を返却済みに遷移させる
///
/// ビジネスルール：
/// - 返却できるのはアクティブな貸出のみ
/// - 返却済みの貸出への再返却は`AlreadyReturned`
///
/// 副作用なし。返却日が記録された新しいLoanを返す。
pub fn mark_returned(loan: &Loan, returned_on: NaiveDate) -> Result<Loan, ReturnLoanError> {
    if !loan.is_active() {
        return Err(ReturnLoanError::AlreadyReturned);
    }

    Ok(Loan {
        returned_on: Some(returned_on),
        ..loan.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // TDD: create_loan() のテスト
    #[test]
    fn test_create_loan_sets_due_date_fourteen_days_out() {
        let loaned_on = date(2024, 3, 1);
        let loan = create_loan(
            LoanId::new(1),
            Isbn::new("9780134685991"),
            MemberId::new(1),
            loaned_on,
        );

        // 貸出期間は14日間
        assert_eq!(loan.due_on, date(2024, 3, 15));
        assert_eq!(loan.loaned_on, loaned_on);
        assert_eq!(loan.returned_on, None);
        assert!(loan.is_active());
    }

    #[test]
    fn test_create_loan_due_date_crosses_month_boundary() {
        let loan = create_loan(
            LoanId::new(7),
            Isbn::new("9780134685991"),
            MemberId::new(2),
            date(2024, 2, 20),
        );
        assert_eq!(loan.due_on, date(2024, 3, 5));
    }

    // TDD: mark_returned() のテスト
    #[test]
    fn test_mark_returned_records_date_and_closes_loan() {
        let loan = create_loan(
            LoanId::new(1),
            Isbn::new("9780134685991"),
            MemberId::new(1),
            date(2024, 3, 1),
        );

        let returned = mark_returned(&loan, date(2024, 3, 10)).unwrap();

        assert_eq!(returned.returned_on, Some(date(2024, 3, 10)));
        assert!(!returned.is_active());
        // 返却以外のフィールドは変化しない
        assert_eq!(returned.id, loan.id);
        assert_eq!(returned.due_on, loan.due_on);
    }

    #[test]
    fn test_mark_returned_fails_when_already_returned() {
        let loan = create_loan(
            LoanId::new(1),
            Isbn::new("9780134685991"),
            MemberId::new(1),
            date(2024, 3, 1),
        );
        let returned = mark_returned(&loan, date(2024, 3, 10)).unwrap();

        let result = mark_returned(&returned, date(2024, 3, 11));
        assert_eq!(result.unwrap_err(), ReturnLoanError::AlreadyReturned);
    }
}
