use crate::application::catalogue::{BorrowRejectedReason, CatalogueError, LoanStats};
use crate::domain::{Book, Loan, Member};

/// 書籍の1行表示
pub fn format_book(book: &Book, available: u32) -> String {
    format!(
        "{} | {} | {} | available {}/{}",
        book.isbn, book.title, book.author, available, book.total_copies
    )
}

/// 貸出の1行表示
pub fn format_loan(loan: &Loan) -> String {
    let status = match loan.returned_on {
        None => "ACTIVE".to_string(),
        Some(date) => format!("RETURNED ON {date}"),
    };
    format!(
        "Loan#{} | ISBN = {} | member = {} | loaned = {} | due = {} | {}",
        loan.id, loan.isbn, loan.member_id, loan.loaned_on, loan.due_on, status
    )
}

/// メールアドレスの表示（未設定は "(none)"）
pub fn format_email(email: Option<&str>) -> String {
    match email {
        Some(value) => value.to_string(),
        None => "(none)".to_string(),
    }
}

/// 会員一覧の1行表示（貸出統計つき）
pub fn format_member_line(member: &Member, stats: LoanStats) -> String {
    format!(
        "ID: {} | Name: {} | Email: {} | Total loans: {} | Active loans: {}",
        member.id,
        member.name,
        format_email(member.email.as_deref()),
        stats.total,
        stats.active
    )
}

/// 業務上の失敗を1行メッセージに対応付ける
pub fn failure_message(error: &CatalogueError) -> String {
    match error {
        CatalogueError::DuplicateIsbn(_) => "A book with that ISBN already exists!".to_string(),
        CatalogueError::BorrowRejected(reason) => match reason {
            BorrowRejectedReason::UnknownIsbn => "Loan failed! No book with that ISBN.".to_string(),
            BorrowRejectedReason::UnknownMember => {
                "Loan failed! No member with that ID.".to_string()
            }
            BorrowRejectedReason::NoAvailableCopies => {
                "Loan failed! No copies available right now.".to_string()
            }
        },
    }
}
