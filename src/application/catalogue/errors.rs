use thiserror::Error;

use crate::domain::Isbn;

/// 貸出拒否の理由
///
/// 仕様上は単一の失敗（貸出拒否）だが、フロントエンドが案内文を
/// 出し分けられるよう理由を保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowRejectedReason {
    /// ISBNが未登録
    UnknownIsbn,
    /// 会員IDが未登録
    UnknownMember,
    /// 貸出可能な冊数がない
    NoAvailableCopies,
}

impl std::fmt::Display for BorrowRejectedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            BorrowRejectedReason::UnknownIsbn => "unknown ISBN",
            BorrowRejectedReason::UnknownMember => "unknown member",
            BorrowRejectedReason::NoAvailableCopies => "no available copies",
        };
        f.write_str(message)
    }
}

/// 蔵書管理アプリケーション層のエラー
///
/// いずれも回復可能な業務上の失敗。プロセスを落とす致命的エラーは存在しない。
/// 照会系の「見つからない」は`Option`/`bool`で表現するため、ここには現れない。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogueError {
    /// 同じISBNの書籍が既に登録されている
    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(Isbn),

    /// 貸出が拒否された
    #[error("Borrow rejected: {0}")]
    BorrowRejected(BorrowRejectedReason),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogueError>;
