use serde::{Deserialize, Serialize};

use super::Isbn;

/// 書籍レコード
///
/// ISBNを主キーとする。作成後は不変（タイトル・著者・総冊数は変更されない）。
/// 削除されることもない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: String,
    /// 総冊数（非負、作成時に固定）
    pub total_copies: u32,
}

impl Book {
    /// タイトルのソートキー（大文字小文字を区別しない整列用）
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    /// 純粋関数：タイトルが前方一致するか（大文字小文字を区別しない）
    pub fn title_starts_with(&self, prefix: &str) -> bool {
        self.title.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> Book {
        Book {
            isbn: Isbn::new("9780134685991"),
            title: title.to_string(),
            author: "Joshua Bloch".to_string(),
            total_copies: 2,
        }
    }

    #[test]
    fn test_title_starts_with_ignores_case() {
        let b = book("Effective Java");
        assert!(b.title_starts_with("eff"));
        assert!(b.title_starts_with("EFFECTIVE"));
        assert!(!b.title_starts_with("Java"));
    }

    #[test]
    fn test_title_starts_with_empty_prefix_matches() {
        assert!(book("Effective Java").title_starts_with(""));
    }

    #[test]
    fn test_title_key_lowercases() {
        assert_eq!(book("Effective Java").title_key(), "effective java");
    }
}
