use serde::{Deserialize, Serialize};

use super::MemberId;

/// 会員レコード
///
/// IDはサービスが採番する（1始まりの連番、再利用なし）。
/// 名前は不変。メールアドレスは任意項目で、後から変更・削除できる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: Option<String>,
}

impl Member {
    /// 名前のソートキー（大文字小文字を区別しない整列用）
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// 純粋関数：メールアドレス入力を正規化する
///
/// 空文字・空白のみの値は「メールアドレスなし」として`None`に畳み込む。
/// それ以外は前後の空白を除いて保持する。形式の検証はフロントエンドの責務。
pub fn normalize_email(email: Option<String>) -> Option<String> {
    match email {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_keeps_value() {
        assert_eq!(
            normalize_email(Some("alice@example.com".to_string())),
            Some("alice@example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_email_trims_whitespace() {
        assert_eq!(
            normalize_email(Some("  alice@example.com ".to_string())),
            Some("alice@example.com".to_string())
        );
    }

    #[test]
    fn test_normalize_email_blank_means_absent() {
        assert_eq!(normalize_email(Some(String::new())), None);
        assert_eq!(normalize_email(Some("   ".to_string())), None);
        assert_eq!(normalize_email(None), None);
    }

    #[test]
    fn test_name_key_lowercases() {
        let member = Member {
            id: MemberId::new(1),
            name: "Ada Lovelace".to_string(),
            email: None,
        };
        assert_eq!(member.name_key(), "ada lovelace");
    }
}
