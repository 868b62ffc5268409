use std::io::{BufRead, Write};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Isbn;

/// ISBNの形式：数字・X・ハイフンの10〜17文字（厳密なISBN検証ではない）
static ISBN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9X-]{10,17}$").unwrap());

/// メールアドレスの形式：local@domain（RFC完全準拠ではない）
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@(?:[A-Z0-9-]+\.)+[A-Z]{2,}$").unwrap());

/// ISBNとして受け付けられる形か
pub fn is_valid_isbn(input: &str) -> bool {
    ISBN_RE.is_match(input)
}

/// メールアドレスとして受け付けられる形か
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

/// 対話型コンソール
///
/// 行単位で入力を読み、プロンプトと結果を書き出す。各読み取りヘルパーは
/// 妥当な値が得られるまで再プロンプトし、入力の終端（または入出力エラー）は
/// `None`で通知する。呼び出し側は`None`を正常終了のシグナルとして扱う。
///
/// コアに渡す値はここで検証・正規化を済ませる。コア自身は一切の
/// パースやI/Oを行わない。
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// 1行書き出す
    pub fn write_line(&mut self, line: &str) -> Option<()> {
        writeln!(self.writer, "{line}").ok()
    }

    /// 1行読む（前後の空白は除く）。終端なら`None`
    fn read_line(&mut self) -> Option<String> {
        let mut buffer = String::new();
        let bytes = self.reader.read_line(&mut buffer).ok()?;
        if bytes == 0 {
            return None;
        }
        Some(buffer.trim().to_string())
    }

    /// プロンプトを出して1行読む
    fn prompt(&mut self, prompt: &str) -> Option<String> {
        write!(self.writer, "{prompt}").ok()?;
        self.writer.flush().ok()?;
        self.read_line()
    }

    /// 整数を読む（パースできるまで再プロンプト）
    pub fn read_i64(&mut self, prompt: &str) -> Option<i64> {
        loop {
            let line = self.prompt(prompt)?;
            match line.parse::<i64>() {
                Ok(value) => return Some(value),
                Err(_) => self.write_line("Please enter a number.")?,
            }
        }
    }

    /// 非負整数を読む（冊数用）
    pub fn read_u32(&mut self, prompt: &str) -> Option<u32> {
        loop {
            let line = self.prompt(prompt)?;
            match line.parse::<u32>() {
                Ok(value) => return Some(value),
                Err(_) => self.write_line("Must be a non-negative integer (0 allowed).")?,
            }
        }
    }

    /// ID（正の整数）を読む
    pub fn read_id(&mut self, prompt: &str) -> Option<u64> {
        loop {
            let line = self.prompt(prompt)?;
            match line.parse::<u64>() {
                Ok(value) => return Some(value),
                Err(_) => self.write_line("Please enter a valid integer.")?,
            }
        }
    }

    /// 空でない文字列を読む
    pub fn read_non_blank(&mut self, prompt: &str) -> Option<String> {
        loop {
            let line = self.prompt(prompt)?;
            if !line.is_empty() {
                return Some(line);
            }
            self.write_line("Please enter a non-blank string.")?;
        }
    }

    /// ISBNを読む
    ///
    /// 形式チェックに通るまで再プロンプトし、大文字に正規化してから
    /// コア用の`Isbn`を作る。
    pub fn read_isbn(&mut self, prompt: &str) -> Option<Isbn> {
        loop {
            let line = self.prompt(prompt)?;
            if is_valid_isbn(&line) {
                return Some(Isbn::new(line.to_uppercase()));
            }
            self.write_line("Please enter a valid ISBN. Example: 978-0134685991")?;
        }
    }

    /// 任意入力のメールアドレスを読む
    ///
    /// 空行は「メールアドレスなし」として内側の`None`になる。
    /// 形式が不正な場合は再プロンプト。外側の`None`は入力の終端。
    pub fn read_optional_email(&mut self, prompt: &str) -> Option<Option<String>> {
        loop {
            let line = self.prompt(prompt)?;
            if line.is_empty() {
                return Some(None);
            }
            if is_valid_email(&line) {
                return Some(Some(line));
            }
            self.write_line("Email looks invalid. Try again or leave it blank.")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.writer.clone()).unwrap()
    }

    // ISBN形式のテスト
    #[test]
    fn test_isbn_shape_accepts_digits_hyphens_and_x() {
        assert!(is_valid_isbn("9780134685991"));
        assert!(is_valid_isbn("978-0134685991"));
        assert!(is_valid_isbn("0-19-852663-X"));
        assert!(is_valid_isbn("0-19-852663-x"));
    }

    #[test]
    fn test_isbn_shape_rejects_wrong_length_or_characters() {
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn("123456789")); // 9文字は短すぎる
        assert!(!is_valid_isbn("978-0134685991-000000")); // 18文字は長すぎる
        assert!(!is_valid_isbn("97801346ABCD"));
        assert!(!is_valid_isbn("978 0134685991"));
    }

    // メールアドレス形式のテスト
    #[test]
    fn test_email_shape_accepts_local_at_domain() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c_d%e@sub.example.co.jp"));
    }

    #[test]
    fn test_email_shape_rejects_malformed_addresses() {
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice@example.c"));
    }

    // Console のテスト
    #[test]
    fn test_read_id_reprompts_until_valid() {
        let mut console = console("abc\n-4\n17\n");
        assert_eq!(console.read_id("ID: "), Some(17));
        assert!(output(&console).contains("Please enter a valid integer."));
    }

    #[test]
    fn test_read_id_returns_none_at_end_of_input() {
        let mut console = console("");
        assert_eq!(console.read_id("ID: "), None);
    }

    #[test]
    fn test_read_u32_rejects_negative_numbers() {
        let mut console = console("-1\n0\n");
        assert_eq!(console.read_u32("Copies: "), Some(0));
        assert!(output(&console).contains("non-negative"));
    }

    #[test]
    fn test_read_non_blank_skips_empty_lines() {
        let mut console = console("\n  \nEffective Java\n");
        assert_eq!(
            console.read_non_blank("Title: "),
            Some("Effective Java".to_string())
        );
    }

    #[test]
    fn test_read_isbn_normalizes_to_uppercase() {
        let mut console = console("not-an-isbn\n0-19-852663-x\n");
        let isbn = console.read_isbn("ISBN: ").unwrap();
        assert_eq!(isbn.value(), "0-19-852663-X");
        assert!(output(&console).contains("valid ISBN"));
    }

    #[test]
    fn test_read_optional_email_blank_means_absent() {
        let mut console = console("\n");
        assert_eq!(console.read_optional_email("Email: "), Some(None));
    }

    #[test]
    fn test_read_optional_email_reprompts_on_invalid_then_accepts() {
        let mut console = console("not-an-email\nalice@example.com\n");
        assert_eq!(
            console.read_optional_email("Email: "),
            Some(Some("alice@example.com".to_string()))
        );
        assert!(output(&console).contains("looks invalid"));
    }
}
