use serde::{Deserialize, Serialize};

/// ISBN - 蔵書管理コンテキストにおける書籍の外部識別子
///
/// コアでは不透明な一意キーとして扱う。形式の検証と大文字への正規化は
/// フロントエンドの責務であり、コアは受け取った値をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - サービスが採番する連番（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(u64);

impl MemberId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 貸出ID - サービスが採番する連番（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(u64);

impl LoanId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ID採番用のシーケンス
///
/// 不変条件：1から始まり、1ずつ増加する。値は減算も再利用もされず、
/// ストアの再生成時のみリセットされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence(u64);

impl IdSequence {
    /// 新規作成（次に払い出す値は1）
    pub fn new() -> Self {
        Self(1)
    }

    /// 次の値を払い出し、シーケンスを進める
    pub fn next_value(&mut self) -> u64 {
        let value = self.0;
        self.0 += 1;
        value
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
