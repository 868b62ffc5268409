use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::{
    self, Book, IdSequence, Isbn, Loan, LoanId, Member, MemberId, normalize_email,
};
use crate::ports::Clock;

use super::errors::{BorrowRejectedReason, CatalogueError, Result};
use super::loan_stats::{LoanStats, compute_loan_stats};

/// 蔵書管理サービス
///
/// 書籍・会員・貸出の3つのレコードコレクションと、ISBNごとの
/// 貸出中冊数カウンタをひとつのインメモリストアとして所有する。
///
/// 設計方針：
/// - ストアがすべてのレコードを排他的に所有し、呼び出し側にはクローンを返す。
///   外部参照経由でストアの不変条件を迂回することはできない
/// - 変更はコマンド操作（`&mut self`）経由のみ。照会は`&self`
/// - ID採番はストア所有のシーケンスで行う（1始まり、再利用なし、
///   ストア再生成時のみリセット）
/// - 時計は注入されたポート経由。環境入力はこれだけ
///
/// # 不変条件
/// すべてのISBNについて
/// `貸出可能冊数 = 総冊数 − そのISBNの未返却貸出数`
/// が常に成り立つ。カウンタは`borrow`/`return_loan`の中で
/// 貸出コレクションと同一のスコープで更新される。
pub struct CatalogueService {
    // 書籍は挿入順を保持する（同一タイトルの整列タイブレークに使う）
    books: Vec<Book>,
    book_index_by_isbn: HashMap<Isbn, usize>,

    // 連番キーのBTreeMapなので、反復順 = ID昇順 = 作成順
    members: BTreeMap<MemberId, Member>,
    loans: BTreeMap<LoanId, Loan>,

    // ISBNごとの貸出中冊数（複数冊の蔵書をサポートするための導出カウンタ）
    active_loans_by_isbn: HashMap<Isbn, u32>,

    member_id_seq: IdSequence,
    loan_id_seq: IdSequence,

    clock: Arc<dyn Clock>,
}

impl CatalogueService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            books: Vec::new(),
            book_index_by_isbn: HashMap::new(),
            members: BTreeMap::new(),
            loans: BTreeMap::new(),
            active_loans_by_isbn: HashMap::new(),
            member_id_seq: IdSequence::new(),
            loan_id_seq: IdSequence::new(),
            clock,
        }
    }

    // ========================================================================
    // コマンド操作
    // ========================================================================

    /// 書籍を登録する
    ///
    /// ビジネスルール：
    /// - ISBNは一意。既に登録済みなら`DuplicateIsbn`を返し、既存レコードは変更しない
    /// - 登録と同時に貸出中カウンタを0で初期化する
    pub fn add_book(
        &mut self,
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        total_copies: u32,
    ) -> Result<Book> {
        if self.book_index_by_isbn.contains_key(&isbn) {
            return Err(CatalogueError::DuplicateIsbn(isbn));
        }

        let book = Book {
            isbn: isbn.clone(),
            title: title.into(),
            author: author.into(),
            total_copies,
        };

        self.book_index_by_isbn.insert(isbn.clone(), self.books.len());
        self.books.push(book.clone());
        self.active_loans_by_isbn.insert(isbn, 0);

        Ok(book)
    }

    /// 会員を登録する
    ///
    /// 常に成功する。IDは連番で採番され、空・空白のみのメールアドレスは
    /// 「メールアドレスなし」に正規化される。
    pub fn register_member(&mut self, name: impl Into<String>, email: Option<String>) -> Member {
        let id = MemberId::new(self.member_id_seq.next_value());
        let member = Member {
            id,
            name: name.into(),
            email: normalize_email(email),
        };

        self.members.insert(id, member.clone());
        member
    }

    /// 書籍を貸し出す
    ///
    /// ビジネスルール：
    /// - ISBNが登録済みであること
    /// - 会員が登録済みであること
    /// - 貸出可能な冊数が残っていること
    ///
    /// 成功時は貸出IDを採番し、貸出日 = 時計の今日、返却期限 = 貸出日 + 14日で
    /// 貸出を作成して、ISBNの貸出中カウンタを加算する。
    ///
    /// 可否確認・貸出作成・カウンタ加算は単一の`&mut self`スコープで行われ、
    /// 未返却の貸出数が総冊数を超えることはない。
    pub fn borrow(&mut self, isbn: &Isbn, member_id: MemberId) -> Result<Loan> {
        // 1. 書籍の存在確認
        if !self.book_index_by_isbn.contains_key(isbn) {
            return Err(CatalogueError::BorrowRejected(
                BorrowRejectedReason::UnknownIsbn,
            ));
        }

        // 2. 会員の存在確認
        if !self.members.contains_key(&member_id) {
            return Err(CatalogueError::BorrowRejected(
                BorrowRejectedReason::UnknownMember,
            ));
        }

        // 3. 貸出可能冊数の確認
        if self.available_copies(isbn) == 0 {
            return Err(CatalogueError::BorrowRejected(
                BorrowRejectedReason::NoAvailableCopies,
            ));
        }

        // 4. 貸出の作成（ドメイン層の純粋関数）
        let id = LoanId::new(self.loan_id_seq.next_value());
        let loan = domain::create_loan(id, isbn.clone(), member_id, self.clock.today());
        self.loans.insert(id, loan.clone());

        // 5. カウンタの更新（貸出コレクションと同一トランザクション扱い）
        *self.active_loans_by_isbn.entry(isbn.clone()).or_insert(0) += 1;

        Ok(loan)
    }

    /// 貸出を返却する
    ///
    /// 貸出IDが未登録、または既に返却済みの場合は`false`（静かな失敗）。
    /// 成功時は返却日 = 時計の今日を記録し、ISBNの貸出中カウンタを減算する
    /// （0未満にはならない）。返却された貸出は恒久的にクローズされる。
    pub fn return_loan(&mut self, loan_id: LoanId) -> bool {
        let today = self.clock.today();

        let Some(loan) = self.loans.get(&loan_id) else {
            return false;
        };

        let Ok(returned) = domain::mark_returned(loan, today) else {
            return false;
        };

        let isbn = returned.isbn.clone();
        self.loans.insert(loan_id, returned);

        // カウンタのずれに備えて0で打ち止めにする
        let count = self.active_loans_by_isbn.entry(isbn).or_insert(0);
        *count = count.saturating_sub(1);

        true
    }

    /// 会員のメールアドレスを更新する
    ///
    /// 会員IDが未登録なら`false`。メールアドレスは任意項目であり、
    /// 空・空白のみの値は「メールアドレスを消去する」として扱う
    /// （登録時と同じ正規化）。
    pub fn update_member_email(&mut self, member_id: MemberId, email: Option<String>) -> bool {
        let Some(member) = self.members.get_mut(&member_id) else {
            return false;
        };

        member.email = normalize_email(email);
        true
    }

    // ========================================================================
    // 照会操作
    // ========================================================================

    /// 全書籍をタイトル順に返す
    ///
    /// 大文字小文字を区別しない辞書順。同じキーは挿入順を保つ（安定ソート）。
    pub fn list_books_sorted_by_title(&self) -> Vec<Book> {
        let mut books = self.books.clone();
        books.sort_by_key(|book| book.title_key());
        books
    }

    /// タイトル前方一致で書籍を検索する
    ///
    /// 大文字小文字を区別しない。並び順は`list_books_sorted_by_title`と同じ。
    /// 一致なしは空列であり、失敗ではない。
    pub fn search_books_by_title_prefix(&self, prefix: &str) -> Vec<Book> {
        let mut matches: Vec<Book> = self
            .books
            .iter()
            .filter(|book| book.title_starts_with(prefix))
            .cloned()
            .collect();
        matches.sort_by_key(|book| book.title_key());
        matches
    }

    /// 貸出可能な冊数
    ///
    /// `総冊数 − 貸出中冊数`。未登録のISBNは0を返す（失敗ではない）。
    pub fn available_copies(&self, isbn: &Isbn) -> u32 {
        let Some(&index) = self.book_index_by_isbn.get(isbn) else {
            return 0;
        };

        let total = self.books[index].total_copies;
        let active = self.active_loans_by_isbn.get(isbn).copied().unwrap_or(0);
        total.saturating_sub(active)
    }

    /// 貸出中の全貸出を返却期限の昇順で返す
    ///
    /// 期限が同じ場合は貸出ID順（= 作成順）。
    pub fn list_active_loans_sorted_by_due_date(&self) -> Vec<Loan> {
        let mut active: Vec<Loan> = self
            .loans
            .values()
            .filter(|loan| loan.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|loan| (loan.due_on, loan.id));
        active
    }

    /// 会員の貸出履歴を貸出ID昇順（= 作成順）で返す
    ///
    /// 貸出のない会員と未登録の会員IDは、どちらも空列になる。
    pub fn list_loans_by_member(&self, member_id: MemberId) -> Vec<Loan> {
        self.loans
            .values()
            .filter(|loan| loan.member_id == member_id)
            .cloned()
            .collect()
    }

    /// 会員を検索する
    pub fn find_member_by_id(&self, member_id: MemberId) -> Option<Member> {
        self.members.get(&member_id).cloned()
    }

    /// 全会員を名前順に返す
    ///
    /// 大文字小文字を区別しない辞書順。同じキーは登録順を保つ（安定ソート）。
    pub fn list_members_sorted_by_name(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self.members.values().cloned().collect();
        members.sort_by_key(|member| member.name_key());
        members
    }

    /// 会員ごとの貸出統計を集計する
    ///
    /// 全貸出を1回走査する。1件以上貸出のある会員だけが結果に現れる。
    /// `total`は返却済みを含む全貸出数、`active`はその部分集合で未返却数。
    pub fn compute_loan_stats_by_member(&self) -> HashMap<MemberId, LoanStats> {
        compute_loan_stats(self.loans.values())
    }
}
