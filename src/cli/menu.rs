use std::io::{BufRead, Write};

use crate::application::catalogue::CatalogueService;
use crate::domain::{LoanId, MemberId};

use super::input::Console;
use super::render;

/// メニューループを実行する
///
/// 明示的な終了（0）を選ぶか、入力が尽きるまで回り続ける。
/// どちらの終わり方も正常終了として扱う。
pub fn run<R: BufRead, W: Write>(service: &mut CatalogueService, console: &mut Console<R, W>) {
    if run_loop(service, console).is_none() {
        // 入力の終端。お別れの挨拶も書けなければ黙って終わる
        let _ = console.write_line("Input ended. Goodbye!");
    }
}

fn run_loop<R: BufRead, W: Write>(
    service: &mut CatalogueService,
    console: &mut Console<R, W>,
) -> Option<()> {
    loop {
        print_menu(console)?;
        let choice = console.read_i64("Please choose an option: ")?;
        match choice {
            1 => add_book(console, service)?,
            2 => register_member(console, service)?,
            3 => list_books(console, service)?,
            4 => search_books_by_title(console, service)?,
            5 => borrow_book(console, service)?,
            6 => return_book(console, service)?,
            7 => list_active_loans(console, service)?,
            8 => list_loans_by_member(console, service)?,
            9 => update_member_email(console, service)?,
            10 => view_member_details(console, service)?,
            11 => list_members(console, service)?,
            0 => {
                console.write_line("Goodbye!")?;
                return Some(());
            }
            _ => console.write_line("Invalid option!")?,
        }
    }
}

fn print_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Option<()> {
    console.write_line("****** Menu ******")?;
    console.write_line("1. Add new book")?;
    console.write_line("2. Register member")?;
    console.write_line("3. List books")?;
    console.write_line("4. Search books by title prefix")?;
    console.write_line("5. Borrow book")?;
    console.write_line("6. Return book (by loan ID)")?;
    console.write_line("7. List active loans")?;
    console.write_line("8. List loans by member")?;
    console.write_line("9. Update member email")?;
    console.write_line("10. View member details")?;
    console.write_line("11. List members")?;
    console.write_line("0. Exit")
}

// ---------------------------------------------------------------------------
// 各フロー：入力を検証済みの値に整えてコアを呼び、結果を1行ずつ表示する
// ---------------------------------------------------------------------------

fn add_book<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Adding new book ***")?;
    let isbn = console.read_isbn("ISBN (unique): ")?;
    let title = console.read_non_blank("Title: ")?;
    let author = console.read_non_blank("Author: ")?;
    let copies = console.read_u32("Total copies: ")?;

    match service.add_book(isbn, title, author, copies) {
        Ok(book) => {
            tracing::info!(isbn = %book.isbn, "book added");
            let available = service.available_copies(&book.isbn);
            console.write_line(&format!(
                "Book added: {}",
                render::format_book(&book, available)
            ))
        }
        Err(error) => console.write_line(&render::failure_message(&error)),
    }
}

fn register_member<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Registering member ***")?;
    let name = console.read_non_blank("Name: ")?;
    let email = console.read_optional_email("Email (optional): ")?;

    let member = service.register_member(name, email);
    tracing::info!(member_id = %member.id, "member registered");
    console.write_line(&format!("Member registered. ID: {}", member.id))
}

fn list_books<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Listing books ***")?;
    let books = service.list_books_sorted_by_title();
    if books.is_empty() {
        return console.write_line("No books found!");
    }
    for book in &books {
        let available = service.available_copies(&book.isbn);
        console.write_line(&render::format_book(book, available))?;
    }
    Some(())
}

fn search_books_by_title<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Searching books by title prefix ***")?;
    let prefix = console.read_non_blank("Title starts with: ")?;
    let matches = service.search_books_by_title_prefix(&prefix);
    if matches.is_empty() {
        return console.write_line("No matches found!");
    }
    console.write_line(&format!("Found {}:", matches.len()))?;
    for book in &matches {
        let available = service.available_copies(&book.isbn);
        console.write_line(&render::format_book(book, available))?;
    }
    Some(())
}

fn borrow_book<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Borrowing book ***")?;
    let isbn = console.read_isbn("ISBN: ")?;
    let member_id = MemberId::new(console.read_id("Member ID: ")?);

    match service.borrow(&isbn, member_id) {
        Ok(loan) => {
            tracing::info!(loan_id = %loan.id, isbn = %loan.isbn, "book borrowed");
            console.write_line("Borrowed successfully!")?;
            console.write_line(&render::format_loan(&loan))
        }
        Err(error) => console.write_line(&render::failure_message(&error)),
    }
}

fn return_book<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Returning book ***")?;
    let loan_id = LoanId::new(console.read_id("Loan ID: ")?);

    if service.return_loan(loan_id) {
        tracing::info!(loan_id = %loan_id, "book returned");
        console.write_line("Returned successfully!")
    } else {
        console.write_line("Return failed! (loan not found or already returned)")
    }
}

fn list_active_loans<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Listing active loans ***")?;
    let active = service.list_active_loans_sorted_by_due_date();
    if active.is_empty() {
        return console.write_line("No active loans found!");
    }
    for loan in &active {
        console.write_line(&render::format_loan(loan))?;
    }
    Some(())
}

fn list_loans_by_member<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Loan history by member ***")?;
    let member_id = MemberId::new(console.read_id("Member ID: ")?);

    let loans = service.list_loans_by_member(member_id);
    if loans.is_empty() {
        return console.write_line("No loans found for that member (or member not found).");
    }
    console.write_line(&format!("Found {}:", loans.len()))?;
    for loan in &loans {
        console.write_line(&render::format_loan(loan))?;
    }
    Some(())
}

fn update_member_email<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Updating member email ***")?;
    let member_id = MemberId::new(console.read_id("Member ID: ")?);
    // メールアドレスは任意項目。空行は「登録済みのアドレスを消す」
    let email = console.read_optional_email("New email (blank to clear): ")?;

    if service.update_member_email(member_id, email) {
        tracing::info!(member_id = %member_id, "member email updated");
        console.write_line("Email updated successfully!")
    } else {
        console.write_line("Update failed! (member not found)")
    }
}

fn view_member_details<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Viewing member details ***")?;
    let member_id = MemberId::new(console.read_id("Member ID: ")?);

    let Some(member) = service.find_member_by_id(member_id) else {
        return console.write_line("Member not found!");
    };

    console.write_line(&format!("ID: {}", member.id))?;
    console.write_line(&format!("Name: {}", member.name))?;
    console.write_line(&format!(
        "Email: {}",
        render::format_email(member.email.as_deref())
    ))?;

    let stats = service
        .compute_loan_stats_by_member()
        .get(&member_id)
        .copied()
        .unwrap_or_default();
    console.write_line(&format!(
        "Loans: {} | active loans: {}",
        stats.total, stats.active
    ))
}

fn list_members<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    service: &mut CatalogueService,
) -> Option<()> {
    console.write_line("*** Listing members ***")?;
    let members = service.list_members_sorted_by_name();
    if members.is_empty() {
        return console.write_line("No members found!");
    }
    let stats = service.compute_loan_stats_by_member();
    for member in &members {
        let member_stats = stats.get(&member.id).copied().unwrap_or_default();
        console.write_line(&render::format_member_line(member, member_stats))?;
    }
    Some(())
}
