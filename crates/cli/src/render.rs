//! Text rendering of book views as cards.

use colored::Colorize;
use data_loader::DanglingReport;
use std::io::{self, Write};
use view_model::{BookView, Locale};

/// UI strings for one locale
pub struct Labels {
    pub heading: &'static str,
    pub loading: &'static str,
    pub author: &'static str,
    pub reviews: &'static str,
    pub no_reviews: &'static str,
    pub empty: &'static str,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self {
                heading: "Мои книги:",
                loading: "Загрузка...",
                author: "Автор",
                reviews: "Отзывы",
                no_reviews: "Отзывов пока нет",
                empty: "Книг нет",
            },
            Locale::En => Self {
                heading: "My books:",
                loading: "Loading...",
                author: "Author",
                reviews: "Reviews",
                no_reviews: "No reviews yet",
                empty: "No books",
            },
        }
    }
}

/// Render one book card
pub fn render_card(out: &mut impl Write, book: &BookView, labels: &Labels) -> io::Result<()> {
    writeln!(out, "{}", book.name.bold())?;
    writeln!(out, "  {}: {}", labels.author, book.author.name.cyan())?;
    if let Some(description) = &book.description {
        writeln!(out, "  {}", description)?;
    }

    if book.reviews.is_empty() {
        writeln!(out, "  {}", labels.no_reviews.dimmed())?;
        return Ok(());
    }
    writeln!(out, "  {}:", labels.reviews)?;
    for (i, review) in book.reviews.iter().enumerate() {
        writeln!(
            out,
            "    {}. {} ({})",
            (i + 1).to_string().green(),
            review.text,
            review.user.name.cyan()
        )?;
    }
    Ok(())
}

/// Render the whole list under its heading
pub fn render_list(out: &mut impl Write, books: &[BookView], labels: &Labels) -> io::Result<()> {
    writeln!(out, "{}", labels.heading.bold().blue())?;
    if books.is_empty() {
        writeln!(out, "{}", labels.empty.dimmed())?;
    }
    for book in books {
        writeln!(out)?;
        render_card(out, book, labels)?;
    }
    Ok(())
}

/// Render the reference check results
pub fn render_report(out: &mut impl Write, report: &DanglingReport) -> io::Result<()> {
    if report.is_clean() {
        writeln!(out, "{} All references resolve", "✓".green())?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} dangling, {} duplicated",
        "!".yellow(),
        report.dangling_count(),
        report.duplicate_count()
    )?;
    for (book_id, author_id) in &report.missing_authors {
        writeln!(out, "  book {}: unknown author {}", book_id, author_id)?;
    }
    for (book_id, review_id) in &report.missing_reviews {
        writeln!(out, "  book {}: unknown review {}", book_id, review_id)?;
    }
    for (review_id, user_id) in &report.missing_reviewers {
        writeln!(out, "  review {}: unknown user {}", review_id, user_id)?;
    }
    for id in &report.duplicate_user_ids {
        writeln!(out, "  duplicate user id {}", id)?;
    }
    for id in &report.duplicate_review_ids {
        writeln!(out, "  duplicate review id {}", id)?;
    }
    for id in &report.duplicate_book_ids {
        writeln!(out, "  duplicate book id {}", id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_model::{ResolvedUser, ReviewView};

    fn book_view() -> BookView {
        BookView {
            id: "b1".to_string(),
            name: "Solaris".to_string(),
            author: ResolvedUser::placeholder("u1", "Stanisław"),
            reviews: vec![ReviewView {
                id: "r1".to_string(),
                text: "Deep".to_string(),
                user: ResolvedUser::placeholder("u2", "Ann"),
            }],
            description: Some("A planet-sized ocean".to_string()),
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_card_shows_everything() {
        let labels = Labels::for_locale(Locale::En);
        let text = render(|out| render_card(out, &book_view(), &labels));

        assert!(text.contains("Solaris"));
        assert!(text.contains("Stanisław"));
        assert!(text.contains("A planet-sized ocean"));
        assert!(text.contains("Deep"));
        assert!(text.contains("Ann"));
    }

    #[test]
    fn test_card_without_reviews() {
        let mut book = book_view();
        book.reviews.clear();
        book.description = None;
        let labels = Labels::for_locale(Locale::Ru);

        let text = render(|out| render_card(out, &book, &labels));

        assert!(text.contains("Отзывов пока нет"));
        assert!(!text.contains("A planet-sized ocean"));
    }

    #[test]
    fn test_list_heading_and_order() {
        let mut second = book_view();
        second.name = "Eden".to_string();
        let labels = Labels::for_locale(Locale::Ru);

        let text = render(|out| render_list(out, &[book_view(), second], &labels));

        assert!(text.contains("Мои книги:"));
        let solaris = text.find("Solaris").unwrap();
        let eden = text.find("Eden").unwrap();
        assert!(solaris < eden);
    }

    #[test]
    fn test_report_lists_problems() {
        let report = DanglingReport {
            missing_reviews: vec![("b1".to_string(), "r404".to_string())],
            duplicate_user_ids: vec!["u1".to_string()],
            ..DanglingReport::default()
        };

        let text = render(|out| render_report(out, &report));

        assert!(text.contains("book b1: unknown review r404"));
        assert!(text.contains("duplicate user id u1"));
    }
}
