//! Substitute texts used when a reference cannot be resolved.

use serde::Serialize;

/// Language of the built-in placeholder sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholders {
    /// Author name when `Book::author_id` matches no user
    pub author_not_found: String,
    /// Reviewer name when `Review::user_id` matches no user
    pub user_not_found: String,
    /// Review text when a review id matches no review
    pub review_not_found: String,
    /// Reviewer name attached to a missing review
    pub unknown_user: String,
    /// Book name when the book has none
    pub untitled_book: String,
}

impl Placeholders {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self {
                author_not_found: "Автор не найден".to_string(),
                user_not_found: "Пользователь не найден".to_string(),
                review_not_found: "Отзыв не найден".to_string(),
                unknown_user: "Неизвестный пользователь".to_string(),
                untitled_book: "Книга без названия".to_string(),
            },
            Locale::En => Self {
                author_not_found: "author not found".to_string(),
                user_not_found: "user not found".to_string(),
                review_not_found: "review not found".to_string(),
                unknown_user: "unknown user".to_string(),
                untitled_book: "untitled book".to_string(),
            },
        }
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
