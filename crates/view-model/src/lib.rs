//! Joins books, users and reviews into renderable book views.
//!
//! This crate provides:
//! - `ViewModelBuilder`, which resolves author and review references
//! - The denormalized output types (`BookView`, `ReviewView`, `ResolvedUser`)
//! - `Placeholders`, the texts substituted for unresolved references
//!
//! ## Example Usage
//! ```ignore
//! use view_model::{Placeholders, ViewModelBuilder};
//!
//! let builder = ViewModelBuilder::new(&catalog.users, &catalog.reviews)
//!     .with_placeholders(Placeholders::default());
//!
//! let views = builder.build_all(&catalog.books);
//! ```

pub mod builder;
pub mod placeholders;
pub mod types;

// Re-export main types
pub use builder::{ViewModelBuilder, build_book_view, build_book_views};
pub use placeholders::{Locale, Placeholders};
pub use types::{BookView, ResolvedUser, ReviewView};
