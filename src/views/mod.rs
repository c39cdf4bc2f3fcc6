//! Server-rendered HTML views
//!
//! Each [`View`] variant is one named template together with the data it
//! needs. Services decide which view to show; handlers turn it into a
//! response without looking at the markup.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod layout;

use axum::response::{Html, IntoResponse, Response};
use maud::Markup;

pub use authors::{AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage};
pub use book_instances::{
    BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage, BookInstanceListPage,
};
pub use books::{BookDeletePage, BookDetailPage, BookFormPage, BookListPage};
pub use catalog::IndexPage;
pub use genres::{GenreDeletePage, GenreDetailPage, GenreFormPage, GenreListPage};
pub use layout::ErrorPage;

#[derive(Debug, Clone)]
pub enum View {
    Index(IndexPage),
    AuthorList(AuthorListPage),
    AuthorDetail(AuthorDetailPage),
    AuthorForm(AuthorFormPage),
    AuthorDelete(AuthorDeletePage),
    GenreList(GenreListPage),
    GenreDetail(GenreDetailPage),
    GenreForm(GenreFormPage),
    GenreDelete(GenreDeletePage),
    BookList(BookListPage),
    BookDetail(BookDetailPage),
    BookForm(BookFormPage),
    BookDelete(BookDeletePage),
    BookInstanceList(BookInstanceListPage),
    BookInstanceDetail(BookInstanceDetailPage),
    BookInstanceForm(BookInstanceFormPage),
    BookInstanceDelete(BookInstanceDeletePage),
    Error(ErrorPage),
}

impl View {
    /// Template name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            View::Index(_) => "index",
            View::AuthorList(_) => "author_list",
            View::AuthorDetail(_) => "author_detail",
            View::AuthorForm(_) => "author_form",
            View::AuthorDelete(_) => "author_delete",
            View::GenreList(_) => "genre_list",
            View::GenreDetail(_) => "genre_detail",
            View::GenreForm(_) => "genre_form",
            View::GenreDelete(_) => "genre_delete",
            View::BookList(_) => "book_list",
            View::BookDetail(_) => "book_detail",
            View::BookForm(_) => "book_form",
            View::BookDelete(_) => "book_delete",
            View::BookInstanceList(_) => "bookinstance_list",
            View::BookInstanceDetail(_) => "bookinstance_detail",
            View::BookInstanceForm(_) => "bookinstance_form",
            View::BookInstanceDelete(_) => "bookinstance_delete",
            View::Error(_) => "error",
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            View::Index(v) => v.render(),
            View::AuthorList(v) => v.render(),
            View::AuthorDetail(v) => v.render(),
            View::AuthorForm(v) => v.render(),
            View::AuthorDelete(v) => v.render(),
            View::GenreList(v) => v.render(),
            View::GenreDetail(v) => v.render(),
            View::GenreForm(v) => v.render(),
            View::GenreDelete(v) => v.render(),
            View::BookList(v) => v.render(),
            View::BookDetail(v) => v.render(),
            View::BookForm(v) => v.render(),
            View::BookDelete(v) => v.render(),
            View::BookInstanceList(v) => v.render(),
            View::BookInstanceDetail(v) => v.render(),
            View::BookInstanceForm(v) => v.render(),
            View::BookInstanceDelete(v) => v.render(),
            View::Error(v) => v.render(),
        }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        tracing::debug!(view = self.name(), "Rendering view");
        Html(self.render().into_string()).into_response()
    }
}
