//! Genre pages

use maud::{html, Markup};

use super::layout::{page, stored, violations};
use crate::{
    models::{BookOverview, Genre, GenreDraft},
    validation::Violation,
};

#[derive(Debug, Clone)]
pub struct GenreListPage {
    pub genres: Vec<Genre>,
}

impl GenreListPage {
    pub fn render(&self) -> Markup {
        page(
            "Genre List",
            html! {
                ul {
                    @for genre in &self.genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                    @if self.genres.is_empty() {
                        li { "There are no genres." }
                    }
                }
            },
        )
    }
}

fn books_list(books: &[BookOverview]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenreDetailPage {
    pub genre: Genre,
    pub books: Vec<BookOverview>,
}

impl GenreDetailPage {
    pub fn render(&self) -> Markup {
        let title = format!("Genre: {}", self.genre.name);
        page(
            &title,
            html! {
                h2 { "Books" }
                @if self.books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    (books_list(&self.books))
                }
                hr;
                p { a href={ (self.genre.url()) "/delete" } { "Delete genre" } }
                p { a href={ (self.genre.url()) "/update" } { "Update genre" } }
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct GenreFormPage {
    pub title: &'static str,
    pub genre: GenreDraft,
    pub errors: Vec<Violation>,
}

impl GenreFormPage {
    pub fn render(&self) -> Markup {
        page(
            self.title,
            html! {
                form method="POST" action="" {
                    div {
                        label for="name" { "Genre:" }
                        input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." required value=(stored(&self.genre.name));
                    }
                    button type="submit" { "Submit" }
                }
                (violations(&self.errors))
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct GenreDeletePage {
    pub genre: Genre,
    pub books: Vec<BookOverview>,
}

impl GenreDeletePage {
    pub fn render(&self) -> Markup {
        let title = format!("Delete Genre: {}", self.genre.name);
        page(
            &title,
            html! {
                @if self.books.is_empty() {
                    p { "Do you really want to delete this Genre?" }
                    form method="POST" action="" {
                        button type="submit" { "Delete" }
                    }
                } @else {
                    p { strong { "Delete the following books before attempting to delete this genre." } }
                    h2 { "Books" }
                    (books_list(&self.books))
                }
            },
        )
    }
}
