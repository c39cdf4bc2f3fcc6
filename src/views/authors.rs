//! Author pages

use maud::{html, Markup};

use super::layout::{page, stored, violations};
use crate::{
    models::{Author, AuthorDraft, BookOverview},
    validation::Violation,
};

#[derive(Debug, Clone)]
pub struct AuthorListPage {
    pub authors: Vec<Author>,
}

impl AuthorListPage {
    pub fn render(&self) -> Markup {
        page(
            "Author List",
            html! {
                ul {
                    @for author in &self.authors {
                        li {
                            a href=(author.url()) { (stored(&author.name())) }
                            " (" (author.lifespan()) ")"
                        }
                    }
                    @if self.authors.is_empty() {
                        li { "There are no authors." }
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
pub struct AuthorDetailPage {
    pub author: Author,
    pub books: Vec<BookOverview>,
}

impl AuthorDetailPage {
    pub fn render(&self) -> Markup {
        let title = format!("Author: {}", self.author.name());
        page(
            &title,
            html! {
                p { (self.author.lifespan()) }
                h2 { "Books" }
                @if self.books.is_empty() {
                    p { "This author has no books." }
                } @else {
                    (books_list(&self.books))
                }
                hr;
                p { a href={ (self.author.url()) "/delete" } { "Delete author" } }
                p { a href={ (self.author.url()) "/update" } { "Update author" } }
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct AuthorFormPage {
    pub title: &'static str,
    pub author: AuthorDraft,
    pub errors: Vec<Violation>,
}

impl AuthorFormPage {
    pub fn render(&self) -> Markup {
        let a = &self.author;
        page(
            self.title,
            html! {
                form method="POST" action="" {
                    div {
                        label for="first_name" { "First Name:" }
                        input id="first_name" type="text" name="first_name" placeholder="First name" required value=(stored(&a.first_name));
                        label for="family_name" { "Family Name:" }
                        input id="family_name" type="text" name="family_name" placeholder="Family name" required value=(stored(&a.family_name));
                    }
                    div {
                        label for="date_of_birth" { "Date of birth:" }
                        input id="date_of_birth" type="date" name="date_of_birth" value=(stored(&a.date_of_birth));
                    }
                    div {
                        label for="date_of_death" { "Date of death:" }
                        input id="date_of_death" type="date" name="date_of_death" value=(stored(&a.date_of_death));
                    }
                    button type="submit" { "Submit" }
                }
                (violations(&self.errors))
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct AuthorDeletePage {
    pub author: Author,
    pub books: Vec<BookOverview>,
}

impl AuthorDeletePage {
    pub fn render(&self) -> Markup {
        let title = format!("Delete Author: {}", self.author.name());
        page(
            &title,
            html! {
                p { (self.author.lifespan()) }
                @if self.books.is_empty() {
                    p { "Do you really want to delete this Author?" }
                    form method="POST" action="" {
                        button type="submit" { "Delete" }
                    }
                } @else {
                    p { strong { "Delete the following books before attempting to delete this author." } }
                    h2 { "Books" }
                    (books_list(&self.books))
                }
            },
        )
    }
}
