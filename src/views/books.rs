//! Book pages

use maud::{html, Markup};

use super::layout::{page, stored, violations};
use crate::{
    models::{Author, BookDetail, BookDraft, BookInstance, BookListing, BookStatus, Genre},
    validation::Violation,
};

#[derive(Debug, Clone)]
pub struct BookListPage {
    pub books: Vec<BookListing>,
}

impl BookListPage {
    pub fn render(&self) -> Markup {
        page(
            "Book List",
            html! {
                ul {
                    @for entry in &self.books {
                        li {
                            a href=(entry.book.url()) { (stored(&entry.book.title)) }
                            @if let Some(author) = &entry.author {
                                " (" (stored(&author.name())) ")"
                            }
                        }
                    }
                    @if self.books.is_empty() {
                        li { "There are no books." }
                    }
                }
            },
        )
    }
}

fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

fn copies_list(copies: &[BookInstance]) -> Markup {
    html! {
        @for copy in copies {
            hr;
            p class=(status_class(copy.status)) { (copy.status) }
            p { strong { "Imprint:" } " " (stored(&copy.imprint)) }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back:" } " " (copy.due_back_formatted()) }
            }
            p { strong { "Id:" } " " a href=(copy.url()) { (copy.id) } }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookDetailPage {
    pub detail: BookDetail,
    pub copies: Vec<BookInstance>,
}

impl BookDetailPage {
    pub fn render(&self) -> Markup {
        let book = &self.detail.book;
        let title = format!("Title: {}", book.title);
        page(
            &title,
            html! {
                p {
                    strong { "Author:" } " "
                    @match &self.detail.author {
                        Some(author) => {
                            a href=(author.url()) { (stored(&author.name())) }
                        }
                        None => { "Unknown" }
                    }
                }
                p { strong { "Summary:" } " " (stored(&book.summary)) }
                p { strong { "ISBN:" } " " (stored(&book.isbn)) }
                p {
                    strong { "Genre:" } " "
                    @for (i, genre) in self.detail.genres.iter().enumerate() {
                        @if i > 0 { ", " }
                        a href=(genre.url()) { (stored(&genre.name)) }
                    }
                }
                h2 { "Copies" }
                @if self.copies.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    (copies_list(&self.copies))
                }
                hr;
                p { a href={ (book.url()) "/delete" } { "Delete book" } }
                p { a href={ (book.url()) "/update" } { "Update book" } }
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookFormPage {
    pub title: &'static str,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub book: BookDraft,
    pub errors: Vec<Violation>,
}

impl BookFormPage {
    pub fn render(&self) -> Markup {
        let b = &self.book;
        let selected_author = b.author_id();
        let ticked = b.genre_ids();
        page(
            self.title,
            html! {
                form method="POST" action="" {
                    div {
                        label for="title" { "Title:" }
                        input id="title" type="text" name="title" placeholder="Name of book" required value=(stored(&b.title));
                    }
                    div {
                        label for="author" { "Author:" }
                        select id="author" name="author" required {
                            option value="" { "--Please select an author--" }
                            @for author in &self.authors {
                                option value=(author.id) selected[selected_author == Some(author.id)] {
                                    (stored(&author.name()))
                                }
                            }
                        }
                    }
                    div {
                        label for="summary" { "Summary:" }
                        textarea id="summary" name="summary" placeholder="Summary" required { (stored(&b.summary)) }
                    }
                    div {
                        label for="isbn" { "ISBN:" }
                        input id="isbn" type="text" name="isbn" placeholder="ISBN13" required value=(stored(&b.isbn));
                    }
                    div {
                        label { "Genre:" }
                        @for genre in &self.genres {
                            span {
                                input type="checkbox" name="genre" id={ "genre-" (genre.id) } value=(genre.id) checked[ticked.contains(&genre.id)];
                                label for={ "genre-" (genre.id) } { (stored(&genre.name)) }
                            }
                        }
                    }
                    button type="submit" { "Submit" }
                }
                (violations(&self.errors))
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookDeletePage {
    pub detail: BookDetail,
    pub copies: Vec<BookInstance>,
}

impl BookDeletePage {
    pub fn render(&self) -> Markup {
        let title = format!("Delete Book: {}", self.detail.book.title);
        page(
            &title,
            html! {
                @if let Some(author) = &self.detail.author {
                    p { strong { "Author:" } " " a href=(author.url()) { (stored(&author.name())) } }
                }
                p { strong { "Summary:" } " " (stored(&self.detail.book.summary)) }
                @if self.copies.is_empty() {
                    p { "Do you really want to delete this Book?" }
                    form method="POST" action="" {
                        button type="submit" { "Delete" }
                    }
                } @else {
                    p { strong { "Delete the following copies before attempting to delete this book." } }
                    h2 { "Copies" }
                    (copies_list(&self.copies))
                }
            },
        )
    }
}
