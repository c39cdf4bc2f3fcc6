//! Book instance (copy) pages

use maud::{html, Markup};

use super::layout::{page, stored, violations};
use crate::{
    models::{BookInstanceDetail, BookInstanceDraft, BookOption, BookStatus},
    validation::Violation,
};

fn book_link(detail: &BookInstanceDetail) -> Markup {
    html! {
        @match &detail.book {
            Some(book) => {
                a href=(book.url()) { (stored(&book.title)) }
            }
            None => { "Unknown book" }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookInstanceListPage {
    pub instances: Vec<BookInstanceDetail>,
}

impl BookInstanceListPage {
    pub fn render(&self) -> Markup {
        page(
            "Book Instance List",
            html! {
                ul {
                    @for detail in &self.instances {
                        @let copy = &detail.instance;
                        li {
                            a href=(copy.url()) {
                                @if let Some(book) = &detail.book {
                                    (stored(&book.title)) " : "
                                }
                                (stored(&copy.imprint))
                            }
                            " - " (copy.status)
                            @if copy.status != BookStatus::Available {
                                " (Due: " (copy.due_back_formatted()) ")"
                            }
                        }
                    }
                    @if self.instances.is_empty() {
                        li { "There are no book copies in this library." }
                    }
                }
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookInstanceDetailPage {
    pub detail: BookInstanceDetail,
}

impl BookInstanceDetailPage {
    pub fn render(&self) -> Markup {
        let copy = &self.detail.instance;
        let title = match &self.detail.book {
            Some(book) => format!("Copy: {}", book.title),
            None => format!("Copy: {}", copy.id),
        };
        page(
            &title,
            html! {
                p { strong { "ID:" } " " (copy.id) }
                p { strong { "Title:" } " " (book_link(&self.detail)) }
                p { strong { "Imprint:" } " " (stored(&copy.imprint)) }
                p { strong { "Status:" } " " (copy.status) }
                @if copy.status != BookStatus::Available {
                    p { strong { "Due back:" } " " (copy.due_back_formatted()) }
                }
                hr;
                p { a href={ (copy.url()) "/delete" } { "Delete BookInstance" } }
                p { a href={ (copy.url()) "/update" } { "Update BookInstance" } }
            },
        )
    }
}

#[derive(Debug, Clone)]
pub struct BookInstanceFormPage {
    pub title: &'static str,
    pub book_list: Vec<BookOption>,
    pub selected_book: Option<i32>,
    pub bookinstance: BookInstanceDraft,
    pub errors: Vec<Violation>,
}

impl BookInstanceFormPage {
    pub fn render(&self) -> Markup {
        let draft = &self.bookinstance;
        let status = draft.status();
        page(
            self.title,
            html! {
                form method="POST" action="" {
                    div {
                        label for="book" { "Book:" }
                        select id="book" name="book" required {
                            option value="" { "--Please select a book--" }
                            @for book in &self.book_list {
                                option value=(book.id) selected[self.selected_book == Some(book.id)] {
                                    (stored(&book.title))
                                }
                            }
                        }
                    }
                    div {
                        label for="imprint" { "Imprint:" }
                        input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" required value=(stored(&draft.imprint));
                    }
                    div {
                        label for="due_back" { "Date when book available:" }
                        input id="due_back" type="date" name="due_back" value=(stored(&draft.due_back));
                    }
                    div {
                        label for="status" { "Status:" }
                        select id="status" name="status" required {
                            @for choice in BookStatus::ALL {
                                option value=(choice) selected[choice == status] { (choice) }
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
pub struct BookInstanceDeletePage {
    pub detail: BookInstanceDetail,
}

impl BookInstanceDeletePage {
    pub fn render(&self) -> Markup {
        let copy = &self.detail.instance;
        page(
            "Delete BookInstance",
            html! {
                p { "Do you really want to delete this BookInstance?" }
                p { strong { "ID:" } " " (copy.id) }
                p { strong { "Title:" } " " (book_link(&self.detail)) }
                p { strong { "Imprint:" } " " (stored(&copy.imprint)) }
                p { strong { "Status:" } " " (copy.status) }
                form method="POST" action="" {
                    button type="submit" { "Delete" }
                }
            },
        )
    }
}
