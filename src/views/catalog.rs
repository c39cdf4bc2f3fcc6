//! Catalog home page

use maud::{html, Markup};

use super::layout::page;
use crate::models::CatalogCounts;

#[derive(Debug, Clone)]
pub struct IndexPage {
    pub counts: CatalogCounts,
}

impl IndexPage {
    pub fn render(&self) -> Markup {
        let c = &self.counts;
        page(
            "Local Library Home",
            html! {
                p { "Welcome to " em { "LocalLibrary" } ", a very basic catalog server." }
                h2 { "Dynamic content" }
                p { "The library has the following record counts:" }
                ul {
                    li { strong { "Books:" } " " (c.books) }
                    li { strong { "Copies:" } " " (c.book_instances) }
                    li { strong { "Copies available:" } " " (c.book_instances_available) }
                    li { strong { "Authors:" } " " (c.authors) }
                    li { strong { "Genres:" } " " (c.genres) }
                }
            },
        )
    }
}
