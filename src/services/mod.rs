//! Request orchestration for the catalog
//!
//! Every service follows the same form flow: sanitize and validate the
//! submission, build a draft from the sanitized values, then either render
//! the form again with the violations or write to the store and redirect.
//! Independent reads are joined with `tokio::try_join!`, so the first failure
//! wins and no partial results are rendered.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use crate::{repository::CatalogStore, views::View};

/// Result of handling a submitted form
#[derive(Debug)]
pub enum FormOutcome {
    /// Show a page again (rejected form, blocked delete)
    Render(View),
    /// Write accepted; send the client to this path
    Redirect(String),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over one shared store client
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: authors::AuthorsService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store),
        }
    }
}
