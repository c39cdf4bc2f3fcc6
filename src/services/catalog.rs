//! Catalog home page and store health

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{BookStatus, CatalogCounts},
    repository::CatalogStore,
    views::{IndexPage, View},
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Record counts, fetched concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.store.count_books(),
            self.store.count_book_instances(None),
            self.store.count_book_instances(Some(BookStatus::Available)),
            self.store.count_authors(),
            self.store.count_genres(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    pub async fn index(&self) -> AppResult<View> {
        let counts = self.counts().await?;
        Ok(View::Index(IndexPage { counts }))
    }

    pub async fn ready(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
