//! In-process catalog store
//!
//! Collections live behind one `tokio::sync::RwLock`; every operation takes
//! the lock once, so each call is atomic with respect to the others. Ids are
//! assigned per collection from a counter that never goes backwards.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{sort_key, CatalogStore};
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookDetail, BookInstance, BookInstanceData,
        BookInstanceDetail, BookListing, BookOption, BookOverview, BookStatus, Genre,
    },
};

#[derive(Debug, Default)]
struct Collections {
    authors: BTreeMap<i32, Author>,
    genres: BTreeMap<i32, Genre>,
    books: BTreeMap<i32, Book>,
    book_genres: BTreeMap<i32, Vec<i32>>,
    book_instances: BTreeMap<i32, BookInstance>,
    last_author_id: i32,
    last_genre_id: i32,
    last_book_id: i32,
    last_book_instance_id: i32,
}

impl Collections {
    fn book_option(&self, id: i32) -> Option<BookOption> {
        self.books.get(&id).map(|b| BookOption {
            id: b.id,
            title: b.title.clone(),
        })
    }

    fn instance_detail(&self, instance: &BookInstance) -> BookInstanceDetail {
        BookInstanceDetail {
            instance: instance.clone(),
            book: self.book_option(instance.book_id),
        }
    }

    fn genres_of(&self, book_id: i32) -> Vec<Genre> {
        let mut genres: Vec<Genre> = self
            .book_genres
            .get(&book_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.genres.get(id).cloned())
            .collect();
        genres.sort_by_cached_key(|g| (sort_key(&g.name), g.id));
        genres
    }

    fn overviews<'a>(&self, books: impl Iterator<Item = &'a Book>) -> Vec<BookOverview> {
        let mut rows: Vec<BookOverview> = books
            .map(|b| BookOverview {
                id: b.id,
                title: b.title.clone(),
                summary: b.summary.clone(),
            })
            .collect();
        rows.sort_by_cached_key(|b| (sort_key(&b.title), b.id));
        rows
    }
}

fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Catalog store kept in memory, shared by cloning
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let db = self.inner.read().await;
        let mut authors: Vec<Author> = db.authors.values().cloned().collect();
        authors.sort_by_cached_key(|a| {
            (sort_key(&a.family_name), sort_key(&a.first_name), a.id)
        });
        Ok(authors)
    }

    async fn find_author(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        let mut db = self.inner.write().await;
        db.last_author_id += 1;
        let author = Author {
            id: db.last_author_id,
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        db.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: i32, data: &AuthorData) -> AppResult<Option<Author>> {
        let mut db = self.inner.write().await;
        Ok(db.authors.get_mut(&id).map(|author| {
            author.first_name = data.first_name.clone();
            author.family_name = data.family_name.clone();
            author.date_of_birth = data.date_of_birth;
            author.date_of_death = data.date_of_death;
            author.clone()
        }))
    }

    async fn remove_author(&self, id: i32) -> AppResult<()> {
        self.inner.write().await.authors.remove(&id);
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        let mut genres: Vec<Genre> = db.genres.values().cloned().collect();
        genres.sort_by_cached_key(|g| (sort_key(&g.name), g.id));
        Ok(genres)
    }

    async fn find_genre(&self, id: i32) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let wanted = name.to_lowercase();
        let db = self.inner.read().await;
        Ok(db
            .genres
            .values()
            .find(|g| g.name.to_lowercase() == wanted)
            .cloned())
    }

    async fn insert_genre(&self, name: &str) -> AppResult<Genre> {
        let mut db = self.inner.write().await;
        db.last_genre_id += 1;
        let genre = Genre {
            id: db.last_genre_id,
            name: name.to_string(),
        };
        db.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update_genre(&self, id: i32, name: &str) -> AppResult<Option<Genre>> {
        let mut db = self.inner.write().await;
        Ok(db.genres.get_mut(&id).map(|genre| {
            genre.name = name.to_string();
            genre.clone()
        }))
    }

    async fn remove_genre(&self, id: i32) -> AppResult<()> {
        self.inner.write().await.genres.remove(&id);
        Ok(())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.genres.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<BookListing>> {
        let db = self.inner.read().await;
        let mut books: Vec<BookListing> = db
            .books
            .values()
            .map(|book| BookListing {
                book: book.clone(),
                author: db.authors.get(&book.author_id).cloned(),
            })
            .collect();
        books.sort_by_cached_key(|b| (sort_key(&b.book.title), b.book.id));
        Ok(books)
    }

    async fn book_options(&self) -> AppResult<Vec<BookOption>> {
        let db = self.inner.read().await;
        let mut options: Vec<BookOption> = db.books.keys().filter_map(|id| db.book_option(*id)).collect();
        options.sort_by_cached_key(|o| (sort_key(&o.title), o.id));
        Ok(options)
    }

    async fn find_book(&self, id: i32) -> AppResult<Option<BookDetail>> {
        let db = self.inner.read().await;
        Ok(db.books.get(&id).map(|book| BookDetail {
            book: book.clone(),
            author: db.authors.get(&book.author_id).cloned(),
            genres: db.genres_of(id),
        }))
    }

    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<BookOverview>> {
        let db = self.inner.read().await;
        Ok(db.overviews(db.books.values().filter(|b| b.author_id == author_id)))
    }

    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<BookOverview>> {
        let db = self.inner.read().await;
        let tagged = db.books.values().filter(|b| {
            db.book_genres
                .get(&b.id)
                .is_some_and(|genres| genres.contains(&genre_id))
        });
        Ok(db.overviews(tagged))
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        let mut db = self.inner.write().await;
        db.last_book_id += 1;
        let book = Book {
            id: db.last_book_id,
            title: data.title.clone(),
            author_id: data.author_id,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
        };
        db.books.insert(book.id, book.clone());
        db.book_genres.insert(book.id, dedup_ids(&data.genre_ids));
        Ok(book)
    }

    async fn update_book(&self, id: i32, data: &BookData) -> AppResult<Option<Book>> {
        let mut db = self.inner.write().await;
        let Some(book) = db.books.get_mut(&id) else {
            return Ok(None);
        };
        book.title = data.title.clone();
        book.author_id = data.author_id;
        book.summary = data.summary.clone();
        book.isbn = data.isbn.clone();
        let updated = book.clone();
        db.book_genres.insert(id, dedup_ids(&data.genre_ids));
        Ok(Some(updated))
    }

    async fn remove_book(&self, id: i32) -> AppResult<()> {
        let mut db = self.inner.write().await;
        db.books.remove(&id);
        db.book_genres.remove(&id);
        Ok(())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let db = self.inner.read().await;
        Ok(db
            .book_instances
            .values()
            .map(|instance| db.instance_detail(instance))
            .collect())
    }

    async fn find_book_instance(&self, id: i32) -> AppResult<Option<BookInstanceDetail>> {
        let db = self.inner.read().await;
        Ok(db
            .book_instances
            .get(&id)
            .map(|instance| db.instance_detail(instance)))
    }

    async fn instances_of_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        Ok(db
            .book_instances
            .values()
            .filter(|i| i.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let mut db = self.inner.write().await;
        db.last_book_instance_id += 1;
        let instance = BookInstance {
            id: db.last_book_instance_id,
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        db.book_instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn update_book_instance(
        &self,
        id: i32,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let mut db = self.inner.write().await;
        Ok(db.book_instances.get_mut(&id).map(|instance| {
            instance.book_id = data.book_id;
            instance.imprint = data.imprint.clone();
            instance.status = data.status;
            instance.due_back = data.due_back;
            instance.clone()
        }))
    }

    async fn remove_book_instance(&self, id: i32) -> AppResult<()> {
        self.inner.write().await.book_instances.remove(&id);
        Ok(())
    }

    async fn count_book_instances(&self, status: Option<BookStatus>) -> AppResult<i64> {
        let db = self.inner.read().await;
        let count = db
            .book_instances
            .values()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .count();
        Ok(count as i64)
    }
}
