//! Book service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{book::book_url, BookDraft},
    repository::CatalogStore,
    validation::{self, field, FieldRule, FormData, Violation},
    views::{BookDeletePage, BookDetailPage, BookFormPage, BookListPage, View},
};

use super::FormOutcome;

const CREATE_TITLE: &str = "Create Book";
const UPDATE_TITLE: &str = "Update Book";

fn rules() -> Vec<FieldRule> {
    vec![
        field("title").not_empty("Title must not be empty."),
        field("author")
            .not_empty("Author must not be empty.")
            .integer("Author must not be empty."),
        field("summary").not_empty("Summary must not be empty."),
        field("isbn").not_empty("ISBN must not be empty."),
        field("genre").optional().integer("Invalid genre."),
    ]
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View> {
        let books = self.store.list_books().await?;
        Ok(View::BookList(BookListPage { books }))
    }

    pub async fn detail(&self, id: i32) -> AppResult<View> {
        let (detail, copies) =
            tokio::try_join!(self.store.find_book(id), self.store.instances_of_book(id))?;
        let detail = detail.ok_or_else(|| not_found(id))?;
        Ok(View::BookDetail(BookDetailPage { detail, copies }))
    }

    pub async fn create_form(&self) -> AppResult<View> {
        self.form_page(CREATE_TITLE, BookDraft::default(), Vec::new())
            .await
    }

    pub async fn create(&self, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = BookDraft::from_submission(&checked, None);

        if !checked.is_valid() {
            tracing::debug!(violations = checked.violations().len(), "Book form rejected");
            let page = self
                .form_page(CREATE_TITLE, draft, checked.into_violations())
                .await?;
            return Ok(FormOutcome::Render(page));
        }

        let created = self.store.insert_book(&draft.to_data()?).await?;
        tracing::info!(id = created.id, author_id = created.author_id, "Created book");
        Ok(FormOutcome::Redirect(created.url()))
    }

    pub async fn update_form(&self, id: i32) -> AppResult<View> {
        let (detail, authors, genres) = tokio::try_join!(
            self.store.find_book(id),
            self.store.list_authors(),
            self.store.list_genres(),
        )?;
        let detail = detail.ok_or_else(|| not_found(id))?;

        Ok(View::BookForm(BookFormPage {
            title: UPDATE_TITLE,
            authors,
            genres,
            book: BookDraft::from(&detail),
            errors: Vec::new(),
        }))
    }

    pub async fn update(&self, id: i32, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = BookDraft::from_submission(&checked, Some(id));

        if !checked.is_valid() {
            tracing::debug!(id, violations = checked.violations().len(), "Book form rejected");
            let page = self
                .form_page(UPDATE_TITLE, draft, checked.into_violations())
                .await?;
            return Ok(FormOutcome::Render(page));
        }

        self.store
            .update_book(id, &draft.to_data()?)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "Updated book");
        Ok(FormOutcome::Redirect(book_url(id)))
    }

    pub async fn delete_form(&self, id: i32) -> AppResult<View> {
        let (detail, copies) =
            tokio::try_join!(self.store.find_book(id), self.store.instances_of_book(id))?;
        let detail = detail.ok_or_else(|| not_found(id))?;
        Ok(View::BookDelete(BookDeletePage { detail, copies }))
    }

    /// Delete a book that has no copies; otherwise show the blocking copies
    pub async fn delete(&self, id: i32) -> AppResult<FormOutcome> {
        let (detail, copies) =
            tokio::try_join!(self.store.find_book(id), self.store.instances_of_book(id))?;
        let detail = detail.ok_or_else(|| not_found(id))?;

        if !copies.is_empty() {
            tracing::info!(id, copies = copies.len(), "Book delete blocked by copies");
            return Ok(FormOutcome::Render(View::BookDelete(BookDeletePage { detail, copies })));
        }

        self.store.remove_book(id).await?;
        tracing::info!(id, "Deleted book");
        Ok(FormOutcome::Redirect("/catalog/books".to_string()))
    }

    /// Book form with the author and genre choices loaded
    async fn form_page(
        &self,
        title: &'static str,
        book: BookDraft,
        errors: Vec<Violation>,
    ) -> AppResult<View> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(View::BookForm(BookFormPage {
            title,
            authors,
            genres,
            book,
            errors,
        }))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Author, Book, BookDetail, BookInstance, BookStatus, Genre},
        repository::MockCatalogStore,
    };
    use tokio_test::{assert_err, assert_ok};

    fn service(store: MockCatalogStore) -> BooksService {
        BooksService::new(Arc::new(store))
    }

    fn detail(id: i32) -> BookDetail {
        BookDetail {
            book: Book {
                id,
                title: "Emma".to_string(),
                author_id: 1,
                summary: "Matchmaking".to_string(),
                isbn: "9780141439587".to_string(),
            },
            author: None,
            genres: vec![Genre { id: 2, name: "Fiction".to_string() }],
        }
    }

    fn with_choices(store: &mut MockCatalogStore, times: usize) {
        store.expect_list_authors().times(times).returning(|| {
            Ok(vec![Author {
                id: 1,
                first_name: "Jane".to_string(),
                family_name: "Austen".to_string(),
                date_of_birth: None,
                date_of_death: None,
            }])
        });
        store
            .expect_list_genres()
            .times(times)
            .returning(|| Ok(vec![Genre { id: 2, name: "Fiction".to_string() }]));
    }

    #[tokio::test]
    async fn test_rejected_book_keeps_ticked_genres() {
        let mut store = MockCatalogStore::new();
        with_choices(&mut store, 1);
        store.expect_insert_book().never();

        let form: FormData = [
            ("title", "Emma"),
            ("author", "1"),
            ("summary", ""),
            ("isbn", "9780141439587"),
            ("genre", "2"),
        ]
        .into_iter()
        .collect();
        let outcome = assert_ok!(service(store).create(&form).await);

        let FormOutcome::Render(View::BookForm(page)) = outcome else {
            panic!("expected the form to be rendered again");
        };
        assert_eq!(page.errors.len(), 1);
        assert_eq!(page.errors[0].field, "summary");
        assert_eq!(page.book.author_id(), Some(1));
        assert_eq!(page.book.genre_ids(), vec![2]);
        assert_eq!(page.genres.len(), 1);
    }

    #[tokio::test]
    async fn test_create_links_all_genres() {
        let mut store = MockCatalogStore::new();
        store
            .expect_insert_book()
            .withf(|data| data.author_id == 1 && data.genre_ids == vec![2, 3])
            .times(1)
            .returning(|data| {
                Ok(Book {
                    id: 10,
                    title: data.title.clone(),
                    author_id: data.author_id,
                    summary: data.summary.clone(),
                    isbn: data.isbn.clone(),
                })
            });

        let form: FormData = [
            ("title", "Emma"),
            ("author", "1"),
            ("summary", "Matchmaking"),
            ("isbn", "9780141439587"),
            ("genre", "2"),
            ("genre", "3"),
        ]
        .into_iter()
        .collect();
        let outcome = assert_ok!(service(store).create(&form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/book/10"));
    }

    #[tokio::test]
    async fn test_update_form_missing_book_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book().returning(|_| Ok(None));
        with_choices(&mut store, 1);

        let err = assert_err!(service(store).update_form(42).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_form_prepopulates_genres() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book().returning(|id| Ok(Some(detail(id))));
        with_choices(&mut store, 1);

        let view = assert_ok!(service(store).update_form(10).await);
        let View::BookForm(page) = view else {
            panic!("expected the update form");
        };
        assert_eq!(page.title, UPDATE_TITLE);
        assert_eq!(page.book.id, Some(10));
        assert_eq!(page.book.genre_ids(), vec![2]);
    }

    #[tokio::test]
    async fn test_delete_blocked_by_copies() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book().returning(|id| Ok(Some(detail(id))));
        store.expect_instances_of_book().returning(|book_id| {
            Ok(vec![BookInstance {
                id: 1,
                book_id,
                imprint: "Penguin".to_string(),
                status: BookStatus::Available,
                due_back: None,
            }])
        });
        store.expect_remove_book().never();

        let outcome = assert_ok!(service(store).delete(10).await);
        assert!(matches!(outcome, FormOutcome::Render(View::BookDelete(_))));
    }
}
