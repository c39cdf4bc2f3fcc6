//! Book instance (copy) service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{book_instance::book_instance_url, BookInstanceDraft, BookStatus},
    repository::CatalogStore,
    validation::{self, field, FieldRule, FormData, Violation},
    views::{
        BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage,
        BookInstanceListPage, View,
    },
};

use super::FormOutcome;

const CREATE_TITLE: &str = "Create BookInstance";
const UPDATE_TITLE: &str = "Update BookInstance";

fn rules() -> Vec<FieldRule> {
    vec![
        field("book")
            .not_empty("Book must be specified")
            .integer("Book must be specified"),
        field("imprint").not_empty("Imprint must be specified"),
        field("status")
            .optional()
            .one_of(&BookStatus::NAMES, "Invalid status"),
        field("due_back").optional().iso_date("Invalid date").to_date(),
    ]
}

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View> {
        let instances = self.store.list_book_instances().await?;
        Ok(View::BookInstanceList(BookInstanceListPage { instances }))
    }

    pub async fn detail(&self, id: i32) -> AppResult<View> {
        let detail = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(View::BookInstanceDetail(BookInstanceDetailPage { detail }))
    }

    pub async fn create_form(&self) -> AppResult<View> {
        let book_list = self.store.book_options().await?;
        Ok(View::BookInstanceForm(BookInstanceFormPage {
            title: CREATE_TITLE,
            book_list,
            selected_book: None,
            bookinstance: BookInstanceDraft::default(),
            errors: Vec::new(),
        }))
    }

    pub async fn create(&self, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = BookInstanceDraft::from_submission(&checked, None);

        if !checked.is_valid() {
            return self
                .rejected(CREATE_TITLE, draft, checked.into_violations())
                .await;
        }

        let created = self.store.insert_book_instance(&draft.to_data()?).await?;
        tracing::info!(id = created.id, book_id = created.book_id, "Created book instance");
        Ok(FormOutcome::Redirect(created.url()))
    }

    pub async fn update_form(&self, id: i32) -> AppResult<View> {
        let (detail, book_list) = tokio::try_join!(
            self.store.find_book_instance(id),
            self.store.book_options(),
        )?;
        let detail = detail.ok_or_else(|| not_found(id))?;

        Ok(View::BookInstanceForm(BookInstanceFormPage {
            title: UPDATE_TITLE,
            book_list,
            selected_book: Some(detail.instance.book_id),
            bookinstance: BookInstanceDraft::from(&detail.instance),
            errors: Vec::new(),
        }))
    }

    pub async fn update(&self, id: i32, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = BookInstanceDraft::from_submission(&checked, Some(id));

        if !checked.is_valid() {
            return self
                .rejected(UPDATE_TITLE, draft, checked.into_violations())
                .await;
        }

        self.store
            .update_book_instance(id, &draft.to_data()?)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "Updated book instance");
        Ok(FormOutcome::Redirect(book_instance_url(id)))
    }

    pub async fn delete_form(&self, id: i32) -> AppResult<View> {
        let detail = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(View::BookInstanceDelete(BookInstanceDeletePage { detail }))
    }

    pub async fn delete(&self, id: i32) -> AppResult<FormOutcome> {
        self.store.remove_book_instance(id).await?;
        tracing::info!(id, "Deleted book instance");
        Ok(FormOutcome::Redirect("/catalog/bookinstances".to_string()))
    }

    /// Re-render a rejected form; the book list is fetched again
    async fn rejected(
        &self,
        title: &'static str,
        draft: BookInstanceDraft,
        errors: Vec<Violation>,
    ) -> AppResult<FormOutcome> {
        tracing::debug!(violations = errors.len(), "Book instance form rejected");
        let book_list = self.store.book_options().await?;
        Ok(FormOutcome::Render(View::BookInstanceForm(BookInstanceFormPage {
            title,
            book_list,
            selected_book: draft.book_id(),
            bookinstance: draft,
            errors,
        })))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book instance {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BookInstance, BookInstanceDetail, BookOption},
        repository::MockCatalogStore,
    };
    use chrono::NaiveDate;
    use tokio_test::{assert_err, assert_ok};

    fn options() -> Vec<BookOption> {
        vec![BookOption { id: 1, title: "Emma".to_string() }]
    }

    fn service(store: MockCatalogStore) -> BookInstancesService {
        BookInstancesService::new(Arc::new(store))
    }

    fn instance(id: i32) -> BookInstance {
        BookInstance {
            id,
            book_id: 1,
            imprint: "Penguin".to_string(),
            status: BookStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2024, 6, 1),
        }
    }

    #[tokio::test]
    async fn test_create_with_blank_book_rerenders_without_writing() {
        let mut store = MockCatalogStore::new();
        store.expect_book_options().times(1).returning(|| Ok(options()));
        store.expect_insert_book_instance().never();

        let form: FormData = [("book", ""), ("imprint", "Penguin"), ("due_back", "")]
            .into_iter()
            .collect();
        let outcome = assert_ok!(service(store).create(&form).await);

        let FormOutcome::Render(View::BookInstanceForm(page)) = outcome else {
            panic!("expected the form to be rendered again");
        };
        assert_eq!(page.title, CREATE_TITLE);
        assert_eq!(page.errors.len(), 1);
        assert_eq!(page.errors[0].field, "book");
        assert_eq!(page.bookinstance.imprint, "Penguin");
        assert_eq!(page.bookinstance.book, "");
        assert_eq!(page.selected_book, None);
        assert_eq!(page.book_list, options());
    }

    #[tokio::test]
    async fn test_create_valid_redirects_to_new_copy() {
        let mut store = MockCatalogStore::new();
        store.expect_book_options().never();
        store
            .expect_insert_book_instance()
            .withf(|data| {
                data.book_id == 1
                    && data.imprint == "Penguin"
                    && data.status == BookStatus::Maintenance
                    && data.due_back.is_none()
            })
            .times(1)
            .returning(|data| {
                Ok(BookInstance {
                    id: 77,
                    book_id: data.book_id,
                    imprint: data.imprint.clone(),
                    status: data.status,
                    due_back: data.due_back,
                })
            });

        let form: FormData = [("book", "1"), ("imprint", " Penguin "), ("due_back", "")]
            .into_iter()
            .collect();
        let outcome = assert_ok!(service(store).create(&form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/bookinstance/77"));
    }

    #[tokio::test]
    async fn test_create_store_failure_propagates() {
        let mut store = MockCatalogStore::new();
        store
            .expect_insert_book_instance()
            .returning(|_| Err(AppError::Store("write refused".into())));

        let form: FormData = [("book", "1"), ("imprint", "Penguin")].into_iter().collect();
        let err = assert_err!(service(store).create(&form).await);
        assert!(matches!(err, AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_rejected_form_keeps_selected_book_and_status() {
        let mut store = MockCatalogStore::new();
        store.expect_book_options().times(1).returning(|| Ok(options()));
        store.expect_insert_book_instance().never();

        let form: FormData = [
            ("book", "1"),
            ("imprint", ""),
            ("status", "Reserved"),
            ("due_back", "tomorrow"),
        ]
        .into_iter()
        .collect();
        let outcome = assert_ok!(service(store).create(&form).await);

        let FormOutcome::Render(View::BookInstanceForm(page)) = outcome else {
            panic!("expected the form to be rendered again");
        };
        let fields: Vec<&str> = page.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["imprint", "due_back"]);
        assert_eq!(page.selected_book, Some(1));
        assert_eq!(page.bookinstance.status(), BookStatus::Reserved);
        assert_eq!(page.bookinstance.due_back, "tomorrow");
    }

    #[tokio::test]
    async fn test_update_form_missing_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));
        store.expect_book_options().returning(|| Ok(options()));

        let err = assert_err!(service(store).update_form(42).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_form_fan_out_failure_wins() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|id| {
            Ok(Some(BookInstanceDetail { instance: instance(id), book: None }))
        });
        store
            .expect_book_options()
            .returning(|| Err(AppError::Store("books unavailable".into())));

        let err = assert_err!(service(store).update_form(3).await);
        assert_eq!(err.to_string(), "Store error: books unavailable");
    }

    #[tokio::test]
    async fn test_update_form_prepopulates() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|id| {
            Ok(Some(BookInstanceDetail {
                instance: instance(id),
                book: Some(BookOption { id: 1, title: "Emma".to_string() }),
            }))
        });
        store.expect_book_options().returning(|| Ok(options()));

        let view = assert_ok!(service(store).update_form(3).await);
        let View::BookInstanceForm(page) = view else {
            panic!("expected the update form");
        };
        assert_eq!(page.title, UPDATE_TITLE);
        assert_eq!(page.selected_book, Some(1));
        assert_eq!(page.bookinstance.id, Some(3));
        assert_eq!(page.bookinstance.due_back, "2024-06-01");
    }

    #[tokio::test]
    async fn test_update_writes_in_place_and_redirects() {
        let mut store = MockCatalogStore::new();
        store
            .expect_update_book_instance()
            .withf(|id, data| *id == 9 && data.status == BookStatus::Available)
            .times(1)
            .returning(|id, _| Ok(Some(instance(id))));
        store.expect_insert_book_instance().never();

        let form: FormData = [("book", "1"), ("imprint", "Penguin"), ("status", "Available")]
            .into_iter()
            .collect();
        let outcome = assert_ok!(service(store).update(9, &form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/bookinstance/9"));
    }

    #[tokio::test]
    async fn test_update_invalid_never_writes() {
        let mut store = MockCatalogStore::new();
        store.expect_book_options().times(1).returning(|| Ok(options()));
        store.expect_update_book_instance().never();

        let form: FormData = [("book", "1"), ("imprint", "Penguin"), ("status", "Lost")]
            .into_iter()
            .collect();
        let outcome = assert_ok!(service(store).update(9, &form).await);
        let FormOutcome::Render(View::BookInstanceForm(page)) = outcome else {
            panic!("expected the form to be rendered again");
        };
        assert_eq!(page.bookinstance.id, Some(9));
        assert_eq!(page.errors[0].message, "Invalid status");
    }

    #[tokio::test]
    async fn test_delete_redirects_to_listing() {
        let mut store = MockCatalogStore::new();
        store
            .expect_remove_book_instance()
            .withf(|id| *id == 4)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = assert_ok!(service(store).delete(4).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/bookinstances"));
    }

    #[tokio::test]
    async fn test_delete_form_missing_copy_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));

        let err = assert_err!(service(store).delete_form(8).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
