//! Genre service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{genre::genre_url, GenreDraft},
    repository::CatalogStore,
    validation::{self, field, FieldRule, FormData},
    views::{GenreDeletePage, GenreDetailPage, GenreFormPage, GenreListPage, View},
};

use super::FormOutcome;

const CREATE_TITLE: &str = "Create Genre";
const UPDATE_TITLE: &str = "Update Genre";

fn rules() -> Vec<FieldRule> {
    vec![field("name")
        .not_empty("Genre name must be specified.")
        .min_length(3, "Genre name must contain at least 3 characters.")
        .max_length(100, "Genre name must be at most 100 characters.")]
}

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View> {
        let genres = self.store.list_genres().await?;
        Ok(View::GenreList(GenreListPage { genres }))
    }

    pub async fn detail(&self, id: i32) -> AppResult<View> {
        let (genre, books) =
            tokio::try_join!(self.store.find_genre(id), self.store.books_by_genre(id))?;
        let genre = genre.ok_or_else(|| not_found(id))?;
        Ok(View::GenreDetail(GenreDetailPage { genre, books }))
    }

    pub fn create_form(&self) -> View {
        View::GenreForm(GenreFormPage {
            title: CREATE_TITLE,
            genre: GenreDraft::default(),
            errors: Vec::new(),
        })
    }

    /// Create a genre, or redirect to the existing one with the same name
    pub async fn create(&self, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = GenreDraft::from_submission(&checked, None);

        if !checked.is_valid() {
            return Ok(FormOutcome::Render(View::GenreForm(GenreFormPage {
                title: CREATE_TITLE,
                genre: draft,
                errors: checked.into_violations(),
            })));
        }

        let name = draft.to_name()?;
        if let Some(existing) = self.store.find_genre_by_name(name).await? {
            tracing::debug!(id = existing.id, "Genre already exists");
            return Ok(FormOutcome::Redirect(existing.url()));
        }

        let created = self.store.insert_genre(name).await?;
        tracing::info!(id = created.id, "Created genre");
        Ok(FormOutcome::Redirect(created.url()))
    }

    pub async fn update_form(&self, id: i32) -> AppResult<View> {
        let genre = self
            .store
            .find_genre(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(View::GenreForm(GenreFormPage {
            title: UPDATE_TITLE,
            genre: GenreDraft::from(&genre),
            errors: Vec::new(),
        }))
    }

    pub async fn update(&self, id: i32, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = GenreDraft::from_submission(&checked, Some(id));

        if !checked.is_valid() {
            return Ok(FormOutcome::Render(View::GenreForm(GenreFormPage {
                title: UPDATE_TITLE,
                genre: draft,
                errors: checked.into_violations(),
            })));
        }

        self.store
            .update_genre(id, draft.to_name()?)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "Updated genre");
        Ok(FormOutcome::Redirect(genre_url(id)))
    }

    pub async fn delete_form(&self, id: i32) -> AppResult<View> {
        let (genre, books) =
            tokio::try_join!(self.store.find_genre(id), self.store.books_by_genre(id))?;
        let genre = genre.ok_or_else(|| not_found(id))?;
        Ok(View::GenreDelete(GenreDeletePage { genre, books }))
    }

    pub async fn delete(&self, id: i32) -> AppResult<FormOutcome> {
        let (genre, books) =
            tokio::try_join!(self.store.find_genre(id), self.store.books_by_genre(id))?;
        let genre = genre.ok_or_else(|| not_found(id))?;

        if !books.is_empty() {
            tracing::info!(id, books = books.len(), "Genre delete blocked by books");
            return Ok(FormOutcome::Render(View::GenreDelete(GenreDeletePage { genre, books })));
        }

        self.store.remove_genre(id).await?;
        tracing::info!(id, "Deleted genre");
        Ok(FormOutcome::Redirect("/catalog/genres".to_string()))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Genre {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Genre,
        repository::{MemoryStore, MockCatalogStore},
    };
    use tokio_test::{assert_err, assert_ok};

    fn service(store: MockCatalogStore) -> GenresService {
        GenresService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_short_name_is_rejected() {
        let mut store = MockCatalogStore::new();
        store.expect_find_genre_by_name().never();
        store.expect_insert_genre().never();

        let form: FormData = [("name", " SF ")].into_iter().collect();
        let outcome = assert_ok!(service(store).create(&form).await);

        let FormOutcome::Render(View::GenreForm(page)) = outcome else {
            panic!("expected the form to be rendered again");
        };
        assert_eq!(page.genre.name, "SF");
        assert_eq!(page.errors.len(), 1);
        assert_eq!(page.errors[0].message, "Genre name must contain at least 3 characters.");
    }

    #[tokio::test]
    async fn test_existing_name_redirects_without_insert() {
        let mut store = MockCatalogStore::new();
        store
            .expect_find_genre_by_name()
            .withf(|name| name.to_string() == "Poetry")
            .returning(|_| Ok(Some(Genre { id: 5, name: "poetry".to_string() })));
        store.expect_insert_genre().never();

        let form: FormData = [("name", "Poetry")].into_iter().collect();
        let outcome = assert_ok!(service(store).create(&form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/genre/5"));
    }

    #[tokio::test]
    async fn test_new_name_is_inserted() {
        let mut store = MockCatalogStore::new();
        store.expect_find_genre_by_name().returning(|_| Ok(None));
        store
            .expect_insert_genre()
            .times(1)
            .returning(|name| Ok(Genre { id: 6, name: name.to_string() }));

        let form: FormData = [("name", "Fantasy")].into_iter().collect();
        let outcome = assert_ok!(service(store).create(&form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/genre/6"));
    }

    #[tokio::test]
    async fn test_long_name_with_escapable_characters_is_stored_whole() {
        let store = Arc::new(MemoryStore::new());
        let service = GenresService::new(store.clone());
        let name = "R&B '".repeat(20);
        assert_eq!(name.chars().count(), 100);

        let form: FormData = [("name", name.as_str())].into_iter().collect();
        let outcome = assert_ok!(service.create(&form).await);
        assert!(matches!(outcome, FormOutcome::Redirect(url) if url == "/catalog/genre/1"));

        let stored = store.find_genre(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "R&amp;B &#x27;".repeat(20));
        assert!(stored.name.chars().count() > 100);
    }

    #[tokio::test]
    async fn test_update_form_missing_genre_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_genre().returning(|_| Ok(None));

        let err = assert_err!(service(store).update_form(42).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_genre_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_genre().returning(|_| Ok(None));
        store.expect_books_by_genre().returning(|_| Ok(Vec::new()));
        store.expect_remove_genre().never();

        let err = assert_err!(service(store).delete(42).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
