//! Author service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{author::author_url, AuthorDraft},
    repository::CatalogStore,
    validation::{self, field, FieldRule, FormData},
    views::{AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage, View},
};

use super::FormOutcome;

const CREATE_TITLE: &str = "Create Author";
const UPDATE_TITLE: &str = "Update Author";

fn rules() -> Vec<FieldRule> {
    vec![
        field("first_name")
            .not_empty("First name must be specified.")
            .alphanumeric("First name has non-alphanumeric characters.")
            .max_length(100, "First name must be at most 100 characters."),
        field("family_name")
            .not_empty("Family name must be specified.")
            .alphanumeric("Family name has non-alphanumeric characters.")
            .max_length(100, "Family name must be at most 100 characters."),
        field("date_of_birth")
            .optional()
            .iso_date("Invalid date of birth")
            .to_date(),
        field("date_of_death")
            .optional()
            .iso_date("Invalid date of death")
            .to_date(),
    ]
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View> {
        let authors = self.store.list_authors().await?;
        Ok(View::AuthorList(AuthorListPage { authors }))
    }

    pub async fn detail(&self, id: i32) -> AppResult<View> {
        let (author, books) = tokio::try_join!(
            self.store.find_author(id),
            self.store.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| not_found(id))?;
        Ok(View::AuthorDetail(AuthorDetailPage { author, books }))
    }

    pub fn create_form(&self) -> View {
        View::AuthorForm(AuthorFormPage {
            title: CREATE_TITLE,
            author: AuthorDraft::default(),
            errors: Vec::new(),
        })
    }

    pub async fn create(&self, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = AuthorDraft::from_submission(&checked, None);

        if !checked.is_valid() {
            tracing::debug!(violations = checked.violations().len(), "Author form rejected");
            return Ok(FormOutcome::Render(View::AuthorForm(AuthorFormPage {
                title: CREATE_TITLE,
                author: draft,
                errors: checked.into_violations(),
            })));
        }

        let created = self.store.insert_author(&draft.to_data()?).await?;
        tracing::info!(id = created.id, "Created author");
        Ok(FormOutcome::Redirect(created.url()))
    }

    pub async fn update_form(&self, id: i32) -> AppResult<View> {
        let author = self
            .store
            .find_author(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(View::AuthorForm(AuthorFormPage {
            title: UPDATE_TITLE,
            author: AuthorDraft::from(&author),
            errors: Vec::new(),
        }))
    }

    pub async fn update(&self, id: i32, form: &FormData) -> AppResult<FormOutcome> {
        let checked = validation::check(form, &rules());
        let draft = AuthorDraft::from_submission(&checked, Some(id));

        if !checked.is_valid() {
            tracing::debug!(id, violations = checked.violations().len(), "Author form rejected");
            return Ok(FormOutcome::Render(View::AuthorForm(AuthorFormPage {
                title: UPDATE_TITLE,
                author: draft,
                errors: checked.into_violations(),
            })));
        }

        self.store
            .update_author(id, &draft.to_data()?)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id, "Updated author");
        Ok(FormOutcome::Redirect(author_url(id)))
    }

    pub async fn delete_form(&self, id: i32) -> AppResult<View> {
        let (author, books) = tokio::try_join!(
            self.store.find_author(id),
            self.store.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| not_found(id))?;
        Ok(View::AuthorDelete(AuthorDeletePage { author, books }))
    }

    /// Delete an author that has no books; otherwise show the blocking books
    pub async fn delete(&self, id: i32) -> AppResult<FormOutcome> {
        let (author, books) = tokio::try_join!(
            self.store.find_author(id),
            self.store.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| not_found(id))?;

        if !books.is_empty() {
            tracing::info!(id, books = books.len(), "Author delete blocked by books");
            return Ok(FormOutcome::Render(View::AuthorDelete(AuthorDeletePage {
                author,
                books,
            })));
        }

        self.store.remove_author(id).await?;
        tracing::info!(id, "Deleted author");
        Ok(FormOutcome::Redirect("/catalog/authors".to_string()))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Author {} not found", id))
}
