//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{services::FormOutcome, AppState};

impl IntoResponse for FormOutcome {
    fn into_response(self) -> Response {
        match self {
            FormOutcome::Render(view) => view.into_response(),
            FormOutcome::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list))
        .route(
            "/author/create",
            get(authors::create_form).post(authors::create),
        )
        .route("/author/:id", get(authors::detail))
        .route(
            "/author/:id/update",
            get(authors::update_form).post(authors::update),
        )
        .route(
            "/author/:id/delete",
            get(authors::delete_form).post(authors::delete),
        )
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route(
            "/genre/:id/update",
            get(genres::update_form).post(genres::update),
        )
        .route(
            "/genre/:id/delete",
            get(genres::delete_form).post(genres::delete),
        )
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/update", get(books::update_form).post(books::update))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        // Book instances
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        );

    Router::new()
        .route("/", get(catalog::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{AppConfig, StoreBackend},
        repository::MemoryStore,
        services::Services,
    };

    fn app() -> Router {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(Services::new(Arc::new(MemoryStore::new()))),
        };
        create_router(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_catalog() {
        let response = app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"healthy\""));

        let response = app().oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"store\":\"memory\""));
    }

    #[tokio::test]
    async fn test_index_renders_counts() {
        let response = app().oneshot(get_request("/catalog")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Local Library Home"));
        assert!(html.contains("Copies available:"));
    }

    #[tokio::test]
    async fn test_missing_author_renders_not_found_page() {
        let response = app()
            .oneshot(get_request("/catalog/author/42/update"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("The requested record does not exist."));
    }

    #[tokio::test]
    async fn test_author_create_then_detail() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_form(
                "/catalog/author/create",
                "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let target = location(&response).to_string();
        assert_eq!(target, "/catalog/author/1");

        let response = app.oneshot(get_request(&target)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Austen, Jane"));
        assert!(html.contains("Dec 16, 1775 - present"));
    }

    #[tokio::test]
    async fn test_rejected_form_escapes_echoed_values() {
        let response = app()
            .oneshot(post_form(
                "/catalog/bookinstance/create",
                "book=&imprint=%3Cb%3EPenguin%3C%2Fb%3E&due_back=",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Book must be specified"));
        assert!(html.contains("&lt;b&gt;Penguin&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<b>Penguin"));
    }

    #[tokio::test]
    async fn test_book_with_copies_cannot_be_deleted() {
        let app = app();

        for (uri, body) in [
            ("/catalog/author/create", "first_name=Jane&family_name=Austen"),
            ("/catalog/genre/create", "name=Fiction"),
            (
                "/catalog/book/create",
                "title=Emma&author=1&summary=Matchmaking&isbn=9780141439587&genre=1",
            ),
            ("/catalog/bookinstance/create", "book=1&imprint=Penguin&status=Loaned"),
        ] {
            let response = app.clone().oneshot(post_form(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {}", uri);
        }

        let response = app
            .clone()
            .oneshot(post_form("/catalog/book/1/delete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Delete the following copies"));

        let response = app
            .clone()
            .oneshot(post_form("/catalog/bookinstance/1/delete", ""))
            .await
            .unwrap();
        assert_eq!(location(&response), "/catalog/bookinstances");

        let response = app
            .clone()
            .oneshot(post_form("/catalog/book/1/delete", ""))
            .await
            .unwrap();
        assert_eq!(location(&response), "/catalog/books");

        let response = app.oneshot(get_request("/catalog/book/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
