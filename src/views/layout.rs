//! Page shell and shared fragments

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::validation::Violation;

/// Text that went through form sanitization is already HTML-escaped
pub fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Wrap page content in the site layout with the sidebar navigation
pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (stored(title)) " | Local Library" }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/bookinstances" { "All book-instances" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/author/create" { "Create new author" } }
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                        li { a href="/catalog/book/create" { "Create new book" } }
                        li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                    }
                }
                main {
                    h1 { (stored(title)) }
                    (content)
                }
            }
        }
    }
}

/// Field violations listed under a rejected form
pub fn violations(errors: &[Violation]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}

/// Generic failure page rendered by the error boundary
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorPage {
    pub fn render(&self) -> Markup {
        let title = self.status.canonical_reason().unwrap_or("Error");
        page(
            title,
            html! {
                p class="status" { (self.status.as_u16()) }
                p { (self.message) }
                p { a href="/catalog" { "Back to the catalog" } }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_text_not_escaped_twice() {
        let html = page("O&#x27;Brien", html! {}).into_string();
        assert!(html.contains("<h1>O&#x27;Brien</h1>"));
    }

    #[test]
    fn test_violations_listed_in_order() {
        let errors = vec![
            Violation { field: "book".into(), message: "Book must be specified".into() },
            Violation { field: "imprint".into(), message: "Imprint must be specified".into() },
        ];
        let html = violations(&errors).into_string();
        let book = html.find("Book must be specified").unwrap();
        let imprint = html.find("Imprint must be specified").unwrap();
        assert!(book < imprint);
        assert!(violations(&[]).into_string().is_empty());
    }
}
