//! HTML endpoints: registration form, submission, confirmation and listing

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::{models::book::RegisterBook, views, AppState};

/// Signed cookie carrying an error message across the redirect back to the form
pub const FLASH_COOKIE: &str = "flash";

fn flash(message: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, message))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Registration form; shows and clears a pending flash message.
/// A flash cookie with a bad signature is ignored.
pub async fn home(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let message = jar.get(FLASH_COOKIE).map(|c| c.value().to_string());
    let jar = match message {
        Some(_) => jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
        None => jar,
    };
    (jar, Html(views::register_form(message.as_deref())))
}

/// Form submission: success redirects to `/success`, any failure back to `/`
pub async fn register_book(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(data): Form<RegisterBook>,
) -> (SignedCookieJar, Redirect) {
    match state.services.books.register(&data).await {
        Ok(_) => (jar, Redirect::to("/success")),
        Err(e) => (jar.add(flash(e.user_message())), Redirect::to("/")),
    }
}

pub async fn success() -> Html<String> {
    Html(views::success())
}

/// All books, newest first
pub async fn view_books(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    match state.services.books.list_all().await {
        Ok(books) => Ok(Html(views::book_list(&books))),
        Err(e) => {
            tracing::error!("Listing books failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::error_page(&e.user_message())),
            ))
        }
    }
}
