//! HTML pages: registration form, confirmation and book listing

use std::fmt::Write;

use crate::models::book::Book;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<nav><a href="/">Register a book</a> | <a href="/books">All books</a></nav>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

const FORM_FIELDS: [(&str, &str, usize); 6] = [
    ("title", "Title", 255),
    ("author", "Author", 100),
    ("publisher", "Publisher", 100),
    ("bn_id", "BN ID", 50),
    ("genre", "Genre", 50),
    ("language", "Language", 100),
];

/// Registration form, with an optional error message from the last attempt
pub fn register_form(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Register a book</h1>\n");
    if let Some(message) = error {
        let _ = writeln!(body, r#"<p class="error">{}</p>"#, escape(message));
    }
    body.push_str("<form method=\"post\" action=\"/register_book\">\n");
    for (name, label, max) in FORM_FIELDS {
        let _ = writeln!(
            body,
            r#"<label>{label} <input type="text" name="{name}" maxlength="{max}" required></label><br>"#
        );
    }
    body.push_str("<button type=\"submit\">Register</button>\n</form>");
    layout("Register a book", &body)
}

pub fn success() -> String {
    layout(
        "Registration complete",
        "<h1>Registration complete</h1>\n<p>The book has been registered.</p>",
    )
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>",
        escape(message)
    );
    layout("Error", &body)
}

/// Book table, in the order given
pub fn book_list(books: &[Book]) -> String {
    let mut body = String::from("<h1>Registered books</h1>\n");
    if books.is_empty() {
        body.push_str("<p>No books registered yet.</p>");
        return layout("Registered books", &body);
    }

    body.push_str(
        "<table>\n<tr><th>ID</th><th>Title</th><th>Author</th><th>Publisher</th>\
         <th>BN ID</th><th>Genre</th><th>Language</th><th>Registered</th></tr>\n",
    );
    for book in books {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            book.id,
            escape(&book.title),
            escape(&book.author),
            escape(&book.publisher),
            escape(&book.bn_id),
            escape(&book.genre),
            escape(&book.language),
            book.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    body.push_str("</table>");
    layout("Registered books", &body)
}
