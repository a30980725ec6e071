//! Server-rendered pages
//!
//! Pages are plain HTML strings; interaction (modal, clipboard, launch and
//! log submission) lives in the scripts under `static/`.

pub mod detail;
pub mod hub;
pub mod quick_log;

use std::fmt::Write;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell.
pub fn page(title: &str, body: &str, scripts: &[&str]) -> String {
    let mut html = format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n<body>\n{}\n",
        escape(title),
        body
    );
    for script in scripts {
        let _ = writeln!(html, "<script src=\"/static/{}\" defer></script>", escape(script));
    }
    html.push_str("</body>\n</html>\n");
    html
}

pub fn not_found() -> String {
    page(
        "Not found",
        "<main class=\"page\"><h1>404</h1><p class=\"muted\">This project could not be found.</p>\
         <p><a href=\"/hub\">&larr; Back to the hub</a></p></main>",
        &[],
    )
}
