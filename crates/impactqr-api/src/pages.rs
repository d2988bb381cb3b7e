//! HTML status pages for browsers that follow a link that cannot be served.

use impactqr_store::error::expired_reason;

const STYLE: &str = "body{margin:0;display:grid;place-items:center;min-height:100vh;\
font:16px system-ui;background:#0f1016;color:#e8e8ef}\
.card{padding:28px;border:1px solid rgba(255,255,255,.06);border-radius:16px;\
background:#151622;max-width:600px}";

/// Replace characters that would break a quoted header value.
///
/// Covers CR, LF, double quotes and every other control character.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect()
}

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><meta charset=\"utf-8\">\n<title>{title}</title>\n\
<style>{STYLE}</style>\n<div class=\"card\">\n{body}\n</div>\n"
    )
}

fn file_lines(token: &str, filename: &str) -> String {
    format!(
        "  <p>File: <b>{}</b></p>\n  <p>Token: <code>{}</code></p>",
        escape_html(&sanitize_filename(filename)),
        escape_html(token)
    )
}

/// Page for an unknown token.
pub fn not_found_page() -> String {
    page(
        "Link not found",
        "  <h2>404 &bull; Link not found</h2>\n  <p>Check the URL or upload a new file.</p>",
    )
}

/// Page for a link waiting to be unlocked.
pub fn locked_page(token: &str, filename: &str) -> String {
    page(
        "Link locked",
        &format!(
            "  <h2>&#128274; Link locked</h2>\n{}\n  <p>Ask the sender to unlock it first.</p>",
            file_lines(token, filename)
        ),
    )
}

/// Page for a link that ran out of time or downloads.
pub fn expired_page(token: &str, filename: &str, downloads: u64, limit: Option<u64>) -> String {
    page(
        "Link expired",
        &format!(
            "  <h2>Link expired</h2>\n  <p>{}</p>\n{}",
            escape_html(&expired_reason(downloads, limit)),
            file_lines(token, filename)
        ),
    )
}
