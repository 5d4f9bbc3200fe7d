//! Textual reference rewriting for captured documents
//!
//! Same-origin absolute references are stripped down to origin-relative
//! ones, and root-relative references lose their leading separator so that
//! the mirror renders from the local directory tree without the origin
//! server. This is deliberately best-effort textual substitution, not a
//! path-aware relative-link recomputation: a reference is only guaranteed
//! correct when the referencing document sits at the same nesting depth as
//! its source path, which holds for documents stored by `clean_path`.

use super::Target;

/// Attribute and function prefixes whose value may carry a root-relative
/// reference in HTML.
const MARKUP_REF_PREFIXES: &[&str] = &[
    "href=\"", "href='", "src=\"", "src='", "url(\"", "url('", "url(",
];

/// Same set for stylesheet text, where only `url(...)` forms appear.
const CSS_REF_PREFIXES: &[&str] = &["url(\"", "url('", "url("];

/// Rewrites rendered page markup so same-origin references resolve locally
///
/// Absolute same-origin URLs are replaced by their origin-relative
/// remainder (no leading separator), and root-relative `href`/`src`/`url`
/// references lose their leading `/`. Protocol-relative `//host` references
/// are left alone.
///
/// # Examples
///
/// ```
/// use takuhon::url::{rewrite_markup, Target};
///
/// let target = Target::new("https://site.example/").unwrap();
/// let html = r#"<a href="https://site.example/about/">About</a>"#;
/// assert_eq!(
///     rewrite_markup(&target, html),
///     r#"<a href="about/">About</a>"#
/// );
/// ```
pub fn rewrite_markup(target: &Target, html: &str) -> String {
    let stripped = strip_origin(target, html);
    strip_root_relative(&stripped, MARKUP_REF_PREFIXES)
}

/// Rewrites stylesheet text the same way markup is rewritten
///
/// Origin-stripping applies to `url(...)` occurrences (quoted and unquoted)
/// and to bare absolute references such as `@import` strings.
pub fn rewrite_stylesheet(target: &Target, css: &str) -> String {
    let stripped = strip_origin(target, css);
    strip_root_relative(&stripped, CSS_REF_PREFIXES)
}

/// Removes the target origin from all absolute same-origin occurrences
///
/// `origin/` is removed first so the remainder carries no leading
/// separator; a bare `origin` with nothing after it is then removed too.
fn strip_origin(target: &Target, text: &str) -> String {
    let origin = target.origin();
    text.replace(&format!("{}/", origin), "").replace(origin, "")
}

/// Drops the leading `/` from references introduced by the given prefixes
///
/// `prefix + "//"` is skipped: that is a protocol-relative URL, and eating
/// one slash would corrupt it.
fn strip_root_relative(text: &str, prefixes: &[&str]) -> String {
    let mut out = text.to_string();
    for prefix in prefixes {
        out = strip_after(&out, prefix);
    }
    out
}

fn strip_after(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(prefix) {
        let end = pos + prefix.len();
        out.push_str(&rest[..end]);
        let tail = &rest[end..];

        if tail.starts_with('/') && !tail.starts_with("//") {
            rest = &tail[1..];
        } else {
            rest = tail;
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::new("https://site.example/").unwrap()
    }

    #[test]
    fn test_markup_absolute_same_origin() {
        let html = r#"<a href="https://site.example/about/">About</a>"#;
        assert_eq!(
            rewrite_markup(&target(), html),
            r#"<a href="about/">About</a>"#
        );
    }

    #[test]
    fn test_markup_no_origin_remains() {
        let html = r#"<img src="https://site.example/img/logo.png">"#;
        let out = rewrite_markup(&target(), html);
        assert!(!out.contains("https://site.example"));
        assert_eq!(out, r#"<img src="img/logo.png">"#);
    }

    #[test]
    fn test_markup_root_relative_href() {
        let html = r#"<link href="/css/site.css" rel="stylesheet">"#;
        assert_eq!(
            rewrite_markup(&target(), html),
            r#"<link href="css/site.css" rel="stylesheet">"#
        );
    }

    #[test]
    fn test_markup_root_relative_src_single_quotes() {
        let html = "<script src='/js/app.js'></script>";
        assert_eq!(
            rewrite_markup(&target(), html),
            "<script src='js/app.js'></script>"
        );
    }

    #[test]
    fn test_markup_inline_style_url() {
        let html = r#"<div style="background:url(/img/bg.png)"></div>"#;
        assert_eq!(
            rewrite_markup(&target(), html),
            r#"<div style="background:url(img/bg.png)"></div>"#
        );
    }

    #[test]
    fn test_markup_protocol_relative_untouched() {
        let html = r#"<script src="//cdn.example/lib.js"></script>"#;
        assert_eq!(rewrite_markup(&target(), html), html);
    }

    #[test]
    fn test_markup_other_origin_untouched() {
        let html = r#"<a href="https://other.example/page">Out</a>"#;
        assert_eq!(rewrite_markup(&target(), html), html);
    }

    #[test]
    fn test_stylesheet_double_quoted_url() {
        let css = r#"body{background:url("https://site.example/img/a.png")}"#;
        assert_eq!(
            rewrite_stylesheet(&target(), css),
            r#"body{background:url("img/a.png")}"#
        );
    }

    #[test]
    fn test_stylesheet_single_quoted_url() {
        let css = "body{background:url('https://site.example/img/a.png')}";
        assert_eq!(
            rewrite_stylesheet(&target(), css),
            "body{background:url('img/a.png')}"
        );
    }

    #[test]
    fn test_stylesheet_unquoted_url() {
        let css = "body{background:url(https://site.example/img/a.png)}";
        assert_eq!(
            rewrite_stylesheet(&target(), css),
            "body{background:url(img/a.png)}"
        );
    }

    #[test]
    fn test_stylesheet_root_relative_url() {
        let css = "body{background:url(/img/a.png)}";
        assert_eq!(
            rewrite_stylesheet(&target(), css),
            "body{background:url(img/a.png)}"
        );
    }

    #[test]
    fn test_stylesheet_bare_import() {
        let css = r#"@import "https://site.example/base.css";"#;
        assert_eq!(rewrite_stylesheet(&target(), css), r#"@import "base.css";"#);
    }

    #[test]
    fn test_origin_with_port() {
        let target = Target::new("http://127.0.0.1:8080/").unwrap();
        let html = r#"<a href="http://127.0.0.1:8080/page">P</a>"#;
        assert_eq!(rewrite_markup(&target, html), r#"<a href="page">P</a>"#);
    }
}
