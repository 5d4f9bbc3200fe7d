use super::Target;
use url::Url;

/// Maps an in-scope absolute URL to its relative on-disk path
///
/// # Mapping Rules
///
/// 1. The query string is always discarded; two URLs differing only by
///    query collide to the same path (first claimer wins downstream).
/// 2. An empty or `/` path maps to the index document name.
/// 3. A path ending in `/` gets the index document name appended.
/// 4. The leading separator is stripped so the result is always relative.
///
/// The mapping is a pure function of the URL and the index name: the same
/// URL always produces the same path, and re-applying the rules to a
/// produced path changes nothing.
///
/// # Arguments
///
/// * `target` - The crawl target (unused for the mapping itself, kept so
///   callers can only map URLs they have already scoped against it)
/// * `url` - The absolute URL to map
/// * `index_file` - The filename substituted for directory-style URLs
///
/// # Examples
///
/// ```
/// use takuhon::url::{clean_path, Target};
/// use url::Url;
///
/// let target = Target::new("https://site.example/").unwrap();
/// let url = Url::parse("https://site.example/about/").unwrap();
/// assert_eq!(clean_path(&target, &url, "index.html"), "about/index.html");
/// ```
pub fn clean_path(target: &Target, url: &Url, index_file: &str) -> String {
    let _ = target;
    let path = url.path();

    if path.is_empty() || path == "/" {
        return index_file.to_string();
    }

    let relative = path.strip_prefix('/').unwrap_or(path);

    if relative.ends_with('/') {
        format!("{}{}", relative, index_file)
    } else {
        relative.to_string()
    }
}
