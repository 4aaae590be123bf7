//! Display text for `[url:title]` links.

use rustc_hash::FxHashMap;

/// Resolves the display text of a `[url:title]` link.
///
/// The call is synchronous and may block (a resolver that fetches the page
/// title over the network is the typical implementation); timeouts are the
/// resolver's own business. Any `FnMut(&str) -> String` closure qualifies.
///
/// # Example
/// ```
/// use xatena::{Converter, InlineFormatter, Options};
///
/// let formatter = InlineFormatter::with_title_resolver(|uri: &str| format!("title of {uri}"));
/// let mut converter = Converter::with_formatter(formatter, Options::default());
/// assert_eq!(
///     converter.to_html("[http://example.com/:title]"),
///     "<p><a href=\"http://example.com/\">title of http://example.com/</a></p>"
/// );
/// ```
pub trait TitleResolver {
    fn resolve_title(&mut self, uri: &str) -> String;
}

impl<F> TitleResolver for F
where
    F: FnMut(&str) -> String,
{
    #[inline]
    fn resolve_title(&mut self, uri: &str) -> String {
        self(uri)
    }
}

/// Default resolver: the URI is its own title.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriAsTitle;

impl TitleResolver for UriAsTitle {
    #[inline]
    fn resolve_title(&mut self, uri: &str) -> String {
        uri.to_owned()
    }
}

/// Memoizes another resolver per URI.
///
/// Keeps repeated links to one page from triggering repeated lookups. The
/// cache lives as long as the wrapper, across documents.
#[derive(Debug, Default)]
pub struct CachedTitles<R> {
    inner: R,
    cache: FxHashMap<String, String>,
}

impl<R: TitleResolver> CachedTitles<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: FxHashMap::default(),
        }
    }

    /// Number of cached titles.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop all cached titles.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<R: TitleResolver> TitleResolver for CachedTitles<R> {
    fn resolve_title(&mut self, uri: &str) -> String {
        if let Some(title) = self.cache.get(uri) {
            return title.clone();
        }
        let title = self.inner.resolve_title(uri);
        self.cache.insert(uri.to_owned(), title.clone());
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_as_title() {
        assert_eq!(UriAsTitle.resolve_title("http://a/"), "http://a/");
    }

    #[test]
    fn test_closure_resolver() {
        let mut resolver = |uri: &str| uri.to_uppercase();
        assert_eq!(resolver.resolve_title("http://a/"), "HTTP://A/");
    }

    #[test]
    fn test_cache_calls_inner_once_per_uri() {
        let mut calls = 0;
        {
            let mut cached = CachedTitles::new(|uri: &str| {
                calls += 1;
                format!("<{uri}>")
            });
            assert_eq!(cached.resolve_title("http://a/"), "<http://a/>");
            assert_eq!(cached.resolve_title("http://a/"), "<http://a/>");
            assert_eq!(cached.resolve_title("http://b/"), "<http://b/>");
            assert_eq!(cached.len(), 2);
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_cache_clear() {
        let mut cached = CachedTitles::new(UriAsTitle);
        cached.resolve_title("http://a/");
        cached.clear();
        assert!(cached.is_empty());
    }
}
