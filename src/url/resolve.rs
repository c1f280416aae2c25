use crate::config::SiteConfig;
use crate::Result;
use url::Url;

/// Resolves an href to an absolute URL against `base`
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:` schemes and data URIs
/// - fragment-only links (same page anchors)
/// - hrefs that fail to resolve or resolve to a non-HTTP(S) URL
///
/// # Examples
///
/// ```
/// use catalog_walker::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://www.tecnomat.it").unwrap();
/// assert_eq!(
///     resolve_href(&base, "/it/c/bagno").as_deref(),
///     Some("https://www.tecnomat.it/it/c/bagno")
/// );
/// assert_eq!(resolve_href(&base, "javascript:void(0)"), None);
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

/// Returns true if `url` lies under the category path `prefix`
///
/// Navigation chrome (footer, promos, account links) often reuses the same
/// CSS classes as category links; the prefix check filters it out.
pub fn is_category_url(url: &str, prefix: &str) -> bool {
    url.starts_with(prefix)
}

/// The base origin and category prefix links are judged against
#[derive(Debug, Clone)]
pub struct CategoryScope {
    base: Url,
    prefix: String,
}

impl CategoryScope {
    /// Builds a scope from the site configuration
    pub fn from_site(site: &SiteConfig) -> Result<Self> {
        Ok(Self::new(Url::parse(&site.base_url)?, &site.category_prefix))
    }

    pub fn new(base: Url, prefix: &str) -> Self {
        Self {
            base,
            prefix: prefix.to_string(),
        }
    }

    /// Resolves `href` and keeps it only if it is a category URL
    pub fn accept(&self, href: &str) -> Option<String> {
        resolve_href(&self.base, href).filter(|url| is_category_url(url, &self.prefix))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}
