use serde::Deserialize;

/// Main configuration structure for Catalog Walker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub loader: LoaderConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Target site: where the walk starts and which links count as categories
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// The root catalog page listing the level-1 departments
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Origin used to resolve relative hrefs
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Absolute URL prefix every category link must start with
    #[serde(rename = "category-prefix")]
    pub category_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: "https://www.tecnomat.it/it/prodotti/".to_string(),
            base_url: "https://www.tecnomat.it".to_string(),
            category_prefix: "https://www.tecnomat.it/it/c/".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "CatalogWalker".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/catalog-walker".to_string(),
            contact_email: "catalog-walker@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Page loading and settle behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Fixed pause after each navigation before the first readiness probe (milliseconds)
    #[serde(rename = "settle-delay")]
    pub settle_delay: u64,

    /// Ceiling on how long to poll for page content to materialize (milliseconds)
    #[serde(rename = "settle-timeout")]
    pub settle_timeout: u64,

    /// Pause between readiness probes (milliseconds)
    #[serde(rename = "poll-interval")]
    pub poll_interval: u64,

    /// Per-request HTTP timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            settle_delay: 1000,
            settle_timeout: 3000,
            poll_interval: 1000,
            request_timeout: 30,
        }
    }
}

/// CSS selectors describing the catalog markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Level-1 department card container on the root page
    #[serde(rename = "l1-card")]
    pub l1_card: String,

    /// Title element inside a level-1 card
    #[serde(rename = "l1-title")]
    pub l1_title: String,

    /// Anchor inside a level-1 card
    #[serde(rename = "l1-link")]
    pub l1_link: String,

    /// Subcategory anchor (shared by level 2 and level 3 pages)
    #[serde(rename = "subcategory-link")]
    pub subcategory_link: String,

    /// One product item on a leaf listing
    #[serde(rename = "product-item")]
    pub product_item: String,

    /// Element inside an item that carries the SKU attribute
    #[serde(rename = "product-wrapper")]
    pub product_wrapper: String,

    /// Attribute name on the wrapper holding the SKU
    #[serde(rename = "sku-attribute")]
    pub sku_attribute: String,

    #[serde(rename = "product-name")]
    pub product_name: String,

    #[serde(rename = "product-url")]
    pub product_url: String,

    #[serde(rename = "product-image")]
    pub product_image: String,

    #[serde(rename = "price-gross")]
    pub price_gross: String,

    #[serde(rename = "price-net")]
    pub price_net: String,

    #[serde(rename = "price-unit")]
    pub price_unit: String,

    pub availability: String,

    #[serde(rename = "price-numeric")]
    pub price_numeric: String,

    pub currency: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            l1_card: "div.tailored-service".to_string(),
            l1_title: "h3.h3-service".to_string(),
            l1_link: "a.service-btn".to_string(),
            subcategory_link: "a.bm_elem-product".to_string(),
            product_item: "li.ais-Hits-item".to_string(),
            product_wrapper: "div.result-wrapper".to_string(),
            sku_attribute: "data-sku".to_string(),
            product_name: "h2[itemprop='name']".to_string(),
            product_url: "meta[itemprop='url']".to_string(),
            product_image: "img[itemprop='image']".to_string(),
            price_gross: "span[data-price='gross']".to_string(),
            price_net: "span[data-price='net']".to_string(),
            price_unit: "span.price-label".to_string(),
            availability: "span.result-availability-text".to_string(),
            price_numeric: "meta[itemprop='lowPrice']".to_string(),
            currency: "meta[itemprop='priceCurrency']".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file records are appended to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "tecnomat_catalog_onepage_per_leaf.csv".to_string(),
        }
    }
}
