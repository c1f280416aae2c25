//! Compiled CSS selectors for the catalog markup

use crate::config::SelectorConfig;
use crate::{Result, WalkerError};
use scraper::Selector;

/// Every selector the classifier, link collector and extractor need,
/// compiled once per walk
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub l1_card: Selector,
    pub l1_title: Selector,
    pub l1_link: Selector,
    pub subcategory_link: Selector,
    pub product_item: Selector,
    pub product_wrapper: Selector,
    pub sku_attribute: String,
    pub product_name: Selector,
    pub product_url: Selector,
    pub product_image: Selector,
    pub price_gross: Selector,
    pub price_net: Selector,
    pub price_unit: Selector,
    pub availability: Selector,
    pub price_numeric: Selector,
    pub currency: Selector,
}

impl SelectorSet {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorSet)` - All selectors compiled
    /// * `Err(WalkerError::Selector)` - The first selector that failed to parse
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            l1_card: compile(&config.l1_card)?,
            l1_title: compile(&config.l1_title)?,
            l1_link: compile(&config.l1_link)?,
            subcategory_link: compile(&config.subcategory_link)?,
            product_item: compile(&config.product_item)?,
            product_wrapper: compile(&config.product_wrapper)?,
            sku_attribute: config.sku_attribute.trim().to_string(),
            product_name: compile(&config.product_name)?,
            product_url: compile(&config.product_url)?,
            product_image: compile(&config.product_image)?,
            price_gross: compile(&config.price_gross)?,
            price_net: compile(&config.price_net)?,
            price_unit: compile(&config.price_unit)?,
            availability: compile(&config.availability)?,
            price_numeric: compile(&config.price_numeric)?,
            currency: compile(&config.currency)?,
        })
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| WalkerError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let set = SelectorSet::from_config(&SelectorConfig::default()).unwrap();
        assert_eq!(set.sku_attribute, "data-sku");
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let config = SelectorConfig {
            product_item: "li..broken".to_string(),
            ..SelectorConfig::default()
        };
        match SelectorSet::from_config(&config) {
            Err(WalkerError::Selector { selector, .. }) => assert_eq!(selector, "li..broken"),
            other => panic!("expected selector error, got {:?}", other.map(|_| ())),
        }
    }
}
