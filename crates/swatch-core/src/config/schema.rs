use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwatchConfig {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub fragments: FragmentConfig,
}

/// Settings the theme stores on the `variant-options` element's dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_section")]
    pub section: String,
    /// Section that renders the fragment when the widget lives inside a
    /// different section (quick view, featured product).
    #[serde(default)]
    pub original_section: Option<String>,
    #[serde(default = "default_product_url")]
    pub product_url: String,
    #[serde(default = "default_update_url")]
    pub update_url: bool,
    #[serde(default)]
    pub shop_url: Option<String>,
    #[serde(default)]
    pub strings: VariantStrings,
}

impl WidgetConfig {
    /// Section id used for fragment requests and as the source of patched
    /// elements.
    pub fn render_section(&self) -> &str {
        self.original_section.as_deref().unwrap_or(&self.section)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            section: default_section(),
            original_section: None,
            product_url: default_product_url(),
            update_url: default_update_url(),
            shop_url: None,
            strings: VariantStrings::default(),
        }
    }
}

fn default_section() -> String {
    "main-product".to_string()
}

fn default_product_url() -> String {
    "/products/product".to_string()
}

fn default_update_url() -> bool {
    true
}

/// Button labels, mirroring the theme's `window.variantStrings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStrings {
    #[serde(default = "default_add_to_cart")]
    pub add_to_cart: String,
    #[serde(default = "default_sold_out")]
    pub sold_out: String,
    #[serde(default = "default_unavailable")]
    pub unavailable: String,
}

impl Default for VariantStrings {
    fn default() -> Self {
        Self {
            add_to_cart: default_add_to_cart(),
            sold_out: default_sold_out(),
            unavailable: default_unavailable(),
        }
    }
}

fn default_add_to_cart() -> String {
    "Add to cart".to_string()
}

fn default_sold_out() -> String {
    "Sold out".to_string()
}

fn default_unavailable() -> String {
    "Unavailable".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentConfig {
    #[serde(default = "default_fragments_enabled")]
    pub enabled: bool,
    /// Storefront origin the product URL is resolved against.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_fragments_enabled(),
            base_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_fragments_enabled() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    10000
}
