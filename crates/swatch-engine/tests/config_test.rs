use std::io::Write;
use swatch_engine::config::loader::ConfigLoader;
use swatch_engine::config::schema::SwatchConfig;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
widget:
  section: template--main
  original_section: template--featured
  product_url: /products/linen-shirt
  update_url: false
  strings:
    sold_out: "Épuisé"
fragments:
  base_url: https://shop.example
  timeout_ms: 2500
    "#
    )
    .unwrap();

    let config = ConfigLoader::load_from(file.path())
        .await
        .expect("Failed to load config from file");

    assert_eq!(config.widget.section, "template--main");
    assert_eq!(config.widget.render_section(), "template--featured");
    assert_eq!(config.widget.product_url, "/products/linen-shirt");
    assert!(!config.widget.update_url);
    assert_eq!(config.widget.strings.sold_out, "Épuisé");
    // Unspecified strings keep their defaults.
    assert_eq!(config.widget.strings.add_to_cart, "Add to cart");
    assert_eq!(
        config.fragments.base_url.as_deref(),
        Some("https://shop.example")
    );
    assert_eq!(config.fragments.timeout_ms, 2500);
    assert!(config.fragments.enabled);
}

#[test]
fn test_default_values() {
    let config = SwatchConfig::default();
    assert_eq!(config.widget.section, "main-product");
    assert_eq!(config.widget.render_section(), "main-product");
    assert!(config.widget.update_url);
    assert!(config.widget.shop_url.is_none());
    assert_eq!(config.widget.strings.unavailable, "Unavailable");
    assert!(config.fragments.enabled);
    assert_eq!(config.fragments.timeout_ms, 10000);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_load_from_nonexistent_file() {
    let result =
        ConfigLoader::load_from(std::path::Path::new("/nonexistent/path/swatch.yaml")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_from_invalid_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "widget: [unclosed").unwrap();

    let result = ConfigLoader::load_from(file.path()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_wrong_type_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "fragments:\n  timeout_ms: soon").unwrap();

    let result = ConfigLoader::load_from(file.path()).await;
    assert!(result.is_err());
}
