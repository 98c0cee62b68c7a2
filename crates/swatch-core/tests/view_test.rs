use swatch_common::ResourceId;
use swatch_core::config::schema::{VariantStrings, WidgetConfig};
use swatch_core::view::{MediaUpdate, PickupAction};
use swatch_core::{AddButton, SelectionStatus, VariantChange, VariantResolver};

const SHIRT: &str = r#"[
    {"id": 1, "options": ["Red", "S"], "available": true,
     "featured_media": {"id": 500, "preview_image": {"src": "//cdn.shop/red-s.jpg"}}},
    {"id": 2, "options": ["Red", "M"], "available": false},
    {"id": 3, "options": ["Blue", "S"], "available": true}
]"#;

fn config() -> WidgetConfig {
    WidgetConfig {
        section: "template--main".into(),
        original_section: None,
        product_url: "/products/shirt".into(),
        update_url: true,
        shop_url: Some("https://shop.example/".into()),
        strings: VariantStrings::default(),
    }
}

#[test]
fn test_plan_for_available_variant() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Red"), Some("S")]);

    let plan = VariantChange::plan(&resolver, &config());
    assert_eq!(plan.status, SelectionStatus::VariantSelected);
    assert_eq!(plan.variant_id, Some(ResourceId::Number(1)));
    assert!(plan.available);
    assert!(!plan.hide_price);
    assert_eq!(plan.add_button, AddButton::AwaitingFragment);
    assert!(plan.add_button.is_disabled());
    assert_eq!(
        plan.media,
        Some(MediaUpdate {
            id: ResourceId::Number(500),
            preview_src: Some("//cdn.shop/red-s.jpg".into()),
        })
    );
    assert_eq!(plan.history_url.as_deref(), Some("/products/shirt?variant=1"));
    assert_eq!(
        plan.share_url.as_deref(),
        Some("https://shop.example/products/shirt?variant=1")
    );
    assert_eq!(
        plan.pickup,
        PickupAction::Fetch {
            variant_id: ResourceId::Number(1)
        }
    );

    let fragment = plan.fragment.expect("fragment request");
    assert_eq!(
        fragment.relative_url(),
        "/products/shirt?variant=1&section_id=template--main"
    );
}

#[test]
fn test_plan_for_sold_out_variant() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Red"), Some("M")]);

    let plan = VariantChange::plan(&resolver, &config());
    assert_eq!(plan.status, SelectionStatus::VariantSelected);
    assert!(!plan.available);
    assert!(!plan.hide_price);
    assert_eq!(plan.pickup, PickupAction::Clear);
    assert!(plan.media.is_none());
    assert!(plan.fragment.is_some());

    // The checked size is itself disabled, so the dropdown is flagged.
    let size = &plan.axes[1];
    assert_eq!(size.selected.as_deref(), Some("M"));
    assert_eq!(size.disabled, vec!["M".to_string()]);
    assert!(size.dropdown_unavailable);
    assert!(!plan.axes[0].dropdown_unavailable);
}

#[test]
fn test_plan_without_variant() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Blue"), Some("M")]);

    let plan = VariantChange::plan(&resolver, &config());
    assert_eq!(plan.status, SelectionStatus::NoVariantSelected);
    assert!(plan.variant_id.is_none());
    assert!(plan.hide_price);
    assert_eq!(
        plan.add_button,
        AddButton::Unavailable {
            label: "Unavailable".into()
        }
    );
    assert!(plan.fragment.is_none());
    assert!(plan.history_url.is_none());
    assert_eq!(plan.pickup, PickupAction::Clear);
}

#[test]
fn test_history_url_respects_config() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Blue"), Some("S")]);

    let mut config = config();
    config.update_url = false;
    config.shop_url = None;
    let plan = VariantChange::plan(&resolver, &config);
    assert!(plan.history_url.is_none());
    assert!(plan.share_url.is_none());
}

#[test]
fn test_string_ids_are_encoded_in_urls() {
    let resolver = {
        let mut resolver = VariantResolver::from_json(
            r#"[{"id": "a&b #1", "options": ["Red"], "available": true}]"#,
        )
        .unwrap();
        resolver.set_selection([Some("Red")]);
        resolver
    };

    let plan = VariantChange::plan(&resolver, &config());
    assert_eq!(
        plan.history_url.as_deref(),
        Some("/products/shirt?variant=a%26b+%231")
    );
    assert_eq!(
        plan.share_url.as_deref(),
        Some("https://shop.example/products/shirt?variant=a%26b+%231")
    );

    let fragment = plan.fragment.expect("fragment request");
    assert_eq!(fragment.variant_id, ResourceId::Text("a&b #1".into()));
    assert_eq!(
        fragment.relative_url(),
        "/products/shirt?variant=a%26b+%231&section_id=template--main"
    );
}

#[test]
fn test_fragment_uses_original_section() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Blue"), Some("S")]);

    let mut config = config();
    config.section = "quick-view".into();
    config.original_section = Some("template--main".into());
    let fragment = VariantChange::plan(&resolver, &config)
        .fragment
        .expect("fragment");

    assert_eq!(fragment.section_id, "template--main");
    assert_eq!(
        fragment.query(),
        [
            ("variant", "3".to_string()),
            ("section_id", "template--main".to_string())
        ]
    );
    let price = fragment.price_target();
    assert_eq!(price.source, "price-template--main");
    assert_eq!(price.destination, "price-quick-view");
    assert_eq!(
        fragment.submit_button_target().source,
        "ProductSubmitButton-template--main"
    );
}

#[test]
fn test_pending_axis_has_no_disabled_values() {
    let resolver = VariantResolver::from_json(SHIRT).unwrap();
    let plan = VariantChange::plan(&resolver, &config());
    assert!(plan.axes[1].availability.is_pending());
    assert!(plan.axes[1].disabled.is_empty());
    assert!(plan.axes[1].selected.is_none());
}

#[test]
fn test_settled_button() {
    let strings = VariantStrings::default();
    let resolver = VariantResolver::from_json(SHIRT).unwrap();
    let variants = resolver.table().variants();

    let ready = AddButton::settled(&variants[0], &strings);
    assert!(!ready.is_disabled());
    assert_eq!(ready.label(), Some("Add to cart"));

    let sold_out = AddButton::settled(&variants[1], &strings);
    assert!(sold_out.is_disabled());
    assert_eq!(sold_out.label(), Some("Sold out"));
}

#[test]
fn test_plan_serializes_for_the_page() {
    let mut resolver = VariantResolver::from_json(SHIRT).unwrap();
    resolver.set_selection([Some("Red"), None]);
    let plan = VariantChange::plan(&resolver, &config());

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["status"], "no_variant_selected");
    assert_eq!(json["add_button"]["state"], "unavailable");
    assert_eq!(json["axes"][1]["availability"]["state"], "ready");
    assert_eq!(json["axes"][1]["availability"]["values"][0], "S");
    assert_eq!(json["pickup"]["action"], "clear");
}
