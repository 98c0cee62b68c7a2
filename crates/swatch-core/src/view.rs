//! Derived UI updates for a variant change.
//!
//! The DOM layer owns every read and write; after each option change it asks
//! for a [`VariantChange`] and applies it.

use crate::config::schema::{VariantStrings, WidgetConfig};
use crate::resolver::{AxisAvailability, Resolution, SelectionStatus, VariantResolver};
use serde::Serialize;
use swatch_common::protocol::{MediaId, Variant, VariantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisView {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Value echoed into the option title and dropdown button.
    pub selected: Option<String>,
    pub availability: AxisAvailability,
    /// Declared values whose controls render disabled.
    pub disabled: Vec<String>,
    /// The checked value itself is disabled.
    pub dropdown_unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AddButton {
    /// Disabled with its label untouched until the fragment for the resolved
    /// variant lands.
    AwaitingFragment,
    Unavailable { label: String },
    SoldOut { label: String },
    AddToCart { label: String },
}

impl AddButton {
    /// Final button once the variant's markup has been rendered.
    pub fn settled(variant: &Variant, strings: &VariantStrings) -> Self {
        if variant.available {
            AddButton::AddToCart {
                label: strings.add_to_cart.clone(),
            }
        } else {
            AddButton::SoldOut {
                label: strings.sold_out.clone(),
            }
        }
    }

    pub fn is_disabled(&self) -> bool {
        !matches!(self, AddButton::AddToCart { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AddButton::AwaitingFragment => None,
            AddButton::Unavailable { label }
            | AddButton::SoldOut { label }
            | AddButton::AddToCart { label } => Some(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaUpdate {
    pub id: MediaId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PickupAction {
    Fetch { variant_id: VariantId },
    Clear,
}

/// Element ids patched from a rendered fragment into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentTarget {
    pub source: String,
    pub destination: String,
}

/// GET request for the server-rendered section of one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentRequest {
    pub variant_id: VariantId,
    pub product_url: String,
    /// Section rendered by the server.
    pub section_id: String,
    /// Section the patched markup lands in.
    pub destination_section: String,
}

impl FragmentRequest {
    pub fn new(variant: &Variant, config: &WidgetConfig) -> Self {
        Self {
            variant_id: variant.id.clone(),
            product_url: config.product_url.clone(),
            section_id: config.render_section().to_string(),
            destination_section: config.section.clone(),
        }
    }

    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("variant", self.variant_id.to_string()),
            ("section_id", self.section_id.clone()),
        ]
    }

    pub fn relative_url(&self) -> String {
        format!(
            "{}?variant={}&section_id={}",
            self.product_url,
            query_value(&self.variant_id.to_string()),
            query_value(&self.section_id)
        )
    }

    fn target(&self, prefix: &str) -> FragmentTarget {
        FragmentTarget {
            source: format!("{}-{}", prefix, self.section_id),
            destination: format!("{}-{}", prefix, self.destination_section),
        }
    }

    pub fn price_target(&self) -> FragmentTarget {
        self.target("price")
    }

    pub fn sku_target(&self) -> FragmentTarget {
        self.target("Sku")
    }

    pub fn inventory_target(&self) -> FragmentTarget {
        self.target("Inventory")
    }

    pub fn submit_button_target(&self) -> FragmentTarget {
        self.target("ProductSubmitButton")
    }
}

/// Everything the page must update after the selection changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantChange {
    pub status: SelectionStatus,
    pub variant_id: Option<VariantId>,
    pub available: bool,
    pub axes: Vec<AxisView>,
    pub add_button: AddButton,
    /// Price, inventory and SKU are hidden when no variant matches.
    pub hide_price: bool,
    pub media: Option<MediaUpdate>,
    pub history_url: Option<String>,
    pub share_url: Option<String>,
    pub pickup: PickupAction,
    pub fragment: Option<FragmentRequest>,
}

impl VariantChange {
    pub fn plan(resolver: &VariantResolver, config: &WidgetConfig) -> Self {
        let axes = axis_views(resolver);

        match resolver.resolution() {
            Resolution::NoVariant => Self {
                status: SelectionStatus::NoVariantSelected,
                variant_id: None,
                available: false,
                axes,
                add_button: AddButton::Unavailable {
                    label: config.strings.unavailable.clone(),
                },
                hide_price: true,
                media: None,
                history_url: None,
                share_url: None,
                pickup: PickupAction::Clear,
                fragment: None,
            },
            Resolution::Unavailable(variant) | Resolution::Available(variant) => {
                let variant_url = format!(
                    "{}?variant={}",
                    config.product_url,
                    query_value(&variant.id.to_string())
                );
                Self {
                    status: SelectionStatus::VariantSelected,
                    variant_id: Some(variant.id.clone()),
                    available: variant.available,
                    axes,
                    add_button: AddButton::AwaitingFragment,
                    hide_price: false,
                    media: variant.featured_media.as_ref().map(|media| MediaUpdate {
                        id: media.id.clone(),
                        preview_src: media.preview_src().map(str::to_string),
                    }),
                    history_url: config.update_url.then(|| variant_url.clone()),
                    share_url: config
                        .shop_url
                        .as_ref()
                        .map(|shop| format!("{}{}", shop.trim_end_matches('/'), variant_url)),
                    pickup: if variant.available {
                        PickupAction::Fetch {
                            variant_id: variant.id.clone(),
                        }
                    } else {
                        PickupAction::Clear
                    },
                    fragment: Some(FragmentRequest::new(variant, config)),
                }
            }
        }
    }
}

/// Form-encode one query value; string ids may carry `&`, `#` or spaces.
fn query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn axis_views(resolver: &VariantResolver) -> Vec<AxisView> {
    resolver
        .axes()
        .iter()
        .zip(resolver.selected())
        .map(|(axis, selected)| {
            let availability = resolver.compute_axis_availability(axis.index);
            let disabled = axis
                .values
                .iter()
                .filter(|value| !availability.is_enabled(value))
                .cloned()
                .collect();
            let dropdown_unavailable = selected
                .as_deref()
                .is_some_and(|value| !availability.is_enabled(value));
            AxisView {
                index: axis.index,
                name: axis.name.clone(),
                selected: selected.clone(),
                availability,
                disabled,
                dropdown_unavailable,
            }
        })
        .collect()
}
