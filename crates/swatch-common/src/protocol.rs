use crate::error::PayloadError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier used by the storefront for variants and media.
/// Payloads carry either numeric ids or string ids (e.g. GraphQL gids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

pub type VariantId = ResourceId;
pub type MediaId = ResourceId;

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        ResourceId::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Media asset shown by the gallery when its variant is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedMedia {
    pub id: MediaId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<PreviewImage>,
}

impl FeaturedMedia {
    pub fn preview_src(&self) -> Option<&str> {
        self.preview_image.as_ref().map(|img| img.src.as_str())
    }
}

/// One orderable combination of option values.
///
/// Extra storefront fields (price, title, `option1`...) are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub options: Vec<String>,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<FeaturedMedia>,
}

impl Variant {
    /// True when the first `prefix.len()` option values equal `prefix`.
    pub fn matches_prefix(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.options.len()
            && self
                .options
                .iter()
                .zip(prefix)
                .all(|(option, wanted)| option == wanted)
    }
}

/// One option dimension of a product (Color, Size...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAxis {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared values in display order. Not all of them need to be purchasable.
    pub values: Vec<String>,
}

impl OptionAxis {
    pub fn declares(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Option {}", self.index + 1))
    }
}

/// Axis declaration accepted inside a product payload: either just the name
/// or a name with its declared values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AxisDeclaration {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    #[serde(default)]
    options: Vec<AxisDeclaration>,
    variants: Vec<Variant>,
}

/// Validated, immutable variant table of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantTable {
    variants: Vec<Variant>,
    axes: Vec<OptionAxis>,
}

impl VariantTable {
    /// Parse the page-embedded JSON payload.
    ///
    /// Accepts a bare array of variants or a product object with `options`
    /// and `variants`.
    pub fn from_json(input: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(input)?;
        match value {
            Value::Array(_) => {
                let variants: Vec<Variant> = serde_json::from_value(value)?;
                Self::new(variants, None)
            }
            Value::Object(_) => {
                let product: ProductPayload = serde_json::from_value(value)?;
                let declared = if product.options.is_empty() {
                    None
                } else {
                    Some(
                        product
                            .options
                            .into_iter()
                            .enumerate()
                            .map(|(index, decl)| match decl {
                                AxisDeclaration::Name(name) => OptionAxis {
                                    index,
                                    name: Some(name),
                                    values: Vec::new(),
                                },
                                AxisDeclaration::Full { name, values } => OptionAxis {
                                    index,
                                    name: Some(name),
                                    values,
                                },
                            })
                            .collect(),
                    )
                };
                Self::new(product.variants, declared)
            }
            Value::Null => Err(PayloadError::UnexpectedShape("null")),
            Value::Bool(_) => Err(PayloadError::UnexpectedShape("a boolean")),
            Value::Number(_) => Err(PayloadError::UnexpectedShape("a number")),
            Value::String(_) => Err(PayloadError::UnexpectedShape("a string")),
        }
    }

    /// Build a table from variants, validating that every variant carries one
    /// value per axis. Declared axes with no values are filled from the table.
    pub fn new(
        variants: Vec<Variant>,
        declared: Option<Vec<OptionAxis>>,
    ) -> Result<Self, PayloadError> {
        let Some(first) = variants.first() else {
            return Err(PayloadError::Empty);
        };

        let axis_count = first.options.len();
        if axis_count == 0 {
            return Err(PayloadError::NoOptions {
                id: first.id.clone(),
            });
        }

        for variant in &variants {
            if variant.options.len() != axis_count {
                return Err(PayloadError::InconsistentOptions {
                    id: variant.id.clone(),
                    expected: axis_count,
                    found: variant.options.len(),
                });
            }
        }

        let axes = match declared {
            Some(declared) => {
                if declared.len() != axis_count {
                    return Err(PayloadError::AxisCountMismatch {
                        declared: declared.len(),
                        found: axis_count,
                    });
                }
                declared
                    .into_iter()
                    .enumerate()
                    .map(|(index, mut axis)| {
                        axis.index = index;
                        axis.values = if axis.values.is_empty() {
                            values_in_order(&variants, index)
                        } else {
                            distinct_in_order(axis.values)
                        };
                        axis
                    })
                    .collect()
            }
            None => (0..axis_count)
                .map(|index| OptionAxis {
                    index,
                    name: None,
                    values: values_in_order(&variants, index),
                })
                .collect(),
        };

        Ok(Self { variants, axes })
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn axes(&self) -> &[OptionAxis] {
        &self.axes
    }

    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    /// Position of the first variant whose options equal `selected` entry by
    /// entry. Any unset entry means no match.
    pub fn find_exact(&self, selected: &[Option<String>]) -> Option<usize> {
        if selected.len() != self.axis_count() {
            return None;
        }
        self.variants.iter().position(|variant| {
            variant
                .options
                .iter()
                .zip(selected)
                .all(|(option, chosen)| chosen.as_deref() == Some(option.as_str()))
        })
    }

    /// Every value occurring at `axis` in any variant, purchasable or not.
    pub fn existing_values(&self, axis: usize) -> BTreeSet<&str> {
        self.variants
            .iter()
            .filter_map(|variant| variant.options.get(axis))
            .map(String::as_str)
            .collect()
    }
}

/// Drop repeated declarations, keeping the first occurrence of each value.
fn distinct_in_order(values: Vec<String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct
}

fn values_in_order(variants: &[Variant], axis: usize) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for variant in variants {
        if let Some(value) = variant.options.get(axis)
            && !values.contains(value)
        {
            values.push(value.clone());
        }
    }
    values
}
