use crate::config::schema::WidgetConfig;
use crate::resolver::VariantResolver;
use crate::view::VariantChange;
use serde::{Deserialize, Serialize};

/// A single "option changed" event coming from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum OptionChange {
    Select { axis: usize, value: String },
    Clear { axis: usize },
    /// Every checked value at once, one entry per option group.
    Replace { values: Vec<Option<String>> },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Payload error: {0}")]
    Payload(#[from] swatch_common::PayloadError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Apply an option change and derive the resulting page updates.
///
/// Changes addressing an axis the product does not have leave the selection
/// untouched; the returned plan still reflects the current state.
pub fn process_change(
    resolver: &mut VariantResolver,
    change: OptionChange,
    config: &WidgetConfig,
) -> VariantChange {
    let applied = match change {
        OptionChange::Select { axis, value } => resolver.select(axis, value),
        OptionChange::Clear { axis } => resolver.clear(axis),
        OptionChange::Replace { values } => {
            resolver.set_selection(values);
            true
        }
    };
    if !applied {
        tracing::debug!("option change addressed an unknown axis");
    }

    let plan = VariantChange::plan(resolver, config);
    tracing::debug!(
        status = ?plan.status,
        variant = ?plan.variant_id,
        "variant change planned"
    );
    plan
}

/// Parse a JSON-encoded [`OptionChange`] and apply it.
pub fn process_change_json(
    resolver: &mut VariantResolver,
    change_json: &str,
    config: &WidgetConfig,
) -> Result<VariantChange, ProcessError> {
    let change: OptionChange = serde_json::from_str(change_json)?;
    Ok(process_change(resolver, change, config))
}

/// The page updates for the current selection, encoded as JSON.
pub fn plan_json(
    resolver: &VariantResolver,
    config: &WidgetConfig,
) -> Result<String, ProcessError> {
    Ok(serde_json::to_string(&VariantChange::plan(resolver, config))?)
}
