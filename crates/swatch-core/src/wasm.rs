use crate::api;
use crate::config::schema::WidgetConfig;
use crate::resolver::VariantResolver;
use wasm_bindgen::prelude::*;

/// Browser-facing handle for one `variant-options` element.
#[wasm_bindgen]
pub struct VariantOptions {
    resolver: VariantResolver,
    config: WidgetConfig,
}

#[wasm_bindgen]
impl VariantOptions {
    /// Parse the element's embedded variant JSON. Throws on malformed payloads.
    #[wasm_bindgen(constructor)]
    pub fn new(payload_json: &str) -> Result<VariantOptions, JsValue> {
        console_error_panic_hook::set_once();
        let resolver = VariantResolver::from_json(payload_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            resolver,
            config: WidgetConfig::default(),
        })
    }

    /// Replace the widget settings (section ids, product URL, strings) from JSON.
    pub fn configure(&mut self, config_json: &str) -> Result<(), JsValue> {
        self.config = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
        Ok(())
    }

    /// Replace the selection with the checked value of every option group.
    /// `null`, `undefined` and empty strings count as unset.
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, values: JsValue) -> Result<(), JsValue> {
        let values: Vec<Option<String>> = serde_wasm_bindgen::from_value(values)?;
        self.resolver.set_selection(values);
        Ok(())
    }

    pub fn select(&mut self, axis: usize, value: &str) -> bool {
        self.resolver.select(axis, value)
    }

    pub fn clear(&mut self, axis: usize) -> bool {
        self.resolver.clear(axis)
    }

    /// The resolved variant, or `undefined`.
    #[wasm_bindgen(js_name = currentVariant)]
    pub fn current_variant(&self) -> Result<JsValue, JsValue> {
        match self.resolver.resolve_current_variant() {
            Some(variant) => Ok(serde_wasm_bindgen::to_value(variant)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    #[wasm_bindgen(js_name = axisAvailability)]
    pub fn axis_availability(&self, axis: usize) -> Result<JsValue, JsValue> {
        let availability = self.resolver.compute_axis_availability(axis);
        Ok(serde_wasm_bindgen::to_value(&availability)?)
    }

    /// Derive the page updates for the current selection, as JSON.
    pub fn change(&self) -> Result<String, JsValue> {
        api::plan_json(&self.resolver, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a JSON-encoded option change and return the resulting plan as JSON.
    #[wasm_bindgen(js_name = applyChange)]
    pub fn apply_change(&mut self, change_json: &str) -> Result<String, JsValue> {
        api::process_change_json(&mut self.resolver, change_json, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.change()
    }

    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
