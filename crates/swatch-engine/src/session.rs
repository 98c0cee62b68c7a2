use crate::fragment::{FragmentError, FragmentSource};
use swatch_common::protocol::VariantId;
use swatch_core::api::{self, OptionChange};
use swatch_core::config::schema::SwatchConfig;
use swatch_core::resolver::VariantResolver;
use swatch_core::view::{AddButton, FragmentRequest, FragmentTarget, VariantChange};

/// Captures which variant a fragment fetch was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    request: FragmentRequest,
}

impl RenderTicket {
    pub fn request(&self) -> &FragmentRequest {
        &self.request
    }

    pub fn variant_id(&self) -> &VariantId {
        &self.request.variant_id
    }
}

/// Markup and button state to apply once a fragment arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentUpdate {
    pub variant_id: VariantId,
    pub html: String,
    pub price: FragmentTarget,
    pub sku: FragmentTarget,
    pub inventory: FragmentTarget,
    pub submit_button: FragmentTarget,
    pub add_button: AddButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Applied(FragmentUpdate),
    /// The selection moved on while the fetch was in flight.
    Discarded {
        requested: VariantId,
        current: Option<VariantId>,
    },
}

/// One widget instance: resolver plus settings, driven one event at a time.
#[derive(Debug, Clone)]
pub struct VariantSession {
    resolver: VariantResolver,
    config: SwatchConfig,
}

impl VariantSession {
    pub fn new(resolver: VariantResolver, config: SwatchConfig) -> Self {
        Self { resolver, config }
    }

    pub fn resolver(&self) -> &VariantResolver {
        &self.resolver
    }

    pub fn config(&self) -> &SwatchConfig {
        &self.config
    }

    pub fn current_variant_id(&self) -> Option<&VariantId> {
        self.resolver.resolve_current_variant().map(|v| &v.id)
    }

    pub fn apply(&mut self, change: OptionChange) -> VariantChange {
        api::process_change(&mut self.resolver, change, &self.config.widget)
    }

    pub fn plan(&self) -> VariantChange {
        VariantChange::plan(&self.resolver, &self.config.widget)
    }

    /// Start rendering the current variant. None when nothing resolves or
    /// fragments are turned off.
    pub fn begin_render(&self) -> Option<RenderTicket> {
        if !self.config.fragments.enabled {
            return None;
        }
        let variant = self.resolver.resolve_current_variant()?;
        Some(RenderTicket {
            request: FragmentRequest::new(variant, &self.config.widget),
        })
    }

    /// Accept a fetched fragment unless the selection changed since the
    /// ticket was issued.
    pub fn complete_render(&self, ticket: RenderTicket, html: String) -> RenderOutcome {
        let current = self.resolver.resolve_current_variant();
        let Some(variant) = current.filter(|v| &v.id == ticket.variant_id()) else {
            tracing::debug!(
                requested = %ticket.variant_id(),
                "discarding stale fragment response"
            );
            return RenderOutcome::Discarded {
                requested: ticket.request.variant_id,
                current: current.map(|v| v.id.clone()),
            };
        };

        let request = &ticket.request;
        RenderOutcome::Applied(FragmentUpdate {
            variant_id: variant.id.clone(),
            price: request.price_target(),
            sku: request.sku_target(),
            inventory: request.inventory_target(),
            submit_button: request.submit_button_target(),
            add_button: AddButton::settled(variant, &self.config.widget.strings),
            html,
        })
    }

    /// Fetch and apply the fragment for the current variant.
    pub async fn render(
        &self,
        source: &dyn FragmentSource,
    ) -> Result<Option<RenderOutcome>, FragmentError> {
        let Some(ticket) = self.begin_render() else {
            return Ok(None);
        };
        let html = source.fetch(ticket.request()).await?;
        Ok(Some(self.complete_render(ticket, html)))
    }
}
