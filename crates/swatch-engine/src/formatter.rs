use crate::session::RenderOutcome;
use swatch_common::formatter::format_variant;
use swatch_common::protocol::OptionAxis;
use swatch_core::resolver::{AxisAvailability, VariantResolver};
use swatch_core::view::{AddButton, PickupAction, VariantChange};

fn format_selected(selected: &[Option<String>]) -> String {
    selected
        .iter()
        .map(|value| value.as_deref().unwrap_or("-"))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// e.g. `[1] Size: S, ~M~` where struck values render disabled.
pub fn format_axis_availability(axis: &OptionAxis, availability: &AxisAvailability) -> String {
    match availability {
        AxisAvailability::Pending => format!("[{}] {}: (pending)", axis.index, axis.label()),
        AxisAvailability::Ready(enabled) => {
            let values = axis
                .values
                .iter()
                .map(|value| {
                    if enabled.contains(value) {
                        value.clone()
                    } else {
                        format!("~{}~", value)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{}] {}: {}", axis.index, axis.label(), values)
        }
    }
}

pub fn format_variant_line(resolver: &VariantResolver) -> String {
    match resolver.resolve_current_variant() {
        Some(variant) => format!("= {}", format_variant(variant)),
        None => format!(
            "= no variant for {}",
            format_selected(resolver.selected())
        ),
    }
}

fn format_button(button: &AddButton) -> String {
    match button {
        AddButton::AwaitingFragment => "disabled (awaiting fragment)".to_string(),
        other => format!(
            "{} {:?}",
            if other.is_disabled() {
                "disabled"
            } else {
                "enabled"
            },
            other.label().unwrap_or_default()
        ),
    }
}

pub fn format_change(change: &VariantChange) -> String {
    let selected: Vec<Option<String>> = change.axes.iter().map(|a| a.selected.clone()).collect();
    let mut output = format!("@ selection: {}\n", format_selected(&selected));

    match &change.variant_id {
        Some(id) => output.push_str(&format!(
            "# variant: {} ({})\n",
            id,
            if change.available {
                "available"
            } else {
                "sold out"
            }
        )),
        None => output.push_str("# variant: none\n"),
    }

    for axis in &change.axes {
        let name = axis
            .name
            .clone()
            .unwrap_or_else(|| format!("Option {}", axis.index + 1));
        let mut line = format!("  [{}] {}", axis.index, name);
        if axis.availability.is_pending() {
            line.push_str(" (pending)");
        } else if !axis.disabled.is_empty() {
            line.push_str(&format!(" disabled: {}", axis.disabled.join(", ")));
        }
        if axis.dropdown_unavailable {
            line.push_str(" {selected value unavailable}");
        }
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&format!("# add button: {}\n", format_button(&change.add_button)));
    if change.hide_price {
        output.push_str("# price: hidden\n");
    }
    if let Some(media) = &change.media {
        output.push_str(&format!("# media: {}\n", media.id));
    }
    if let Some(url) = &change.history_url {
        output.push_str(&format!("# url: {}\n", url));
    }
    if let Some(url) = &change.share_url {
        output.push_str(&format!("# share: {}\n", url));
    }
    if let PickupAction::Fetch { variant_id } = &change.pickup {
        output.push_str(&format!("# pickup: fetch {}\n", variant_id));
    }
    if let Some(fragment) = &change.fragment {
        output.push_str(&format!("# fragment: {}\n", fragment.relative_url()));
    }
    output
}

pub fn format_outcome(outcome: Option<&RenderOutcome>) -> String {
    match outcome {
        None => "No variant to render".to_string(),
        Some(RenderOutcome::Applied(update)) => format!(
            "Rendered variant {}: {} bytes into {}, add button {}",
            update.variant_id,
            update.html.len(),
            update.price.destination,
            format_button(&update.add_button)
        ),
        Some(RenderOutcome::Discarded { requested, current }) => format!(
            "Discarded stale fragment for {} (current: {})",
            requested,
            current
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "none".to_string())
        ),
    }
}
