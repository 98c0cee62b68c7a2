use crate::protocol::{OptionAxis, Variant, VariantTable};

/// One-line summary of a variant, e.g. `#4012 Red / S (available) media=7`.
pub fn format_variant(variant: &Variant) -> String {
    let status = if variant.available {
        "available"
    } else {
        "sold out"
    };
    let mut line = format!("#{} {} ({})", variant.id, variant.options.join(" / "), status);
    if let Some(media) = &variant.featured_media {
        line.push_str(&format!(" media={}", media.id));
    }
    line
}

pub fn format_axis(axis: &OptionAxis) -> String {
    format!("[{}] {}: {}", axis.index, axis.label(), axis.values.join(", "))
}

/// Multi-line listing of the product's axes followed by its variants.
pub fn format_table(table: &VariantTable) -> String {
    let mut output = format!(
        "@ product: {} axes, {} variants\n",
        table.axis_count(),
        table.variants().len()
    );
    for axis in table.axes() {
        output.push_str(&format_axis(axis));
        output.push('\n');
    }
    for variant in table.variants() {
        output.push_str("  ");
        output.push_str(&format_variant(variant));
        output.push('\n');
    }
    output
}
