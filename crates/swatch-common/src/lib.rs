pub mod error;
pub mod formatter;
pub mod protocol;

pub use error::PayloadError;
pub use protocol::{
    FeaturedMedia, MediaId, OptionAxis, PreviewImage, ResourceId, Variant, VariantId,
    VariantTable,
};
