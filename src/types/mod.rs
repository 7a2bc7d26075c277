mod attribute;
mod record;
mod value;

pub use attribute::Attribute;
pub use record::IntersectionRecord;
pub use value::FacetValue;
