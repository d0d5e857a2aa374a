pub mod collection;
pub mod converter;

pub use collection::{Identified, next_id, parse_id, position_of};
pub use converter::{to_boolean, to_stock};
