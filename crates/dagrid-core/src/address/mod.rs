pub mod gazetteer;
pub mod normalize;

pub use gazetteer::Gazetteer;
pub use normalize::{format_address, format_street_name, normalize_address, resolve_suburb};
