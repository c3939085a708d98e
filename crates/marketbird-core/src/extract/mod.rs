//! Text-to-structure extraction from the PDF text blob.
//!
//! Two independent passes over the same text: the address block (positional,
//! fatal on failure) and the order details (heuristic, best-effort). Both
//! operate on the [`cursor::LineCursor`] so the layout-dependent offsets stay
//! in one place.

pub mod address;
pub mod country;
pub mod cursor;
pub mod order;

pub use address::parse_address;
pub use country::resolve_country_code;
pub use cursor::LineCursor;
pub use order::{normalize_order_date, parse_order};
