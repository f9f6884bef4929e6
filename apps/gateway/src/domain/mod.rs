//! Widget domain: the record shape, its display label and timestamp parsing.

pub mod timestamps;
pub mod widget;

pub use timestamps::parse_date_time;
pub use widget::{type_label, Widget};
