pub mod text;

pub use text::{mask, tail_fit, truncate_with_ellipsis};
