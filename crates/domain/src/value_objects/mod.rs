//! Value objects shared by dialogue entities.

mod localized;

pub use localized::LocalizedText;
