//! Collection of generic internal data types that are used widely.

pub mod buf;
pub mod hash;
pub mod params;

pub mod prelude;
