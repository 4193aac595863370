//! Effect implementations.

#[cfg(feature = "visual-fx-plasma")]
pub mod height_field;
#[cfg(feature = "visual-fx-plasma")]
pub mod palette;
#[cfg(feature = "visual-fx-plasma")]
pub mod plasma;
#[cfg(feature = "visual-fx-terrain")]
pub mod terrain;
