//! Reusable HTML primitives.
//!
//! These render passed content and carry no behavior of their own.
//!
//! # Components
//!
//! - [`card`]: Card container with a title
//! - [`alert`]: Inline status alert with variants
//! - [`button`]: Button with variants
//! - [`spinner`]: Inline loading indicator
//! - [`icons`]: SVG icons

mod alert;
mod button;
mod card;
pub mod icons;
mod spinner;

pub use alert::{AlertVariant, alert};
pub use button::{ButtonVariant, button};
pub use card::card;
pub use spinner::spinner;
