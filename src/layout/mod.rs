//! Text measurement utilities for positioning content on pages.
//!
//! Everything in here is pure: functions measure and wrap text using font metrics only,
//! so the permit layout can predict heights before anything is drawn and then draw
//! exactly what it predicted.
//!
//! # Example
//!
//! ```
//! use permit_pdf::{Font, StandardFont, Pt};
//! use permit_pdf::layout::{wrap, width_of_text};
//!
//! let font = Font::standard(StandardFont::Helvetica);
//! let lines = wrap("All work shall comply with the adopted building code.", &font, Pt(11.0), Pt(150.0));
//! assert!(lines.len() > 1);
//! assert!(lines.iter().all(|line| width_of_text(line, &font, Pt(11.0)) <= Pt(150.0)));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
