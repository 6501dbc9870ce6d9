//! Renders permit-style legal documents (permit metadata, parties, scope of work, fee
//! schedule, special conditions and a signature block) into print-ready PDF bytes.
//!
//! ```no_run
//! use permit_pdf::{render, DocumentRecord, RenderOptions};
//!
//! let record = DocumentRecord::from_json(&std::fs::read_to_string("permit.json")?)?;
//! let rendered = render(&record, &RenderOptions::default())?;
//! std::fs::write("permit.pdf", &rendered.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod colour;
pub use colour::*;

pub(crate) mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (mostly text) on pages
pub mod layout;

mod options;
pub use options::*;

mod page;
pub use page::*;

/// Page sizes
pub mod pagesize;

/// The permit template: measuring, drawing and paginating a [DocumentRecord]
pub mod permit;
pub use permit::{render, PermitLayout, PermitRenderer, RenderWarning, RenderedPermit};

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod transform;
pub use transform::*;

mod units;
pub use units::*;
