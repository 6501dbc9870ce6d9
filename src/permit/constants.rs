//! Fixed geometry of the permit template. Every height used by the measure pass and the
//! draw pass comes from here.

use crate::units::Pt;

pub const PAGE_WIDTH: Pt = Pt(612.0);
pub const PAGE_HEIGHT: Pt = Pt(792.0);
pub const MARGIN: Pt = Pt(72.0);
pub const CONTENT_WIDTH: Pt = Pt(612.0 - 2.0 * 72.0);
/// Printable height between the top and bottom margins
pub const AVAILABLE_HEIGHT: Pt = Pt(792.0 - 2.0 * 72.0);
/// Top edge of the printable area
pub const CONTENT_TOP: Pt = Pt(792.0 - 72.0);

pub const BODY_SIZE: Pt = Pt(11.0);
pub const HEADER_SIZE: Pt = Pt(14.0);
pub const TITLE_SIZE: Pt = Pt(24.0);
pub const SMALL_SIZE: Pt = Pt(8.0);

pub const SECTION_GAP: Pt = Pt(25.0);
pub const FEE_ROW_HEIGHT: Pt = Pt(22.0);
pub const CONDITION_LINE_HEIGHT: Pt = Pt(16.0);
/// Conditions never start a row whose bottom would fall below this
pub const BOTTOM_THRESHOLD: Pt = Pt(72.0 + 40.0);
pub const SIGNATURE_MIN_SPACE: Pt = Pt(100.0);

pub const HEADER_HEIGHT: Pt = Pt(80.0);
pub const LOGO_MAX_HEIGHT: Pt = Pt(56.0);
pub const LOGO_MAX_WIDTH: Pt = Pt(100.0);

pub const GRID_TITLE_HEIGHT: Pt = Pt(16.0);
pub const GRID_LINE_HEIGHT: Pt = Pt(14.0);
/// Inset of grid box contents from the box edges
pub const GRID_PADDING: Pt = Pt(8.0);

pub const LOCATION_MIN_HEIGHT: Pt = Pt(45.0);
/// Address values start here, relative to the location box's left edge
pub const ADDRESS_VALUE_COLUMN: Pt = Pt(64.0);
pub const PROJECT_LABEL_COLUMN: Pt = Pt(280.0);
pub const ADDRESS_WRAP_WIDTH: Pt = Pt(280.0 - 64.0 - 8.0);
pub const PROJECT_VALUE_COLUMN: Pt = Pt(316.0);
pub const PROJECT_WRAP_WIDTH: Pt = Pt(468.0 - 316.0 - 8.0);

pub const PARTIES_HEIGHT: Pt = Pt(70.0);
pub const PARTY_GAP: Pt = Pt(10.0);

pub const ISSUANCE_HEIGHT: Pt = Pt(40.0);
pub const SCOPE_HEIGHT: Pt = Pt(90.0);

pub const PERMIT_BOX_HEIGHT: Pt = Pt(32.0);
pub const PERMIT_BOX_MIN_WIDTH: Pt = Pt(110.0);
pub const PERMIT_BOX_MAX_WIDTH: Pt = Pt(120.0);

/// Share of the fee table given to the description column
pub const FEE_DESCRIPTION_SHARE: f32 = 0.7;

pub const CONDITIONS_HEADING_HEIGHT: Pt = Pt(30.0);
pub const CONDITION_PADDING: Pt = Pt(12.0);
pub const CONDITION_NUMBER_INDENT: Pt = Pt(10.0);
pub const CONDITION_TEXT_INDENT: Pt = Pt(30.0);
pub const CONDITION_WRAP_WIDTH: Pt = Pt(612.0 - 2.0 * 72.0 - 40.0);

/// From the top of the signature block to the signature lines
pub const SIGNATURE_LINE_DROP: Pt = Pt(35.0);
pub const SIGNATURE_LINE_WIDTH: Pt = Pt(200.0);
/// Signature lines plus their captions, above the disclaimer
pub const SIGNATURE_HEAD_HEIGHT: Pt = Pt(55.0);
pub const DISCLAIMER_SIZE: Pt = Pt(9.0);
pub const DISCLAIMER_LINE_HEIGHT: Pt = Pt(12.0);

pub const WATERMARK_SIZE: Pt = Pt(96.0);
pub const WATERMARK_OPACITY: f32 = 0.15;

/// Baseline of the page-number footer, inside the bottom margin
pub const FOOTER_BASELINE: Pt = Pt(36.0);

pub const DEFAULT_DISCLAIMER: &str = "This permit is issued subject to all applicable codes, \
ordinances and regulations. It becomes void if the authorized work is not commenced within \
180 days of issuance, or if work is suspended or abandoned for a period of 180 days. \
Issuance of this permit does not waive compliance with any law.";
