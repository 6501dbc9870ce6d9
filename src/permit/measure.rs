//! The measure pass. Every section height of the template is computed here, once; the draw
//! pass consumes these structs instead of recomputing anything.

use super::constants::*;
use super::context::{Face, Faces};
use crate::record::{DocumentRecord, Fee};
use crate::units::Pt;

/// The project location box's contents
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSection {
    /// Wrapped street address, followed by the locality line when there is one
    pub lines: Vec<String>,
    /// Wrapped project name, in the right-hand column
    pub project: Vec<String>,
    /// Grows with whichever column needs more lines
    pub height: Pt,
}

/// The scope-of-work box. Its height is fixed; only `capacity` lines are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeSection {
    /// The lines that will be drawn, at most `capacity` of them
    pub lines: Vec<String>,
    /// How many lines the full text wraps to
    pub wrapped_lines: usize,
    pub capacity: usize,
    pub height: Pt,
}

impl ScopeSection {
    pub fn overflows(&self) -> bool {
        self.wrapped_lines > self.capacity
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeSection {
    pub rows: Vec<Fee>,
    pub total: f64,
    /// Header row, one row per fee and the total row
    pub height: Pt,
}

/// Heights of every page-one section and where the block starts
#[derive(Debug, Clone, PartialEq)]
pub struct PageOnePlan {
    pub header: Pt,
    pub location: LocationSection,
    pub parties: Pt,
    pub issuance: Pt,
    pub scope: ScopeSection,
    pub fees: Option<FeeSection>,
    /// Sum of the section heights and the gaps between them
    pub total: Pt,
    /// Top edge of the header
    pub top: Pt,
}

impl PageOnePlan {
    /// Whether the block was shifted down to sit in the middle of the printable area
    pub fn is_centred(&self) -> bool {
        self.total < AVAILABLE_HEIGHT
    }
}

/// Where page-one content starts: centred in the printable area when it fits, else flush
/// with the top margin
pub fn content_top(total: Pt) -> Pt {
    if total < AVAILABLE_HEIGHT {
        let extra = AVAILABLE_HEIGHT - total;
        PAGE_HEIGHT - MARGIN - extra / 2.0
    } else {
        PAGE_HEIGHT - MARGIN
    }
}

pub fn location_height(lines: usize) -> Pt {
    LOCATION_MIN_HEIGHT + GRID_LINE_HEIGHT * lines.saturating_sub(1) as f32
}

/// Header, data rows and total, or nothing at all without fees
pub fn fee_block_height(fees: usize) -> Pt {
    if fees == 0 {
        Pt(0.0)
    } else {
        FEE_ROW_HEIGHT * (fees + 2) as f32
    }
}

pub fn condition_height(lines: usize) -> Pt {
    CONDITION_LINE_HEIGHT * lines as f32 + CONDITION_PADDING
}

/// Lines of text that fit below a grid box's title bar
pub fn grid_capacity(height: Pt) -> usize {
    let usable = height - GRID_TITLE_HEIGHT - GRID_PADDING;
    (usable / GRID_LINE_HEIGHT).floor().max(0.0) as usize
}

pub(crate) fn measure_location(record: &DocumentRecord, faces: Faces) -> LocationSection {
    let mut lines = faces.wrap(
        record.project_info.address.trim(),
        Face::Bold,
        BODY_SIZE,
        ADDRESS_WRAP_WIDTH,
    );
    lines.extend(
        record
            .locality()
            .map(|locality| faces.fit(&locality, Face::Bold, BODY_SIZE, ADDRESS_WRAP_WIDTH)),
    );
    let project = faces.wrap(
        record.project_info.name.trim(),
        Face::Bold,
        BODY_SIZE,
        PROJECT_WRAP_WIDTH,
    );
    LocationSection {
        height: location_height(lines.len().max(project.len())),
        lines,
        project,
    }
}

pub(crate) fn measure_scope(record: &DocumentRecord, faces: Faces) -> ScopeSection {
    let text = crate::record::or_placeholder(record.scope_of_work.as_deref(), "N/A");
    let mut lines = faces.wrap(
        text,
        Face::Regular,
        BODY_SIZE,
        CONTENT_WIDTH - GRID_PADDING * 2.0,
    );
    let wrapped_lines = lines.len();
    let capacity = grid_capacity(SCOPE_HEIGHT);
    lines.truncate(capacity);
    ScopeSection {
        lines,
        wrapped_lines,
        capacity,
        height: SCOPE_HEIGHT,
    }
}

pub(crate) fn measure_fees(record: &DocumentRecord) -> Option<FeeSection> {
    let fees = record.fees();
    (!fees.is_empty()).then(|| FeeSection {
        rows: fees.to_vec(),
        total: record.fee_total(),
        height: fee_block_height(fees.len()),
    })
}

pub(crate) fn measure_page_one(record: &DocumentRecord, faces: Faces) -> PageOnePlan {
    let location = measure_location(record, faces);
    let scope = measure_scope(record, faces);
    let fees = measure_fees(record);

    let heights = [
        Some(HEADER_HEIGHT),
        Some(location.height),
        Some(PARTIES_HEIGHT),
        Some(ISSUANCE_HEIGHT),
        Some(scope.height),
        fees.as_ref().map(|f| f.height),
    ];
    let present: Vec<Pt> = heights.into_iter().flatten().collect();
    let gaps = SECTION_GAP * present.len().saturating_sub(1) as f32;
    let total = present.into_iter().sum::<Pt>() + gaps;

    PageOnePlan {
        header: HEADER_HEIGHT,
        location,
        parties: PARTIES_HEIGHT,
        issuance: ISSUANCE_HEIGHT,
        scope,
        fees,
        total,
        top: content_top(total),
    }
}

/// One special condition, wrapped and measured
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRow {
    /// 1-based position in the record
    pub number: usize,
    pub lines: Vec<String>,
    pub height: Pt,
}

pub(crate) fn measure_condition(index: usize, text: &str, faces: Faces) -> ConditionRow {
    let lines = faces.wrap(text, Face::Regular, BODY_SIZE, CONDITION_WRAP_WIDTH);
    ConditionRow {
        number: index + 1,
        height: condition_height(lines.len()),
        lines,
    }
}

/// The signature lines and the legal text under them
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub disclaimer: Vec<String>,
    pub height: Pt,
}

impl SignatureBlock {
    /// Space that must remain on a page for the block to start there. A block taller than
    /// a page only needs a fresh one; its disclaimer runs on from there.
    pub fn required_space(&self) -> Pt {
        SIGNATURE_MIN_SPACE.max(self.height).min(AVAILABLE_HEIGHT)
    }
}

pub(crate) fn measure_signature(record: &DocumentRecord, faces: Faces) -> SignatureBlock {
    let paragraphs: Vec<&str> = match record.disclaimers() {
        [] => vec![DEFAULT_DISCLAIMER],
        given => given.iter().map(String::as_str).collect(),
    };
    let disclaimer: Vec<String> = paragraphs
        .into_iter()
        .flat_map(|p| faces.wrap(p, Face::Serif, DISCLAIMER_SIZE, CONTENT_WIDTH))
        .collect();
    SignatureBlock {
        height: SIGNATURE_HEAD_HEIGHT + DISCLAIMER_LINE_HEIGHT * disclaimer.len() as f32,
        disclaimer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use crate::permit::context::LayoutContext;
    use crate::record::ProjectInfo;

    fn record() -> DocumentRecord {
        DocumentRecord {
            kind: "building".into(),
            title: "Building Permit".into(),
            project_info: ProjectInfo {
                name: "Garage addition".into(),
                address: "12 Elm St".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn ctx() -> LayoutContext {
        LayoutContext::new(&RenderOptions::default(), false).expect("context")
    }

    #[test]
    fn centring_law() {
        assert_eq!(content_top(Pt(425.0)), Pt(792.0 - 72.0 - (648.0 - 425.0) / 2.0));
        assert_eq!(content_top(Pt(425.0)), Pt(608.5));
        assert_eq!(content_top(Pt(648.0)), Pt(720.0));
        assert_eq!(content_top(Pt(900.0)), Pt(720.0));
    }

    #[test]
    fn sparse_record_is_centred() {
        let ctx = ctx();
        let plan = measure_page_one(&record(), ctx.faces());
        assert_eq!(plan.location.height, LOCATION_MIN_HEIGHT);
        assert!(plan.fees.is_none());
        assert_eq!(plan.total, Pt(80.0 + 45.0 + 70.0 + 40.0 + 90.0 + 4.0 * 25.0));
        assert!(plan.is_centred());
        assert_eq!(plan.top, Pt(608.5));
    }

    #[test]
    fn fees_add_rows_and_a_gap() {
        let ctx = ctx();
        let mut record = record();
        record.fees = Some(vec![Fee::new("Plan review", "$100.00"), Fee::new("Inspection", "$50.50")]);
        let plan = measure_page_one(&record, ctx.faces());
        let fees = plan.fees.as_ref().expect("fee block");
        assert_eq!(fees.height, Pt(4.0 * 22.0));
        assert_eq!(fees.total, 150.5);
        assert_eq!(plan.total, Pt(425.0 + 25.0 + 88.0));
        assert_eq!(fee_block_height(0), Pt(0.0));
    }

    #[test]
    fn long_addresses_grow_the_location_box() {
        let ctx = ctx();
        let mut record = record();
        record.project_info.address =
            "Unit 4B, Building C, 1200 North Industrial Parkway Extension, Rear Lot Access Road".into();
        record.project_info.city = Some("Springfield".into());
        let location = measure_location(&record, ctx.faces());
        assert!(location.lines.len() >= 3);
        assert_eq!(location.lines.last().map(String::as_str), Some("Springfield"));
        assert_eq!(
            location.height,
            Pt(45.0 + 14.0 * (location.lines.len() - 1) as f32)
        );
    }

    #[test]
    fn long_project_names_wrap_in_their_own_column() {
        let ctx = ctx();
        let faces = ctx.faces();
        let mut record = record();
        record.project_info.name = "Mixed-use residential tower, phase two podium".into();
        let location = measure_location(&record, faces);
        assert_eq!(location.lines.len(), 1);
        assert!(location.project.len() >= 2);
        assert_eq!(location.height, location_height(location.project.len()));
        for line in &location.project {
            assert!(faces.width(line, Face::Bold, BODY_SIZE) <= PROJECT_WRAP_WIDTH);
        }
        assert_eq!(location.project.join(" "), record.project_info.name);
    }

    #[test]
    fn scope_text_beyond_the_box_is_dropped() {
        let ctx = ctx();
        let mut record = record();
        record.scope_of_work = Some("Remove and replace the existing roof structure. ".repeat(12));
        let scope = measure_scope(&record, ctx.faces());
        assert_eq!(scope.capacity, 4);
        assert!(scope.overflows());
        assert_eq!(scope.lines.len(), 4);
        assert_eq!(scope.height, SCOPE_HEIGHT);

        record.scope_of_work = None;
        let scope = measure_scope(&record, ctx.faces());
        assert_eq!(scope.lines, vec!["N/A".to_string()]);
        assert!(!scope.overflows());
    }

    #[test]
    fn conditions_are_numbered_and_padded() {
        let ctx = ctx();
        let row = measure_condition(4, "All work shall comply with the approved plans.", ctx.faces());
        assert_eq!(row.number, 5);
        assert_eq!(row.lines.len(), 1);
        assert_eq!(row.height, Pt(16.0 + 12.0));
        assert_eq!(condition_height(3), Pt(60.0));
    }

    #[test]
    fn signature_needs_at_least_the_minimum_space() {
        let ctx = ctx();
        let block = measure_signature(&record(), ctx.faces());
        assert!(!block.disclaimer.is_empty());
        assert!(block.height <= SIGNATURE_MIN_SPACE);
        assert_eq!(block.required_space(), SIGNATURE_MIN_SPACE);

        let mut wordy = record();
        wordy.disclaimers = Some(vec![DEFAULT_DISCLAIMER.repeat(3), DEFAULT_DISCLAIMER.to_string()]);
        let block = measure_signature(&wordy, ctx.faces());
        assert!(block.height > SIGNATURE_MIN_SPACE);
        assert_eq!(block.required_space(), block.height);

        wordy.disclaimers = Some(vec![DEFAULT_DISCLAIMER.to_string(); 25]);
        let block = measure_signature(&wordy, ctx.faces());
        assert!(block.height > AVAILABLE_HEIGHT);
        assert_eq!(block.required_space(), AVAILABLE_HEIGHT);
    }
}
