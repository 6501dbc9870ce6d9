//! The draw pass for page one. Sections are drawn top to bottom in a fixed order from the
//! heights the measure pass already worked out.

use super::constants::*;
use super::context::{Canvas, Cursor, Face, LayoutContext};
use super::measure::{LocationSection, PageOnePlan, ScopeSection};
use super::pagination::{draw_fee_table, ensure_room};
use super::primitives::*;
use crate::colour::colours;
use crate::options::RenderOptions;
use crate::record::{format_currency, or_placeholder, DocumentRecord, PartyInfo};
use crate::rect::Rect;
use crate::units::Pt;
use crate::PermitError;
use log::debug;

/// Draws page one, returning the cursor below its last section. The fee table may run
/// onto further pages.
pub(crate) fn draw_page_one(
    ctx: &mut LayoutContext,
    record: &DocumentRecord,
    plan: &PageOnePlan,
    options: &RenderOptions,
) -> Result<Cursor, PermitError> {
    debug!(
        "page one content is {} tall of {} available, starting at {} ({})",
        plan.total,
        AVAILABLE_HEIGHT,
        plan.top,
        if plan.is_centred() { "centred" } else { "flush" }
    );

    let page = ctx.new_page()?;
    let mut cursor = Cursor { y: plan.top, ..page };

    cursor = draw_header(ctx, cursor, record, options)?;

    cursor = ensure_room(ctx, cursor.down(SECTION_GAP), plan.location.height)?;
    cursor = draw_location(&mut ctx.canvas(cursor.page)?, cursor, &plan.location);

    cursor = ensure_room(ctx, cursor.down(SECTION_GAP), plan.parties)?;
    cursor = draw_parties(&mut ctx.canvas(cursor.page)?, cursor, record);

    cursor = ensure_room(ctx, cursor.down(SECTION_GAP), plan.issuance)?;
    cursor = draw_issuance(&mut ctx.canvas(cursor.page)?, cursor, record);

    cursor = ensure_room(ctx, cursor.down(SECTION_GAP), plan.scope.height)?;
    cursor = draw_scope(&mut ctx.canvas(cursor.page)?, cursor, &plan.scope);

    if let Some(fees) = &plan.fees {
        cursor = draw_fee_table(ctx, cursor.down(SECTION_GAP), fees)?;
        debug!("fee total {}", format_currency(fees.total));
    }

    Ok(cursor)
}

fn draw_header(
    ctx: &mut LayoutContext,
    cursor: Cursor,
    record: &DocumentRecord,
    options: &RenderOptions,
) -> Result<Cursor, PermitError> {
    let logo = ctx.logo();
    let canvas = &mut ctx.canvas(cursor.page)?;
    let top = cursor.y;

    if let Some((image, aspect)) = logo {
        let mut height = LOGO_MAX_HEIGHT;
        let mut width = height * aspect;
        if width > LOGO_MAX_WIDTH {
            width = LOGO_MAX_WIDTH;
            height = width / aspect;
        }
        draw_image(canvas, image, Rect::from_top_left(MARGIN, top - Pt(4.0), width, height));
    }

    draw_centered_text(canvas, &options.jurisdiction, top - HEADER_SIZE, Face::Bold, HEADER_SIZE, colours::NAVY);
    draw_centered_text(canvas, &record.title, top - Pt(44.0), Face::Bold, TITLE_SIZE, colours::BLACK);

    let subtitle = match &options.subtitle {
        Some(subtitle) => subtitle.clone(),
        None => format!("{} PERMIT", record.kind.trim().to_uppercase()),
    };
    draw_centered_text(canvas, &subtitle, top - Pt(60.0), Face::Regular, SMALL_SIZE, colours::LABEL);

    let divider = top - Pt(72.0);
    draw_line(canvas, (MARGIN, divider), (MARGIN + CONTENT_WIDTH, divider), colours::NAVY, Pt(2.0));

    if let Some(number) = record.permit_number.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        draw_permit_number(canvas, number, top);
    }

    Ok(cursor.down(HEADER_HEIGHT))
}

/// The highlighted permit-number box in the top right of the header band. It is anchored
/// to the header and takes no part in the vertical flow.
fn draw_permit_number(canvas: &mut Canvas, number: &str, top: Pt) {
    let label = "PERMIT NO.";
    let number = canvas
        .faces
        .fit(number, Face::Bold, BODY_SIZE, PERMIT_BOX_MAX_WIDTH - GRID_PADDING * 2.0);
    let number = number.as_str();
    let width = canvas
        .faces
        .width(label, Face::Regular, SMALL_SIZE)
        .max(canvas.faces.width(number, Face::Bold, BODY_SIZE))
        + GRID_PADDING * 2.0;
    let width = width.max(PERMIT_BOX_MIN_WIDTH);
    let right = MARGIN + CONTENT_WIDTH;

    draw_rect(
        canvas,
        Rect::from_top_left(right - width, top, width, PERMIT_BOX_HEIGHT),
        Some(colours::HIGHLIGHT),
        Some(border()),
    );
    draw_right_aligned_text(canvas, label, right - GRID_PADDING, top - Pt(11.0), Face::Regular, SMALL_SIZE, colours::LABEL);
    draw_right_aligned_text(canvas, number, right - GRID_PADDING, top - Pt(25.0), Face::Bold, BODY_SIZE, colours::BLACK);
}

fn draw_location(canvas: &mut Canvas, cursor: Cursor, location: &LocationSection) -> Cursor {
    let items = [
        GridItem::new("Address:", location.lines.join("\n")).value_at(ADDRESS_VALUE_COLUMN),
        GridItem::new("Project:", location.project.join("\n"))
            .at(PROJECT_LABEL_COLUMN, 0)
            .value_at(PROJECT_VALUE_COLUMN),
    ];
    draw_grid_box(canvas, MARGIN, cursor.y, CONTENT_WIDTH, location.height, "PROJECT LOCATION", &items);
    cursor.down(location.height)
}

fn party_items(party: Option<&PartyInfo>, contact_label: &str, contact: Option<&str>) -> Vec<GridItem> {
    let name = or_placeholder(party.map(|p| p.name.as_str()), "N/A");
    let address = or_placeholder(party.and_then(|p| p.address.as_deref()), "N/A");
    vec![
        GridItem::new("Name:", name),
        GridItem::new("Address:", address).at(GRID_PADDING, 1),
        GridItem::new(contact_label, or_placeholder(contact, "N/A")).at(GRID_PADDING, 2),
    ]
}

fn draw_parties(canvas: &mut Canvas, cursor: Cursor, record: &DocumentRecord) -> Cursor {
    let width = (CONTENT_WIDTH - PARTY_GAP) / 2.0;
    let owner = record.owner_info.as_ref();
    let contractor = record.contractor_info.as_ref();

    draw_grid_box(
        canvas,
        MARGIN,
        cursor.y,
        width,
        PARTIES_HEIGHT,
        "PERMITTEE / OWNER",
        &party_items(owner, "Phone:", owner.and_then(|o| o.phone.as_deref())),
    );
    draw_grid_box(
        canvas,
        MARGIN + width + PARTY_GAP,
        cursor.y,
        width,
        PARTIES_HEIGHT,
        "CONTRACTOR",
        &party_items(contractor, "License:", contractor.and_then(|c| c.license.as_deref())),
    );
    cursor.down(PARTIES_HEIGHT)
}

fn draw_issuance(canvas: &mut Canvas, cursor: Cursor, record: &DocumentRecord) -> Cursor {
    draw_rect(
        canvas,
        Rect::from_top_left(MARGIN, cursor.y, CONTENT_WIDTH, ISSUANCE_HEIGHT),
        Some(colours::TINT),
        Some(border()),
    );

    let status = or_placeholder(record.status.as_deref(), "DRAFT").to_uppercase();
    let columns = [
        ("ISSUE DATE", or_placeholder(record.issue_date.as_deref(), "Pending")),
        ("EXPIRATION DATE", or_placeholder(record.expiration_date.as_deref(), "N/A")),
        ("STATUS", status.as_str()),
    ];
    let column_width = CONTENT_WIDTH / 3.0;
    for (i, (label, value)) in columns.into_iter().enumerate() {
        let x = MARGIN + GRID_PADDING + column_width * i as f32;
        draw_label_value_simple(canvas, x, cursor.y, column_width - GRID_PADDING * 2.0, label, value);
    }
    cursor.down(ISSUANCE_HEIGHT)
}

fn draw_scope(canvas: &mut Canvas, cursor: Cursor, scope: &ScopeSection) -> Cursor {
    let body = GridItem::new("", scope.lines.join("\n"));
    draw_grid_box(canvas, MARGIN, cursor.y, CONTENT_WIDTH, scope.height, "SCOPE OF WORK", &[body]);
    cursor.down(scope.height)
}
