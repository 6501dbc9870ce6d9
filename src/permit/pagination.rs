//! Page allocation for content of unbounded length: fee rows, special conditions and the
//! trailing signature block. Placement never fails; there is no page limit.

use super::constants::*;
use super::context::{Canvas, Cursor, Face, LayoutContext};
use super::measure::{measure_condition, ConditionRow, FeeSection, SignatureBlock};
use super::primitives::*;
use crate::colour::colours;
use crate::layout::{baseline_offset, centred_baseline};
use crate::record::format_currency;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PermitError;
use log::debug;

/// Moves to a fresh page when fewer than `height` units remain above the bottom margin
pub(crate) fn ensure_room(ctx: &mut LayoutContext, cursor: Cursor, height: Pt) -> Result<Cursor, PermitError> {
    if cursor.remaining() < height {
        debug!("{} needed but {} left, breaking page", height, cursor.remaining());
        ctx.new_page()
    } else {
        Ok(cursor)
    }
}

/// Draws the fee table: header row, one row per fee and the bold total row. Rows that
/// would cross the bottom margin continue on a new page under a repeated header; the last
/// fee always stays on the same page as the total.
pub(crate) fn draw_fee_table(
    ctx: &mut LayoutContext,
    cursor: Cursor,
    fees: &FeeSection,
) -> Result<Cursor, PermitError> {
    // never strand the header without a row below it, or a lone fee without its total
    let opening_rows = if fees.rows.len() <= 1 { 3.0 } else { 2.0 };
    let mut cursor = ensure_room(ctx, cursor, FEE_ROW_HEIGHT * opening_rows)?;
    draw_fee_row(&mut ctx.canvas(cursor.page)?, cursor.y, "FEE SCHEDULE", "AMOUNT", FeeRowKind::Header);
    cursor = cursor.down(FEE_ROW_HEIGHT);

    let last = fees.rows.len().saturating_sub(1);
    for (i, fee) in fees.rows.iter().enumerate() {
        let rows = if i == last { 2.0 } else { 1.0 };
        cursor = continue_fee_table(ctx, cursor, FEE_ROW_HEIGHT * rows)?;
        draw_fee_row(
            &mut ctx.canvas(cursor.page)?,
            cursor.y,
            &fee.description,
            &fee.amount,
            FeeRowKind::Item,
        );
        cursor = cursor.down(FEE_ROW_HEIGHT);
    }

    cursor = continue_fee_table(ctx, cursor, FEE_ROW_HEIGHT)?;
    draw_fee_row(
        &mut ctx.canvas(cursor.page)?,
        cursor.y,
        "TOTAL",
        &format_currency(fees.total),
        FeeRowKind::Total,
    );
    Ok(cursor.down(FEE_ROW_HEIGHT))
}

/// Starts a continuation page when less than `needed` remains
fn continue_fee_table(ctx: &mut LayoutContext, cursor: Cursor, needed: Pt) -> Result<Cursor, PermitError> {
    if cursor.remaining() >= needed {
        return Ok(cursor);
    }
    let cursor = ctx.new_page()?;
    draw_fee_row(
        &mut ctx.canvas(cursor.page)?,
        cursor.y,
        "FEE SCHEDULE (Continued)",
        "AMOUNT",
        FeeRowKind::Header,
    );
    Ok(cursor.down(FEE_ROW_HEIGHT))
}

fn draw_conditions_heading(canvas: &mut Canvas, cursor: Cursor, continued: bool) -> Cursor {
    let heading = if continued {
        "SPECIAL CONDITIONS (Continued)"
    } else {
        "SPECIAL CONDITIONS"
    };
    draw_text(canvas, heading, MARGIN, cursor.y - HEADER_SIZE, Face::Bold, HEADER_SIZE, colours::NAVY);
    cursor.down(CONDITIONS_HEADING_HEIGHT)
}

/// The border around a page's conditions, drawn once the page's last row is known
fn close_conditions_box(canvas: &mut Canvas, box_top: Pt, bottom: Pt) {
    draw_rect(
        canvas,
        Rect::from_top_left(MARGIN, box_top, CONTENT_WIDTH, box_top - bottom),
        None,
        Some(border()),
    );
}

/// A condition's number and lines, each centred vertically within the row
fn draw_condition_row(canvas: &mut Canvas, top: Pt, row: &ConditionRow) {
    let middle = top - row.height / 2.0;
    let number = format!("{}.", row.number);
    let bold = canvas.faces.font(Face::Bold);
    let regular = canvas.faces.font(Face::Regular);

    let y = centred_baseline(bold, BODY_SIZE, middle);
    draw_text(canvas, &number, MARGIN + CONDITION_NUMBER_INDENT, y, Face::Bold, BODY_SIZE, colours::BLACK);

    let first_middle = middle + CONDITION_LINE_HEIGHT * (row.lines.len().saturating_sub(1) as f32) / 2.0;
    for (i, line) in row.lines.iter().enumerate() {
        let y = centred_baseline(regular, BODY_SIZE, first_middle - CONDITION_LINE_HEIGHT * i as f32);
        draw_text(canvas, line, MARGIN + CONDITION_TEXT_INDENT, y, Face::Regular, BODY_SIZE, colours::BLACK);
    }
}

/// Draws the special conditions, starting on a new page. Each condition is moved whole to
/// the next page when it would cross the bottom threshold, unless it is already the
/// first on its page.
pub(crate) fn draw_conditions(ctx: &mut LayoutContext, conditions: &[String]) -> Result<Cursor, PermitError> {
    let mut cursor = ctx.new_page()?;
    cursor = draw_conditions_heading(&mut ctx.canvas(cursor.page)?, cursor, false);
    let mut box_top = cursor.y;
    let mut first_on_page = true;

    for (index, text) in conditions.iter().enumerate() {
        let row = measure_condition(index, text, ctx.faces());

        if !first_on_page && cursor.y - row.height < BOTTOM_THRESHOLD {
            close_conditions_box(&mut ctx.canvas(cursor.page)?, box_top, cursor.y);
            debug!("condition {} moves to a new page", row.number);
            cursor = ctx.new_page()?;
            cursor = draw_conditions_heading(&mut ctx.canvas(cursor.page)?, cursor, true);
            box_top = cursor.y;
            first_on_page = true;
        }

        let canvas = &mut ctx.canvas(cursor.page)?;
        if !first_on_page {
            draw_line(
                canvas,
                (MARGIN, cursor.y),
                (MARGIN + CONTENT_WIDTH, cursor.y),
                colours::RULE,
                Pt(0.5),
            );
        }
        draw_condition_row(canvas, cursor.y, &row);
        cursor = cursor.down(row.height);
        first_on_page = false;
    }

    close_conditions_box(&mut ctx.canvas(cursor.page)?, box_top, cursor.y);
    Ok(cursor)
}

/// Draws the signature lines and disclaimer, on a new page when the current one has less
/// room than the block needs. A disclaimer longer than a whole page carries on, line by
/// line, onto further pages.
pub(crate) fn draw_signature(
    ctx: &mut LayoutContext,
    cursor: Cursor,
    block: &SignatureBlock,
) -> Result<Cursor, PermitError> {
    let cursor = ensure_room(ctx, cursor, block.required_space())?;
    let (ascent, descent) = {
        let canvas = &mut ctx.canvas(cursor.page)?;
        let line_y = cursor.y - SIGNATURE_LINE_DROP;
        let caption_y = line_y - Pt(12.0);
        let date_x = MARGIN + CONTENT_WIDTH - SIGNATURE_LINE_WIDTH;
        for (x, caption) in [(MARGIN, "Authorized By"), (date_x, "Date")] {
            draw_line(canvas, (x, line_y), (x + SIGNATURE_LINE_WIDTH, line_y), colours::BLACK, Pt(0.75));
            draw_text(canvas, caption, x, caption_y, Face::Regular, SMALL_SIZE, colours::LABEL);
        }
        let serif = canvas.faces.font(Face::Serif);
        (baseline_offset(serif, DISCLAIMER_SIZE), serif.descent(DISCLAIMER_SIZE))
    };

    let mut cursor = cursor.down(SIGNATURE_HEAD_HEIGHT);
    for line in &block.disclaimer {
        if cursor.y - ascent + descent < MARGIN {
            debug!("disclaimer continues on a new page");
            cursor = ctx.new_page()?;
        }
        draw_text(
            &mut ctx.canvas(cursor.page)?,
            line,
            MARGIN,
            cursor.y - ascent,
            Face::Serif,
            DISCLAIMER_SIZE,
            colours::LABEL,
        );
        cursor = cursor.down(DISCLAIMER_LINE_HEIGHT);
    }
    Ok(cursor)
}

/// Stamps `"<label> · Page i of n"` at the foot of every page, once all pages exist
pub(crate) fn stamp_page_numbers(ctx: &mut LayoutContext, label: &str, generated: Option<&str>) -> Result<(), PermitError> {
    let pages = ctx.document().page_order.clone();
    let count = pages.len();
    for (i, page) in pages.into_iter().enumerate() {
        let mut footer = format!("{label} \u{b7} Page {} of {count}", i + 1);
        if let Some(generated) = generated {
            footer.push_str(&format!(" \u{b7} Generated {generated}"));
        }
        draw_centered_text(
            &mut ctx.canvas(page)?,
            &footer,
            FOOTER_BASELINE,
            Face::Regular,
            SMALL_SIZE,
            colours::LABEL,
        );
    }
    Ok(())
}
