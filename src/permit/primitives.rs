//! Drawing operations used by the layout engine and the pagination controller. These take
//! absolute coordinates and make no layout decisions of their own.

use super::constants::*;
use super::context::{Canvas, Face};
use crate::colour::{colours, Colour};
use crate::image::Image;
use crate::layout::centred_baseline;
use crate::page::{ImageLayout, LineLayout, RectLayout, SpanLayout, Stroke, WatermarkLayout};
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Pt;
use id_arena::Id;
use std::f32::consts::FRAC_PI_4;

pub(crate) fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    x: Pt,
    y: Pt,
    face: Face,
    size: Pt,
    colour: Colour,
) {
    canvas.page.add_span(SpanLayout {
        text: text.to_string(),
        font: canvas.faces.span_font(face, size),
        colour,
        coords: (x, y),
    });
}

/// Draws `text` horizontally centred on the page, with its baseline at `y`. Text wider
/// than the space between the side margins is cut to fit.
pub(crate) fn draw_centered_text(
    canvas: &mut Canvas,
    text: &str,
    y: Pt,
    face: Face,
    size: Pt,
    colour: Colour,
) {
    let text = canvas.faces.fit(text, face, size, canvas.page.width() - MARGIN * 2.0);
    let width = canvas.faces.width(&text, face, size);
    let x = (canvas.page.width() - width) / 2.0;
    draw_text(canvas, &text, x, y, face, size, colour);
}

/// Draws `text` so that it ends at `right`
pub(crate) fn draw_right_aligned_text(
    canvas: &mut Canvas,
    text: &str,
    right: Pt,
    y: Pt,
    face: Face,
    size: Pt,
    colour: Colour,
) {
    let width = canvas.faces.width(text, face, size);
    draw_text(canvas, text, right - width, y, face, size, colour);
}

pub(crate) fn draw_line(canvas: &mut Canvas, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, width: Pt) {
    canvas.page.add_line(LineLayout {
        from,
        to,
        stroke: Stroke { colour, width },
    });
}

pub(crate) fn draw_rect(canvas: &mut Canvas, rect: Rect, fill: Option<Colour>, stroke: Option<Stroke>) {
    canvas.page.add_rect(RectLayout { rect, fill, stroke });
}

pub(crate) fn border() -> Stroke {
    Stroke {
        colour: colours::BORDER,
        width: Pt(1.0),
    }
}

pub(crate) fn draw_image(canvas: &mut Canvas, image_id: Id<Image>, position: Rect) {
    canvas.page.add_image(ImageLayout { image_id, position });
}

/// A label and its value inside a grid box. Items sit on rows below the title bar; a value
/// containing newlines stacks further rows downward.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridItem {
    pub label: String,
    pub value: String,
    /// Offset of the label from the box's left edge
    pub column: Pt,
    pub row: usize,
    /// Offset of the value from the box's left edge; [None] places it right after the label
    pub value_column: Option<Pt>,
}

impl GridItem {
    pub fn new<L: ToString, V: ToString>(label: L, value: V) -> GridItem {
        GridItem {
            label: label.to_string(),
            value: value.to_string(),
            column: GRID_PADDING,
            row: 0,
            value_column: None,
        }
    }

    pub fn at(mut self, column: Pt, row: usize) -> GridItem {
        self.column = column;
        self.row = row;
        self
    }

    pub fn value_at(mut self, column: Pt) -> GridItem {
        self.value_column = Some(column);
        self
    }
}

/// Baseline of the `row`th content row of a grid box whose top edge is at `top`
pub(crate) fn grid_row_baseline(top: Pt, row: usize) -> Pt {
    top - GRID_TITLE_HEIGHT - GRID_LINE_HEIGHT - GRID_LINE_HEIGHT * row as f32
}

/// Draws a bordered box with a shaded title bar along its top, then each item as a small
/// grey label followed by a bold value. Value lines are cut short at the box's right
/// padding.
pub(crate) fn draw_grid_box(
    canvas: &mut Canvas,
    x: Pt,
    top: Pt,
    width: Pt,
    height: Pt,
    title: &str,
    items: &[GridItem],
) {
    draw_rect(
        canvas,
        Rect::from_top_left(x, top, width, GRID_TITLE_HEIGHT),
        Some(colours::SHADE),
        None,
    );
    draw_rect(canvas, Rect::from_top_left(x, top, width, height), None, Some(border()));

    let title_baseline = centred_baseline(
        canvas.faces.font(Face::Bold),
        SMALL_SIZE,
        top - GRID_TITLE_HEIGHT / 2.0,
    );
    draw_text(canvas, title, x + GRID_PADDING, title_baseline, Face::Bold, SMALL_SIZE, colours::BLACK);

    for item in items {
        let baseline = grid_row_baseline(top, item.row);
        let label_x = x + item.column;
        let value_x = match item.value_column {
            Some(column) => x + column,
            None if item.label.is_empty() => label_x,
            None => label_x + canvas.faces.width(&item.label, Face::Regular, SMALL_SIZE) + Pt(4.0),
        };

        if !item.label.is_empty() {
            draw_text(canvas, &item.label, label_x, baseline, Face::Regular, SMALL_SIZE, colours::LABEL);
        }
        let room = x + width - GRID_PADDING - value_x;
        for (i, line) in item.value.split('\n').enumerate() {
            let y = baseline - GRID_LINE_HEIGHT * i as f32;
            let line = canvas.faces.fit(line, Face::Bold, BODY_SIZE, room);
            draw_text(canvas, &line, value_x, y, Face::Bold, BODY_SIZE, colours::BLACK);
        }
    }
}

/// Small label with its value underneath, as used by the issuance bar's columns. Both are
/// kept within `max_width`.
pub(crate) fn draw_label_value_simple(canvas: &mut Canvas, x: Pt, top: Pt, max_width: Pt, label: &str, value: &str) {
    let label = canvas.faces.fit(label, Face::Regular, SMALL_SIZE, max_width);
    let value = canvas.faces.fit(value, Face::Bold, BODY_SIZE, max_width);
    draw_text(canvas, &label, x, top - Pt(14.0), Face::Regular, SMALL_SIZE, colours::LABEL);
    draw_text(canvas, &value, x, top - Pt(30.0), Face::Bold, BODY_SIZE, colours::BLACK);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FeeRowKind {
    Header,
    Item,
    Total,
}

/// One row of the fee table, `FEE_ROW_HEIGHT` tall with its top edge at `top`. The
/// description column takes 70% of the width; amounts are right-aligned.
pub(crate) fn draw_fee_row(canvas: &mut Canvas, top: Pt, description: &str, amount: &str, kind: FeeRowKind) {
    let x = MARGIN;
    let row = Rect::from_top_left(x, top, CONTENT_WIDTH, FEE_ROW_HEIGHT);
    let divider = x + CONTENT_WIDTH * FEE_DESCRIPTION_SHARE;

    let (fill, face, size) = match kind {
        FeeRowKind::Header => (Some(colours::SHADE), Face::Bold, SMALL_SIZE),
        FeeRowKind::Item => (None, Face::Regular, BODY_SIZE),
        FeeRowKind::Total => (Some(colours::TINT), Face::Bold, BODY_SIZE),
    };
    draw_rect(canvas, row, fill, Some(border()));
    draw_line(canvas, (divider, top), (divider, top - FEE_ROW_HEIGHT), colours::BORDER, Pt(1.0));

    let baseline = centred_baseline(canvas.faces.font(face), size, top - FEE_ROW_HEIGHT / 2.0);
    let description = canvas.faces.fit(description, face, size, divider - x - GRID_PADDING * 2.0);
    let amount = canvas.faces.fit(amount, face, size, x + CONTENT_WIDTH - divider - GRID_PADDING * 2.0);
    draw_text(canvas, &description, x + GRID_PADDING, baseline, face, size, colours::BLACK);
    draw_right_aligned_text(
        canvas,
        &amount,
        x + CONTENT_WIDTH - GRID_PADDING,
        baseline,
        face,
        size,
        colours::BLACK,
    );
}

/// Font size and placement of a watermark: rotated 45 degrees about the centre of the
/// page, shrunk if needed so the rotated text never leaves the page.
pub(crate) fn watermark_geometry(text_width_at_96: Pt, cap_height_at_96: Pt, page: (Pt, Pt)) -> (Pt, Transform) {
    let (page_width, page_height) = page;
    // a w×h box rotated 45° spans (w + h)/√2 both horizontally and vertically
    let extent = (text_width_at_96 + cap_height_at_96) / std::f32::consts::SQRT_2;
    let limit = page_width.min(page_height) - MARGIN;
    let scale = if extent > limit { limit / extent } else { 1.0 };

    let size = WATERMARK_SIZE * scale;
    let (w, h) = (text_width_at_96 * scale, cap_height_at_96 * scale);
    let transform = Transform::translate(-w / 2.0, -h / 2.0)
        .then(Transform::rotate(FRAC_PI_4))
        .with_translate(page_width / 2.0, page_height / 2.0);
    (size, transform)
}

/// Draws the diagonal draft watermark across the middle of the page
pub(crate) fn draw_watermark(canvas: &mut Canvas, text: &str) {
    let font = canvas.faces.font(Face::Bold);
    let width = canvas.faces.width(text, Face::Bold, WATERMARK_SIZE);
    let (size, transform) = watermark_geometry(
        width,
        font.cap_height(WATERMARK_SIZE),
        (canvas.page.width(), canvas.page.height()),
    );

    canvas.page.add_watermark(WatermarkLayout {
        text: text.to_string(),
        font: canvas.faces.span_font(Face::Bold, size),
        colour: colours::WATERMARK,
        opacity: WATERMARK_OPACITY,
        transform,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use crate::page::PageContents;
    use crate::permit::context::LayoutContext;

    fn context() -> (LayoutContext, Id<crate::Page>) {
        let mut ctx = LayoutContext::new(&RenderOptions::default(), false).expect("context");
        let cursor = ctx.new_page().expect("page");
        (ctx, cursor.page)
    }

    #[test]
    fn centred_text_is_symmetric_about_the_page() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        draw_centered_text(&mut canvas, "Building Permit", Pt(700.0), Face::Bold, TITLE_SIZE, colours::BLACK);

        let width = canvas.faces.width("Building Permit", Face::Bold, TITLE_SIZE);
        let span = canvas.page.find_span("Building Permit").expect("drawn");
        let left = span.coords.0;
        let right = PAGE_WIDTH - (left + width);
        assert!((left - right).abs() < Pt(0.01));
        assert_eq!(span.coords.1, Pt(700.0));
    }

    #[test]
    fn grid_box_draws_title_bar_and_border_at_the_same_edge() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        draw_grid_box(
            &mut canvas,
            MARGIN,
            Pt(600.0),
            CONTENT_WIDTH,
            Pt(59.0),
            "PROJECT LOCATION",
            &[GridItem::new("Address:", "12 Elm St\nSpringfield, IL").value_at(ADDRESS_VALUE_COLUMN)],
        );

        let rects: Vec<_> = canvas.page.rects().collect();
        assert_eq!(rects.len(), 2);
        assert!(rects.iter().all(|r| r.rect.x1 == MARGIN));
        assert_eq!(rects[0].rect.height(), GRID_TITLE_HEIGHT);
        assert_eq!(rects[1].rect.height(), Pt(59.0));
        assert!(rects[1].rect.contains(&rects[0].rect));

        let first = canvas.page.find_span("12 Elm St").expect("first line");
        let second = canvas.page.find_span("Springfield, IL").expect("second line");
        assert_eq!(first.coords, (MARGIN + ADDRESS_VALUE_COLUMN, Pt(570.0)));
        assert_eq!(second.coords.1, Pt(556.0));
        assert_eq!(canvas.page.find_span("Address:").expect("label").colour, colours::LABEL);
    }

    #[test]
    fn values_follow_their_labels_without_an_explicit_column() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        draw_grid_box(
            &mut canvas,
            MARGIN,
            Pt(600.0),
            Pt(229.0),
            PARTIES_HEIGHT,
            "CONTRACTOR",
            &[GridItem::new("Name:", "Acme Builders").at(GRID_PADDING, 1)],
        );
        let label = canvas.page.find_span("Name:").expect("label");
        let value = canvas.page.find_span("Acme Builders").expect("value");
        assert!(value.coords.0 > label.coords.0);
        assert_eq!(label.coords.1, value.coords.1);
        assert_eq!(value.coords.1, grid_row_baseline(Pt(600.0), 1));
    }

    #[test]
    fn values_too_wide_for_their_box_are_cut_at_the_padding() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        let address = "1200 North Industrial Parkway, Springfield, IL 62701";
        draw_grid_box(
            &mut canvas,
            MARGIN,
            Pt(600.0),
            Pt(229.0),
            PARTIES_HEIGHT,
            "CONTRACTOR",
            &[GridItem::new("Address:", address).at(GRID_PADDING, 1)],
        );
        let value = canvas
            .page
            .spans()
            .find(|s| s.text.starts_with("1200 North"))
            .expect("value");
        assert!(value.text.ends_with(crate::layout::ELLIPSIS));
        let right = value.coords.0 + canvas.faces.width(&value.text, Face::Bold, BODY_SIZE);
        assert!(right <= MARGIN + Pt(229.0) - GRID_PADDING);
    }

    #[test]
    fn long_fee_descriptions_stop_at_the_divider() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        let description = "Plan review for structural, mechanical, electrical and plumbing drawings";
        draw_fee_row(&mut canvas, Pt(500.0), description, "$10.00", FeeRowKind::Item);
        let span = canvas
            .page
            .spans()
            .find(|s| s.text.starts_with("Plan review"))
            .expect("description");
        let right = span.coords.0 + canvas.faces.width(&span.text, Face::Regular, BODY_SIZE);
        assert!(right <= MARGIN + CONTENT_WIDTH * FEE_DESCRIPTION_SHARE - GRID_PADDING);
    }

    #[test]
    fn fee_amounts_are_right_aligned_against_the_table_edge() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        draw_fee_row(&mut canvas, Pt(500.0), "Plan review", "$1,250.00", FeeRowKind::Item);

        let width = canvas.faces.width("$1,250.00", Face::Regular, BODY_SIZE);
        let amount = canvas.page.find_span("$1,250.00").expect("amount");
        assert!((amount.coords.0 + width - (MARGIN + CONTENT_WIDTH - GRID_PADDING)).abs() < Pt(0.01));

        let divider = canvas.page.lines().next().expect("divider");
        assert!((divider.from.0 - Pt(72.0 + 468.0 * 0.7)).abs() < Pt(0.01));
        assert_eq!(canvas.page.rects().next().expect("row").rect.height(), FEE_ROW_HEIGHT);
    }

    #[test]
    fn watermark_stays_on_the_page() {
        let media = Rect::from_top_left(Pt(0.0), PAGE_HEIGHT, PAGE_WIDTH, PAGE_HEIGHT);
        for (width, cap) in [(Pt(325.0), Pt(69.0)), (Pt(1400.0), Pt(69.0))] {
            let (size, transform) = watermark_geometry(width, cap, (PAGE_WIDTH, PAGE_HEIGHT));
            let scale = size / WATERMARK_SIZE;
            let (w, h) = (width * scale, cap * scale);
            for (x, y) in [(Pt(0.0), Pt(0.0)), (w, Pt(0.0)), (Pt(0.0), h), (w, h)] {
                let (px, py) = transform.apply(x, y);
                let point = Rect { x1: px, y1: py, x2: px, y2: py };
                assert!(media.contains(&point), "corner {px}, {py} is off the page");
            }
        }
    }

    #[test]
    fn watermark_is_centred_on_the_page() {
        let (mut ctx, page) = context();
        let mut canvas = ctx.canvas(page).expect("canvas");
        draw_watermark(&mut canvas, "DRAFT");
        let PageContents::Watermark(watermark) = canvas.page.contents.last().expect("drawn") else {
            panic!("expected a watermark");
        };
        let font = canvas.faces.font(Face::Bold);
        let w = canvas.faces.width("DRAFT", Face::Bold, watermark.font.size);
        let h = font.cap_height(watermark.font.size);
        let (cx, cy) = watermark.transform.apply(w / 2.0, h / 2.0);
        assert!((cx - Pt(306.0)).abs() < Pt(0.01));
        assert!((cy - Pt(396.0)).abs() < Pt(0.01));
    }
}
