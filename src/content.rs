//! Turns laid-out page contents into a PDF content stream.

use crate::font::Font;
use crate::page::{
    ImageLayout, LineLayout, PageContents, RectLayout, SpanLayout, Stroke, WatermarkLayout,
};
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Renders page contents to the operators of a content stream. Every item is wrapped in
/// its own save/restore pair so that colours and graphics states never leak between
/// items.
pub(crate) fn render_contents(contents: &[PageContents], fonts: &Arena<Font>) -> Vec<u8> {
    let mut content = Content::new();

    for item in contents.iter() {
        content.save_state();
        match item {
            PageContents::Text(span) => render_span(&mut content, span, fonts),
            PageContents::Image(image) => render_image(&mut content, image),
            PageContents::Rect(rect) => render_rect(&mut content, rect),
            PageContents::Line(line) => render_line(&mut content, line),
            PageContents::Watermark(watermark) => render_watermark(&mut content, watermark, fonts),
        }
        content.restore_state();
    }

    content.finish()
}

fn font_name(font: &SpanLayout) -> String {
    format!("F{}", font.font.id.index())
}

fn render_span(content: &mut Content, span: &SpanLayout, fonts: &Arena<Font>) {
    if span.text.is_empty() {
        return;
    }
    let name = font_name(span);
    let encoded = fonts[span.font.id].encode(&span.text);

    span.colour.apply_fill(content);
    content.begin_text();
    content.set_font(Name(name.as_bytes()), *span.font.size);
    content.next_line(*span.coords.0, *span.coords.1);
    content.show(Str(&encoded));
    content.end_text();
}

fn render_image(content: &mut Content, image: &ImageLayout) {
    let name = format!("I{}", image.image_id.index());
    let rect = image.position;
    content.transform([*rect.width(), 0.0, 0.0, *rect.height(), *rect.x1, *rect.y1]);
    content.x_object(Name(name.as_bytes()));
}

fn apply_stroke(content: &mut Content, stroke: &Stroke) {
    stroke.colour.apply_stroke(content);
    content.set_line_width(*stroke.width);
}

fn render_rect(content: &mut Content, layout: &RectLayout) {
    if let Some(fill) = layout.fill {
        fill.apply_fill(content);
    }
    if let Some(stroke) = &layout.stroke {
        apply_stroke(content, stroke);
    }

    let r = layout.rect;
    content.rect(*r.x1, *r.y1, *r.width(), *r.height());
    match (layout.fill.is_some(), layout.stroke.is_some()) {
        (true, true) => content.fill_nonzero_and_stroke(),
        (true, false) => content.fill_nonzero(),
        (false, true) => content.stroke(),
        (false, false) => content.end_path(),
    };
}

fn render_line(content: &mut Content, line: &LineLayout) {
    apply_stroke(content, &line.stroke);
    content.move_to(*line.from.0, *line.from.1);
    content.line_to(*line.to.0, *line.to.1);
    content.stroke();
}

fn render_watermark(content: &mut Content, watermark: &WatermarkLayout, fonts: &Arena<Font>) {
    let state = format!("GS{}", watermark.opacity_key());
    let font = format!("F{}", watermark.font.id.index());
    let encoded = fonts[watermark.font.id].encode(&watermark.text);

    content.set_parameters(Name(state.as_bytes()));
    watermark.colour.apply_fill(content);
    content.begin_text();
    content.set_font(Name(font.as_bytes()), *watermark.font.size);
    content.set_text_matrix(watermark.transform.matrix());
    content.show(Str(&encoded));
    content.end_text();
}
