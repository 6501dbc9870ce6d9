use super::constants::*;
use super::primitives::draw_watermark;
use crate::font::Font;
use crate::image::Image;
use crate::layout::{self, Margins};
use crate::options::RenderOptions;
use crate::page::{Page, SpanFont};
use crate::pagesize::LETTER;
use crate::units::Pt;
use crate::{Document, PermitError};
use id_arena::{Arena, Id};
use log::debug;

/// The three faces of the template
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Face {
    Regular,
    Bold,
    Serif,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct FontIds {
    regular: Id<Font>,
    bold: Id<Font>,
    serif: Id<Font>,
}

impl FontIds {
    fn get(&self, face: Face) -> Id<Font> {
        match face {
            Face::Regular => self.regular,
            Face::Bold => self.bold,
            Face::Serif => self.serif,
        }
    }
}

/// Read-only access to the loaded faces, shared by the measure pass and the draw pass so
/// that both wrap text with the exact same fonts
#[derive(Copy, Clone)]
pub(crate) struct Faces<'a> {
    arena: &'a Arena<Font>,
    ids: FontIds,
}

impl<'a> Faces<'a> {
    pub fn font(&self, face: Face) -> &'a Font {
        &self.arena[self.ids.get(face)]
    }

    pub fn span_font(&self, face: Face, size: Pt) -> SpanFont {
        SpanFont {
            id: self.ids.get(face),
            size,
        }
    }

    pub fn width(&self, text: &str, face: Face, size: Pt) -> Pt {
        layout::width_of_text(text, self.font(face), size)
    }

    /// Word-wraps `text`; a line that is still too wide (one unbreakable word) is cut to
    /// fit with an ellipsis so that nothing crosses a border
    pub fn wrap(&self, text: &str, face: Face, size: Pt, max_width: Pt) -> Vec<String> {
        layout::wrap(text, self.font(face), size, max_width)
            .into_iter()
            .map(|line| self.fit(&line, face, size, max_width))
            .collect()
    }

    pub fn fit(&self, text: &str, face: Face, size: Pt, max_width: Pt) -> String {
        layout::truncate_to_width(text, self.font(face), size, max_width)
    }
}

/// One page being drawn on, plus the fonts to measure with
pub(crate) struct Canvas<'a> {
    pub page: &'a mut Page,
    pub faces: Faces<'a>,
}

/// Where the next section goes: a page, and the y coordinate of the section's top edge
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Cursor {
    pub page: Id<Page>,
    pub y: Pt,
}

impl Cursor {
    pub fn down(self, by: Pt) -> Cursor {
        Cursor {
            y: self.y - by,
            ..self
        }
    }

    /// Space left above the bottom margin
    pub fn remaining(&self) -> Pt {
        self.y - MARGIN
    }
}

/// The document under construction and the settings every drawing step needs
pub(crate) struct LayoutContext {
    document: Document,
    ids: FontIds,
    logo: Option<Id<Image>>,
    draft: bool,
    watermark_text: String,
}

impl LayoutContext {
    pub fn new(options: &RenderOptions, draft: bool) -> Result<LayoutContext, PermitError> {
        let mut document = Document {
            compress: options.compress,
            ..Default::default()
        };

        let ids = FontIds {
            regular: document.add_font(Font::from_source(&options.fonts.regular)?),
            bold: document.add_font(Font::from_source(&options.fonts.bold)?),
            serif: document.add_font(Font::from_source(&options.fonts.serif)?),
        };
        let logo = match &options.logo {
            Some(bytes) => Some(document.add_image(Image::from_bytes(bytes)?)),
            None => None,
        };

        Ok(LayoutContext {
            document,
            ids,
            logo,
            draft,
            watermark_text: options.watermark_text.clone(),
        })
    }

    pub fn faces(&self) -> Faces<'_> {
        Faces {
            arena: &self.document.fonts,
            ids: self.ids,
        }
    }

    /// The logo's id and its width / height ratio
    pub fn logo(&self) -> Option<(Id<Image>, f32)> {
        self.logo
            .map(|id| (id, self.document.images[id].aspect_ratio()))
    }

    pub fn canvas(&mut self, page: Id<Page>) -> Result<Canvas<'_>, PermitError> {
        let page = self
            .document
            .pages
            .get_mut(page)
            .ok_or(PermitError::PageMissing)?;
        Ok(Canvas {
            page,
            faces: Faces {
                arena: &self.document.fonts,
                ids: self.ids,
            },
        })
    }

    /// Appends a page, watermarked when drafting, and returns a cursor at its top margin
    pub fn new_page(&mut self) -> Result<Cursor, PermitError> {
        let id = self
            .document
            .add_page(Page::new(LETTER, Some(Margins::all(MARGIN))));
        debug!("allocated page {}", self.document.page_count());

        if self.draft {
            let text = self.watermark_text.clone();
            draw_watermark(&mut self.canvas(id)?, &text);
        }

        Ok(Cursor {
            page: id,
            y: CONTENT_TOP,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pages_start_at_the_top_margin() {
        let mut ctx = LayoutContext::new(&RenderOptions::default(), false).expect("context");
        let first = ctx.new_page().expect("page");
        let second = ctx.new_page().expect("page");
        assert_eq!(first.y, Pt(720.0));
        assert_ne!(first.page, second.page);
        assert_eq!(ctx.document().page_count(), 2);
        assert_eq!(first.down(Pt(20.0)).remaining(), Pt(628.0));
    }

    #[test]
    fn draft_pages_carry_the_watermark() {
        let mut ctx = LayoutContext::new(&RenderOptions::default(), true).expect("context");
        let cursor = ctx.new_page().expect("page");
        let page = &ctx.document().pages[cursor.page];
        assert_eq!(page.watermarks().count(), 1);
    }

    #[test]
    fn faces_resolve_to_distinct_fonts() {
        let ctx = LayoutContext::new(&RenderOptions::default(), false).expect("context");
        let faces = ctx.faces();
        assert_eq!(faces.font(Face::Bold).name("?"), "Helvetica-Bold");
        assert_eq!(faces.font(Face::Serif).name("?"), "Times-Roman");
        assert!(faces.width("Permit", Face::Bold, BODY_SIZE) > faces.width("Permit", Face::Regular, BODY_SIZE));
    }

    #[test]
    fn wrapped_lines_never_exceed_the_width() {
        let ctx = LayoutContext::new(&RenderOptions::default(), false).expect("context");
        let faces = ctx.faces();
        let lines = faces.wrap(
            "see https://permits.example.gov/a/very/long/unbroken/path ok",
            Face::Regular,
            BODY_SIZE,
            Pt(80.0),
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with(layout::ELLIPSIS));
        for line in &lines {
            assert!(faces.width(line, Face::Regular, BODY_SIZE) <= Pt(80.0));
        }
    }
}
