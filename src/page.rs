use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use crate::PermitError;
use id_arena::{Arena, Id};
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::collections::BTreeSet;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn from a single baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    pub colour: Colour,
    pub width: Pt,
}

/// A rectangle that is filled, outlined, or both
#[derive(Clone, PartialEq, Debug)]
pub struct RectLayout {
    pub rect: Rect,
    pub fill: Option<Colour>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub stroke: Stroke,
}

/// Text placed through an arbitrary transform and painted with reduced opacity
#[derive(Clone, PartialEq, Debug)]
pub struct WatermarkLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Fill opacity, from 0.0 to 1.0
    pub opacity: f32,
    /// Maps text space (baseline origin at 0,0) onto the page
    pub transform: Transform,
}

impl WatermarkLayout {
    /// Opacity in thousandths, which is how graphics states are keyed
    pub(crate) fn opacity_key(&self) -> u16 {
        (self.opacity.clamp(0.0, 1.0) * 1000.0).round() as u16
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Image(ImageLayout),
    Rect(RectLayout),
    Line(LineLayout),
    Watermark(WatermarkLayout),
}

/// A single page: its geometry plus everything drawn on it, in painting order
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything laid out on this page
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_rect(&mut self, rect: RectLayout) {
        self.contents.push(PageContents::Rect(rect));
    }

    pub fn add_line(&mut self, line: LineLayout) {
        self.contents.push(PageContents::Line(line));
    }

    pub fn add_watermark(&mut self, watermark: WatermarkLayout) {
        self.contents.push(PageContents::Watermark(watermark));
    }

    /// All text spans on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    /// The first span whose text is exactly `text`
    pub fn find_span(&self, text: &str) -> Option<&SpanLayout> {
        self.spans().find(|span| span.text == text)
    }

    pub fn watermarks(&self) -> impl Iterator<Item = &WatermarkLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Watermark(w) => Some(w),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Line(l) => Some(l),
            _ => None,
        })
    }

    /// Opacity keys of every graphics state this page needs in its resources
    pub(crate) fn opacity_keys(&self) -> BTreeSet<u16> {
        self.watermarks().map(WatermarkLayout::opacity_key).collect()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        compress: bool,
        writer: &mut Pdf,
    ) -> Result<(), PermitError> {
        let id = refs.get(RefType::Page(page_index)).ok_or(PermitError::PageMissing)?;
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();

        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();

        let opacities = self.opacity_keys();
        if !opacities.is_empty() {
            let mut states = resources.ext_g_states();
            for key in opacities {
                if let Some(state_ref) = refs.get(RefType::Opacity(key)) {
                    states.pair(Name(format!("GS{key}").as_bytes()), state_ref);
                }
            }
            states.finish();
        }
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts);
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
                &rendered,
                miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
            );
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        } else {
            writer.stream(content_id, rendered.as_slice());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize::LETTER;
    use crate::Document;

    #[test]
    fn content_box_sits_inside_the_margins() {
        let page = Page::new(LETTER, Some(Margins::all(Pt(72.0))));
        assert_eq!(page.content_box.x1, Pt(72.0));
        assert_eq!(page.content_box.y2, Pt(720.0));
        assert_eq!(page.width(), Pt(612.0));
        assert_eq!(page.height(), Pt(792.0));
    }

    #[test]
    fn contents_are_kept_in_painting_order_and_filterable() {
        let mut doc = Document::default();
        let font = doc.add_font(Font::standard(crate::StandardFont::Helvetica));
        let mut page = Page::new(LETTER, None);
        page.add_rect(RectLayout {
            rect: Rect::from_top_left(Pt(0.0), Pt(10.0), Pt(10.0), Pt(10.0)),
            fill: Some(colours::SHADE),
            stroke: None,
        });
        page.add_span(SpanLayout {
            text: "Permit".into(),
            font: SpanFont {
                id: font,
                size: Pt(11.0),
            },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(700.0)),
        });
        page.add_watermark(WatermarkLayout {
            text: "DRAFT".into(),
            font: SpanFont {
                id: font,
                size: Pt(96.0),
            },
            colour: colours::WATERMARK,
            opacity: 0.15,
            transform: Transform::identity(),
        });

        assert!(matches!(page.contents[0], PageContents::Rect(_)));
        assert_eq!(page.spans().count(), 1);
        assert!(page.find_span("Permit").is_some());
        assert_eq!(page.rects().count(), 1);
        assert_eq!(page.opacity_keys().into_iter().collect::<Vec<_>>(), vec![150]);
    }
}
