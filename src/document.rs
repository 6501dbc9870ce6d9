use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PermitError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::collections::BTreeSet;
use std::io::Write;

/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    /// Flate-compress page content streams
    pub compress: bool,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            fonts: Arena::new(),
            images: Arena::new(),
            compress: true,
        }
    }
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages that will be written
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The page at `page_index` in document order
    pub fn page(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|&id| self.pages.get(id))
    }

    /// Pages in document order
    pub fn ordered_pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|&id| self.pages.get(id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can refer to it by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, so any page can re-use them through the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. The whole document is rendered in memory
    /// first; all object references are resolved during this call.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), PermitError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        let opacities: BTreeSet<u16> = self
            .ordered_pages()
            .flat_map(|page| page.opacity_keys())
            .collect();
        for key in opacities {
            let id = refs.gen(RefType::Opacity(key));
            let alpha = key as f32 / 1000.0;
            writer
                .ext_graphics(id)
                .non_stroking_alpha(alpha)
                .stroking_alpha(alpha);
        }

        for (page_index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get(*id).ok_or(PermitError::PageMissing)?;
            page.write(
                &mut refs,
                page_index,
                &self.fonts,
                &self.images,
                self.compress,
                &mut writer,
            )?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// Render the document into a byte buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, PermitError> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::pagesize::LETTER;
    use crate::units::Pt;

    #[test]
    fn empty_pages_still_make_a_valid_file() {
        let mut doc = Document::default();
        doc.add_page(Page::new(LETTER, Some(Margins::all(Pt(72.0)))));
        doc.add_page(Page::new(LETTER, None));
        let bytes = doc.to_bytes().expect("can write");
        assert!(bytes.starts_with(b"%PDF-"));

        let parsed = lopdf::Document::load_mem(&bytes).expect("lopdf can read it back");
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn pages_are_looked_up_in_document_order() {
        let mut doc = Document::default();
        let first = doc.add_page(Page::new(LETTER, None));
        let second = doc.add_page(Page::new(LETTER, None));
        assert_eq!(doc.page_order, vec![first, second]);
        assert_eq!(doc.page_count(), 2);
        assert!(doc.page(2).is_none());
    }
}
