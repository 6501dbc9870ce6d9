//! Page one is laid out in two passes: [measure] computes every section's height and the
//! centred starting position, then the draw pass walks the same sections top to bottom.
//! Special conditions always begin on a fresh page and paginate one whole condition at a
//! time; the signature block closes the last page.

pub mod constants;
mod context;
mod engine;
pub mod measure;
mod pagination;
mod primitives;

use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::options::RenderOptions;
use crate::record::DocumentRecord;
use crate::{Document, PermitError};
use context::LayoutContext;
use log::{info, warn};
use measure::{measure_page_one, measure_signature, PageOnePlan};
use std::fmt;

/// Something the caller should know about the document, which did not stop it from
/// being produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// The scope of work wraps to more lines than its fixed box holds; the extra lines
    /// were not drawn
    ScopeOfWorkOverflow { lines: usize, capacity: usize },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::ScopeOfWorkOverflow { lines, capacity } => write!(
                f,
                "scope of work needs {lines} lines but only {capacity} fit; the rest was cut off"
            ),
        }
    }
}

/// A fully laid-out permit, before it is serialized
pub struct PermitLayout {
    pub document: Document,
    pub plan: PageOnePlan,
    pub warnings: Vec<RenderWarning>,
}

#[derive(Debug, Clone)]
pub struct RenderedPermit {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<RenderWarning>,
}

/// Lays out and renders records with one set of options
#[derive(Debug, Clone)]
pub struct PermitRenderer {
    options: RenderOptions,
}

impl PermitRenderer {
    /// Fails when a supplied font or the logo can't be parsed
    pub fn new(options: RenderOptions) -> Result<PermitRenderer, PermitError> {
        for source in [&options.fonts.regular, &options.fonts.bold, &options.fonts.serif] {
            Font::from_source(source)?;
        }
        if let Some(logo) = &options.logo {
            Image::from_bytes(logo)?;
        }
        Ok(PermitRenderer { options })
    }

    /// Lay the record out into pages without writing any bytes
    pub fn layout(&self, record: &DocumentRecord) -> Result<PermitLayout, PermitError> {
        record.validate()?;
        let options = &self.options;
        let draft = options.draft.unwrap_or_else(|| record.is_draft());
        let mut ctx = LayoutContext::new(options, draft)?;

        let plan = measure_page_one(record, ctx.faces());
        let mut warnings = Vec::new();
        if plan.scope.overflows() {
            let warning = RenderWarning::ScopeOfWorkOverflow {
                lines: plan.scope.wrapped_lines,
                capacity: plan.scope.capacity,
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        let mut cursor = engine::draw_page_one(&mut ctx, record, &plan, options)?;
        if !record.conditions().is_empty() {
            cursor = pagination::draw_conditions(&mut ctx, record.conditions())?;
        }
        let signature = measure_signature(record, ctx.faces());
        pagination::draw_signature(&mut ctx, cursor, &signature)?;

        let label = record
            .permit_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(record.title.as_str());
        let generated = options
            .generated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string());
        pagination::stamp_page_numbers(&mut ctx, label, generated.as_deref())?;

        let mut document = ctx.into_document();
        document.set_info(Info::for_permit(record, options));

        Ok(PermitLayout {
            document,
            plan,
            warnings,
        })
    }

    /// Lay the record out and write it as PDF bytes
    pub fn render(&self, record: &DocumentRecord) -> Result<RenderedPermit, PermitError> {
        let PermitLayout {
            document, warnings, ..
        } = self.layout(record)?;
        let bytes = document.to_bytes()?;
        let page_count = document.page_count();
        info!(
            "rendered \"{}\": {} page(s), {} bytes",
            record.title,
            page_count,
            bytes.len()
        );
        Ok(RenderedPermit {
            bytes,
            page_count,
            warnings,
        })
    }
}

/// Render `record` to PDF bytes in one call
pub fn render(record: &DocumentRecord, options: &RenderOptions) -> Result<RenderedPermit, PermitError> {
    PermitRenderer::new(options.clone())?.render(record)
}

#[cfg(test)]
mod tests {
    use super::constants::*;
    use super::*;
    use crate::page::PageContents;
    use crate::record::{Fee, ProjectInfo};
    use crate::units::Pt;

    fn minimal() -> DocumentRecord {
        DocumentRecord {
            kind: "building".into(),
            title: "Building Permit".into(),
            project_info: ProjectInfo {
                name: "Garage addition".into(),
                address: "12 Elm St".into(),
                ..Default::default()
            },
            fees: Some(vec![]),
            conditions: Some(vec![]),
            ..Default::default()
        }
    }

    fn layout(record: &DocumentRecord, options: RenderOptions) -> PermitLayout {
        PermitRenderer::new(options)
            .expect("renderer")
            .layout(record)
            .expect("layout")
    }

    #[test]
    fn minimal_record_fits_one_centred_page() {
        let layout = layout(&minimal(), RenderOptions::default());
        assert_eq!(layout.document.page_count(), 1);
        assert!(layout.plan.is_centred());
        assert!(layout.plan.top < CONTENT_TOP);

        let page = layout.document.page(0).expect("page");
        assert!(page.find_span("FEE SCHEDULE").is_none());
        assert!(page.find_span("SPECIAL CONDITIONS").is_none());
        let signature = page.find_span("Authorized By").expect("signature block");
        assert!(signature.coords.1 < PAGE_HEIGHT / 2.0);
        assert!(signature.coords.1 > MARGIN);
        assert!(page.find_span("Building Permit \u{b7} Page 1 of 1").is_some());
        assert!(layout.warnings.is_empty());
    }

    #[test]
    fn forty_long_conditions_number_sequentially_across_pages() {
        let mut record = minimal();
        let text = "All excavations deeper than five feet must be shored or sloped in \
            accordance with the approved geotechnical report, inspected by the engineer of \
            record, and kept clear of standing water and stockpiled spoils at all times.";
        record.conditions = Some((0..40).map(|i| format!("{text} Item {i}.")).collect());

        let layout = layout(&record, RenderOptions::default());
        let pages = layout.document.page_count();
        assert!(pages >= 3);

        let mut numbers = Vec::new();
        for (index, page) in layout.document.ordered_pages().enumerate() {
            match index {
                0 => assert!(page.find_span("SPECIAL CONDITIONS").is_none()),
                1 => assert!(page.find_span("SPECIAL CONDITIONS").is_some()),
                // the signature may need a page of its own at the very end
                _ => assert!(
                    page.find_span("SPECIAL CONDITIONS (Continued)").is_some()
                        || (index == pages - 1 && page.find_span("Authorized By").is_some())
                ),
            }
            numbers.extend(page.spans().filter_map(|s| {
                let number = s.text.strip_suffix('.')?;
                (s.coords.0 == MARGIN + CONDITION_NUMBER_INDENT)
                    .then(|| number.parse::<usize>().ok())
                    .flatten()
            }));
        }
        assert_eq!(numbers, (1..=40).collect::<Vec<_>>());

        let last = layout.document.page(pages - 1).expect("last page");
        assert!(last.find_span("Authorized By").is_some());
        assert!(last
            .find_span(&format!("Building Permit \u{b7} Page {pages} of {pages}"))
            .is_some());
    }

    #[test]
    fn draft_records_are_watermarked_on_every_page() {
        let mut record = minimal();
        record.conditions = Some(vec!["Keep a copy of this permit on site.".into(); 30]);

        let draft = layout(&record, RenderOptions::default());
        assert!(draft.document.page_count() >= 2);
        for page in draft.document.ordered_pages() {
            assert_eq!(page.watermarks().count(), 1);
            assert!(matches!(page.contents[0], PageContents::Watermark(_)));
        }

        let mut options = RenderOptions::default();
        options.draft(false);
        let issued = layout(&record, options);
        assert!(issued.document.ordered_pages().all(|p| p.watermarks().count() == 0));

        record.status = Some("Issued".into());
        let issued = layout(&record, RenderOptions::default());
        assert!(issued.document.ordered_pages().all(|p| p.watermarks().count() == 0));
    }

    #[test]
    fn custom_watermark_text_is_used() {
        let mut options = RenderOptions::default();
        options.watermark_text("NOT FOR CONSTRUCTION");
        let layout = layout(&minimal(), options);
        let page = layout.document.page(0).expect("page");
        let watermark = page.watermarks().next().expect("watermark");
        assert_eq!(watermark.text, "NOT FOR CONSTRUCTION");
        assert!(watermark.font.size <= WATERMARK_SIZE);
    }

    #[test]
    fn invalid_records_are_rejected_before_drawing() {
        let mut record = minimal();
        record.project_info.address = String::new();
        let result = PermitRenderer::new(RenderOptions::default())
            .expect("renderer")
            .render(&record);
        assert!(matches!(result, Err(PermitError::MissingField("project_info.address"))));
    }

    #[test]
    fn unreadable_fonts_fail_up_front() {
        let mut options = RenderOptions::default();
        options.fonts.serif = crate::FontSource::TrueType(b"not a font".to_vec());
        assert!(matches!(
            PermitRenderer::new(options),
            Err(PermitError::FaceParsing(_))
        ));
    }

    #[test]
    fn overflowing_scope_is_reported() {
        let mut record = minimal();
        record.scope_of_work = Some("Demolish the existing detached garage and construct a new two-car garage. ".repeat(10));
        let layout = layout(&record, RenderOptions::default());
        assert!(matches!(
            layout.warnings.as_slice(),
            [RenderWarning::ScopeOfWorkOverflow { capacity: 4, .. }]
        ));
    }

    #[test]
    fn dense_first_page_starts_at_the_top_margin() {
        let mut record = minimal();
        record.fees = Some((0..30).map(|i| Fee::new(format!("Fixture {i}"), "$12.00")).collect());
        let layout = layout(&record, RenderOptions::default());
        assert!(!layout.plan.is_centred());
        assert_eq!(layout.plan.top, Pt(720.0));
        assert!(layout.document.page_count() >= 2);
        let found = layout
            .document
            .ordered_pages()
            .any(|p| p.find_span("$360.00").is_some());
        assert!(found);
    }

    #[test]
    fn render_produces_pdf_bytes() {
        let rendered = render(&minimal(), &RenderOptions::default()).expect("rendered");
        assert!(rendered.bytes.starts_with(b"%PDF-"));
        assert_eq!(rendered.page_count, 1);
    }
}
