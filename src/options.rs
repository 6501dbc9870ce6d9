use crate::font::{FontSource, StandardFont};
use chrono::{DateTime, FixedOffset};

/// The three faces the permit template is set in
#[derive(Debug, Clone, PartialEq)]
pub struct FontSources {
    /// Body text and values
    pub regular: FontSource,
    /// Titles, headings, values in grid boxes and totals
    pub bold: FontSource,
    /// Disclaimers and other legal text
    pub serif: FontSource,
}

impl Default for FontSources {
    fn default() -> Self {
        FontSources {
            regular: FontSource::Standard(StandardFont::Helvetica),
            bold: FontSource::Standard(StandardFont::HelveticaBold),
            serif: FontSource::Standard(StandardFont::TimesRoman),
        }
    }
}

/// Everything about a rendered permit that doesn't come from the record itself.
///
/// ```
/// use permit_pdf::RenderOptions;
///
/// let mut options = RenderOptions::default();
/// options
///     .jurisdiction("City of Springfield")
///     .subtitle("Department of Public Works")
///     .draft(false);
/// assert_eq!(options.draft, Some(false));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// First line of the header, above the document title
    pub jurisdiction: String,
    /// Small print under the document title
    pub subtitle: Option<String>,
    /// Forces draft mode on or off; [None] decides from the record's status
    pub draft: Option<bool>,
    pub watermark_text: String,
    /// PNG or JPEG bytes, drawn at the left of the header
    pub logo: Option<Vec<u8>>,
    pub fonts: FontSources,
    /// Written to the document info and the footer. Leave unset for byte-stable output.
    pub generated_at: Option<DateTime<FixedOffset>>,
    /// Compress page content streams
    pub compress: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            jurisdiction: "Department of Building & Safety".to_string(),
            subtitle: None,
            draft: None,
            watermark_text: "DRAFT".to_string(),
            logo: None,
            fonts: FontSources::default(),
            generated_at: None,
            compress: true,
        }
    }
}

impl RenderOptions {
    pub fn jurisdiction<S: ToString>(&mut self, jurisdiction: S) -> &mut Self {
        self.jurisdiction = jurisdiction.to_string();
        self
    }

    pub fn subtitle<S: ToString>(&mut self, subtitle: S) -> &mut Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn draft(&mut self, draft: bool) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    pub fn watermark_text<S: ToString>(&mut self, text: S) -> &mut Self {
        self.watermark_text = text.to_string();
        self
    }

    pub fn logo(&mut self, bytes: Vec<u8>) -> &mut Self {
        self.logo = Some(bytes);
        self
    }

    pub fn fonts(&mut self, fonts: FontSources) -> &mut Self {
        self.fonts = fonts;
        self
    }

    pub fn generated_at(&mut self, at: DateTime<FixedOffset>) -> &mut Self {
        self.generated_at = Some(at);
        self
    }

    pub fn compress(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }
}
