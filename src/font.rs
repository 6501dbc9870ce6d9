use crate::{
    refs::{ObjectReferences, RefType},
    PermitError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

mod afm;

/// The PDF standard fonts the permit template uses. These are never embedded; every
/// conforming reader ships them, and their metrics are compiled into the crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
}

impl StandardFont {
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
        }
    }

    fn metrics(&self) -> &'static afm::Metrics {
        match self {
            StandardFont::Helvetica => &afm::HELVETICA,
            StandardFont::HelveticaBold => &afm::HELVETICA_BOLD,
            StandardFont::TimesRoman => &afm::TIMES_ROMAN,
        }
    }
}

/// Where a font comes from, before it has been loaded into a [Document](crate::Document)
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    Standard(StandardFont),
    /// Raw TTF or OTF bytes, embedded in their entirety
    TrueType(Vec<u8>),
}

enum FontKind {
    Standard(StandardFont),
    TrueType(OwnedFace),
}

/// A font that text can be measured with and drawn in.
///
/// Standard fonts are written as simple Type1 fonts in WinAnsi encoding. TrueType fonts
/// are embedded as Type0 fonts with an Identity-H encoding and a ToUnicode map so that
/// text stays searchable.
pub struct Font {
    kind: FontKind,
}

impl Font {
    pub fn standard(font: StandardFont) -> Font {
        Font {
            kind: FontKind::Standard(font),
        }
    }

    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PermitError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            kind: FontKind::TrueType(face),
        })
    }

    pub fn from_source(source: &FontSource) -> Result<Font, PermitError> {
        match source {
            FontSource::Standard(font) => Ok(Font::standard(*font)),
            FontSource::TrueType(bytes) => Font::load(bytes.clone()),
        }
    }

    /// The PostScript name of the font, falling back to `fallback` for faces without one
    pub fn name(&self, fallback: &str) -> String {
        match &self.kind {
            FontKind::Standard(font) => font.base_font().to_string(),
            FontKind::TrueType(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME
                        && name.is_unicode()
                })
                .and_then(|name| name.to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Scale factor from font units to points at `size`
    fn scaling(&self, size: Pt) -> f32 {
        match &self.kind {
            FontKind::Standard(_) => size.0 / 1000.0,
            FontKind::TrueType(face) => size.0 / face.as_face_ref().units_per_em() as f32,
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let units = match &self.kind {
            FontKind::Standard(font) => font.metrics().ascender,
            FontKind::TrueType(face) => face.as_face_ref().ascender() as f32,
        };
        Pt(units * self.scaling(size))
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let units = match &self.kind {
            FontKind::Standard(font) => font.metrics().descender,
            FontKind::TrueType(face) => face.as_face_ref().descender() as f32,
        };
        Pt(units * self.scaling(size))
    }

    /// Height of capital letters, used to centre a line of text on a point
    pub fn cap_height(&self, size: Pt) -> Pt {
        let units = match &self.kind {
            FontKind::Standard(font) => font.metrics().cap_height,
            FontKind::TrueType(face) => {
                let face = face.as_face_ref();
                face.capital_height()
                    .map(|h| h as f32)
                    .unwrap_or(face.ascender() as f32 * 0.7)
            }
        };
        Pt(units * self.scaling(size))
    }

    /// Horizontal advance of the glyph that will actually be drawn for `ch`. Characters the
    /// font cannot show are drawn, and therefore measured, as `?`.
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let units = match &self.kind {
            FontKind::Standard(font) => {
                font.metrics().width(afm::winansi_code(ch).unwrap_or(b'?')) as f32
            }
            FontKind::TrueType(face) => {
                let gid = self.truetype_glyph(face, ch);
                face.as_face_ref()
                    .glyph_hor_advance(GlyphId(gid))
                    .unwrap_or_default() as f32
            }
        };
        Pt(units * self.scaling(size))
    }

    fn truetype_glyph(&self, face: &OwnedFace, ch: char) -> u16 {
        let face = face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Encode `text` the way this font's dictionary expects it in a content stream
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.kind {
            FontKind::Standard(_) => text
                .chars()
                .map(|ch| afm::winansi_code(ch).unwrap_or(b'?'))
                .collect(),
            FontKind::TrueType(face) => text
                .chars()
                .flat_map(|ch| self.truetype_glyph(face, ch).to_be_bytes())
                .collect(),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        match &self.kind {
            FontKind::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_font().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontKind::TrueType(face) => {
                let base_font = self.name(&format!("F{font_index}"));
                let glyphs = glyph_chars(face);
                let cid_font_id = write_cid(face, &glyphs, &base_font, refs, font_index, writer);
                let to_unicode_id = write_to_unicode(&glyphs, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(base_font.as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

/// Every glyph reachable through a unicode cmap subtable, with the first character that
/// maps onto it
fn glyph_chars(face: &OwnedFace) -> BTreeMap<u16, char> {
    let mut map: BTreeMap<u16, char> = BTreeMap::new();
    let Some(cmap) = face.as_face_ref().tables().cmap else {
        return map;
    };
    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }
    map
}

fn write_cid(
    face: &OwnedFace,
    glyphs: &BTreeMap<u16, char>,
    base_font: &str,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let descriptor_id = write_descriptor(face, base_font, refs, font_index, writer);
    let face = face.as_face_ref();
    let scaling = 1000.0 / face.units_per_em() as f32;

    let id = refs.gen(RefType::CidFont(font_index));
    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(base_font.as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(descriptor_id);
    cid_font.default_width(1000.0);
    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

    // runs of consecutive glyph ids share one widths entry
    let mut widths = cid_font.widths();
    let mut run_start: Option<u16> = None;
    let mut run: Vec<f32> = Vec::new();
    for &gid in glyphs.keys() {
        let width = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
        match run_start {
            Some(start) if start as usize + run.len() == gid as usize => run.push(width),
            _ => {
                if let Some(start) = run_start {
                    widths.consecutive(start, run.drain(..));
                }
                run_start = Some(gid);
                run.push(width);
            }
        }
    }
    if let Some(start) = run_start {
        widths.consecutive(start, run.drain(..));
    }
    widths.finish();

    id
}

fn write_descriptor(
    face: &OwnedFace,
    base_font: &str,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let data_id = refs.gen(RefType::FontData(font_index));
    writer
        .stream(data_id, face.as_slice())
        .pair(Name(b"Length1"), face.as_slice().len() as i32);

    let face = face.as_face_ref();
    let scaling = 1000.0 / face.units_per_em() as f32;
    let bbox = face.global_bounding_box();

    let mut flags = FontFlags::NON_SYMBOLIC;
    if face.is_monospaced() {
        flags.insert(FontFlags::FIXED_PITCH);
    }
    if face.is_italic() {
        flags.insert(FontFlags::ITALIC);
    }

    let id = refs.gen(RefType::FontDescriptor(font_index));
    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(base_font.as_bytes()));
    descriptor.flags(flags);
    descriptor.bbox(pdf_writer::Rect::new(
        bbox.x_min as f32 * scaling,
        bbox.y_min as f32 * scaling,
        bbox.x_max as f32 * scaling,
        bbox.y_max as f32 * scaling,
    ));
    descriptor.italic_angle(face.italic_angle());
    descriptor.ascent(face.ascender() as f32 * scaling);
    descriptor.descent(face.descender() as f32 * scaling);
    descriptor.cap_height(
        face.capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling),
    );
    descriptor.stem_v(stem_v(face.weight().to_number()));
    descriptor.font_file2(data_id);
    descriptor.finish();

    id
}

/// Approximate vertical stem width for an OS/2 weight class; 400 gives about 88
fn stem_v(weight: u16) -> f32 {
    50.0 + (weight as f32 / 65.0).powi(2)
}

fn write_to_unicode(
    glyphs: &BTreeMap<u16, char>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(font_index));

    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // bfchar blocks hold at most 100 entries
    let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
    for block in entries.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for &(gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            map.push_str(&format!("<{gid:04x}> <{hex}>\n"));
        }
        map.push_str("endbfchar\n");
    }
    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        map.as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
    );
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}
