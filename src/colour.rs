/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub const fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub const fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    pub(crate) fn apply_fill(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }

    pub(crate) fn apply_stroke(&self, content: &mut pdf_writer::Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }
}

/// The palette shared by every permit page
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new_grey(0.0);
    /// Body text that should recede, e.g. field labels
    pub const LABEL: Colour = Colour::new_grey(0.45);
    /// Box outlines
    pub const BORDER: Colour = Colour::new_grey(0.3);
    /// Separators between rows
    pub const RULE: Colour = Colour::new_grey(0.8);
    /// Title bars and table header rows
    pub const SHADE: Colour = Colour::new_grey(0.9);
    /// Background of the issuance bar
    pub const TINT: Colour = Colour::new_rgb(0.95, 0.96, 0.98);
    /// Background of the permit number box
    pub const HIGHLIGHT: Colour = Colour::new_rgb(1.0, 0.96, 0.8);
    pub const NAVY: Colour = Colour::new_rgb(0.1, 0.2, 0.4);
    pub const WATERMARK: Colour = Colour::new_rgb(0.8, 0.1, 0.1);
}
