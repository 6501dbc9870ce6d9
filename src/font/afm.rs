//! Width tables for the standard PDF Type1 faces, taken from the Adobe Font Metrics
//! files. Widths are in 1/1000 em and indexed by WinAnsi code.

pub(crate) struct Metrics {
    pub ascender: f32,
    pub descender: f32,
    pub cap_height: f32,
    /// Widths of WinAnsi codes 32 through 126
    pub ascii: [u16; 95],
    /// Widths of the accented letters, WinAnsi codes 0xC0 through 0xFF
    pub latin1: [u16; 64],
    /// Widths of the remaining WinAnsi codes above 127 that permit text actually uses
    pub extended: &'static [(u8, u16)],
    /// Width used for any other encodable character
    pub fallback: u16,
}

pub(crate) static HELVETICA: Metrics = Metrics {
    ascender: 718.0,
    descender: -207.0,
    cap_height: 718.0,
    ascii: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
        278, 278, 584, 584, 584, 556, 1015, // :..@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
        278, 278, 278, 469, 556, 333, // [..`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
        334, 260, 334, 584, // {..~
    ],
    latin1: [
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // À..Ï
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Ð..ß
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // à..ï
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // ð..ÿ
    ],
    extended: &[
        (0x80, 556),
        (0x85, 1000),
        (0x91, 222),
        (0x92, 222),
        (0x93, 333),
        (0x94, 333),
        (0x95, 350),
        (0x96, 556),
        (0x97, 1000),
        (0x99, 1000),
        (0xA0, 278),
        (0xA7, 556),
        (0xA9, 737),
        (0xAE, 737),
        (0xB0, 400),
        (0xB1, 584),
        (0xB6, 537),
        (0xB7, 278),
        (0xBD, 834),
    ],
    fallback: 556,
};

pub(crate) static HELVETICA_BOLD: Metrics = Metrics {
    ascender: 718.0,
    descender: -207.0,
    cap_height: 718.0,
    ascii: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
        333, 333, 584, 584, 584, 611, 975, // :..@
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
        333, 278, 333, 584, 556, 333, // [..`
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
        389, 280, 389, 584, // {..~
    ],
    latin1: [
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // À..Ï
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Ð..ß
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // à..ï
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // ð..ÿ
    ],
    extended: &[
        (0x80, 556),
        (0x85, 1000),
        (0x91, 278),
        (0x92, 278),
        (0x93, 500),
        (0x94, 500),
        (0x95, 350),
        (0x96, 556),
        (0x97, 1000),
        (0x99, 1000),
        (0xA0, 278),
        (0xA7, 556),
        (0xA9, 737),
        (0xAE, 737),
        (0xB0, 400),
        (0xB1, 584),
        (0xB6, 556),
        (0xB7, 278),
        (0xBD, 834),
    ],
    fallback: 611,
};

pub(crate) static TIMES_ROMAN: Metrics = Metrics {
    ascender: 683.0,
    descender: -217.0,
    cap_height: 662.0,
    ascii: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // ' '../
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // 0..9
        278, 278, 564, 564, 564, 444, 921, // :..@
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, // A..M
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, // N..Z
        333, 278, 333, 469, 500, 333, // [..`
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, // a..m
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, // n..z
        480, 200, 480, 541, // {..~
    ],
    latin1: [
        722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333, // À..Ï
        722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500, // Ð..ß
        444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278, // à..ï
        500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500, // ð..ÿ
    ],
    extended: &[
        (0x80, 500),
        (0x85, 1000),
        (0x91, 333),
        (0x92, 333),
        (0x93, 444),
        (0x94, 444),
        (0x95, 350),
        (0x96, 500),
        (0x97, 1000),
        (0x99, 980),
        (0xA0, 250),
        (0xA7, 500),
        (0xA9, 760),
        (0xAE, 760),
        (0xB0, 400),
        (0xB1, 564),
        (0xB6, 453),
        (0xB7, 250),
        (0xBD, 750),
    ],
    fallback: 500,
};

impl Metrics {
    /// Width of a WinAnsi code in 1/1000 em
    pub(crate) fn width(&self, code: u8) -> u16 {
        match code {
            32..=126 => self.ascii[(code - 32) as usize],
            0xC0..=0xFF => self.latin1[(code - 0xC0) as usize],
            _ => self
                .extended
                .iter()
                .find(|&&(c, _)| c == code)
                .map(|&(_, w)| w)
                .unwrap_or(self.fallback),
        }
    }
}

/// Map a character onto the WinAnsi (Windows-1252) code page. Characters outside it
/// have no code and are drawn as `?`.
pub(crate) fn winansi_code(ch: char) -> Option<u8> {
    match ch as u32 {
        0x20..=0x7E => Some(ch as u8),
        0xA0..=0xFF => Some(ch as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}
