//! Static font-metric tables and page geometry for the layout engine.
//!
//! Widths are advance widths in 1/1000 em for the ASCII printable range
//! 0x20..=0x7E (index = byte - 32), taken from the standard Helvetica and
//! Times-Roman core-font metrics. Greedy word-wrap over these tables is an
//! estimate, not a shaper: good enough to predict line counts within a line
//! or two per page, which is all the style solver needs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family
// ────────────────────────────────────────────────────────────────────────────

/// Reference font families with known metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Neo-grotesque sans-serif (modern template).
    Helvetica,
    /// Transitional serif (simple and Harvard templates).
    Times,
}

impl FontFamily {
    /// CSS font stack used by the HTML serializer.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "'Helvetica Neue', Helvetica, Arial, sans-serif",
            FontFamily::Times => "'Times New Roman', Times, Georgia, serif",
        }
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "sans" => Ok(FontFamily::Helvetica),
            "times" | "serif" => Ok(FontFamily::Times),
            other => Err(format!("unknown font family '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

pub const LETTER_HEIGHT_PT: f32 = 792.0;

/// Physical page size. All dimensions in PostScript points (1/72 in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    Letter,
    A4,
}

impl PageSize {
    pub fn width_pt(&self) -> f32 {
        match self {
            PageSize::Letter => 612.0,
            PageSize::A4 => 595.28,
        }
    }

    pub fn height_pt(&self) -> f32 {
        match self {
            PageSize::Letter => LETTER_HEIGHT_PT,
            PageSize::A4 => 841.89,
        }
    }

    /// CSS `@page size` keyword.
    pub fn css_name(&self) -> &'static str {
        match self {
            PageSize::Letter => "letter",
            PageSize::A4 => "A4",
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(format!("unknown page size '{other}'")),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Letter => write!(f, "letter"),
            PageSize::A4 => write!(f, "a4"),
        }
    }
}

/// Process-wide layout inputs. Deliberately independent of the template so
/// that every renderer sees the same StyleConfig for the same content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub page: PageSize,
    /// Font whose metrics drive line-wrap estimation.
    pub reference_font: FontFamily,
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self {
            page: PageSize::Letter,
            reference_font: FontFamily::Helvetica,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for characters outside the table, in 1/1000 em.
    average_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        let units = if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_width
        };
        units as f32 / 1000.0
    }

    /// Width of `s` in em.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    pub fn space_width(&self) -> f32 {
        self.char_width(' ')
    }

    pub fn average_char_width(&self) -> f32 {
        self.average_width as f32 / 1000.0
    }

    /// Printed lines `s` occupies under greedy word-wrap at `width_em`.
    ///
    /// Empty or whitespace-only text is zero lines. A single word wider than
    /// the line still counts as one line.
    pub fn estimated_lines(&self, s: &str, width_em: f32) -> u16 {
        let space_w = self.space_width();
        let mut lines = 0u16;
        let mut current = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word);
            if lines == 0 {
                lines = 1;
                current = word_w;
            } else if current + space_w + word_w > width_em {
                lines = lines.saturating_add(1);
                current = word_w;
            } else {
                current += space_w + word_w;
            }
        }
        lines
    }
}

#[rustfmt::skip]
static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n-z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {   |    }    ~
        334, 260, 334, 584,
    ],
    average_width: 540,
};

#[rustfmt::skip]
static TIMES: FontMetricTable = FontMetricTable {
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0-9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :   ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A-M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N-Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a-m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n-z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {   |    }    ~
        480, 200, 480, 541,
    ],
    average_width: 480,
};

pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA,
        FontFamily::Times => &TIMES,
    }
}
