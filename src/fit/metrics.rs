//! Text measurement without a browser
//!
//! Widths are stored as fractions of the font size, so one table serves
//! every size the fitter tries.

use unicode_segmentation::UnicodeSegmentation;

use super::{FitSurface, Size};

/// Advance widths and line height relative to the font size
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    /// Line box height per pixel of font size
    pub line_height: f32,
    /// Advance of ASCII characters (0-127), in ems
    pub char_widths: Vec<f32>,
    /// Advance for anything outside the ASCII table, in ems
    pub default_width: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        // Rough bold sans-serif proportions with leading-none line boxes
        let mut char_widths = vec![0.6; 128];
        char_widths[b' ' as usize] = 0.28;
        for narrow in ['i', 'l', 'j', '.', ',', '\'', '!', '|', ':', ';'] {
            char_widths[narrow as usize] = 0.3;
        }
        for wide in ['m', 'w', 'M', 'W'] {
            char_widths[wide as usize] = 0.9;
        }

        Self {
            line_height: 1.0,
            char_widths,
            default_width: 1.0,
        }
    }
}

impl GlyphMetrics {
    pub fn new(line_height: f32, char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            line_height,
            char_widths,
            default_width,
        }
    }

    /// Advance of a grapheme cluster in ems, keyed on its first char
    pub fn width(&self, grapheme: &str) -> f32 {
        match grapheme.chars().next() {
            Some(c) if c.is_ascii() => self
                .char_widths
                .get(c as usize)
                .copied()
                .unwrap_or(self.default_width),
            Some(_) => self.default_width,
            None => 0.0,
        }
    }

    /// Unwrapped extent of `text` set at `font_px`; lines break only on `\n`
    pub fn measure(&self, text: &str, font_px: f32) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        let mut widest: f32 = 0.0;
        let mut lines = 0usize;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let ems: f32 = line.graphemes(true).map(|g| self.width(g)).sum();
            widest = widest.max(ems);
            lines += 1;
        }
        Size::new(widest * font_px, lines as f32 * self.line_height * font_px)
    }
}

/// Container and text pair measured with [`GlyphMetrics`]
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub container: Size,
    pub text: String,
    pub metrics: GlyphMetrics,
    font_px: f32,
}

impl HeadlessSurface {
    pub fn new(container: Size, text: impl Into<String>) -> Self {
        Self {
            container,
            text: text.into(),
            metrics: GlyphMetrics::default(),
            font_px: 16.0,
        }
    }

    pub fn with_metrics(mut self, metrics: GlyphMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_px
    }

    pub fn resize(&mut self, container: Size) {
        self.container = container;
    }
}

impl FitSurface for HeadlessSurface {
    fn container_size(&self) -> Size {
        self.container
    }

    fn text_size(&self) -> Size {
        self.metrics.measure(&self.text, self.font_px)
    }

    fn set_font_size(&mut self, px: f32) {
        self.font_px = px;
    }
}
