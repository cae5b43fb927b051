//! Auto-fit: the largest font size that fits the display container
//!
//! The text is set at a baseline size, measured, and scaled by whichever of
//! the width and height ratios is tighter. Degenerate measurements fall back
//! to the minimum size instead of producing NaN or infinity.

pub mod metrics;

pub use metrics::{GlyphMetrics, HeadlessSurface};

use log::debug;

use crate::config::AppConfig;

/// Width and height in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A display container holding one text element
pub trait FitSurface {
    /// Inner size of the container (`clientWidth`/`clientHeight`)
    fn container_size(&self) -> Size;
    /// Unclipped size of the text at its current font size (`scrollWidth`/`scrollHeight`)
    fn text_size(&self) -> Size;
    fn set_font_size(&mut self, px: f32);
}

/// Baseline and clamp range for fitted sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub baseline_px: f32,
    pub min_px: f32,
    pub max_px: Option<f32>,
}

impl Default for FitBounds {
    fn default() -> Self {
        Self {
            baseline_px: 100.0,
            min_px: 8.0,
            max_px: None,
        }
    }
}

impl From<&AppConfig> for FitBounds {
    fn from(config: &AppConfig) -> Self {
        Self {
            baseline_px: config.baseline_font_px,
            min_px: config.min_font_px,
            max_px: config.max_font_px,
        }
    }
}

/// Smallest size a measurable fit can produce
const FLOOR_PX: f32 = 1.0;

impl FitBounds {
    /// Cap a valid fit; `min_px` is reserved for degenerate measurements
    fn clamp(&self, px: f32) -> f32 {
        let px = px.max(FLOOR_PX);
        match self.max_px {
            Some(max) => px.min(max),
            None => px,
        }
    }
}

/// Font size for text measuring `text` at the baseline inside `container`
pub fn fit_font_size(container: Size, text: Size, bounds: &FitBounds) -> f32 {
    let degenerate = !(text.width > 0.0 && text.height > 0.0)
        || !text.width.is_finite()
        || !text.height.is_finite();
    if degenerate {
        return bounds.min_px;
    }

    let scale = (container.height / text.height).min(container.width / text.width);
    if !scale.is_finite() || scale <= 0.0 {
        return bounds.min_px;
    }
    bounds.clamp((bounds.baseline_px * scale).round())
}

/// Keeps a surface's font size fitted across resizes and text changes
#[derive(Debug, Clone, Default)]
pub struct AutoFit {
    bounds: FitBounds,
    text: Option<String>,
    font_px: Option<f32>,
}

impl AutoFit {
    pub fn new(bounds: FitBounds) -> Self {
        Self {
            bounds,
            text: None,
            font_px: None,
        }
    }

    /// Measure at the baseline and apply the fitted size
    pub fn fit<S: FitSurface>(&mut self, surface: &mut S) -> f32 {
        surface.set_font_size(self.bounds.baseline_px);
        let container = surface.container_size();
        let text = surface.text_size();
        let px = fit_font_size(container, text, &self.bounds);
        surface.set_font_size(px);
        debug!(
            "fit {}x{} text into {}x{} -> {}px",
            text.width, text.height, container.width, container.height, px
        );
        self.font_px = Some(px);
        px
    }

    pub fn on_resize<S: FitSurface>(&mut self, surface: &mut S) -> f32 {
        self.fit(surface)
    }

    /// Refit when the displayed text differs from the last fitted one
    pub fn on_text_change<S: FitSurface>(&mut self, text: &str, surface: &mut S) -> Option<f32> {
        if self.text.as_deref() == Some(text) {
            return None;
        }
        self.text = Some(text.to_string());
        Some(self.fit(surface))
    }

    /// Forget the fitted text, e.g. when the display page is left
    pub fn reset(&mut self) {
        self.text = None;
        self.font_px = None;
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(width: f32) -> GlyphMetrics {
        GlyphMetrics::new(1.0, vec![width; 128], width)
    }

    #[test]
    fn test_width_bound_fit() {
        // Text 250px wide at baseline in a 500px wide, very tall container
        let px = fit_font_size(Size::new(500.0, 10_000.0), Size::new(250.0, 100.0), &FitBounds::default());
        assert_eq!(px, 200.0);

        let px = fit_font_size(Size::new(333.0, 10_000.0), Size::new(1000.0, 100.0), &FitBounds::default());
        assert_eq!(px, (100.0_f32 * 333.0 / 1000.0).round());
    }

    #[test]
    fn test_height_bound_fit() {
        let px = fit_font_size(Size::new(10_000.0, 300.0), Size::new(200.0, 100.0), &FitBounds::default());
        assert_eq!(px, 300.0);
    }

    #[test]
    fn test_degenerate_measurements_clamp_to_min() {
        let bounds = FitBounds::default();
        let container = Size::new(800.0, 600.0);
        assert_eq!(fit_font_size(container, Size::new(0.0, 100.0), &bounds), bounds.min_px);
        assert_eq!(fit_font_size(container, Size::new(0.0, 0.0), &bounds), bounds.min_px);
        assert_eq!(fit_font_size(container, Size::new(f32::NAN, 100.0), &bounds), bounds.min_px);
        assert_eq!(fit_font_size(container, Size::new(100.0, f32::INFINITY), &bounds), bounds.min_px);
        assert_eq!(fit_font_size(Size::default(), Size::new(100.0, 100.0), &bounds), bounds.min_px);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = FitBounds {
            baseline_px: 100.0,
            min_px: 20.0,
            max_px: Some(500.0),
        };
        assert_eq!(fit_font_size(Size::new(10.0, 10.0), Size::new(1000.0, 100.0), &bounds), 1.0);
        assert_eq!(fit_font_size(Size::new(10_000.0, 10_000.0), Size::new(10.0, 10.0), &bounds), 500.0);
    }

    #[test]
    fn test_tiny_fit_is_not_raised_to_min() {
        let bounds = FitBounds::default();
        let px = fit_font_size(Size::new(10.0, 10_000.0), Size::new(1000.0, 100.0), &bounds);
        assert_eq!(px, 1.0);

        let px = fit_font_size(Size::new(60.0, 10_000.0), Size::new(1000.0, 100.0), &bounds);
        assert_eq!(px, 6.0);
        assert!(px < bounds.min_px);
    }

    #[test]
    fn test_long_text_in_narrow_container_does_not_overflow() {
        let text = "a".repeat(200);
        let mut surface = HeadlessSurface::new(Size::new(300.0, 10_000.0), text).with_metrics(mono(0.5));
        let mut fit = AutoFit::new(FitBounds::default());

        // 100 ems is 10_000px at the baseline, so 3px fills 300px exactly
        let px = fit.fit(&mut surface);
        assert_eq!(px, 3.0);
        assert!(surface.text_size().width <= surface.container_size().width);
    }

    #[test]
    fn test_autofit_sets_surface_font() {
        // "abcd" at 0.5em per char is 200px wide at the 100px baseline
        let mut surface = HeadlessSurface::new(Size::new(500.0, 10_000.0), "abcd").with_metrics(mono(0.5));
        let mut fit = AutoFit::new(FitBounds::default());
        assert_eq!(fit.fit(&mut surface), 250.0);
        assert_eq!(surface.font_size(), 250.0);
        assert_eq!(fit.font_size(), Some(250.0));
    }

    #[test]
    fn test_autofit_refits_on_resize() {
        let mut surface = HeadlessSurface::new(Size::new(500.0, 10_000.0), "abcd").with_metrics(mono(0.5));
        let mut fit = AutoFit::new(FitBounds::default());
        fit.fit(&mut surface);

        surface.resize(Size::new(100.0, 10_000.0));
        assert_eq!(fit.on_resize(&mut surface), 50.0);
        assert_eq!(surface.font_size(), 50.0);
    }

    #[test]
    fn test_autofit_text_change() {
        let mut surface = HeadlessSurface::new(Size::new(400.0, 10_000.0), "ab").with_metrics(mono(0.5));
        let mut fit = AutoFit::new(FitBounds::default());
        assert_eq!(fit.on_text_change("ab", &mut surface), Some(400.0));
        assert_eq!(fit.on_text_change("ab", &mut surface), None);

        surface.text = "abcdefgh".into();
        assert_eq!(fit.on_text_change("abcdefgh", &mut surface), Some(100.0));

        fit.reset();
        assert_eq!(fit.font_size(), None);
        assert_eq!(fit.on_text_change("abcdefgh", &mut surface), Some(100.0));
    }

    #[test]
    fn test_empty_text_fits_to_min() {
        let mut surface = HeadlessSurface::new(Size::new(400.0, 400.0), "");
        let mut fit = AutoFit::new(FitBounds::default());
        assert_eq!(fit.fit(&mut surface), 8.0);
    }
}
