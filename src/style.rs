//! Per-chart styling and figure geometry.
//!
//! Every builder receives its style explicitly; nothing is read from
//! shared plotting state.

use plotters::prelude::*;

/// Physical figure size; pixel dimensions follow from the resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureGeometry {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl FigureGeometry {
    /// Output resolution shared by every report figure
    pub const REPORT_DPI: u32 = 300;

    /// 10 x 6 in single panel
    pub fn single_panel() -> Self {
        Self { width_in: 10.0, height_in: 6.0, dpi: Self::REPORT_DPI }
    }

    /// 12 x 6 in single panel for grouped bars
    pub fn wide_panel() -> Self {
        Self { width_in: 12.0, height_in: 6.0, dpi: Self::REPORT_DPI }
    }

    /// 14 x 6 in, two panels side by side
    pub fn dual_panel() -> Self {
        Self { width_in: 14.0, height_in: 6.0, dpi: Self::REPORT_DPI }
    }

    /// Image size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a typographic size in points to pixels at this resolution
    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Same as [`px`](Self::px), rounded for plotters' integer sizes
    pub fn px_u32(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}

/// Colors, strokes and font sizes for one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Series / bar colors, cycled when there are more entries than colors
    pub palette: Vec<RGBColor>,
    pub fill_alpha: f64,
    pub edge_color: RGBColor,
    /// Bar outline width (pt); zero disables outlines
    pub edge_width_pt: f64,
    pub grid_alpha: f64,
    pub line_width_pt: f64,
    pub marker_size_pt: f64,
    pub font_family: &'static str,
    pub title_size_pt: f64,
    pub axis_label_size_pt: f64,
    pub tick_label_size_pt: f64,
    pub value_label_size_pt: f64,
    pub annotation_size_pt: f64,
    pub annotation_color: RGBColor,
}

// matplotlib's default cycle, used where the report never picked colors
const TAB_BLUE: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const TAB_ORANGE: RGBColor = RGBColor(0xff, 0x7f, 0x0e);

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: vec![TAB_BLUE, TAB_ORANGE],
            fill_alpha: 0.8,
            edge_color: BLACK,
            edge_width_pt: 1.0,
            grid_alpha: 0.3,
            line_width_pt: 2.0,
            marker_size_pt: 4.0,
            font_family: "sans-serif",
            title_size_pt: 14.0,
            axis_label_size_pt: 12.0,
            tick_label_size_pt: 10.0,
            value_label_size_pt: 12.0,
            annotation_size_pt: 10.0,
            annotation_color: RED,
        }
    }
}

impl ChartStyle {
    /// Fault-count curves: two lines with markers, red callout
    pub fn fault_curve() -> Self {
        Self {
            edge_width_pt: 0.0,
            ..Self::default()
        }
    }

    pub fn hit_rate() -> Self {
        Self {
            palette: vec![
                RGBColor(0xff, 0x6b, 0x6b),
                RGBColor(0x4e, 0xcd, 0xc4),
                RGBColor(0x45, 0xb7, 0xd1),
            ],
            edge_width_pt: 1.5,
            value_label_size_pt: 14.0,
            ..Self::default()
        }
    }

    pub fn disk_movement() -> Self {
        Self {
            palette: vec![
                RGBColor(0xe7, 0x4c, 0x3c),
                RGBColor(0x2e, 0xcc, 0x71),
                RGBColor(0x34, 0x98, 0xdb),
            ],
            edge_width_pt: 1.5,
            axis_label_size_pt: 12.0,
            ..Self::default()
        }
    }

    /// Grouped bars with green "better" callouts
    pub fn scheduler() -> Self {
        Self {
            palette: vec![RGBColor(0x9b, 0x59, 0xb6), RGBColor(0xe6, 0x7e, 0x22)],
            value_label_size_pt: 11.0,
            tick_label_size_pt: 11.0,
            annotation_color: RGBColor(0x00, 0x80, 0x00),
            ..Self::default()
        }
    }

    /// Palette color for the `index`-th series or bar
    pub fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn font(&self, geometry: &FigureGeometry, size_pt: f64, bold: bool) -> FontDesc<'static> {
        let style = if bold { FontStyle::Bold } else { FontStyle::Normal };
        FontDesc::new(self.font_family.into(), geometry.px(size_pt), style)
    }

    pub fn text(&self, geometry: &FigureGeometry, size_pt: f64, bold: bool, color: &RGBColor) -> TextStyle<'static> {
        self.font(geometry, size_pt, bold).color(color)
    }

    pub fn grid_color(&self) -> RGBAColor {
        BLACK.mix(self.grid_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_at_report_resolution() {
        assert_eq!(FigureGeometry::single_panel().pixel_size(), (3000, 1800));
        assert_eq!(FigureGeometry::dual_panel().pixel_size(), (4200, 1800));
        assert_eq!(FigureGeometry::wide_panel().pixel_size(), (3600, 1800));
    }

    #[test]
    fn test_points_scale_with_dpi() {
        let g = FigureGeometry { width_in: 1.0, height_in: 1.0, dpi: 144 };
        assert_eq!(g.px(12.0), 24.0);
        assert_eq!(g.px_u32(0.1), 1);
    }

    #[test]
    fn test_palette_cycles() {
        let style = ChartStyle::scheduler();
        assert_eq!(style.color(0), style.color(2));
        assert_ne!(style.color(0), style.color(1));
    }

    #[test]
    fn test_empty_palette_falls_back_to_black() {
        let style = ChartStyle { palette: vec![], ..ChartStyle::default() };
        assert_eq!(style.color(3), BLACK);
    }
}
