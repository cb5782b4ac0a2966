use std::io::Write;

use biprism_core::IntensityField;
use serde::{Deserialize, Serialize};

use crate::{Frontend, Outcome, ViewError};

const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 44.0;
const COLORBAR_WIDTH: f64 = 14.0;
const COLORBAR_GAP: f64 = 56.0;

fn default_width() -> u32 {
    720
}

fn default_height() -> u32 {
    360
}

fn default_ticks() -> usize {
    7
}

fn default_colorbar() -> bool {
    true
}

/// Size and decoration of the rendered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Number of labelled ticks on the screen axis.
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_colorbar")]
    pub colorbar: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            ticks: default_ticks(),
            colorbar: default_colorbar(),
        }
    }
}

struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn new(config: &FigureConfig) -> Self {
        let right = MARGIN_RIGHT
            + if config.colorbar {
                COLORBAR_GAP + COLORBAR_WIDTH
            } else {
                0.0
            };
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (config.width as f64 - MARGIN_LEFT - right).max(1.0),
            height: (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn gray_level(normalized: f64) -> u8 {
    (normalized.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn open_svg(config: &FigureConfig, title: &str) -> Vec<String> {
    vec![
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
            w = config.width,
            h = config.height
        ),
        format!(
            "<rect x='0' y='0' width='{}' height='{}' fill='#ffffff' />",
            config.width, config.height
        ),
        format!(
            "<text x='{:.2}' y='22' text-anchor='middle' font-size='14'>{}</text>",
            config.width as f64 / 2.0,
            escape(title)
        ),
    ]
}

fn push_axis(parts: &mut Vec<String>, field: &IntensityField, area: &PlotArea, ticks: usize) {
    let extent = field.extent;
    parts.push(format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#000000' />",
        area.left, area.top, area.width, area.height
    ));
    if ticks >= 2 {
        for idx in 0..ticks {
            let t = idx as f64 / (ticks - 1) as f64;
            let x = area.left + t * area.width;
            let value = extent.x_min + t * (extent.x_max - extent.x_min);
            parts.push(format!(
                "<line x1='{x:.2}' y1='{y0:.2}' x2='{x:.2}' y2='{y1:.2}' stroke='#000000' />",
                y0 = area.bottom(),
                y1 = area.bottom() + 5.0
            ));
            parts.push(format!(
                "<text x='{x:.2}' y='{:.2}' text-anchor='middle' font-size='11'>{value:.1}</text>",
                area.bottom() + 17.0
            ));
        }
    }
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='12'>screen position x (mm)</text>",
        area.left + area.width / 2.0,
        area.bottom() + 36.0
    ));
    for (value, y) in [(extent.y_max, area.top), (extent.y_min, area.bottom())] {
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' text-anchor='end' font-size='11'>{value:.1}</text>",
            area.left - 6.0,
            y + 4.0
        ));
    }
    parts.push(format!(
        "<text x='14' y='{:.2}' text-anchor='middle' font-size='12' transform='rotate(-90 14 {:.2})'>y (mm)</text>",
        area.top + area.height / 2.0,
        area.top + area.height / 2.0
    ));
}

fn push_colorbar(parts: &mut Vec<String>, field: &IntensityField, area: &PlotArea) {
    let x = area.right() + COLORBAR_GAP / 2.0;
    parts.push(
        "<defs><linearGradient id='gray' x1='0' y1='1' x2='0' y2='0'>\
         <stop offset='0' stop-color='#000000' /><stop offset='1' stop-color='#ffffff' />\
         </linearGradient></defs>"
            .into(),
    );
    parts.push(format!(
        "<rect x='{x:.2}' y='{:.2}' width='{COLORBAR_WIDTH:.2}' height='{:.2}' fill='url(#gray)' stroke='#000000' />",
        area.top, area.height
    ));
    for (value, y) in [(field.vmax, area.top), (field.vmin, area.bottom())] {
        parts.push(format!(
            "<text x='{:.2}' y='{:.2}' font-size='11'>{value:.2}</text>",
            x + COLORBAR_WIDTH + 4.0,
            y + 4.0
        ));
    }
    let label_x = x + COLORBAR_WIDTH + 34.0;
    let label_y = area.top + area.height / 2.0;
    parts.push(format!(
        "<text x='{label_x:.2}' y='{label_y:.2}' text-anchor='middle' font-size='11' \
         transform='rotate(90 {label_x:.2} {label_y:.2})'>normalized intensity</text>"
    ));
}

/// Renders a field as a grayscale image with one band per column.
pub fn render_field_svg(field: &IntensityField, title: &str, config: &FigureConfig) -> String {
    let area = PlotArea::new(config);
    let mut parts = open_svg(config, title);
    let profile = field.profile();
    if !profile.is_empty() {
        let band = area.width / profile.len() as f64;
        for (idx, value) in profile.iter().enumerate() {
            let level = gray_level(field.normalized(*value));
            // Bands overlap by 0.05px.
            parts.push(format!(
                "<rect x='{:.3}' y='{:.2}' width='{:.3}' height='{:.2}' fill='rgb({level},{level},{level})' />",
                area.left + band * idx as f64,
                area.top,
                band + 0.05,
                area.height
            ));
        }
    }
    push_axis(&mut parts, field, &area, config.ticks);
    if config.colorbar {
        push_colorbar(&mut parts, field, &area);
    }
    parts.push("</svg>".into());
    parts.join("")
}

/// Renders the title and a centered message in place of the image.
pub fn render_message_svg(title: &str, message: &str, config: &FigureConfig) -> String {
    let area = PlotArea::new(config);
    let mut parts = open_svg(config, title);
    parts.push(format!(
        "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='none' stroke='#000000' />",
        area.left, area.top, area.width, area.height
    ));
    parts.push(format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='12' fill='#b91c1c'>{}</text>",
        area.left + area.width / 2.0,
        area.top + area.height / 2.0,
        escape(message)
    ));
    parts.push("</svg>".into());
    parts.join("")
}

/// Writes the pattern of each outcome as an SVG document.
pub struct SvgFigure<W: Write> {
    config: FigureConfig,
    out: W,
}

impl<W: Write> SvgFigure<W> {
    pub fn new(config: FigureConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// SVG document for an outcome.
    pub fn render(&self, outcome: &Outcome) -> String {
        let title = outcome.title();
        match (&outcome.solution, &outcome.pattern) {
            (Err(err), _) => render_message_svg(&title, &err.to_string(), &self.config),
            (Ok(_), Some(Ok(field))) => render_field_svg(field, &title, &self.config),
            (Ok(_), Some(Err(err))) => {
                render_message_svg(&title, &format!("plot error: {err}"), &self.config)
            }
            (Ok(_), None) => render_message_svg(&title, "no pattern", &self.config),
        }
    }
}

impl<W: Write> Frontend for SvgFigure<W> {
    fn present(&mut self, outcome: &Outcome) -> Result<(), ViewError> {
        let svg = self.render(outcome);
        writeln!(self.out, "{svg}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_escaped() {
        assert_eq!(escape("x1 < x2 & 'b'"), "x1 &lt; x2 &amp; &apos;b&apos;");
    }

    #[test]
    fn gray_levels_span_the_byte_range() {
        assert_eq!(gray_level(0.0), 0);
        assert_eq!(gray_level(1.0), 255);
        assert_eq!(gray_level(2.0), 255);
    }
}
