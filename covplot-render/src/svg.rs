//! SVG surface: accumulates elements and writes a standalone document.

use crate::command::{DrawCommand, Surface, TextAnchor};
use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const FONT_FAMILY: &str = "Arial, sans-serif";

pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> SvgSurface {
        let mut surface = SvgSurface {
            width,
            height,
            elements: Vec::new(),
        };
        surface.elements.push(format!(
            r##"<rect width="{width}" height="{height}" fill="#ffffff"/>"##
        ));
        surface
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        out.push_str(&format!(
            r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height, self.width, self.height
        ));
        out.push('\n');
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_svg().as_bytes())?;
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FilledRect {
                x,
                y,
                width,
                height,
                color,
            } => self.elements.push(format!(
                r#"<rect x="{x:.3}" y="{y:.3}" width="{width}" height="{height}" fill="{}"/>"#,
                color.hex()
            )),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
                stroke_width,
            } => self.elements.push(format!(
                r#"<rect x="{x:.3}" y="{y:.3}" width="{width:.3}" height="{height:.3}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                color.hex()
            )),
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => self.elements.push(format!(
                r#"<line x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}" stroke="{}" stroke-width="{width}"/>"#,
                color.hex()
            )),
            DrawCommand::Polyline {
                points,
                color,
                width,
            } => {
                let mut path = String::new();
                for (i, (x, y)) in points.iter().enumerate() {
                    let op = if i == 0 { 'M' } else { 'L' };
                    path.push_str(&format!("{op} {x:.3} {y:.3} "));
                }
                self.elements.push(format!(
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
                    path.trim_end(),
                    color.hex()
                ));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                size,
                anchor,
                color,
                bold,
            } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                self.elements.push(format!(
                    r#"<text x="{x:.3}" y="{y:.3}" font-family="{FONT_FAMILY}" font-size="{size}px" text-anchor="{anchor}" fill="{}"{weight}>{text}</text>"#,
                    color.hex()
                ));
            }
            DrawCommand::RotatedText {
                x,
                y,
                text,
                size,
                color,
            } => self.elements.push(format!(
                r#"<text x="{x:.3}" y="{y:.3}" transform="rotate(-90 {x:.3} {y:.3})" font-family="{FONT_FAMILY}" font-size="{size}px" text-anchor="middle" fill="{}">{text}</text>"#,
                color.hex()
            )),
        }
    }
}
