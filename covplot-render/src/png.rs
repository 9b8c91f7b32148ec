//! Raster surface: CPU rasterization into an RGBA image, for headless PNG
//! output without any GPU or font dependency. Text commands are skipped;
//! the vector sink covers labeled output.

use crate::command::{Color, DrawCommand, Surface};
use anyhow::Result;
use image::{Rgba, RgbaImage};
use std::path::Path;

pub struct PngSurface {
    img: RgbaImage,
}

impl PngSurface {
    pub fn new(width: u32, height: u32) -> PngSurface {
        PngSurface {
            img: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.img.save(path)?;
        Ok(())
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        for dy in 0..height.ceil() as i64 {
            for dx in 0..width.ceil() as i64 {
                self.put(x0 + dx, y0 + dy, color);
            }
        }
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba<u8>) {
        // Bresenham line walk
        let (mut x0, mut y0) = (x0.round() as i64, y0.round() as i64);
        let (x1, y1) = (x1.round() as i64, y1.round() as i64);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, 255])
}

impl Surface for PngSurface {
    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FilledRect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(*x, *y, *width, *height, rgba(*color)),
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
                ..
            } => {
                let color = rgba(*color);
                self.line(*x, *y, x + width, *y, color);
                self.line(*x, y + height, x + width, y + height, color);
                self.line(*x, *y, *x, y + height, color);
                self.line(x + width, *y, x + width, y + height, color);
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                ..
            } => self.line(*x1, *y1, *x2, *y2, rgba(*color)),
            DrawCommand::Polyline { points, color, .. } => {
                let color = rgba(*color);
                for pair in points.windows(2) {
                    self.line(pair[0].0, pair[0].1, pair[1].0, pair[1].1, color);
                }
            }
            DrawCommand::Text { .. } | DrawCommand::RotatedText { .. } => {}
        }
    }
}
