//! Calendar-grid PNG rendering.

mod font;
mod glyphs;

pub use font::{FontAsset, FontKind, DEFAULT_FONT_PATHS};

use std::io::Cursor;
use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
};
use imageproc::rect::Rect;
use work_calendar::{month_name, weekday_short};

use crate::error::Result;
use crate::summary::DayStatus;

pub const CELL_WIDTH: u32 = 80;
pub const CELL_HEIGHT: u32 = 60;
pub const HEADER_HEIGHT: u32 = 80;
pub const MARGIN: u32 = 20;
pub const LEGEND_HEIGHT: u32 = 30;

const BACKGROUND: Rgb<u8> = Rgb([0xf5, 0xf5, 0xf5]);
const TITLE: Rgb<u8> = Rgb([0x2c, 0x3e, 0x50]);
const LABEL: Rgb<u8> = Rgb([0x34, 0x49, 0x5e]);
const GRID_LINE: Rgb<u8> = Rgb([0xbd, 0xc3, 0xc7]);
const WORKING_CELL: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const WORKING_TEXT: Rgb<u8> = Rgb([0x2c, 0x3e, 0x50]);
const OFF_CELL: Rgb<u8> = Rgb([0xe0, 0xe0, 0xe0]);
const OFF_TEXT: Rgb<u8> = Rgb([0x95, 0xa5, 0xa6]);

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Marker fill and outline for a working-day status.
fn marker_colors(status: DayStatus) -> (Rgb<u8>, Rgb<u8>) {
    match status {
        DayStatus::InOffice => (Rgb([0x27, 0xae, 0x60]), Rgb([0x22, 0x99, 0x54])),
        DayStatus::Remote => (Rgb([0x34, 0x98, 0xdb]), Rgb([0x29, 0x80, 0xb9])),
        DayStatus::Unmarked => (Rgb([0x95, 0xa5, 0xa6]), Rgb([0x7f, 0x8c, 0x8d])),
        DayStatus::Planned => (Rgb([0xf3, 0x9c, 0x12]), Rgb([0xd6, 0x89, 0x10])),
    }
}

/// What a calendar cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Weekend or holiday, drawn muted without a marker.
    NonWorking,
    Working(DayStatus),
}

/// One month laid out Monday..Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    first: NaiveDate,
    /// One entry per day of the month, in order.
    cells: Vec<CellState>,
}

impl MonthGrid {
    /// `cells` must hold one state per day of the month starting at `first`.
    pub fn new(first: NaiveDate, cells: Vec<CellState>) -> Self {
        Self {
            year: first.year(),
            month: first.month(),
            first,
            cells,
        }
    }

    /// Columns before day 1 (Monday = 0).
    pub fn offset(&self) -> u32 {
        self.first.weekday().num_days_from_monday()
    }

    pub fn rows(&self) -> u32 {
        (self.cells.len() as u32 + self.offset()).div_ceil(7)
    }

    /// (column, row) of the zero-based day index.
    pub fn position(&self, index: u32) -> (u32, u32) {
        let slot = index + self.offset();
        (slot % 7, slot / 7)
    }

    pub fn image_size(&self) -> (u32, u32) {
        (
            7 * CELL_WIDTH + 2 * MARGIN,
            self.rows() * CELL_HEIGHT + HEADER_HEIGHT + 2 * MARGIN + LEGEND_HEIGHT,
        )
    }
}

/// Draws [`MonthGrid`]s as PNG images.
#[derive(Debug)]
pub struct CalendarRenderer {
    font: FontAsset,
}

impl Default for CalendarRenderer {
    fn default() -> Self {
        Self::with_font_paths(DEFAULT_FONT_PATHS)
    }
}

impl CalendarRenderer {
    /// Resolve the font once from the candidate paths.
    pub fn with_font_paths<P: AsRef<Path>>(candidates: &[P]) -> Self {
        Self {
            font: FontAsset::resolve(candidates),
        }
    }

    /// A renderer that always uses the built-in bitmap font.
    pub fn bitmap() -> Self {
        Self {
            font: FontAsset::Bitmap,
        }
    }

    pub fn font_kind(&self) -> FontKind {
        self.font.kind()
    }

    /// Render the grid and encode it as PNG.
    pub fn render_png(&self, grid: &MonthGrid) -> Result<Vec<u8>> {
        let image = self.render(grid);
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render the grid to an in-memory image.
    pub fn render(&self, grid: &MonthGrid) -> RgbImage {
        let (width, height) = grid.image_size();
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

        self.draw_header(&mut image, grid, width);

        let top = (HEADER_HEIGHT + MARGIN) as i32;
        for (index, state) in grid.cells.iter().enumerate() {
            let (col, row) = grid.position(index as u32);
            let x = (MARGIN + col * CELL_WIDTH) as i32;
            let y = top + (row * CELL_HEIGHT) as i32;
            self.draw_cell(&mut image, x, y, index as u32 + 1, *state);
        }

        let legend_y = top + (grid.rows() * CELL_HEIGHT) as i32 + 10;
        self.draw_legend(&mut image, legend_y);

        image
    }

    fn draw_header(&self, image: &mut RgbImage, grid: &MonthGrid, width: u32) {
        let title = format!("{} {}", month_name(grid.month), grid.year);
        let (title_width, _) = self.font.measure(&title, 24.0);
        let x = (width.saturating_sub(title_width) / 2) as i32;
        self.font.draw(image, &title, x, MARGIN as i32, 24.0, TITLE);

        let y = (MARGIN + 50) as i32;
        for (col, weekday) in (0u32..).zip(WEEK) {
            let label = weekday_short(weekday);
            let (label_width, _) = self.font.measure(label, 16.0);
            let center = MARGIN + col * CELL_WIDTH + CELL_WIDTH / 2;
            let x = center.saturating_sub(label_width / 2) as i32;
            self.font.draw(image, label, x, y, 16.0, LABEL);
        }
    }

    fn draw_cell(&self, image: &mut RgbImage, x: i32, y: i32, day: u32, state: CellState) {
        let (fill, text) = match state {
            CellState::NonWorking => (OFF_CELL, OFF_TEXT),
            CellState::Working(_) => (WORKING_CELL, WORKING_TEXT),
        };
        let cell = Rect::at(x, y).of_size(CELL_WIDTH - 2, CELL_HEIGHT - 2);
        draw_filled_rect_mut(image, cell, fill);
        draw_hollow_rect_mut(image, cell, GRID_LINE);

        self.font.draw(image, &day.to_string(), x + 5, y + 5, 16.0, text);

        if let CellState::Working(status) = state {
            let center = (x + CELL_WIDTH as i32 - 18, y + 13);
            draw_marker(image, center, 8, status);
            if status == DayStatus::Unmarked {
                self.font.draw(image, "?", center.0 - 3, center.1 - 6, 12.0, WORKING_CELL);
            }
        }
    }

    fn draw_legend(&self, image: &mut RgbImage, y: i32) {
        let entries = [
            (DayStatus::InOffice, "In office"),
            (DayStatus::Remote, "Remote"),
            (DayStatus::Unmarked, "Not marked"),
        ];
        let mut x = MARGIN as i32;
        for (status, label) in entries {
            draw_marker(image, (x + 6, y + 7), 6, status);
            self.font.draw(image, label, x + 18, y + 1, 12.0, LABEL);
            let (label_width, _) = self.font.measure(label, 12.0);
            x += 18 + label_width as i32 + 30;
        }
    }
}

fn draw_marker(image: &mut RgbImage, center: (i32, i32), radius: i32, status: DayStatus) {
    let (fill, outline) = marker_colors(status);
    draw_filled_circle_mut(image, center, radius, fill);
    draw_hollow_circle_mut(image, center, radius, outline);
}
