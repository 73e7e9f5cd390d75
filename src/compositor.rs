use std::io::Cursor;

use chrono::{DateTime, Local};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::{
    data_loaders::{
        rates::{self, CurrencyQuote},
        settings::Settings,
    },
    fonts::{self, FontHandle},
    themes, warn, DEBUG_NAME,
};

/// Logical font name resolved through resources/fonts/ for every block.
const FONT_NAME: &str = "font.otf";

const WEEKDAY_POINT_SIZE: f32 = 100.0;
const COURSE_POINT_SIZE: f32 = 50.0;
const CLOCK_POINT_SIZE: f32 = 100.0;

const FALLBACK_SCREEN: (u32, u32) = (1920, 1080);

/// Build the full wallpaper frame in memory: fetch quotes, compose the canvas
/// at screen resolution, encode to PNG bytes. Only font and encoding problems
/// are fatal; a failed rates fetch just drops the currency block.
pub fn render_wallpaper(settings: &Settings) -> Result<Vec<u8>, String> {
    let quotes = rates::fetch_currency_rates(&settings.courses);
    if quotes.is_none() {
        warn!("[{}][RENDER] Currency rates unavailable; omitting course line", DEBUG_NAME);
    }

    let canvas = compose(settings, quotes.as_deref(), Local::now(), screen_size())?;
    encode_png(&canvas)
}

/// Deterministic layout. Each block is anchored top-left at the horizontal
/// screen midpoint; vertical offsets chain off the previous block's measured
/// height so the layout survives fallback fonts with different metrics. When
/// the currency block is skipped the clock anchors off the weekday block
/// alone, which is the intended coupling, not an accident.
pub fn compose(
    settings: &Settings,
    quotes: Option<&[CurrencyQuote]>,
    now: DateTime<Local>,
    (width, height): (u32, u32),
) -> Result<RgbImage, String> {
    let theme = themes::get_theme(settings.theme_index);
    let mut canvas = RgbImage::from_pixel(width, height, theme.background);

    let heading_font = fonts::load_font(FONT_NAME, WEEKDAY_POINT_SIZE)?;
    let weekday = now.format("%A").to_string();
    let (_, weekday_height) = draw_block(
        &mut canvas,
        &heading_font,
        &weekday,
        weekday_anchor(width, height),
        theme.foreground,
    );

    if let Some(quotes) = quotes {
        let course_font = fonts::load_font(FONT_NAME, COURSE_POINT_SIZE)?;
        draw_block(
            &mut canvas,
            &course_font,
            &course_line(quotes),
            course_anchor(width, weekday_height),
            theme.foreground,
        );
    }

    let clock_font = fonts::load_font(FONT_NAME, CLOCK_POINT_SIZE)?;
    let time_text = now.format("%H:%M").to_string();
    let (_, time_height) = draw_block(
        &mut canvas,
        &clock_font,
        &time_text,
        time_anchor(width, weekday_height),
        theme.foreground,
    );

    let date_text = now.format("%d.%m.%Y").to_string();
    draw_block(
        &mut canvas,
        &clock_font,
        &date_text,
        date_anchor(width, time_height),
        theme.foreground,
    );

    Ok(canvas)
}

/// Draw one text block and return the tight bounding box of what was drawn.
fn draw_block(
    canvas: &mut RgbImage,
    handle: &FontHandle,
    text: &str,
    (x, y): (i32, i32),
    color: Rgb<u8>,
) -> (u32, u32) {
    draw_text_mut(canvas, color, x, y, handle.scale, &handle.font, text);
    text_size(handle.scale, &handle.font, text)
}

/// Single line of `CODE: rate` pairs joined by two spaces. Rates print in
/// their shortest decimal form, so 95.50 renders as `95.5`.
pub(crate) fn course_line(quotes: &[CurrencyQuote]) -> String {
    quotes
        .iter()
        .map(|quote| format!("{}: {}", quote.code, quote.rate))
        .collect::<Vec<_>>()
        .join("  ")
}

pub(crate) fn weekday_anchor(width: u32, height: u32) -> (i32, i32) {
    ((width / 2) as i32, (height / 3) as i32 - 100)
}

pub(crate) fn course_anchor(width: u32, weekday_height: u32) -> (i32, i32) {
    ((width / 2) as i32, weekday_height as i32 + 15)
}

pub(crate) fn time_anchor(width: u32, weekday_height: u32) -> (i32, i32) {
    ((width / 2) as i32, weekday_height as i32 + 100)
}

pub(crate) fn date_anchor(width: u32, time_height: u32) -> (i32, i32) {
    ((width / 2) as i32, time_height as i32 + 20)
}

/// Primary display size via the system metrics. Zeroed metrics (seen on
/// session startup before the desktop is ready) fall back to 1920x1080.
fn screen_size() -> (u32, u32) {
    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };

    if width <= 0 || height <= 0 {
        warn!(
            "[{}][RENDER] GetSystemMetrics returned {}x{}; using {}x{}",
            DEBUG_NAME, width, height, FALLBACK_SCREEN.0, FALLBACK_SCREEN.1
        );
        return FALLBACK_SCREEN;
    }

    (width as u32, height as u32)
}

/// Lossless in-memory serialization of the finished canvas.
fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, String> {
    let mut buffer = Cursor::new(Vec::new());
    canvas
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode wallpaper PNG: {e}"))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(code: &str, rate: f64) -> CurrencyQuote {
        CurrencyQuote { code: code.to_string(), rate }
    }

    #[test]
    fn course_line_joins_with_two_spaces_without_trailing_zeros() {
        let quotes = [quote("USD", 95.5), quote("EUR", 104.2)];
        assert_eq!(course_line(&quotes), "USD: 95.5  EUR: 104.2");
    }

    #[test]
    fn course_line_single_quote_has_no_separator() {
        assert_eq!(course_line(&[quote("GBP", 122.0)]), "GBP: 122");
    }

    #[test]
    fn weekday_block_sits_above_the_upper_third() {
        assert_eq!(weekday_anchor(2560, 1440), (1280, 380));
        assert_eq!(weekday_anchor(1920, 1080), (960, 260));
    }

    #[test]
    fn course_block_hangs_15_below_the_weekday_box() {
        assert_eq!(course_anchor(1920, 130), (960, 145));
    }

    #[test]
    fn clock_anchor_derives_from_weekday_box_only() {
        // The time block is positioned from the weekday measurement alone, so
        // a skipped currency block does not shift it.
        assert_eq!(time_anchor(1920, 130), (960, 230));
    }

    #[test]
    fn date_block_hangs_20_below_the_time_box() {
        assert_eq!(date_anchor(1920, 110), (960, 130));
    }
}
