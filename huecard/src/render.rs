//! Rasterizing a palette into a fixed-layout swatch card

use crate::{Color, Palette, Result};
use cosmic_text::{fontdb, Attrs, Buffer, Color as TextColor, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, Rgb, RgbImage};

/// Width of the card in pixels
pub const CARD_WIDTH: u32 = 800;
/// Height of the card in pixels
pub const CARD_HEIGHT: u32 = MAIN_BAND + SECONDARY_BAND + NEUTRAL_BAND;

/// Height of the main color band
const MAIN_BAND: u32 = 200;
/// Height of the secondary color band
const SECONDARY_BAND: u32 = 150;
/// Height of the neutral color band
const NEUTRAL_BAND: u32 = 150;

/// Distance between a swatch edge and its label
const PADDING: u32 = 8;

/// Labels on colors at or below this luma (times 1000) are drawn white, above it black
const LABEL_LUMA_MILLI: u32 = 128_000;

/// The bundled label font
const FONT: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");
/// Family name of [`FONT`]
const FONT_FAMILY: &str = "DejaVu Sans Mono";

/// Labels that would have to shrink below this font size are left out
const MIN_FONT_SIZE: f32 = 8.0;
/// Distance between baselines as a multiple of the font size
const LINE_HEIGHT: f32 = 1.2;

/// A set of UI theme colors.
///
/// The card only uses [`Theme::card`] as its background,
/// the rest is kept so that the presets describe complete themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Page background
	pub background: Color,
	/// Card / panel background
	pub card: Color,
	/// Button color
	pub button: Color,
	/// Accent and hover color
	pub accent: Color,
}

impl Theme {
	/// The five built-in dark themes
	pub const PRESETS: [Self; 5] = [
		Self::new(Color::new(0x12, 0x12, 0x12), Color::new(0x1e, 0x1e, 0x1e), Color::new(0x8b, 0x5c, 0xf6), Color::new(0x8b, 0x5c, 0xf6)),
		Self::new(Color::new(0x1e, 0x1e, 0x2e), Color::new(0x2d, 0x2d, 0x44), Color::new(0x63, 0x66, 0xf1), Color::new(0x63, 0x66, 0xf1)),
		Self::new(Color::new(0x1a, 0x1e, 0x3b), Color::new(0x2a, 0x2f, 0x55), Color::new(0x3b, 0x82, 0xf6), Color::new(0x3b, 0x82, 0xf6)),
		Self::new(Color::new(0x2a, 0x1b, 0x3d), Color::new(0x3d, 0x2b, 0x5c), Color::new(0xa8, 0x55, 0xf7), Color::new(0xa8, 0x55, 0xf7)),
		Self::new(Color::new(0x1b, 0x3b, 0x2a), Color::new(0x2b, 0x5c, 0x45), Color::new(0x22, 0xc5, 0x5e), Color::new(0x22, 0xc5, 0x5e)),
	];

	/// Create a theme from its colors
	#[must_use]
	pub const fn new(background: Color, card: Color, button: Color, accent: Color) -> Self {
		Self { background, card, button, accent }
	}
}

/// Options for [`render_card`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
	/// Fill for bands that have no colors
	pub background: Color,
	/// Font size of the labels in pixels
	///
	/// Swatch labels shrink below this when their swatch is too narrow.
	pub font_size: f32,
}

impl CardStyle {
	/// Style the card after a theme
	#[must_use]
	pub const fn from_theme(theme: &Theme) -> Self {
		Self { background: theme.card, font_size: 28.0 }
	}
}

impl Default for CardStyle {
	fn default() -> Self {
		Self::from_theme(&Theme::PRESETS[0])
	}
}

/// Render `palette` onto an 800x500 card.
///
/// The top 200 px show the main color with its hex, RGB, and CMYK values,
/// the next 150 px split evenly between the secondary colors,
/// and the last 150 px split evenly between the neutral colors.
/// A band with no colors is left as background.
#[must_use]
pub fn render_card(palette: &Palette, style: &CardStyle) -> RgbImage {
	let mut canvas = RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, pixel(style.background));
	let mut typesetter = Typesetter::new();

	let main = palette.main;
	let band = Rect::new(0, 0, CARD_WIDTH, MAIN_BAND);
	fill_rect(&mut canvas, band, main);

	let [r, g, b] = main.rgb();
	let label = format!("{}\nRGB({r}, {g}, {b})\nCMYK {}", main.hex(), main.cmyk());
	typesetter.draw_label(&mut canvas, band.inset(2 * PADDING), &label, style.font_size, label_color(main));

	draw_band(&mut canvas, &mut typesetter, MAIN_BAND, SECONDARY_BAND, &palette.secondary, style.font_size);
	draw_band(
		&mut canvas,
		&mut typesetter,
		MAIN_BAND + SECONDARY_BAND,
		NEUTRAL_BAND,
		&palette.neutral,
		style.font_size,
	);

	canvas
}

/// Encode a rendered card as PNG
///
/// # Errors
/// Returns [`crate::Error::Encode`] if the encoder fails.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
	let mut bytes = Vec::new();
	PngEncoder::new(&mut bytes).write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
	Ok(bytes)
}

/// [`render_card`] and then [`encode_png`]
///
/// # Errors
/// See [`encode_png`].
pub fn render_png(palette: &Palette, style: &CardStyle) -> Result<Vec<u8>> {
	encode_png(&render_card(palette, style))
}

/// Black for light colors, white for dark ones
#[must_use]
pub fn label_color(color: Color) -> Color {
	if color.luma_milli() > LABEL_LUMA_MILLI {
		Color::BLACK
	} else {
		Color::WHITE
	}
}

/// Fill a horizontal band with one equally wide swatch per color, each labeled with its hex
fn draw_band(canvas: &mut RgbImage, typesetter: &mut Typesetter, top: u32, height: u32, colors: &[Color], font_size: f32) {
	let Ok(n) = u32::try_from(colors.len()) else {
		return;
	};
	if n == 0 {
		return;
	}

	let width = CARD_WIDTH / n;
	for (i, &color) in (0..).zip(colors) {
		let left = i * width;
		// The last swatch takes the remainder of the integer division
		let right = if i + 1 == n { CARD_WIDTH } else { left + width };
		let swatch = Rect::new(left, top, right, top + height);
		fill_rect(canvas, swatch, color);
		typesetter.draw_label(canvas, swatch.inset(PADDING), &color.hex(), font_size, label_color(color));
	}
}

/// A half-open pixel rectangle `[left, right) x [top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
	/// First column
	left: u32,
	/// First row
	top: u32,
	/// One past the last column
	right: u32,
	/// One past the last row
	bottom: u32,
}

impl Rect {
	/// Create a rectangle from its edges
	const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
		Self { left, top, right, bottom }
	}

	/// Shrink by `amount` on every side
	fn inset(self, amount: u32) -> Self {
		let left = self.left + amount;
		let top = self.top + amount;
		Self {
			left,
			top,
			right: self.right.saturating_sub(amount).max(left),
			bottom: self.bottom.saturating_sub(amount).max(top),
		}
	}

	/// Width in pixels
	const fn width(self) -> u32 {
		self.right - self.left
	}

	/// The canvas position of the signed point `(x, y)`, if it lies inside
	fn locate(self, x: i32, y: i32) -> Option<(u32, u32)> {
		let x = u32::try_from(x).ok()?;
		let y = u32::try_from(y).ok()?;
		((self.left..self.right).contains(&x) && (self.top..self.bottom).contains(&y)).then_some((x, y))
	}
}

/// Convert to an image pixel
fn pixel(color: Color) -> Rgb<u8> {
	Rgb(color.rgb())
}

/// Fill `rect`, clipped to the canvas
fn fill_rect(canvas: &mut RgbImage, rect: Rect, color: Color) {
	let fill = pixel(color);
	for y in rect.top..rect.bottom.min(canvas.height()) {
		for x in rect.left..rect.right.min(canvas.width()) {
			canvas.put_pixel(x, y, fill);
		}
	}
}

/// Composite `color` with `alpha` coverage over `dst`
#[allow(clippy::cast_possible_truncation)]
fn blend(dst: &mut Rgb<u8>, color: [u8; 3], alpha: u8) {
	let alpha = u32::from(alpha);
	for (d, s) in dst.0.iter_mut().zip(color) {
		*d = ((u32::from(s) * alpha + u32::from(*d) * (255 - alpha) + 127) / 255) as u8;
	}
}

/// Shapes and rasterizes labels with the bundled font
struct Typesetter {
	/// Font database holding only [`FONT`]
	font_system: FontSystem,
	/// Rasterized glyph cache
	swash_cache: SwashCache,
}

impl Typesetter {
	/// Load the bundled font
	fn new() -> Self {
		let mut db = fontdb::Database::new();
		db.load_font_data(FONT.to_vec());

		Self {
			font_system: FontSystem::new_with_locale_and_db("en-US".into(), db),
			swash_cache: SwashCache::new(),
		}
	}

	/// Shape `text` at `font_size` without wrapping
	fn layout(&mut self, text: &str, font_size: f32) -> Buffer {
		let font_system = &mut self.font_system;
		let mut buffer = Buffer::new(font_system, Metrics::new(font_size, font_size * LINE_HEIGHT));
		buffer.set_size(font_system, None, None);
		buffer.set_text(font_system, text, &Attrs::new().family(Family::Name(FONT_FAMILY)), Shaping::Advanced);
		buffer.shape_until_scroll(font_system, false);
		buffer
	}

	/// Width in pixels of the widest line of `text`
	fn measure(&mut self, text: &str, font_size: f32) -> f32 {
		self.layout(text, font_size).layout_runs().map(|run| run.line_w).fold(0.0, f32::max)
	}

	/// The largest font size up to `font_size` at which every line of `text` is at most `room` pixels wide
	///
	/// Returns `None` if that size would be below [`MIN_FONT_SIZE`].
	fn fit(&mut self, text: &str, font_size: f32, room: u32) -> Option<f32> {
		let width = self.measure(text, font_size);
		#[allow(clippy::cast_precision_loss)]
		let room = room as f32;
		let size = if width <= room { font_size } else { (font_size * room / width).floor() };
		(size >= MIN_FONT_SIZE).then_some(size)
	}

	/// Draw `text` with its top left corner at the top left of `area`, shrunk to its width and clipped to it
	fn draw_label(&mut self, canvas: &mut RgbImage, area: Rect, text: &str, font_size: f32, color: Color) {
		let Some(size) = self.fit(text, font_size, area.width()) else {
			return;
		};

		let mut buffer = self.layout(text, size);
		let rgb = color.rgb();
		let [r, g, b] = rgb;
		let (Ok(left), Ok(top)) = (i32::try_from(area.left), i32::try_from(area.top)) else {
			return;
		};

		let Self { font_system, swash_cache } = self;
		buffer.draw(font_system, swash_cache, TextColor::rgb(r, g, b), |x, y, w, h, coverage| {
			let (Ok(w), Ok(h)) = (i32::try_from(w), i32::try_from(h)) else {
				return;
			};
			for dy in 0..h {
				for dx in 0..w {
					if let Some((x, y)) = area.locate(left + x + dx, top + y + dy) {
						blend(canvas.get_pixel_mut(x, y), rgb, coverage.a());
					}
				}
			}
		});
	}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
	use super::*;

	fn palette() -> Palette {
		Palette::new(
			Color::new(200, 100, 50),
			vec![Color::new(250, 250, 240), Color::new(30, 60, 90), Color::new(90, 160, 60)],
			(0..7).map(|i| Color::new(10 * i, 10, 10)).collect(),
		)
	}

	fn at(canvas: &RgbImage, x: u32, y: u32) -> Color {
		Color::from(canvas.get_pixel(x, y).0)
	}

	#[test]
	fn card_dimensions() {
		let card = render_card(&palette(), &CardStyle::default());
		assert_eq!(card.dimensions(), (800, 500));
	}

	#[test]
	fn bands_hold_their_colors() {
		let palette = palette();
		let card = render_card(&palette, &CardStyle::default());

		// Bottom right corners stay clear of the labels
		assert_eq!(at(&card, 799, 199), palette.main);
		for (i, &color) in (0..).zip(&palette.secondary) {
			assert_eq!(at(&card, (i + 1) * 266 - 1, 349), color);
		}
		assert_eq!(at(&card, 799, 349), palette.secondary[2]);

		// 800 / 7 = 114, so the last neutral swatch spans 684..800
		assert_eq!(at(&card, 683, 499), palette.neutral[5]);
		assert_eq!(at(&card, 684, 499), palette.neutral[6]);
		assert_eq!(at(&card, 799, 499), palette.neutral[6]);
	}

	#[test]
	fn empty_bands_are_background() {
		let style = CardStyle::from_theme(&Theme::PRESETS[2]);
		let palette = Palette::new(Color::new(200, 100, 50), Vec::new(), Vec::new());
		let card = render_card(&palette, &style);

		for (x, y) in [(0, 200), (400, 275), (799, 499)] {
			assert_eq!(at(&card, x, y), style.background);
		}
	}

	#[test]
	fn main_label_uses_contrasting_color() {
		let has_label = |canvas: &RgbImage, near: fn([u8; 3]) -> bool| {
			(0..MAIN_BAND).any(|y| (0..CARD_WIDTH / 2).any(|x| near(at(canvas, x, y).rgb())))
		};
		let near_black = |rgb: [u8; 3]| rgb.iter().all(|&c| c < 40);
		let near_white = |rgb: [u8; 3]| rgb.iter().all(|&c| c > 215);

		let light = Palette::new(Color::new(240, 230, 200), Vec::new(), Vec::new());
		let card = render_card(&light, &CardStyle::default());
		assert!(has_label(&card, near_black));
		assert!(!has_label(&card, near_white));

		let dark = Palette::new(Color::new(20, 30, 40), Vec::new(), Vec::new());
		let card = render_card(&dark, &CardStyle::default());
		assert!(has_label(&card, near_white));
		assert!(!has_label(&card, near_black));
	}

	#[test]
	fn label_threshold() {
		assert_eq!(label_color(Color::new(128, 128, 128)), Color::WHITE);
		assert_eq!(label_color(Color::new(129, 129, 129)), Color::BLACK);
		assert_eq!(label_color(Color::BLACK), Color::WHITE);
	}

	#[test]
	fn presets_accent_with_button_color() {
		assert_eq!(Theme::PRESETS[0].button, Color::new(0x8b, 0x5c, 0xf6));
		assert_eq!(Theme::PRESETS[4].card, Color::new(0x2b, 0x5c, 0x45));
		for theme in Theme::PRESETS {
			assert_eq!(theme.accent, theme.button);
		}
	}

	#[test]
	fn measure_grows_with_text_and_size() {
		let mut typesetter = Typesetter::new();
		let short = typesetter.measure("#a1b", 28.0);
		let long = typesetter.measure("#a1b2c3", 28.0);

		assert!(short > 0.0);
		assert!(long > short);
		assert!(typesetter.measure("#a1b2c3", 14.0) < long);
		assert!(typesetter.measure("", 28.0) <= 0.0);
	}

	#[test]
	fn labels_shrink_to_fit() {
		let mut typesetter = Typesetter::new();
		let width = typesetter.measure("#a1b2c3", 28.0);

		assert_eq!(typesetter.fit("#a1b2c3", 28.0, 800), Some(28.0));

		#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
		let half = (width / 2.0) as u32;
		let size = typesetter.fit("#a1b2c3", 28.0, half).unwrap();
		assert!(size < 28.0 && size >= MIN_FONT_SIZE);
		assert!(typesetter.measure("#a1b2c3", size) <= width / 2.0 + 1.0);

		assert_eq!(typesetter.fit("#a1b2c3", 28.0, 4), None);
	}

	#[test]
	fn labels_stay_inside_narrow_swatches() {
		let neutral = (0..10).map(|i| Color::new(20 * i, 20 * i, 20 * i)).collect::<Vec<_>>();
		let palette = Palette::new(Color::new(200, 100, 50), Vec::new(), neutral.clone());
		let card = render_card(&palette, &CardStyle::default());

		let top = MAIN_BAND + SECONDARY_BAND;
		for (i, &color) in (0..).zip(&neutral) {
			let (left, right) = (i * 80, (i + 1) * 80);

			// The padding columns keep the swatch color
			for y in top..CARD_HEIGHT {
				for x in (left..left + PADDING).chain(right - PADDING..right) {
					assert_eq!(at(&card, x, y), color, "swatch {i} at ({x}, {y})");
				}
			}

			// but the label itself was drawn
			let labeled = (top..CARD_HEIGHT).any(|y| (left..right).any(|x| at(&card, x, y) != color));
			assert!(labeled, "swatch {i} has no label");
		}
	}

	#[test]
	fn cards_are_deterministic() {
		let first = render_card(&palette(), &CardStyle::default());
		let second = render_card(&palette(), &CardStyle::default());
		assert_eq!(first, second);
	}

	#[test]
	fn png_round_trips() {
		let card = render_card(&palette(), &CardStyle::default());
		let bytes = encode_png(&card).unwrap();
		assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

		let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
		assert_eq!(decoded, card);
	}
}
