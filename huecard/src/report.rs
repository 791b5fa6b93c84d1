//! Markdown design documents built around a palette

use crate::{Color, Palette};
use std::fmt::{self, Display};

/// Shown when no typography notes were given
const MISSING_FONT_NOTES: &str = "No typography information available.";
/// Shown when no layout notes were given
const MISSING_LAYOUT_NOTES: &str = "No layout information available.";

/// General guidance appended to every document
const USAGE: [&str; 5] = [
	"Use the main color for brand marks and primary actions.",
	"Use secondary colors to emphasize information and separate sections.",
	"Use neutral colors for backgrounds, body text, and other supporting elements.",
	"Keep one type family and limit weight variations to two or three.",
	"Follow the visual hierarchy so the most important content comes first.",
];

/// A design document: the palette plus optional free-form typography and layout notes.
///
/// The [`Display`] impl renders it as markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignSpec {
	/// The colors to document
	pub palette: Palette,
	/// Typography notes
	pub font_notes: Option<String>,
	/// Layout notes
	pub layout_notes: Option<String>,
}

impl DesignSpec {
	/// A document with only the palette section filled in
	#[must_use]
	pub fn new(palette: Palette) -> Self {
		Self { palette, font_notes: None, layout_notes: None }
	}

	/// Set the typography notes
	#[must_use]
	pub fn with_font_notes(mut self, notes: impl Into<String>) -> Self {
		self.font_notes = Some(notes.into());
		self
	}

	/// Set the layout notes
	#[must_use]
	pub fn with_layout_notes(mut self, notes: impl Into<String>) -> Self {
		self.layout_notes = Some(notes.into());
		self
	}
}

/// `HEX #rrggbb | RGB (r, g, b)`
fn summary(color: Color) -> String {
	let [r, g, b] = color.rgb();
	format!("HEX {} | RGB ({r}, {g}, {b})", color.hex())
}

/// Blank notes count as missing
fn notes<'a>(notes: Option<&'a str>, missing: &'a str) -> &'a str {
	notes.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(missing)
}

impl Display for DesignSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Palette { main, secondary, neutral } = &self.palette;
		let [r, g, b] = main.rgb();

		writeln!(f, "# Design Spec")?;
		writeln!(f)?;
		writeln!(f, "## Main")?;
		writeln!(f, "- HEX: {}", main.hex())?;
		writeln!(f, "- RGB: ({r}, {g}, {b})")?;
		writeln!(f, "- CMYK: {}", main.cmyk())?;

		writeln!(f)?;
		writeln!(f, "## Secondary")?;
		for (i, &color) in secondary.iter().enumerate() {
			writeln!(f, "- Secondary {}: {}", i + 1, summary(color))?;
		}

		if !neutral.is_empty() {
			writeln!(f)?;
			writeln!(f, "## Neutral")?;
			for (i, &color) in neutral.iter().enumerate() {
				writeln!(f, "- Neutral {}: {}", i + 1, summary(color))?;
			}
		}

		writeln!(f)?;
		writeln!(f, "## Typography")?;
		writeln!(f, "{}", notes(self.font_notes.as_deref(), MISSING_FONT_NOTES))?;

		writeln!(f)?;
		writeln!(f, "## Layout")?;
		writeln!(f, "{}", notes(self.layout_notes.as_deref(), MISSING_LAYOUT_NOTES))?;

		writeln!(f)?;
		writeln!(f, "## Usage")?;
		for line in USAGE {
			writeln!(f, "- {line}")?;
		}

		Ok(())
	}
}
