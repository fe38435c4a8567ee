//! Visual theming for the force graph.
//!
//! Provides colors, the ordinal group palette, and per-theme style values.

use super::config::ThemeName;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// `0xRRGGBB`
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Tableau 10, the categorical scheme nodes are colored with.
pub const TABLEAU10: [Color; 10] = [
	Color::hex(0x4e79a7),
	Color::hex(0xf28e2c),
	Color::hex(0xe15759),
	Color::hex(0x76b7b2),
	Color::hex(0x59a14f),
	Color::hex(0xedc948),
	Color::hex(0xb07aa1),
	Color::hex(0xff9da7),
	Color::hex(0x9c755f),
	Color::hex(0xbab0ab),
];

/// Ordinal scale from group name to color. Groups take palette slots in the
/// order they are first seen, wrapping around when the palette runs out.
#[derive(Clone, Debug)]
pub struct GroupPalette {
	colors: Vec<Color>,
	domain: Vec<String>,
}

impl Default for GroupPalette {
	fn default() -> Self {
		Self::new(TABLEAU10.to_vec())
	}
}

impl GroupPalette {
	pub fn new(colors: Vec<Color>) -> Self {
		Self {
			colors,
			domain: Vec::new(),
		}
	}

	pub fn color(&mut self, group: &str) -> Color {
		let slot = match self.domain.iter().position(|g| g == group) {
			Some(slot) => slot,
			None => {
				self.domain.push(group.to_string());
				self.domain.len() - 1
			}
		};
		self.colors
			.get(slot % self.colors.len().max(1))
			.copied()
			.unwrap_or(Color::rgb(128, 128, 128))
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub edge: Color,
	pub edge_width: f64,
	pub edge_label: Color,
	pub node_label: Color,
	pub node_border: Color,
	pub node_border_width: f64,
	/// Whether nodes get a soft radial gradient instead of a flat fill.
	pub node_gradient: bool,
	/// Fill of the placeholder node for unresolved edge endpoints.
	pub sentinel: Color,
	/// Dash pattern (dash, gap) for edges touching the placeholder node.
	pub sentinel_dash: (f64, f64),
	/// Opacity multiplier for suppressed elements.
	pub suppressed_opacity: f64,
	pub label_font: &'static str,
	pub edge_label_font: &'static str,
}

impl Theme {
	/// Light page background, flat Tableau fills (default)
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			edge: Color::rgba(153, 153, 153, 0.8),
			edge_width: 1.5,
			edge_label: Color::rgb(85, 85, 85),
			node_label: Color::rgb(33, 33, 33),
			node_border: Color::rgb(255, 255, 255),
			node_border_width: 1.5,
			node_gradient: false,
			sentinel: Color::rgb(200, 200, 200),
			sentinel_dash: (6.0, 4.0),
			suppressed_opacity: 0.15,
			label_font: "12px sans-serif",
			edge_label_font: "10px sans-serif",
		}
	}

	/// Dark slate background with shaded nodes
	pub fn dark() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			edge: Color::rgba(140, 160, 180, 0.5),
			edge_width: 1.5,
			edge_label: Color::rgba(200, 210, 220, 0.8),
			node_label: Color::rgba(255, 255, 255, 0.9),
			node_border: Color::rgba(255, 255, 255, 0.0),
			node_border_width: 0.0,
			node_gradient: true,
			sentinel: Color::rgb(90, 96, 104),
			sentinel_dash: (6.0, 4.0),
			suppressed_opacity: 0.2,
			label_font: "12px sans-serif",
			edge_label_font: "10px sans-serif",
		}
	}
}

impl From<ThemeName> for Theme {
	fn from(name: ThemeName) -> Self {
		match name {
			ThemeName::Light => Self::light(),
			ThemeName::Dark => Self::dark(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn groups_take_slots_in_first_seen_order() {
		let mut palette = GroupPalette::default();
		assert_eq!(palette.color("b"), TABLEAU10[0]);
		assert_eq!(palette.color("a"), TABLEAU10[1]);
		assert_eq!(palette.color("b"), TABLEAU10[0]);
	}

	#[test]
	fn palette_wraps() {
		let mut palette = GroupPalette::new(vec![Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)]);
		palette.color("x");
		palette.color("y");
		assert_eq!(palette.color("z"), Color::rgb(1, 1, 1));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::hex(0x4e79a7).to_css(), "#4e79a7");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}
}
