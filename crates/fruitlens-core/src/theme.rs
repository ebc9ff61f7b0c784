//! Label colors and the page theme derived from them.
//!
//! A classification paints the page background with the label's color
//! and uses a much darker shade of it for borders and the label text.

use std::fmt;

/// Percent of lightness removed to get the accent shade.
pub const ACCENT_DARKEN: f64 = 50.0;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// `#ffffff`, the fallback for labels missing from the table.
    pub const WHITE: Self = Self([0xff, 0xff, 0xff]);

    /// Parse a CSS hex color (`#rgb` or `#rrggbb`, surrounding whitespace
    /// ignored).
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                // Short form: #rgb → #rrggbb
                let mut rgb = [0u8; 3];
                for (slot, ch) in rgb.iter_mut().zip(hex.chars()) {
                    let n = ch.to_digit(16)?;
                    *slot = u8::try_from(n * 17).ok()?;
                }
                Some(Self(rgb))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self([r, g, b]))
            }
            _ => None,
        }
    }

    /// Lower-case `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Reduce HSL lightness by `amount` percentage points, clamped at black.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        let l = (l - amount / 100.0).clamp(0.0, 1.0);
        Self::from_hsl(h, s, l)
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let [r, g, b] = self.0.map(|c| f64::from(c) / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = f64::midpoint(max, min);
        if (max - min).abs() < f64::EPSILON {
            return (0.0, 0.0, l);
        }
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        if s.abs() < f64::EPSILON {
            let v = channel(l);
            return Self([v, v, v]);
        }
        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l.mul_add(-s, l + s)
        };
        let p = 2.0f64.mul_add(l, -q);
        Self([
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        ])
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Label → background color.
const LABEL_COLORS: &[(&str, &str)] = &[
    ("apple", "#ff4d4d"),
    ("avocado", "#568203"),
    ("banana", "#ffe135"),
    ("blueberry", "#4f86f7"),
    ("cherry", "#d2042d"),
    ("coconut", "#965a3e"),
    ("grape", "#6f2da8"),
    ("kiwi", "#8ee53f"),
    ("lemon", "#fff44f"),
    ("mango", "#ffc324"),
    ("orange", "#ffa500"),
    ("papaya", "#ffefd5"),
    ("peach", "#ffe5b4"),
    ("pear", "#d1e231"),
    ("pineapple", "#fee12b"),
    ("pomegranate", "#c0392b"),
    ("strawberry", "#fc5a8d"),
    ("watermelon", "#fc6c85"),
];

/// Table color for `label`, or white when the label is unknown.
///
/// Lookup ignores ASCII case and surrounding whitespace.
#[must_use]
pub fn label_color(label: &str) -> Rgb {
    let label = label.trim();
    LABEL_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .and_then(|(_, hex)| Rgb::from_hex(hex))
        .unwrap_or(Rgb::WHITE)
}

/// Page colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Page background.
    pub primary: Rgb,
    /// Borders, buttons and the label text.
    pub accent: Rgb,
}

impl Theme {
    /// Theme for a predicted label.
    #[must_use]
    pub fn for_label(label: &str) -> Self {
        let primary = label_color(label);
        Self {
            primary,
            accent: primary.darken(ACCENT_DARKEN),
        }
    }

    /// CSS custom properties for the app root `style` attribute.
    #[must_use]
    pub fn css_vars(&self) -> String {
        format!(
            "--theme-primary: {}; --theme-accent: {};",
            self.primary, self.accent
        )
    }
}

impl Default for Theme {
    /// White page with a dark slate accent, before anything is classified.
    fn default() -> Self {
        Self {
            primary: Rgb::WHITE,
            accent: Rgb([0x21, 0x35, 0x47]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Rgb::from_hex("#1a2B3c"), Some(Rgb([0x1a, 0x2b, 0x3c])));
        assert_eq!(Rgb::from_hex(" #fff "), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex("#f00"), Some(Rgb([255, 0, 0])));
        assert_eq!(Rgb::from_hex("fff"), None);
        assert_eq!(Rgb::from_hex("#ffff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    #[test]
    fn every_table_entry_parses() {
        for (label, hex) in LABEL_COLORS {
            assert!(Rgb::from_hex(hex).is_some(), "{label}: bad color {hex}");
        }
    }

    #[test]
    fn darken_matches_hsl_lightness_shift() {
        assert_eq!(Rgb::WHITE.darken(50.0).to_hex(), "#808080");
        assert_eq!(Rgb([0xff, 0x4d, 0x4d]).darken(50.0).to_hex(), "#4d0000");
        assert_eq!(Rgb([0x10, 0x10, 0x10]).darken(50.0), Rgb([0, 0, 0]));
    }

    #[test]
    fn darken_zero_is_identity() {
        for (_, hex) in LABEL_COLORS {
            let c = Rgb::from_hex(hex).unwrap_or(Rgb::WHITE);
            assert_eq!(c.darken(0.0), c, "{hex}");
        }
    }

    #[test]
    fn known_label_uses_table_color() {
        let theme = Theme::for_label("apple");
        assert_eq!(theme.primary, Rgb([0xff, 0x4d, 0x4d]));
        assert_eq!(theme.accent, theme.primary.darken(ACCENT_DARKEN));
        assert_eq!(Theme::for_label(" Apple "), theme);
    }

    #[test]
    fn unknown_label_falls_back_to_white() {
        let theme = Theme::for_label("durian");
        assert_eq!(theme.primary, Rgb::WHITE);
        assert_eq!(theme.accent.to_hex(), "#808080");
    }

    #[test]
    fn css_vars_use_hex() {
        assert_eq!(
            Theme::default().css_vars(),
            "--theme-primary: #ffffff; --theme-accent: #213547;"
        );
    }
}
