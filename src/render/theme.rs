//! Status line colors.

use console::Style;
use std::fmt;
use std::str::FromStr;

/// Named colors accepted by `--prefix-color`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Cyan,
    Blue,
    Green,
    Yellow,
    Red,
    Magenta,
    Gray,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::Magenta,
        Color::Gray,
    ];

    /// Parse `name`, falling back to cyan with a warning.
    pub fn parse_or_default(name: &str) -> Self {
        if name.is_empty() {
            return Self::default();
        }
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(color = name, "unknown prefix color, using cyan");
            Self::default()
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Magenta => "magenta",
            Self::Gray => "gray",
        }
    }

    fn style(self) -> Style {
        let style = Style::new();
        match self {
            Self::Cyan => style.cyan(),
            Self::Blue => style.blue(),
            Self::Green => style.green(),
            Self::Yellow => style.yellow(),
            Self::Red => style.red(),
            Self::Magenta => style.magenta(),
            Self::Gray => style.black().bright(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown color '{s}'"))
    }
}

/// Styles for each status line segment.
///
/// The host reads stdout through a pipe, so the colored theme forces
/// styling on instead of probing for a terminal.
#[derive(Debug, Clone)]
pub struct Theme {
    styled: bool,
    pub model: Style,
    pub dir: Style,
    pub branch: Style,
    pub additions: Style,
    pub deletions: Style,
    pub tokens: Style,
    pub version: Style,
    pub tasks: Style,
    pub blocked: Style,
    context_low: Style,
    context_mid: Style,
    context_high: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::colored()
    }
}

impl Theme {
    fn with_styling(styled: bool) -> Self {
        let s = |color: Color| color.style().force_styling(styled);
        Self {
            styled,
            model: s(Color::Cyan),
            dir: s(Color::Blue),
            branch: s(Color::Green),
            additions: s(Color::Green),
            deletions: s(Color::Red),
            tokens: s(Color::Gray),
            version: s(Color::Gray),
            tasks: s(Color::Yellow),
            blocked: s(Color::Red),
            context_low: s(Color::Green),
            context_mid: s(Color::Yellow),
            context_high: s(Color::Red),
        }
    }

    /// ANSI colored theme.
    pub fn colored() -> Self {
        Self::with_styling(true)
    }

    /// Theme without escape sequences.
    pub fn plain() -> Self {
        Self::with_styling(false)
    }

    /// Colored unless `no_color` is set or `NO_COLOR` is present.
    pub fn from_env(no_color: bool) -> Self {
        if no_color || std::env::var_os("NO_COLOR").is_some() {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Style for a user-chosen color.
    pub fn color(&self, color: Color) -> Style {
        color.style().force_styling(self.styled)
    }

    /// Context usage style: green below 50%, yellow below 80%, red above.
    pub fn context(&self, pct: f64) -> &Style {
        if pct >= 80.0 {
            &self.context_high
        } else if pct >= 50.0 {
            &self.context_mid
        } else {
            &self.context_low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_parse() {
        for color in Color::ALL {
            assert_eq!(color.as_str().parse::<Color>().unwrap(), color);
        }
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn unknown_color_falls_back_to_cyan() {
        assert_eq!(Color::parse_or_default("purple"), Color::Cyan);
        assert_eq!(Color::parse_or_default(""), Color::Cyan);
        assert_eq!(Color::parse_or_default("red"), Color::Red);
    }

    #[test]
    fn colored_theme_emits_escapes() {
        let theme = Theme::colored();
        let text = theme.model.apply_to("[Opus]").to_string();
        assert_eq!(text, "\u{1b}[36m[Opus]\u{1b}[0m");
    }

    #[test]
    fn plain_theme_has_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(theme.model.apply_to("[Opus]").to_string(), "[Opus]");
        assert_eq!(theme.color(Color::Red).apply_to("x").to_string(), "x");
        assert!(!theme.is_styled());
    }

    #[test]
    fn gray_is_styled() {
        let theme = Theme::colored();
        let text = theme.color(Color::Gray).apply_to("v1").to_string();
        assert!(text.starts_with("\u{1b}["));
        assert!(text.contains("v1"));
        assert_ne!(text, "v1");
    }

    #[test]
    fn context_thresholds() {
        let theme = Theme::colored();
        let paint = |pct: f64| theme.context(pct).apply_to("x").to_string();
        assert!(paint(49.9).starts_with("\u{1b}[32m"));
        assert!(paint(50.0).starts_with("\u{1b}[33m"));
        assert!(paint(79.9).starts_with("\u{1b}[33m"));
        assert!(paint(80.0).starts_with("\u{1b}[31m"));
    }
}
