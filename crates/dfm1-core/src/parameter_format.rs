//! Display text for parameter values.
//!
//! A [`Formatter`] turns a plain value into the text a control shows under
//! its knob, and parses typed-in text back. `text()` is the bare number,
//! `unit()` the label, and [`Formatter::display`] joins the two.
//!
//! ```ignore
//! let hz = Formatter::Frequency;
//! assert_eq!(hz.text(1500.0), "1.50k");
//! assert_eq!(hz.display(440.0), "440 Hz");
//! ```

/// How a parameter value is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Generic float with configurable precision (e.g. "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Frequency with automatic Hz/kHz scaling.
    ///
    /// Format: "440", "1.50k" (unit "Hz")
    Frequency,

    /// Percentage. Input is 0.0-1.0, display is 0-100.
    Percent {
        /// Number of decimal places.
        precision: usize,
    },
}

impl Formatter {
    /// Bare value text, without the unit.
    pub fn text(&self, value: f64) -> String {
        match self {
            Formatter::Float { precision } => format!("{:.*}", *precision, value),

            Formatter::Frequency => match value {
                v if v >= 1000.0 => format!("{:.2}k", v / 1000.0),
                v if v >= 100.0 => format!("{v:.0}"),
                v => format!("{v:.1}"),
            },

            Formatter::Percent { precision } => format!("{:.*}", *precision, value * 100.0),
        }
    }

    /// Value text followed by the unit, if any.
    pub fn display(&self, value: f64) -> String {
        let text = self.text(value);
        match self.unit() {
            "" => text,
            unit => format!("{text} {unit}"),
        }
    }

    /// Parse typed text, with or without its unit.
    pub fn parse(&self, s: &str) -> Option<f64> {
        let s = s.trim();

        match self {
            Formatter::Float { .. } => s.parse().ok(),

            Formatter::Frequency => {
                // "1.5 kHz", "1.50k", "440 Hz", "440"
                let lower = s.to_ascii_lowercase();
                let number = lower.trim_end_matches("hz").trim_end();
                match number.strip_suffix('k') {
                    Some(khz) => khz.trim().parse::<f64>().ok().map(|v| v * 1000.0),
                    None => number.parse().ok(),
                }
            }

            Formatter::Percent { .. } => s
                .trim_end_matches('%')
                .trim_end()
                .parse::<f64>()
                .ok()
                .map(|percent| percent / 100.0),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Formatter::Float { .. } => "",
            Formatter::Frequency => "Hz",
            Formatter::Percent { .. } => "%",
        }
    }

    /// Return a copy with a different precision. No effect on `Frequency`.
    pub fn with_precision(self, precision: usize) -> Self {
        match self {
            Formatter::Float { .. } => Formatter::Float { precision },
            Formatter::Percent { .. } => Formatter::Percent { precision },
            Formatter::Frequency => Formatter::Frequency,
        }
    }

    /// Current precision, if the variant has one.
    pub fn precision(&self) -> Option<usize> {
        match self {
            Formatter::Float { precision } | Formatter::Percent { precision } => Some(*precision),
            Formatter::Frequency => None,
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_text() {
        assert_eq!(Formatter::Frequency.text(1500.0), "1.50k");
        assert_eq!(Formatter::Frequency.text(440.0), "440");
        assert_eq!(Formatter::Frequency.text(20.0), "20.0");
        assert_eq!(Formatter::Frequency.display(440.0), "440 Hz");
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Formatter::Frequency.parse("1.5 kHz"), Some(1500.0));
        assert_eq!(Formatter::Frequency.parse("1.50k"), Some(1500.0));
        assert_eq!(Formatter::Frequency.parse("440 Hz"), Some(440.0));
        assert_eq!(Formatter::Frequency.parse("2KHZ"), Some(2000.0));
        assert_eq!(Formatter::Frequency.parse("880"), Some(880.0));
        assert_eq!(Formatter::Frequency.parse("warm"), None);
    }

    #[test]
    fn test_percent() {
        let f = Formatter::Percent { precision: 0 };
        assert_eq!(f.text(0.5), "50");
        assert_eq!(f.display(0.5), "50 %");
        assert_eq!(f.parse("25%"), Some(0.25));
    }

    #[test]
    fn test_precision() {
        let f = Formatter::Float { precision: 2 }.with_precision(1);
        assert_eq!(f.precision(), Some(1));
        assert_eq!(f.text(0.26), "0.3");
        assert_eq!(Formatter::Frequency.with_precision(3).precision(), None);
    }
}
