use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::error_handling::GalleryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginUnit {
    Px,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginLength {
    pub value: f64,
    pub unit: MarginUnit,
}

impl MarginLength {
    fn parse(token: &str) -> Option<Self> {
        if token == "0" {
            return Some(Self { value: 0.0, unit: MarginUnit::Px });
        }

        let (number, unit) = if let Some(number) = token.strip_suffix("px") {
            (number, MarginUnit::Px)
        } else if let Some(number) = token.strip_suffix('%') {
            (number, MarginUnit::Percent)
        } else {
            return None;
        };

        if !is_css_number(number) {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        value.is_finite().then_some(Self { value, unit })
    }
}

/// CSS `<number>`: optional sign, digits with an optional fraction (at least
/// one digit after a `.`), optional exponent.
fn is_css_number(text: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole.is_empty() || digits(whole)) && digits(fraction),
        None => digits(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|exponent| {
        digits(exponent.strip_prefix(['+', '-']).unwrap_or(exponent))
    });

    mantissa_ok && exponent_ok
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            MarginUnit::Px => write!(f, "{}px", self.value),
            MarginUnit::Percent => write!(f, "{}%", self.value),
        }
    }
}

/// How far outside the scroll area an element counts as visible, using
/// CSS margin shorthand: one to four lengths in `px` or `%`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    lengths: Vec<MarginLength>,
}

impl RootMargin {
    pub fn parse(margin: &str) -> Result<Self, GalleryError> {
        let invalid = |reason: &str| GalleryError::InvalidRootMargin {
            margin: margin.to_string(),
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = margin.split_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 4 {
            return Err(invalid("expected one to four lengths"));
        }

        let lengths = tokens
            .iter()
            .map(|token| MarginLength::parse(token))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| invalid("lengths must be in px or %"))?;

        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &[MarginLength] {
        &self.lengths
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            lengths: vec![MarginLength { value: 100.0, unit: MarginUnit::Px }],
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, length) in self.lengths.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", length)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for RootMargin {
    type Error = GalleryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

/// Settings handed to the intersection watcher when it is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct WatcherOptions {
    root_margin: RootMargin,
    threshold: f64,
}

impl WatcherOptions {
    pub fn new(root_margin: RootMargin, threshold: f64) -> Result<Self, GalleryError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(GalleryError::InvalidThreshold { value: threshold });
        }
        Ok(Self { root_margin, threshold })
    }

    pub fn root_margin(&self) -> &RootMargin {
        &self.root_margin
    }

    /// Fraction of the element that must be visible, in `[0, 1]`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            threshold: 0.1,
        }
    }
}
