//! Force-law tags.

use std::fmt;
use std::str::FromStr;

/// Which drag closure law to apply.
///
/// Tags parse case-sensitively from the names used in run configuration:
///
/// ```
/// use cfdem_drag::ForceLaw;
///
/// assert_eq!("Dala".parse::<ForceLaw>().unwrap(), ForceLaw::Dala);
/// assert!("dala".parse::<ForceLaw>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForceLaw {
    /// Linear Stokes drag.
    #[default]
    Stokes,
    /// Dalla Valle drag coefficient.
    Dala,
    /// Coulson and Richardson correlation.
    Coul,
}

impl ForceLaw {
    /// Every supported law, in declaration order.
    pub const ALL: [ForceLaw; 3] = [ForceLaw::Stokes, ForceLaw::Dala, ForceLaw::Coul];

    /// Configuration tag for this law.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Stokes => "Stokes",
            Self::Dala => "Dala",
            Self::Coul => "Coul",
        }
    }
}

impl fmt::Display for ForceLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A configuration tag names no known force law.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseForceLawError {
    /// The rejected tag.
    pub tag: String,
}

impl fmt::Display for ParseForceLawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown force law '{}', expected one of Stokes, Dala, Coul",
            self.tag
        )
    }
}

impl std::error::Error for ParseForceLawError {}

impl FromStr for ForceLaw {
    type Err = ParseForceLawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|law| law.tag() == s)
            .ok_or_else(|| ParseForceLawError { tag: s.to_string() })
    }
}
