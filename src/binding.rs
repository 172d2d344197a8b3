//! Tracking of the program currently in effect on the rendering pipeline.

/// Program in effect on the pipeline.
///
/// Refers to a registry entry by key and never owns the program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActiveBinding {
    /// Native default pipeline.
    #[default]
    Default,
    /// Program registered under the given key.
    Bound(String),
}

impl ActiveBinding {
    /// True if the default pipeline is in effect.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Get the key of the bound program, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Bound(key) => Some(key),
        }
    }

    /// Point at `key` if it was found, otherwise fall back to the default pipeline.
    /// Returns `found`.
    pub(crate) fn select(&mut self, key: &str, found: bool) -> bool {
        *self = if found {
            Self::Bound(key.to_owned())
        } else {
            Self::Default
        };
        found
    }

    /// Fall back to the default pipeline.
    pub(crate) fn reset(&mut self) {
        *self = Self::Default;
    }
}
