//! The wire string type and format constants.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decoder::decode;
use crate::error::{WireError, WireResult};

/// Separates consecutive layers.
pub const LAYER_SEPARATOR: char = ',';
/// Ends every wire string.
pub const TERMINATOR: char = '.';
/// Marks a qubit untouched by the layer.
pub const IDLE_SYMBOL: char = 'I';

/// A well-formed wire string: `,`-separated layers of equal width, ending
/// in `.`.
///
/// Position `i` of each layer is the symbol acting on qubit `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WireString(String);

impl WireString {
    /// Wrap encoder output, which is well-formed by construction.
    pub(crate) fn from_encoded(s: String) -> Self {
        Self(s)
    }

    /// Parse and validate a wire string. Surrounding whitespace is trimmed.
    pub fn parse(s: &str) -> WireResult<Self> {
        let trimmed = s.trim();
        decode(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// The raw text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Layers, without the terminator.
    pub fn layers(&self) -> impl Iterator<Item = &str> {
        let body = self.0.strip_suffix(TERMINATOR).unwrap_or(&self.0);
        body.split(LAYER_SEPARATOR).filter(|layer| !layer.is_empty())
    }

    /// Number of layers.
    pub fn num_layers(&self) -> usize {
        self.layers().count()
    }

    /// Layer width, i.e. the number of qubits the endpoint must allocate.
    pub fn num_qubits(&self) -> u32 {
        self.layers()
            .next()
            .map_or(0, |layer| layer.chars().count() as u32)
    }

    /// Consume and return the raw text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WireString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WireString {
    type Err = WireError;

    fn from_str(s: &str) -> WireResult<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for WireString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for WireString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
