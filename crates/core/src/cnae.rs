//! CNAE codec: normalization and display formatting.
//!
//! The CNAE is the numeric business-activity classification code. Unlike
//! the CNPJ it carries no check digits and its digit count is not
//! validated; the codec only strips punctuation for storage and re-inserts
//! the single separator (`DDDD-DDD`) for display.

use core::fmt;

use serde::Serialize;

use crate::cnpj::normalize;

/// A CNAE classification code in canonical (digits-only) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cnae(String);

impl Cnae {
    /// Normalize `raw` into canonical form. Never fails: any non-digit
    /// characters are dropped.
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Canonical digits-only form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with the separator after the 4th digit: `DDDD-DDD`.
    pub fn formatted(&self) -> String {
        let (head, tail) = self.0.split_at(self.0.len().min(4));
        format!("{head}-{tail}")
    }
}

impl fmt::Display for Cnae {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
