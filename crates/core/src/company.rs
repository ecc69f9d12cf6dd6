//! The `Company` entity and its partial-update patch.

use serde::Serialize;

use crate::cnae::Cnae;
use crate::cnpj::Cnpj;
use crate::error::DomainResult;

/// A company registration record, keyed by its CNPJ.
///
/// Construction is the only validation gate: [`Company::new`] normalizes
/// both codes and runs the CNPJ checksum before a value can exist, so a
/// `Company` in hand is always storable. The CNPJ and legal name are fixed
/// for the lifetime of the record; only the trade name and CNAE change
/// (via [`CompanyPatch`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    cnpj: Cnpj,
    legal_name: String,
    trade_name: String,
    cnae: Cnae,
}

impl Company {
    /// Build a company from raw input.
    ///
    /// Both codes are normalized (punctuation stripped); the CNPJ is then
    /// checksum-validated. The CNAE's digit count is intentionally not
    /// checked.
    pub fn new(
        cnpj: &str,
        legal_name: impl Into<String>,
        trade_name: impl Into<String>,
        cnae: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            cnpj: Cnpj::parse(cnpj)?,
            legal_name: legal_name.into(),
            trade_name: trade_name.into(),
            cnae: Cnae::new(cnae),
        })
    }

    pub fn cnpj(&self) -> &Cnpj {
        &self.cnpj
    }

    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    pub fn trade_name(&self) -> &str {
        &self.trade_name
    }

    pub fn cnae(&self) -> &Cnae {
        &self.cnae
    }

    /// Apply a patch, returning the updated record.
    ///
    /// Only the mutable fields move; `cnpj` and `legal_name` are carried
    /// over untouched.
    pub fn patched(self, patch: CompanyPatch) -> Self {
        Self {
            cnpj: self.cnpj,
            legal_name: self.legal_name,
            trade_name: patch.trade_name.unwrap_or(self.trade_name),
            cnae: patch.cnae.unwrap_or(self.cnae),
        }
    }
}

/// Partial update: absent fields keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyPatch {
    pub trade_name: Option<String>,
    pub cnae: Option<Cnae>,
}

impl CompanyPatch {
    pub fn is_empty(&self) -> bool {
        self.trade_name.is_none() && self.cnae.is_none()
    }
}
