use super::beneficiary::{BeneficiaryField, BeneficiaryRecord};
use super::general::{GeneralField, GeneralInfo};
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// The whole registration form: one [`GeneralInfo`] and an ordered list of
/// beneficiaries.
///
/// A freshly opened form holds a single blank beneficiary, and removing the
/// last one leaves a blank record behind instead of an empty list. A form
/// loaded from a draft file may still arrive with no beneficiaries; validation
/// reports that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub general: GeneralInfo,
    pub beneficiaries: Vec<BeneficiaryRecord>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            general: GeneralInfo::default(),
            beneficiaries: vec![BeneficiaryRecord::default()],
        }
    }

    pub fn update_general_field(&mut self, field: GeneralField, value: impl Into<String>) {
        self.general.set(field, value);
    }

    pub fn update_beneficiary_field(
        &mut self,
        index: usize,
        field: BeneficiaryField,
        value: impl Into<String>,
    ) -> Result<()> {
        self.beneficiary_mut(index)?.set(field, value);
        Ok(())
    }

    /// Appends a blank beneficiary and returns its index.
    pub fn add_beneficiary(&mut self) -> usize {
        self.beneficiaries.push(BeneficiaryRecord::default());
        self.beneficiaries.len() - 1
    }

    pub fn beneficiary(&self, index: usize) -> Result<&BeneficiaryRecord> {
        let len = self.beneficiaries.len();
        self.beneficiaries
            .get(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })
    }

    fn beneficiary_mut(&mut self, index: usize) -> Result<&mut BeneficiaryRecord> {
        let len = self.beneficiaries.len();
        self.beneficiaries
            .get_mut(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })
    }

    /// Removes the beneficiary at `index` without asking anyone.
    ///
    /// When it is the only record, it is replaced by a blank one so the list
    /// never becomes empty. Returns the removed record.
    pub fn remove_beneficiary(&mut self, index: usize) -> Result<BeneficiaryRecord> {
        self.beneficiary(index)?;
        if self.beneficiaries.len() == 1 {
            Ok(std::mem::take(&mut self.beneficiaries[0]))
        } else {
            Ok(self.beneficiaries.remove(index))
        }
    }

    /// Name shown when asking to confirm a removal.
    pub fn display_name(&self, index: usize) -> Result<String> {
        Ok(self.beneficiary(index)?.display_name(index + 1))
    }
}
