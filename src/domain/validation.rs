//! Submission rules for a [`FormState`].
//!
//! Rules are checked in a fixed order and the first violation wins: the
//! department, then the presence of beneficiaries, then each beneficiary in
//! list order with its fields in the order of [`Rule`].

use super::beneficiary::{BeneficiaryRecord, ChildAge};
use super::form::FormState;
use std::fmt;

/// The rule a form broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    DepartmentMissing,
    NoBeneficiaries,
    StaffFirstNameMissing,
    StaffLastName1Missing,
    StaffLastName2Missing,
    ChildNameMissing,
    ChildSexMissing,
    ChildAgeMissing,
    ChildAgeInvalid,
}

/// First rule violated by a form, with the beneficiary it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub rule: Rule,
    /// 1-based position of the offending beneficiary.
    pub position: Option<usize>,
}

impl ValidationError {
    fn form(rule: Rule) -> Self {
        Self {
            rule,
            position: None,
        }
    }

    fn beneficiary(rule: Rule, position: usize) -> Self {
        Self {
            rule,
            position: Some(position),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self.rule {
            Rule::DepartmentMissing => return f.write_str("La dirección es obligatoria."),
            Rule::NoBeneficiaries => return f.write_str("Agrega al menos un beneficiario."),
            Rule::StaffFirstNameMissing => "falta el nombre del funcionario.",
            Rule::StaffLastName1Missing => "falta el primer apellido del funcionario.",
            Rule::StaffLastName2Missing => "falta el segundo apellido del funcionario.",
            Rule::ChildNameMissing => "falta el nombre del hijo/a.",
            Rule::ChildSexMissing => "falta el sexo del hijo/a.",
            Rule::ChildAgeMissing => "falta la edad.",
            Rule::ChildAgeInvalid => "la edad no es válida.",
        };
        write!(f, "Beneficiario #{}: {detail}", self.position.unwrap_or_default())
    }
}

impl std::error::Error for ValidationError {}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_beneficiary(record: &BeneficiaryRecord) -> Option<Rule> {
    if blank(&record.staff_first_name) {
        return Some(Rule::StaffFirstNameMissing);
    }
    if blank(&record.staff_last_name1) {
        return Some(Rule::StaffLastName1Missing);
    }
    if blank(&record.staff_last_name2) {
        return Some(Rule::StaffLastName2Missing);
    }
    if blank(&record.child_name) {
        return Some(Rule::ChildNameMissing);
    }
    if blank(&record.child_sex) {
        return Some(Rule::ChildSexMissing);
    }
    if blank(&record.child_age) {
        return Some(Rule::ChildAgeMissing);
    }
    if ChildAge::parse(&record.child_age).is_none() {
        return Some(Rule::ChildAgeInvalid);
    }
    None
}

/// Checks a form against the submission rules, stopping at the first failure.
pub fn validate(form: &FormState) -> Result<(), ValidationError> {
    if blank(&form.general.department) {
        return Err(ValidationError::form(Rule::DepartmentMissing));
    }
    if form.beneficiaries.is_empty() {
        return Err(ValidationError::form(Rule::NoBeneficiaries));
    }
    for (i, record) in form.beneficiaries.iter().enumerate() {
        if let Some(rule) = check_beneficiary(record) {
            return Err(ValidationError::beneficiary(rule, i + 1));
        }
    }
    Ok(())
}
