use crate::error::{RegistryError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sex of the registered child, as transmitted to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSex {
    Female,
    Male,
    Other,
}

impl ChildSex {
    pub const ALL: [ChildSex; 3] = [ChildSex::Female, ChildSex::Male, ChildSex::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChildSex::Female => "Femenino",
            ChildSex::Male => "Masculino",
            ChildSex::Other => "Otro",
        }
    }
}

impl fmt::Display for ChildSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChildSex {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        ChildSex::ALL
            .into_iter()
            .find(|sex| sex.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| RegistryError::InvalidValue(format!("unknown sex: {s}")))
    }
}

/// Editable fields of a [`BeneficiaryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeneficiaryField {
    StaffFirstName,
    StaffLastName1,
    StaffLastName2,
    Role,
    ChildName,
    ChildSex,
    ChildAge,
}

impl FromStr for BeneficiaryField {
    type Err = RegistryError;

    /// Accepts camelCase, kebab-case and the Spanish payload keys.
    fn from_str(s: &str) -> Result<Self> {
        let field = match s {
            "staffFirstName" | "staff-first-name" | "nombreFuncionario" => {
                BeneficiaryField::StaffFirstName
            }
            "staffLastName1" | "staff-last-name1" | "staff-last-name-1" | "apellidoFuncionario" => {
                BeneficiaryField::StaffLastName1
            }
            "staffLastName2" | "staff-last-name2" | "staff-last-name-2"
            | "apellido2Funcionario" => BeneficiaryField::StaffLastName2,
            "role" | "cargo" => BeneficiaryField::Role,
            "childName" | "child-name" | "nombreHijo" => BeneficiaryField::ChildName,
            "childSex" | "child-sex" | "sexo" => BeneficiaryField::ChildSex,
            "childAge" | "child-age" | "edad" => BeneficiaryField::ChildAge,
            other => return Err(RegistryError::UnknownField(other.to_string())),
        };
        Ok(field)
    }
}

/// One child of a staff member registered for the program.
///
/// Every field holds the raw text as entered. Nothing is checked on edit;
/// see [`crate::domain::validation`] for the submission rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeneficiaryRecord {
    pub staff_first_name: String,
    pub staff_last_name1: String,
    pub staff_last_name2: String,
    pub role: String,
    pub child_name: String,
    pub child_sex: String,
    #[serde(deserialize_with = "deserialize_raw_age")]
    pub child_age: String,
}

impl BeneficiaryRecord {
    pub fn set(&mut self, field: BeneficiaryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BeneficiaryField::StaffFirstName => self.staff_first_name = value,
            BeneficiaryField::StaffLastName1 => self.staff_last_name1 = value,
            BeneficiaryField::StaffLastName2 => self.staff_last_name2 = value,
            BeneficiaryField::Role => self.role = value,
            BeneficiaryField::ChildName => self.child_name = value,
            BeneficiaryField::ChildSex => self.child_sex = value,
            BeneficiaryField::ChildAge => self.child_age = value,
        }
    }

    /// Staff member's name as shown in prompts, with a positional fallback.
    ///
    /// `position` is 1-based.
    pub fn display_name(&self, position: usize) -> String {
        let name = [
            self.staff_first_name.as_str(),
            self.staff_last_name1.as_str(),
            self.staff_last_name2.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

        let name = name.trim();
        if name.is_empty() {
            format!("Beneficiario #{position}")
        } else {
            name.to_string()
        }
    }
}

// Draft files may carry the age either as text or as a JSON number.
fn deserialize_raw_age<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match RawAge::deserialize(deserializer)? {
        RawAge::Text(text) => text,
        RawAge::Number(number) => number.to_string(),
        RawAge::Missing(()) => String::new(),
    })
}

/// A child's age after numeric coercion. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChildAge(f64);

impl ChildAge {
    /// Coerces raw input the way a numeric literal is read: surrounding
    /// whitespace is ignored, decimal/exponent and `0x`/`0o`/`0b` forms are
    /// accepted. Returns `None` for blank, unparsable, non-finite or negative
    /// input.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = coerce_number(raw)?;
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

// 2^53: beyond this an f64 no longer maps one-to-one onto integers.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for ChildAge {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.fract() == 0.0 && self.0 <= MAX_EXACT_INTEGER {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

fn coerce_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        // Digits only: no sign after the prefix, and no width limit.
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // Rust also accepts "inf" and "nan" spellings; those are non-finite and
    // rejected by the caller anyway.
    text.parse::<f64>().ok()
}
