use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational units a staff member can register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Daj,
    Daf,
    Secplan,
    Ugrd,
    Jpl,
    Sp,
    Ssgg,
    Dideco,
    Transito,
    Dom,
    Contraloria,
    Rrhh,
    Adm,
    Secmun,
    Alc,
}

impl Department {
    pub const ALL: [Department; 15] = [
        Department::Daj,
        Department::Daf,
        Department::Secplan,
        Department::Ugrd,
        Department::Jpl,
        Department::Sp,
        Department::Ssgg,
        Department::Dideco,
        Department::Transito,
        Department::Dom,
        Department::Contraloria,
        Department::Rrhh,
        Department::Adm,
        Department::Secmun,
        Department::Alc,
    ];

    /// The code transmitted in the payload.
    pub fn code(&self) -> &'static str {
        match self {
            Department::Daj => "DAJ",
            Department::Daf => "DAF",
            Department::Secplan => "SECPLAN",
            Department::Ugrd => "UGRD",
            Department::Jpl => "JPL",
            Department::Sp => "SP",
            Department::Ssgg => "SSGG",
            Department::Dideco => "DIDECO",
            Department::Transito => "TRANSITO",
            Department::Dom => "DOM",
            Department::Contraloria => "CONTRALORIA",
            Department::Rrhh => "RRHH",
            Department::Adm => "ADM",
            Department::Secmun => "SECMUN",
            Department::Alc => "ALC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Department::Daj => "Dirección de Asesoría Jurídica",
            Department::Daf => "Dirección de Administración y Finanzas",
            Department::Secplan => "Secretaría Comunal de Planificación",
            Department::Ugrd => "Unidad de Gestión de Riesgos y Desastres",
            Department::Jpl => "Juzgado de Policía Local",
            Department::Sp => "Dirección de Seguridad Pública",
            Department::Ssgg => "Dirección de Servicios Generales",
            Department::Dideco => "Dirección de Desarrollo Comunitario",
            Department::Transito => "Dirección de Tránsito y Transportes",
            Department::Dom => "Dirección de Obras Municipales",
            Department::Contraloria => "Dirección de Control Interno",
            Department::Rrhh => "Dirección de Recursos Humanos",
            Department::Adm => "Administración Municipal",
            Department::Secmun => "Secretaría Municipal",
            Department::Alc => "Alcaldía",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Department {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Department::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| RegistryError::UnknownDepartment(s.to_string()))
    }
}

/// Editable fields of [`GeneralInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralField {
    Department,
}

impl FromStr for GeneralField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "department" | "direccion" | "dirección" => Ok(GeneralField::Department),
            other => Err(RegistryError::UnknownField(other.to_string())),
        }
    }
}

/// Information shared by every beneficiary in one submission.
///
/// The department is kept as the raw selected value; an empty string means
/// nothing has been selected yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub department: String,
}

impl GeneralInfo {
    pub fn set(&mut self, field: GeneralField, value: impl Into<String>) {
        match field {
            GeneralField::Department => self.department = value.into(),
        }
    }

    /// The selected department, if the raw value is one of the known codes.
    pub fn known_department(&self) -> Option<Department> {
        self.department.parse().ok()
    }
}
