use super::beneficiary::{BeneficiaryRecord, ChildAge};
use super::form::FormState;
use super::validation::{ValidationError, validate};
use serde::Serialize;

/// JSON body sent to the sheet endpoint.
///
/// Keys are the sheet's column names. The staff member's role is collected
/// on the form but is not part of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub general: GeneralPayload,
    pub beneficiarios: Vec<BeneficiaryPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralPayload {
    pub direccion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryPayload {
    pub nombre_funcionario: String,
    pub apellido_funcionario: String,
    pub apellido2_funcionario: String,
    pub nombre_hijo: String,
    pub sexo: String,
    pub edad: ChildAge,
}

impl BeneficiaryPayload {
    fn from_record(record: &BeneficiaryRecord, age: ChildAge) -> Self {
        Self {
            nombre_funcionario: record.staff_first_name.clone(),
            apellido_funcionario: record.staff_last_name1.clone(),
            apellido2_funcionario: record.staff_last_name2.clone(),
            nombre_hijo: record.child_name.clone(),
            sexo: record.child_sex.clone(),
            edad: age,
        }
    }
}

impl TryFrom<&FormState> for SubmissionPayload {
    type Error = ValidationError;

    /// Validates the form and builds the body from it. Values are sent as
    /// entered; only the age is coerced.
    fn try_from(form: &FormState) -> Result<Self, Self::Error> {
        validate(form)?;

        let beneficiarios = form
            .beneficiaries
            .iter()
            .filter_map(|record| {
                ChildAge::parse(&record.child_age)
                    .map(|age| BeneficiaryPayload::from_record(record, age))
            })
            .collect();

        Ok(Self {
            general: GeneralPayload {
                direccion: form.general.department.clone(),
            },
            beneficiarios,
        })
    }
}
