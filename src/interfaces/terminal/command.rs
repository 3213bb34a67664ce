use crate::domain::beneficiary::BeneficiaryField;
use crate::domain::general::GeneralField;
use crate::error::{RegistryError, Result};
use std::str::FromStr;

/// One line typed into the interactive session.
///
/// Beneficiaries are addressed by their 1-based position as shown by `show`;
/// the parsed command carries the 0-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Departments,
    SetGeneral {
        field: GeneralField,
        value: String,
    },
    SetBeneficiary {
        index: usize,
        field: BeneficiaryField,
        value: String,
    },
    Add,
    Remove {
        index: usize,
    },
    Validate,
    Submit,
    Quit,
}

pub const HELP: &str = "\
Comandos:
  show                         muestra el formulario
  departments                  lista las direcciones disponibles
  set department <código>      elige la dirección
  set <n> <campo> <valor>      edita el beneficiario n (campo: staffFirstName,
                               staffLastName1, staffLastName2, role, childName,
                               childSex, childAge)
  add                          agrega un beneficiario
  remove <n>                   elimina el beneficiario n
  validate                     revisa el formulario
  submit                       envía el formulario
  quit                         sale";

/// Splits off the first word; the rest keeps its inner spacing.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], text[at..].trim_start()),
        None => (text, ""),
    }
}

fn position(word: &str) -> Result<usize> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(RegistryError::InvalidCommand(format!(
            "expected a beneficiary number starting at 1, got {word:?}"
        ))),
    }
}

impl FromStr for Command {
    type Err = RegistryError;

    fn from_str(line: &str) -> Result<Self> {
        let (verb, rest) = split_word(line.trim_end());
        let command = match verb {
            "help" | "?" => Command::Help,
            "show" => Command::Show,
            "departments" => Command::Departments,
            "add" => Command::Add,
            "validate" => Command::Validate,
            "submit" => Command::Submit,
            "quit" | "exit" => Command::Quit,
            "remove" => Command::Remove {
                index: position(rest.trim())?,
            },
            "set" => {
                let (target, rest) = split_word(rest);
                if target.is_empty() {
                    return Err(RegistryError::InvalidCommand("set needs a target".into()));
                }
                match target.parse::<GeneralField>() {
                    Ok(field) => Command::SetGeneral {
                        field,
                        value: rest.to_string(),
                    },
                    Err(_) => {
                        let index = position(target)?;
                        let (field, value) = split_word(rest);
                        Command::SetBeneficiary {
                            index,
                            field: field.parse()?,
                            value: value.to_string(),
                        }
                    }
                }
            }
            other => return Err(RegistryError::InvalidCommand(other.to_string())),
        };
        Ok(command)
    }
}
