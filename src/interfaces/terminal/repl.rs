use super::command::{Command, HELP};
use super::console::TerminalConsole;
use crate::application::session::{FormSession, RemoveOutcome, SubmitOutcome};
use crate::domain::beneficiary::{BeneficiaryField, ChildSex};
use crate::domain::form::FormState;
use crate::domain::general::{Department, GeneralField};
use crate::domain::validation::validate;
use crate::error::{RegistryError, Result};
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Renders the form the way `show` prints it.
pub fn render_form(form: &FormState) -> String {
    let department = match form.general.known_department() {
        Some(department) => format!("{} ({})", department.code(), department.label()),
        None if form.general.department.trim().is_empty() => "(sin seleccionar)".to_string(),
        None => form.general.department.clone(),
    };

    let mut out = format!("Dirección: {department}\n");
    for (i, b) in form.beneficiaries.iter().enumerate() {
        out.push_str(&format!(
            "#{} {} | cargo: {} | hijo/a: {} | sexo: {} | edad: {}\n",
            i + 1,
            b.display_name(i + 1),
            b.role,
            b.child_name,
            b.child_sex,
            b.child_age,
        ));
    }
    out
}

/// The dropdowns only offer known values; empty input unsets the field.
fn normalize_department(value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(value.parse::<Department>()?.code().to_string())
}

fn normalize_sex(value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(value.parse::<ChildSex>()?.as_str().to_string())
}

async fn apply<R, W>(
    command: Command,
    session: &FormSession,
    console: &TerminalConsole<R, W>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match command {
        Command::Help => console.write_line(HELP).await?,
        Command::Show => console.write(&render_form(&session.snapshot())).await?,
        Command::Departments => {
            for department in Department::ALL {
                console
                    .write_line(&format!("{:<12} {}", department.code(), department.label()))
                    .await?;
            }
        }
        Command::SetGeneral { field, value } => {
            let value = match field {
                GeneralField::Department => normalize_department(&value)?,
            };
            session.update_general_field(field, value);
        }
        Command::SetBeneficiary {
            index,
            field,
            value,
        } => {
            let value = match field {
                BeneficiaryField::ChildSex => normalize_sex(&value)?,
                _ => value,
            };
            session.update_beneficiary_field(index, field, value)?;
        }
        Command::Add => {
            let index = session.add_beneficiary();
            console
                .write_line(&format!("Beneficiario #{} agregado.", index + 1))
                .await?;
        }
        Command::Remove { index } => {
            if let RemoveOutcome::Cancelled = session.remove_beneficiary(index).await? {
                console.write_line("Sin cambios.").await?;
            }
        }
        Command::Validate => match validate(&session.snapshot()) {
            Ok(()) => console.write_line("OK").await?,
            Err(err) => console.write_line(&err.message()).await?,
        },
        Command::Submit => {
            // Outcomes other than "busy" were already shown by the prompter.
            if let SubmitOutcome::AlreadySubmitting = session.submit().await? {
                console.write_line("Ya hay un envío en curso.").await?;
            }
        }
        Command::Quit => {}
    }
    Ok(())
}

/// Reads commands until `quit` or end of input.
///
/// Bad input and rejected edits are reported and the session goes on; only
/// console I/O failures end it early.
pub async fn run<R, W>(session: &FormSession, console: &TerminalConsole<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    console
        .write_line("Programa de Navidad: registro de beneficiarios. Escribe `help` para ver los comandos.")
        .await?;

    loop {
        console.write("> ").await?;
        let Some(line) = console.read_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                console.write_line(&err.to_string()).await?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        if let Err(err) = apply(command, session, console).await {
            match err {
                RegistryError::IoError(_) => return Err(err),
                RegistryError::IndexOutOfRange { index, .. } => {
                    console
                        .write_line(&format!("No existe el beneficiario #{}.", index + 1))
                        .await?
                }
                other => console.write_line(&other.to_string()).await?,
            }
        }
    }
    Ok(())
}
