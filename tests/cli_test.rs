mod common;

use assert_cmd::Command;
use assert_cmd::cargo_bin;
use common::{SAMPLE_DRAFT, SAMPLE_PAYLOAD, write_draft};
use predicates::prelude::*;

fn registry() -> Command {
    let mut cmd = Command::new(cargo_bin!("holiday-registry"));
    cmd.env_remove("HOLIDAY_SHEETS_ENDPOINT")
        .env_remove("HOLIDAY_UPLOADER_ENDPOINT")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_validate_ok() {
    let draft = write_draft(SAMPLE_DRAFT);

    registry()
        .arg("validate")
        .arg(draft.path())
        .assert()
        .success()
        .stdout("OK\n");
}

#[test]
fn test_validate_reports_first_violation() {
    let draft = write_draft(
        r#"{"general": {"department": "DAF"},
            "beneficiaries": [{"staffFirstName": "Juan", "childAge": "abc"}]}"#,
    );

    registry()
        .arg("validate")
        .arg(draft.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Beneficiario #1: falta el primer apellido del funcionario.",
        ));
}

#[test]
fn test_payload_matches_sheet_format() {
    let draft = write_draft(SAMPLE_DRAFT);

    registry()
        .arg("payload")
        .arg(draft.path())
        .assert()
        .success()
        .stdout(format!("{SAMPLE_PAYLOAD}\n"));
}

#[test]
fn test_submit_dry_run() {
    let draft = write_draft(SAMPLE_DRAFT);

    registry()
        .arg("submit")
        .arg(draft.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ok] ¡Enviado!"));
}

#[test]
fn test_submit_without_endpoint_fails() {
    let draft = write_draft(SAMPLE_DRAFT);

    registry()
        .arg("submit")
        .arg(draft.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("HOLIDAY_SHEETS_ENDPOINT"));
}

#[test]
fn test_submit_invalid_draft_sends_nothing() {
    let draft = write_draft(r#"{"general": {"department": " "}}"#);

    // The endpoint is unreachable; validation must stop before any request.
    registry()
        .arg("submit")
        .arg(draft.path())
        .arg("--endpoint")
        .arg("http://127.0.0.1:9/exec")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[aviso] Validación incompleta: La dirección es obligatoria.",
        ))
        .stderr(predicate::str::contains("HTTP error").not());
}

#[test]
fn test_interactive_session() {
    let script = "\
set department daf
set 1 staffFirstName Juan
set 1 staffLastName1 Perez
set 1 staffLastName2 Cortes
set 1 childName Ana Ramires
set 1 childSex femenino
set 1 childAge 7
add
set 2 staffFirstName Rosa
remove 2
n
remove 2
s
validate
submit
show
quit
";

    registry()
        .arg("interactive")
        .arg("--dry-run")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Beneficiario #2 agregado."))
        .stdout(predicate::str::contains("Se eliminará Rosa. [s/N]: "))
        .stdout(predicate::str::contains("Sin cambios."))
        .stdout(predicate::str::contains("[ok] Eliminado"))
        .stdout(predicate::str::contains("OK\n"))
        .stdout(predicate::str::contains("[ok] ¡Enviado!: Simulación: no se envió nada."))
        .stdout(predicate::str::contains(
            "Dirección: DAF (Dirección de Administración y Finanzas)",
        ))
        .stdout(predicate::str::contains(
            "#1 Juan Perez Cortes | cargo:  | hijo/a: Ana Ramires | sexo: Femenino | edad: 7",
        ))
        .stdout(predicate::str::contains("#2 Rosa").not());
}

#[test]
fn test_interactive_reports_bad_input_and_continues() {
    registry()
        .arg("interactive")
        .arg("--dry-run")
        .write_stdin("set department NASA\nremove 4\nfly\nsubmit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown department: NASA"))
        .stdout(predicate::str::contains("No existe el beneficiario #4."))
        .stdout(predicate::str::contains("Invalid command: fly"))
        .stdout(predicate::str::contains("La dirección es obligatoria."));
}

#[test]
fn test_removing_last_row_keeps_a_blank_one() {
    registry()
        .arg("interactive")
        .arg("--assume-yes")
        .arg("--dry-run")
        .write_stdin("set 1 staffFirstName Juan\nremove 1\nshow\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Se eliminará Juan. [s/N]: s"))
        .stdout(predicate::str::contains("#1 Beneficiario #1 |"));
}
