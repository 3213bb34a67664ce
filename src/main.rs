use clap::{Parser, Subcommand};
use holiday_registry::application::session::{FormSession, SubmitOutcome};
use holiday_registry::config::Settings;
use holiday_registry::domain::payload::SubmissionPayload;
use holiday_registry::domain::ports::{FileUploader, SubmissionGatewayBox};
use holiday_registry::domain::validation::validate;
use holiday_registry::infrastructure::drive::DriveUploader;
use holiday_registry::infrastructure::in_memory::InMemoryGateway;
use holiday_registry::infrastructure::sheets::SheetsGateway;
use holiday_registry::interfaces::draft::load_draft;
use holiday_registry::interfaces::terminal::console::TerminalConsole;
use holiday_registry::interfaces::terminal::repl;
use miette::{IntoDiagnostic, Result, miette};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a saved form and report the first problem found
    Validate {
        /// Draft form (JSON)
        draft: PathBuf,
    },
    /// Print the JSON body that would be sent for a saved form
    Payload {
        /// Draft form (JSON)
        draft: PathBuf,
    },
    /// Validate a saved form and send it to the sheet
    Submit {
        /// Draft form (JSON)
        draft: PathBuf,

        /// Sheet endpoint; overrides HOLIDAY_SHEETS_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,

        /// Go through the whole submission without sending anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Fill in a form line by line on the terminal
    Interactive {
        /// Sheet endpoint; overrides HOLIDAY_SHEETS_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,

        /// Answer "yes" to every confirmation
        #[arg(long)]
        assume_yes: bool,

        /// Submit to an in-memory gateway instead of the sheet
        #[arg(long)]
        dry_run: bool,
    },
    /// Upload a file to a Drive folder
    Upload {
        file: PathBuf,

        #[arg(long)]
        folder_id: String,

        /// Upload endpoint; overrides HOLIDAY_UPLOADER_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn gateway(settings: &Settings, dry_run: bool) -> Result<SubmissionGatewayBox> {
    if dry_run {
        return Ok(Box::new(InMemoryGateway::accepting(Some(
            "Simulación: no se envió nada.".to_string(),
        ))));
    }
    let endpoint = settings.require_sheets_endpoint().into_diagnostic()?;
    Ok(Box::new(SheetsGateway::new(endpoint)))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Commands::Validate { draft } => {
            let form = load_draft(&draft).into_diagnostic()?;
            validate(&form).map_err(|err| miette!("{err}"))?;
            println!("OK");
        }
        Commands::Payload { draft } => {
            let form = load_draft(&draft).into_diagnostic()?;
            let payload = SubmissionPayload::try_from(&form).map_err(|err| miette!("{err}"))?;
            println!("{}", serde_json::to_string(&payload).into_diagnostic()?);
        }
        Commands::Submit {
            draft,
            endpoint,
            dry_run,
        } => {
            let settings = settings.with_overrides(endpoint, None);
            let form = load_draft(&draft).into_diagnostic()?;
            let console = Arc::new(TerminalConsole::stdio(false));
            let session =
                FormSession::with_state(form, Box::new(console), gateway(&settings, dry_run)?);

            match session.submit().await.into_diagnostic()? {
                SubmitOutcome::Accepted(_) => {}
                SubmitOutcome::Invalid(err) => return Err(miette!("{err}")),
                SubmitOutcome::Failed(message) => return Err(miette!("{message}")),
                SubmitOutcome::AlreadySubmitting => {
                    return Err(miette!("a submission is already in flight"));
                }
            }
        }
        Commands::Interactive {
            endpoint,
            assume_yes,
            dry_run,
        } => {
            let settings = settings.with_overrides(endpoint, None);
            let console = Arc::new(TerminalConsole::stdio(assume_yes));
            let session = FormSession::new(Box::new(console.clone()), gateway(&settings, dry_run)?);
            repl::run(&session, &*console).await.into_diagnostic()?;
        }
        Commands::Upload {
            file,
            folder_id,
            endpoint,
        } => {
            let settings = settings.with_overrides(None, endpoint);
            let uploader = DriveUploader::new(settings.require_uploader_endpoint().into_diagnostic()?);
            let contents = tokio::fs::read(&file).await.into_diagnostic()?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| miette!("{} is not a file", file.display()))?;

            let uploaded = uploader
                .upload(contents, &file_name, &folder_id)
                .await
                .into_diagnostic()?;
            println!("{}", uploaded.file_url);
        }
    }

    Ok(())
}
