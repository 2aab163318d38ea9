//! Event Registration CLI
//!
//! Commands: validate, submit, render, session
//! Outputs JSON to stdout (render and session print the text form)
//! Returns 2 when the form has validation errors

use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use event_registration::{
    validate, ConfirmationNotice, Field, FormController, FormValues, FormView, Session,
    SubmitOutcome,
};

#[derive(Parser)]
#[command(name = "event-registration")]
#[command(about = "Event Registration Form - validate and submit registrations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate form values and print the error map
    Validate {
        /// JSON payload (FormValues)
        #[arg(short, long)]
        payload: String,
    },

    /// Submit form values; prints the confirmation on success
    Submit {
        /// JSON payload (FormValues)
        #[arg(short, long)]
        payload: String,
    },

    /// Print the form as it would be displayed
    Render {
        /// JSON payload (FormValues); empty form when omitted
        #[arg(short, long)]
        payload: Option<String>,

        /// Show inline errors for the payload
        #[arg(long)]
        validate: bool,
    },

    /// Read input events from stdin, one per line
    Session,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn parse_values(payload: &str) -> Result<FormValues, ExitCode> {
    serde_json::from_str(payload).map_err(|e| {
        let output = serde_json::json!({
            "valid": false,
            "error": format!("Invalid payload: {}", e),
        });
        println!("{}", output);
        ExitCode::FAILURE
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            true
        }
        Err(e) => {
            eprintln!(r#"{{"error": "Serialization error: {}"}}"#, e);
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log);

    match cli.command {
        Commands::Validate { payload } => {
            let values = match parse_values(&payload) {
                Ok(v) => v,
                Err(code) => return code,
            };

            let errors = validate(&values);
            let output = serde_json::json!({
                "valid": errors.is_empty(),
                "errors": errors,
            });
            if !print_json(&output) {
                ExitCode::FAILURE
            } else if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)  // Validation failure
            }
        }

        Commands::Submit { payload } => {
            let values = match parse_values(&payload) {
                Ok(v) => v,
                Err(code) => return code,
            };

            // replay the payload as input events so reset returns to an empty form
            let mut form = FormController::new();
            for field in Field::ALL {
                if let Err(e) = form.handle_change(field, values.input(field)) {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            }

            let mut notice = ConfirmationNotice::new(io::stdout().lock());
            match form.handle_submit(&mut notice) {
                Ok(SubmitOutcome::Accepted(_)) => ExitCode::SUCCESS,
                Ok(SubmitOutcome::Rejected(errors)) => {
                    let output = serde_json::json!({
                        "success": false,
                        "errors": errors,
                    });
                    if print_json(&output) {
                        ExitCode::from(2)
                    } else {
                        ExitCode::FAILURE
                    }
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", output);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Render { payload, validate: show_errors } => {
            let values = match payload.as_deref().map(parse_values) {
                Some(Ok(v)) => v,
                Some(Err(code)) => return code,
                None => FormValues::default(),
            };

            let errors = if show_errors { validate(&values) } else { Default::default() };
            println!("{}", FormView::build(&values, &errors));
            ExitCode::SUCCESS
        }

        Commands::Session => {
            let mut session = Session::new(FormController::new());
            match session.run(io::stdin().lock(), io::stdout().lock()) {
                Ok(summary) => {
                    tracing::info!(
                        accepted = summary.accepted,
                        rejected = summary.rejected,
                        bad_commands = summary.bad_commands,
                        "session finished"
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
