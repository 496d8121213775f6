//! Command-line interface implementation for thing.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

/// Command-line arguments structure for thing.
#[derive(Parser, Debug)]
#[command(author, version, about = "thing: create new projects from templates", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    New {
        /// Name of the project, also the directory it is created in
        #[arg(value_name = "NAME")]
        name: String,

        /// Path to a local template directory or a GitHub 'owner/repo'
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand => {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    }
}
