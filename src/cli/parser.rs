use crate::export::ExportFormat;
use crate::models::HeaderField;
use clap::{Parser, Subcommand};

/// Command-line interface definition for photoreport
/// CLI application to compile and print a shared photo-delivery report
#[derive(Parser)]
#[command(
    name = "photoreport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compile, share and print a construction-site photo-delivery report",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or a shared network file)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,
    },

    /// Print the anonymous id used to sign edits
    Whoami,

    /// Print the current report
    Show {
        /// Print the stored JSON document instead of the text view
        #[arg(long)]
        json: bool,
    },

    /// Set a header field (empty value clears it)
    Header {
        #[arg(value_enum)]
        field: HeaderField,

        /// New value (date: YYYY-MM-DD, times: HH:MM)
        value: String,
    },

    /// Set the title of a page
    Title {
        /// Page index (0-based)
        page: usize,
        value: String,
    },

    /// Set the caption of a photo
    Caption {
        /// Page index (0-based)
        page: usize,
        /// Photo index within the page (0-based)
        photo: usize,
        value: String,
    },

    /// Copy the caption of the previous cell into this one
    CopyCaption {
        page: usize,
        photo: usize,
    },

    /// Copy the title of the previous page into this one
    CopyTitle {
        page: usize,
    },

    /// Append a page with 6 empty photo slots
    AddPage,

    /// Remove a page (no confirmation)
    RemovePage {
        page: usize,
    },

    /// Render the printable report to PDF
    Print {
        /// Output PDF file
        #[arg(long, short)]
        file: String,

        /// Attach an image for this print only: PAGE:PHOTO=path
        #[arg(long = "image", value_name = "PAGE:PHOTO=PATH")]
        images: Vec<String>,

        /// Overwrite the output file without asking
        #[arg(long)]
        force: bool,
    },

    /// Export the stored document
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, short)]
        file: String,

        #[arg(long)]
        force: bool,
    },

    /// Save as Word document (not available)
    SaveWord,

    /// Edit the report interactively with autosave
    Session,

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
