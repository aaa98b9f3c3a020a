#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TransportStrategy;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-booking")]
#[command(about = "Direct booking and enquiry tool for the hotel's booking engine")]
pub struct CliConfig {
    #[arg(
        long,
        global = true,
        help = "Path to booking.toml (defaults to SKYHMS_* environment variables)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override today's date (YYYY-MM-DD)")]
    pub today: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the defaults, minimum dates and nights for a stay without submitting
    Quote(StayArgs),
    /// Validate a stay and submit it to the booking engine
    Book {
        #[command(flatten)]
        stay: StayArgs,

        #[arg(long, value_enum, help = "Override the configured transport")]
        transport: Option<TransportStrategy>,

        #[arg(long, help = "Treat unrecognised engine replies as failures")]
        assume_failure: bool,
    },
    /// Send a booking enquiry to the front desk by email
    Enquire(EnquiryArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct StayArgs {
    #[arg(long, help = "Check-in date (YYYY-MM-DD), defaults to today")]
    pub check_in: Option<String>,

    #[arg(long, help = "Check-out date (YYYY-MM-DD), defaults to the day after check-in")]
    pub check_out: Option<String>,

    #[arg(long, help = "Number of rooms, defaults to 1")]
    pub rooms: Option<String>,

    #[arg(long, help = "Room type shown in the booking summary")]
    pub room_type: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct EnquiryArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub check_in: String,

    #[arg(long)]
    pub check_out: String,

    #[arg(long, default_value = "")]
    pub guests: String,

    #[arg(long, default_value = "")]
    pub room_type: String,

    #[arg(long, default_value = "")]
    pub special_requests: String,
}
