//! Registrar menu binary.
//!
//! # Usage
//!
//! ```bash
//! # Defaults mirror the classic registry sizes
//! registrar
//!
//! # Smaller collections, verbose lifecycle logging
//! registrar --courses 10 --students 10 --log-level debug
//! ```

use clap::Parser;
use registrar_core::{Registry, RegistryConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Interactive course-enrollment registry
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(about = "Course-enrollment registry with an interactive menu")]
#[command(version)]
struct Args {
    /// Course catalog capacity
    #[arg(long, default_value = "50")]
    courses: usize,

    /// Student body capacity
    #[arg(long, default_value = "50")]
    students: usize,

    /// Offering schedule capacity
    #[arg(long, default_value = "50")]
    offerings: usize,

    /// Per-course prerequisite list capacity
    #[arg(long, default_value = "30")]
    prereqs: usize,

    /// Per-student taken-course list capacity
    #[arg(long, default_value = "30")]
    taken: usize,

    /// Per-offering attendee roster capacity
    #[arg(long, default_value = "50")]
    attendees: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Logs go to stderr; stdout belongs to the menu.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = RegistryConfig {
        max_courses: args.courses,
        max_students: args.students,
        max_offerings: args.offerings,
        max_prereqs: args.prereqs,
        max_taken: args.taken,
        max_attendees: args.attendees,
    };
    tracing::debug!(?config, "registry configured");

    let mut registry = Registry::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    registrar_cli::run(&mut stdin.lock(), &mut stdout.lock(), &mut registry)?;

    Ok(())
}
