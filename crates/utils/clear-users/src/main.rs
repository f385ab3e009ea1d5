//! # Clear Users Utility
//!
//! This binary deletes every user registered in Firebase Authentication.
//!
//! **WARNING**: This is a destructive operation that cannot be undone.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package clear-users --bin clear_users -- [--credentials key.json] [--yes]
//! ```
//!
//! The program will:
//! 1. Load the service account key and connect to Firebase
//! 2. List the project's users (first page, up to 1000)
//! 3. Ask for confirmation (skipped with `--yes`)
//! 4. Delete all listed users concurrently
//! 5. Report the number of users deleted
//!
//! Exits with status 1 if any step fails.

use clap::Parser;
use lib_core::{delete_principals, purge_all_users, AppError, Config, IdentityService, Service};
use lib_firebase::FirebaseContext;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Delete every Firebase Authentication user of a project.
#[derive(Debug, Parser)]
#[command(name = "clear_users", version)]
struct Args {
    /// Service account key file (defaults to GOOGLE_APPLICATION_CREDENTIALS
    /// or ./firebase-admin-key.json)
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    lib_core::log::init_tracing();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = AppError::code_of(&*err), "{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    println!("============================================");
    println!("  Clear Firebase Users Utility");
    println!("============================================");
    println!();
    println!("WARNING: This will delete ALL Firebase Authentication users!");
    println!("This operation cannot be undone.");
    println!();

    let mut config = Config::from_env()?;
    if let Some(path) = args.credentials {
        config = config.with_credentials_path(path);
    }

    // Connect to Firebase
    println!("Connecting to Firebase...");
    let ctx = FirebaseContext::connect(config, &[Service::Auth]).await?;
    let identity = ctx.identity()?;
    println!("Connected to project {}.", ctx.project_id());
    println!();

    let report = if args.yes {
        purge_all_users(&identity).await?
    } else {
        let page = identity
            .list_principals()
            .await
            .map_err(|e| e.reclassify(AppError::Listing))?;

        if page.principals.is_empty() {
            println!("No users found in the project.");
            println!("Nothing to delete.");
            return Ok(());
        }

        println!("Found {} user(s) in the project.", page.principals.len());
        if page.is_truncated() {
            println!("More users exist than one listing returns; run again afterwards.");
        }
        println!();

        if !confirm("Are you sure you want to delete all users? (yes/no): ")? {
            println!("Operation cancelled.");
            return Ok(());
        }

        println!();
        println!("Deleting all users...");
        delete_principals(&identity, &page.principals).await?
    };

    println!("Successfully deleted {} user(s).", report.deleted_count);
    println!();
    println!("Cleanup complete.");

    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "yes" || answer == "y")
}
