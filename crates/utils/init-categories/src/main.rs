//! # Initialize Categories Utility
//!
//! Prints the category taxonomy for manual entry in the Firestore console,
//! or with `--commit` writes it to Firestore as one atomic batch.
//!
//! ## Usage
//!
//! ```bash
//! # Dry run: print documents, write nothing
//! cargo run --package init-categories --bin init_categories
//!
//! # Write all documents to the collection
//! cargo run --package init-categories --bin init_categories -- --commit
//! ```
//!
//! Exits with status 1 if any step fails.

use clap::Parser;
use lib_core::config::{validate_collection_id, DEFAULT_CATEGORIES_COLLECTION};
use lib_core::{
    list_categories, seed_categories, AppError, Config, SeedMode, SeedOutcome, Service,
};
use lib_firebase::{FirebaseContext, FirestoreClient};
use lib_utils::now_utc;
use std::path::PathBuf;
use std::process::ExitCode;

/// Seed the category taxonomy into Firestore.
#[derive(Debug, Parser)]
#[command(name = "init_categories", version)]
struct Args {
    /// Write the documents instead of printing them
    #[arg(long)]
    commit: bool,

    /// Service account key file (commit mode only)
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Target collection
    #[arg(long, env = "CATEGORIES_COLLECTION", default_value = DEFAULT_CATEGORIES_COLLECTION)]
    collection: String,
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
    let records = list_categories(now_utc());
    let mode = if args.commit { SeedMode::Commit } else { SeedMode::DryRun };

    // A dry run never connects, so only the collection name matters.
    let store = match mode {
        SeedMode::DryRun => {
            validate_collection_id(&args.collection)?;
            None
        }
        SeedMode::Commit => {
            let mut config =
                Config::from_env()?.with_categories_collection(args.collection.as_str());
            if let Some(path) = args.credentials {
                config = config.with_credentials_path(path);
            }
            let ctx = FirebaseContext::connect(config, &[Service::Firestore]).await?;
            Some(ctx.firestore()?)
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = seed_categories::<FirestoreClient, _>(
        mode,
        store.as_ref(),
        &mut out,
        &args.collection,
        &records,
    )
    .await?;

    if let SeedOutcome::Rendered(count) = outcome {
        tracing::info!("Printed {} document(s); rerun with --commit to write them", count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_run(collection: &str) -> Args {
        Args {
            commit: false,
            credentials: Some(PathBuf::from("/nonexistent/firebase-admin-key.json")),
            collection: collection.to_string(),
        }
    }

    #[tokio::test]
    async fn test_dry_run_ignores_connection_settings() {
        // Only test in this binary that touches HTTP_TIMEOUT_SECS.
        std::env::set_var("HTTP_TIMEOUT_SECS", "soon");

        let result = run(dry_run("categories")).await;

        std::env::remove_var("HTTP_TIMEOUT_SECS");
        assert!(result.is_ok(), "dry run failed: {:?}", result.err());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_nested_collection() {
        let err = run(dry_run("app/categories")).await.unwrap_err();

        assert_eq!(AppError::code_of(&*err), "Initialization");
    }
}
