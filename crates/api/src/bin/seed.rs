//! Administrative seeding tool.
//!
//! Usage:
//!
//! ```text
//! rubric-seed catalog            insert the faculty/course taxonomy
//! rubric-seed promote <email>    grant the admin flag to a user
//! ```
//!
//! Reads `DATABASE_URL` from the environment (or `.env`) and applies
//! migrations before doing anything else.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rubric_core::taxonomy::{course_count, FACULTIES};
use rubric_db::repositories::UserRepo;
use rubric_db::seed::seed_catalog;

/// Seed the catalog taxonomy or grant admin rights.
#[derive(Debug, Parser)]
#[command(name = "rubric-seed", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert the faculty/course taxonomy, skipping rows that exist.
    Catalog,

    /// Grant the admin flag to a user.
    Promote {
        /// Email address of an existing user.
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rubric_seed=info,rubric_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = rubric_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    rubric_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Command::Catalog => {
            let report = seed_catalog(&pool, FACULTIES)
                .await
                .context("Failed to seed catalog")?;
            tracing::info!(
                faculties_inserted = report.faculties_inserted,
                courses_inserted = report.courses_inserted,
                faculties_total = FACULTIES.len(),
                courses_total = course_count(),
                "Catalog seeded"
            );
        }
        Command::Promote { email } => {
            let updated = UserRepo::set_admin_by_email(&pool, &email, true)
                .await
                .context("Failed to update user")?;
            if !updated {
                bail!("No user with email {email}");
            }
            tracing::info!(%email, "Granted admin flag");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_catalog() {
        let cli = Cli::try_parse_from(["rubric-seed", "catalog"]).unwrap();
        assert!(matches!(cli.command, Command::Catalog));
    }

    #[test]
    fn parses_promote_email() {
        let cli = Cli::try_parse_from(["rubric-seed", "promote", "dean@example.com"]).unwrap();
        match cli.command {
            Command::Promote { email } => assert_eq!(email, "dean@example.com"),
            other => panic!("expected promote, got {other:?}"),
        }
    }

    #[test]
    fn promote_requires_email() {
        assert!(Cli::try_parse_from(["rubric-seed", "promote"]).is_err());
        assert!(Cli::try_parse_from(["rubric-seed", "reset"]).is_err());
    }
}
