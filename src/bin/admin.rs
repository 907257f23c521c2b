//! CLI administration tool for aqua-dive.
//!
//! Provides commands for managing staff accounts and performing database
//! operations without requiring HTTP API access. Every `/api/user` route
//! sits behind the auth gate, so the first account has to come from here.
//!
//! # Usage
//!
//! ```bash
//! # Create a staff account
//! cargo run --bin admin -- user create
//!
//! # List all accounts
//! cargo run --bin admin -- user list
//!
//! # Delete an account by id or email
//! cargo run --bin admin -- user delete diver@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//!
//! # Features
//!
//! - **Account Management**: Create, list, and delete staff accounts
//! - **Database Tools**: Connection checks and info queries
//! - **Interactive Prompts**: User-friendly CLI with confirmation dialogs
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use aqua_dive::domain::entities::NewUser;
use aqua_dive::domain::repositories::UserRepository;
use aqua_dive::infrastructure::persistence::PgUserRepository;
use aqua_dive::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing aqua-dive.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage staff accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new staff account
    Create {
        /// Display name (e.g., "Marina")
        #[arg(short, long)]
        username: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Custom password (optional, auto-generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Delete an account
    Delete {
        /// Account id or email to delete
        id_or_email: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            email,
            password,
            yes,
        } => {
            create_user(repo, username, email, password, yes).await?;
        }
        UserAction::List => {
            list_users(repo).await?;
        }
        UserAction::Delete { id_or_email } => {
            delete_user(repo, id_or_email).await?;
        }
    }

    Ok(())
}

/// Creates a new staff account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username and email (or use provided)
/// 2. Generate random password or use provided value
/// 3. Display account details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash password with Argon2
/// 6. Store in database
/// 7. Display login instructions
///
/// # Security
///
/// - Only the Argon2 hash is stored in the database
/// - Raw password is displayed once and cannot be retrieved later
async fn create_user(
    repo: Arc<PgUserRepository>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🤿 Create Staff Account".bright_blue().bold());
    println!();

    // Get account identity
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .with_initial_text("@example.com")
            .interact_text()?,
    };

    // Generate or use provided password
    let password_value = match password {
        Some(p) => {
            println!("{}", "⚠️  Using provided password".yellow());
            p
        }
        None => {
            let generated = generate_password();
            println!("{}", "✨ Generated new password".green());
            generated
        }
    };

    // Show account details
    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!("  Password: {}", password_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    // Confirm
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    // Hash password
    let password_hash = hash_password(&password_value)?;

    // Save to database
    let user_id = repo
        .create(NewUser {
            username,
            email: email.clone(),
            password_hash,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!();
    println!("  ID: {}", user_id.to_string().bright_white().bold());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/api/auth/login \\\n    -H \"Content-Type: application/json\" \\\n    -d '{{\"email\": \"{}\", \"password\": \"...\"}}'",
        email.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all staff accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Staff Accounts
///
///   ID  Username             Email                          Created
///   ───────────────────────────────────────────────────────────────────────
///   1   Marina               marina@example.com             2026-01-15 10:30
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Staff Accounts".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.user_id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes an account by id or email with confirmation prompt.
///
/// # Lookup
///
/// - If input is numeric, lookup by id
/// - Otherwise, lookup by email (exact match)
///
/// # Safety
///
/// - Requires confirmation (default: No)
async fn delete_user(repo: Arc<PgUserRepository>, id_or_email: String) -> Result<()> {
    println!("{}", "🗑️  Delete Staff Account".bright_blue().bold());
    println!();

    // Try to find by id or email
    let user = match id_or_email.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_email(&id_or_email)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let user = user.context("Account not found")?;

    println!("  Username: {}", user.username.cyan());
    println!("  Email:    {}", user.email.cyan());
    println!("  ID:       {}", user.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this account?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.delete(user.user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete account: {}", e))?;

    println!();
    println!("{}", "✅ Account deleted successfully!".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let tours_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tours")
                .fetch_one(pool)
                .await?;

            let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Tours:      {}",
                tours_count.to_string().bright_green().bold()
            );
            println!(
                "  Accounts:   {}",
                users_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

/// Generates a random password for a fresh account.
///
/// # Format
///
/// - Length: 16 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 16;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
