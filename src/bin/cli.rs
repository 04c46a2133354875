use catequesis::catequesis_auth::{
    Role, decode_unverified, issue_token, signer_from_config, verify_token_now,
};
use catequesis::catequesis_config::JwtConfig;
use catequesis::catequesis_core::hash_password;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "catequesis-cli")]
#[command(about = "Catequesis CLI - Operator tools for passwords and tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for the user directory file
    HashPassword {
        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Mint a token signed with JWT_SECRET
    IssueToken {
        #[arg(short = 's', long)]
        subject_id: i64,

        #[arg(short = 'e', long)]
        email: String,

        /// admin, teacher or staff
        #[arg(short = 'r', long)]
        role: Role,

        /// Lifetime in seconds (defaults to JWT_EXPIRY)
        #[arg(long)]
        ttl: Option<i64>,
    },
    /// Verify a token and print its claims
    VerifyToken { token: String },
    /// Print a token's claims WITHOUT verifying signature or expiry
    Inspect { token: String },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password } => handle_hash_password(password),
        Commands::IssueToken {
            subject_id,
            email,
            role,
            ttl,
        } => handle_issue_token(subject_id, &email, role, ttl),
        Commands::VerifyToken { token } => handle_verify_token(&token),
        Commands::Inspect { token } => handle_inspect(&token),
    }
}

fn load_jwt_config() -> JwtConfig {
    match JwtConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_hash_password(password: Option<String>) {
    let password = match password {
        Some(password) => password,
        None => match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    match hash_password(&password) {
        Ok(hash) => println!("{}", hash),
        Err(e) => {
            eprintln!("❌ Error hashing password: {}", e.error);
            std::process::exit(1);
        }
    }
}

fn handle_issue_token(subject_id: i64, email: &str, role: Role, ttl: Option<i64>) {
    let config = load_jwt_config();
    let ttl = ttl.unwrap_or(config.token_ttl_secs);
    if ttl <= 0 {
        eprintln!("❌ --ttl must be positive");
        std::process::exit(1);
    }

    let signer = signer_from_config(&config);
    match issue_token(subject_id, email, role.as_str(), signer.as_ref(), ttl) {
        Ok(token) => println!("{}", token),
        Err(e) => {
            eprintln!("❌ Error issuing token: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_verify_token(token: &str) {
    let config = load_jwt_config();
    let signer = signer_from_config(&config);

    match verify_token_now(token.trim(), signer.as_ref()) {
        Ok(claims) => {
            println!("✅ Token is valid");
            println!("   Subject: {}", claims.subject_id);
            println!("   Email:   {}", claims.email);
            println!("   Role:    {}", claims.role);
            println!("   Issued:  {}", format_timestamp(claims.issued_at));
            println!("   Expires: {}", format_timestamp(claims.expires_at));
        }
        Err(e) => {
            eprintln!("❌ Token rejected: {} ({})", e, e.reason());
            std::process::exit(1);
        }
    }
}

fn handle_inspect(token: &str) {
    match decode_unverified(token.trim()) {
        Some(claims) => {
            println!("⚠️  UNVERIFIED: signature and expiry were not checked");
            match serde_json::to_string_pretty(&claims) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            eprintln!("❌ Not a decodable token");
            std::process::exit(1);
        }
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
