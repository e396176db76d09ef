use std::io::{self, Write};

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use formdata_server::models::Role;

#[derive(Parser, Debug)]
#[command(name = "create_user", about = "Create a FormData user account")]
struct Args {
    /// Username for the account (must be unique).
    #[arg(long)]
    username: String,

    /// Password to store for this user.
    #[arg(long)]
    password: String,

    /// Role to assign (`user` or `admin`).
    #[arg(long, default_value = "user")]
    role: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let username = args.username.trim().to_string();

    if username.is_empty() || args.password.is_empty() {
        writeln!(io::stderr(), "error: username and password must not be empty")?;
        std::process::exit(1);
    }

    let role = match args.role.trim().to_lowercase().as_str() {
        "admin" => Role::Admin,
        "user" => Role::User,
        _ => {
            writeln!(
                io::stderr(),
                "error: unsupported role '{}'. Use 'user' or 'admin'.",
                args.role
            )?;
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    let user_id: Option<i32> = sqlx::query_scalar(
        "INSERT INTO users (username, password, role) VALUES ($1, $2, $3) ON CONFLICT (username) DO NOTHING RETURNING id",
    )
    .bind(&username)
    .bind(&args.password)
    .bind(role.as_str())
    .fetch_optional(&pool)
    .await?;

    let Some(user_id) = user_id else {
        writeln!(
            io::stderr(),
            "error: a user named '{username}' already exists."
        )?;
        std::process::exit(1);
    };

    println!("Created {} user '{username}' with id {user_id}", role.as_str());
    Ok(())
}
