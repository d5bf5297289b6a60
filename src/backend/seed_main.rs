/**
 * studentleave Seed Tool
 *
 * Applies migrations and creates the default admin account, plus the demo
 * accounts and their pending requests with `--demo`. Safe to run more than once.
 */

#[cfg(feature = "ssr")]
use clap::Parser;

/// Create the initial accounts of a studentleave database
#[cfg(feature = "ssr")]
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Database to seed
    #[clap(long, env = "DATABASE_URL", default_value = "sqlite://studentleave.db")]
    database_url: String,

    /// Also create demo students, a teacher, a second admin and pending requests
    #[clap(long)]
    demo: bool,

    /// bcrypt work factor for the seeded passwords
    #[clap(long, env = "BCRYPT_COST", default_value_t = 12)]
    bcrypt_cost: u32,
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let pool = studentleave::backend::server::config::load_database(&args.database_url).await?;
    let report = studentleave::backend::seed::seed_all(&pool, args.demo, args.bcrypt_cost).await?;

    for outcome in &report.users {
        let user = outcome.user();
        let state = if outcome.was_created() { "created" } else { "exists" };
        println!("{:<8} {:<8} {}", state, user.role.as_str(), user.email);
    }
    if args.demo {
        println!("{} demo leave request(s) created", report.leave_requests);
    }

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("The seed tool requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin studentleave-seed --features ssr");
    std::process::exit(1);
}
