use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use olive_mill::{api, db, shift};

#[derive(Parser)]
#[command(name = "olive-mill")]
#[command(about = "Management backend for an olive-oil mill")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
    /// Print where the current instant falls in the 06:00-to-06:00 day
    Shift,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "olive_mill=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting olive-mill server on port {}", port);

    let db = db::Database::open_default()?;
    db.migrate()?;

    let auth = api::AuthConfig::from_env();
    let app = api::create_router(db, auth);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("olive-mill server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        Some(Commands::Shift) => {
            let day = shift::OperationalDay::current();
            println!(
                "{} | {:.1}% through the day ({} -> {})",
                day.shift_label_ar(),
                day.progress_percent,
                day.day_start,
                day.day_end
            );
        }
        None => serve(3001).await?,
    }

    Ok(())
}
