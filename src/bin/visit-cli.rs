use clap::{Parser, Subcommand};
use visit_sdk::VisitClient;

#[derive(Parser)]
#[command(name = "visit-cli")]
#[command(about = "Smoke-test CLI for a deployed visit API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "VISIT_API_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the health endpoint
    Health,
    /// Create a visit
    Create {
        /// Visit id; the server derives one from the current time when omitted
        #[arg(long)]
        id: Option<String>,
    },
    /// Read a visit back
    Get { id: String },
    /// Health check, then create and read back a test visit
    Smoke,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = VisitClient::new(&cli.url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        Commands::Create { id } => {
            let id = client.create_visit(id.as_deref()).await?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        Commands::Get { id } => {
            let visit = client.get_visit(&id).await?;
            println!("{}", serde_json::to_string_pretty(&visit)?);
        }
        Commands::Smoke => {
            if !smoke(&client).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn smoke(client: &VisitClient) -> Result<bool, Box<dyn std::error::Error>> {
    let health = client.health().await?;
    if health.status != "ok" {
        eprintln!("✗ health check returned status {:?}", health.status);
        return Ok(false);
    }
    println!("✓ health check passed");

    let test_id = format!("test-{}", chrono::Utc::now().timestamp_millis());
    let created = client.create_visit(Some(&test_id)).await?;
    if created != test_id {
        eprintln!("✗ created id {} does not match {}", created, test_id);
        return Ok(false);
    }
    println!("✓ visit {} created", created);

    match client.get_visit(&test_id).await? {
        Some(visit) if visit.id == test_id && visit.ts.is_some() => {
            println!("✓ visit {} read back (ts {})", visit.id, visit.ts.unwrap_or_default());
            Ok(true)
        }
        other => {
            eprintln!("✗ unexpected read-back result: {:?}", other);
            Ok(false)
        }
    }
}
