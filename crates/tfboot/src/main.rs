mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tfboot", version)]
#[command(about = "Bootstrap a cloud bucket to use as a Terraform state backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the state backend (idempotent)
    Init {
        /// Cloud to bootstrap (aws/gcp/azure)
        #[arg(short, long)]
        cloud: String,
        /// Cloud provider region
        #[arg(short, long)]
        region: String,
        /// Prefix for the generated bucket name
        #[arg(short = 'n', long = "name-prefix")]
        name_prefix: Option<String>,
    },
    /// Print the bucket backing an already bootstrapped backend
    Show {
        /// Cloud to inspect (aws/gcp/azure)
        #[arg(short, long)]
        cloud: String,
        /// Cloud provider region
        #[arg(short, long)]
        region: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            cloud,
            region,
            name_prefix,
        } => {
            commands::init::handle(&cloud, &region, name_prefix).await?;
        }
        Commands::Show { cloud, region } => {
            commands::show::handle(&cloud, &region).await?;
        }
    }

    Ok(())
}
