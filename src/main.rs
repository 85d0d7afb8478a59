use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// foodgram - recipe sharing backend
#[derive(Parser)]
#[command(name = "foodgram")]
#[command(about = "Recipes, favorites, subscriptions and shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage the ingredient catalog
    Ingredients {
        #[command(subcommand)]
        command: IngredientsCommands,
    },
    /// Manage recipe tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum IngredientsCommands {
    /// Load ingredients from a JSON file of `{"name", "measurement_unit"}`
    Load { path: String },
}

#[derive(Subcommand)]
enum TagCommands {
    /// Create a tag
    Create {
        #[arg(long)]
        name: String,
        /// Hex color, `#RRGGBB`
        #[arg(long)]
        color: String,
        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Change the role of a user
    Role {
        email: String,
        #[arg(value_enum)]
        role: cli::user::Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = foodgram::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    foodgram::observability::init_observability(
        "foodgram",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::migrate::migrate(&config).await,
        Commands::Reset => cli::migrate::reset(&config).await,
        Commands::Ingredients {
            command: IngredientsCommands::Load { path },
        } => cli::catalog::load_ingredients(config, path).await,
        Commands::Tag {
            command: TagCommands::Create { name, color, slug },
        } => cli::catalog::create_tag(config, name, color, slug).await,
        Commands::User {
            command: UserCommands::Role { email, role },
        } => cli::user::set_role(config, email, role).await,
    }
}
