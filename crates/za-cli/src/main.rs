mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use za_api_types::forms::{FeedProductForm, ProductVideoForm, ShopAffiliateUploadForm};
use za_client::AdminClient;
use za_core::config::{Config, LogFormat};
use za_core::session_store::SessionStore;
use za_core::settings::SettingsManager;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// zeaz admin CLI -- log in and drive the TikTok content-generation backend.
#[derive(Parser)]
#[command(name = "za", version, about)]
struct Cli {
    /// Backend base URL (overrides ZEAZ_API_URL and the config file).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file holding the bearer token and role.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Config file (default: ~/.config/zeaz-admin/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange a username for a bearer token.
    Login {
        /// `admin` and `finance` map to those roles; anything else is `user`.
        username: String,
    },

    /// Forget the stored session.
    Logout,

    /// Show the current session (default when no subcommand is given).
    Whoami,

    /// List the resources the current role can use.
    Resources {
        /// Include resources the role is not permitted to use.
        #[arg(long)]
        all: bool,
    },

    /// List records of a resource.
    List {
        resource: String,
        #[arg(long)]
        json: bool,
    },

    /// Show a single record (only `tiktok_jobs` supports this).
    Show {
        resource: String,
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Submit a generation form.
    Create {
        #[command(subcommand)]
        form: CreateCommand,
        #[arg(long, global = true)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CreateCommand {
    /// Generate a feed product form.
    FeedForm {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "USD")]
        currency: String,
        /// Up to three selling points; repeat the flag.
        #[arg(long = "highlight")]
        highlights: Vec<String>,
    },

    /// Generate a product video.
    Video {
        #[arg(long)]
        product_id: String,
        #[arg(long, default_value = "conversion")]
        script_style: String,
        #[arg(long, default_value_t = 20)]
        duration_seconds: u32,
    },

    /// Upload a generated video through TikTok Shop affiliate.
    Upload {
        #[arg(long)]
        job_reference: String,
        #[arg(long)]
        shop_id: String,
        #[arg(long)]
        creator_handle: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let settings = match &cli.config {
        Some(path) => SettingsManager::new(path),
        None => SettingsManager::default_path(),
    };
    let mut cfg = settings.load_or_default()?;
    cfg.apply_env();

    if let Some(url) = &cli.api_url {
        cfg.api.base_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        cfg.session.path = Some(path.display().to_string());
    }
    if cli.json_logs {
        cfg.general.log_format = LogFormat::Json;
    }
    if cli.verbose {
        cfg.general.log_level = "debug".into();
    }
    cfg.validate()?;
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    za_telemetry::logging::init_from_config("za", &cfg.general);

    let session = SessionStore::file(cfg.session.resolved_path());
    let client = AdminClient::new(&cfg.api.base_url, session)?;
    tracing::debug!(base_url = %client.base_url(), "client ready");

    match cli.command {
        None | Some(Commands::Whoami) => commands::whoami::run(&client).await?,
        Some(Commands::Login { username }) => commands::login::run(&client, &username).await?,
        Some(Commands::Logout) => commands::logout::run(&client).await?,
        Some(Commands::Resources { all }) => commands::resources::run(&client, all).await?,
        Some(Commands::List { resource, json }) => {
            commands::list::run(&client, &resource, json).await?
        }
        Some(Commands::Show { resource, id, json }) => {
            commands::show::run(&client, &resource, &id, json).await?
        }
        Some(Commands::Create { form, json }) => match form {
            CreateCommand::FeedForm {
                product_id,
                title,
                price,
                currency,
                highlights,
            } => {
                let mut form = FeedProductForm::new(product_id, title, price).with_highlights(highlights);
                form.currency = currency;
                commands::create::run(&client, &form, json).await?
            }
            CreateCommand::Video {
                product_id,
                script_style,
                duration_seconds,
            } => {
                let form = ProductVideoForm {
                    product_id,
                    script_style,
                    duration_seconds,
                };
                commands::create::run(&client, &form, json).await?
            }
            CreateCommand::Upload {
                job_reference,
                shop_id,
                creator_handle,
            } => {
                let form = ShopAffiliateUploadForm {
                    job_reference,
                    shop_id,
                    creator_handle,
                };
                commands::create::run(&client, &form, json).await?
            }
        },
    }

    Ok(())
}
