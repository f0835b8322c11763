use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wardroom::cli::{self, Session};
use wardroom::inventory::{InventoryState, ModuleFilter, SortConfig, SortDirection, SortKey, StatusFilter};

#[derive(Debug, Parser)]
#[command(name = "wardroom")]
#[command(about = "S/4HANA Migration Command Center")]
struct App {
    /// Program dataset (JSON). Defaults to the configured path, else the built-in sample.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the header, KPI cards, module health matrix, and systems inventory
    Dashboard,
    /// Show the executive summary KPI cards
    Summary {
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show the module health matrix
    Modules {
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
        /// Layout width in layout units
        #[arg(long)]
        width: Option<f64>,
        /// Layout height in layout units
        #[arg(long)]
        height: Option<f64>,
        /// Show the hover detail for one module id (e.g. `fi`)
        #[arg(long)]
        detail: Option<String>,
    },
    /// List legacy systems with search, filters, and sorting
    Systems {
        /// Case-insensitive match against system name or owner
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter: all, on-track, warning, critical
        #[arg(long, default_value = "all")]
        status: String,
        /// Module id filter, or `all`
        #[arg(long, default_value = "all")]
        module: String,
        /// Sort column: name, decommissionDate, progress, issuesOpen
        #[arg(long, default_value = "progress")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Output format: table, json, csv (default from config)
        #[arg(long)]
        format: Option<String>,
    },
    /// Launch the web dashboard
    Web {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration and where each layer comes from
    Show,
    /// Write the default annotated config to ~/.wardroom/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted config key, e.g. `heatmap.width 900`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    // Config management never needs the dataset.
    if let Commands::Config { action } = app.command {
        return run_config(action);
    }

    let session = Session::open(app.data)?;
    run_view(&session, app.command)
}

fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => cli::run_config_show(),
        ConfigAction::Init { force } => cli::run_config_init(force),
        ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
        ConfigAction::Reset => cli::run_config_reset(),
    }
}

fn run_view(session: &Session, command: Commands) -> Result<()> {
    match command {
        Commands::Dashboard => cli::run_dashboard(session),
        Commands::Summary { format } => cli::run_summary(session, session.format(format.as_deref())),
        Commands::Modules {
            format,
            width,
            height,
            detail,
        } => cli::run_modules(
            session,
            session.format(format.as_deref()),
            width,
            height,
            detail.as_deref(),
        ),
        Commands::Systems {
            search,
            status,
            module,
            sort,
            desc,
            format,
        } => {
            let state = InventoryState {
                search_term: search,
                status_filter: StatusFilter::from_str_opt(Some(&status)),
                module_filter: ModuleFilter::from_str_opt(Some(&module)),
                sort: SortConfig {
                    key: SortKey::parse(&sort).unwrap_or_default(),
                    direction: if desc {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    },
                },
            };
            cli::run_systems(session, session.format(format.as_deref()), &state)
        }
        Commands::Web { addr, no_open } => {
            let addr = addr.unwrap_or_else(|| session.config.web.address.clone());
            let open = session.config.web.open_browser && !no_open;
            wardroom::web::serve(session, &addr, open)
        }
        Commands::Config { action } => run_config(action),
    }
}
