use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use iotdash::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use iotdash::models::{AppState, CredentialTable};
use iotdash::utils::hostname_from_url;

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    AppState::from_env()
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Err(e) = config::validate_dashboard_url(&state.dashboard_url) {
        tracing::error!(%e, "Invalid analytics dashboard URL");
        eprintln!("{}", yansi::Paint::red(&e.to_string()));
        process::exit(1);
    }

    if let Some(path) = stylesheet {
        match config::read_stylesheet(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{}", yansi::Paint::red(&e.to_string()));
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };

    let app = iotdash::build_app(state.clone());
    tracing::info!(%addr, dashboard = %state.dashboard_url, "Starting IoT dashboard portal");
    println!(
        "{} {}",
        yansi::Paint::new("Web server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn print_roles(table: &CredentialTable, json: bool) {
    if json {
        match serde_json::to_string_pretty(table.rows()) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("{}: {}", yansi::Paint::red("Failed to encode roles"), e);
                process::exit(1);
            }
        }
        return;
    }

    let mut out = Table::new();
    out.load_preset(presets::UTF8_FULL);
    out.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    out.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        out.set_width(w.saturating_sub(4));
    }
    out.set_header(vec!["Role", "Label", "Email"]);
    for row in table.rows() {
        out.add_row(vec![row.role.as_str(), row.role.label(), row.email]);
    }
    println!("\n{out}\n");
}

#[derive(Parser)]
#[command(
    name = "iotdash",
    author,
    version,
    about = "Role-gated portal for the plant IoT analytics dashboard",
    long_about = r#"Serves a small login + dashboard web UI. Users pick a plant role
(supervisor, production manager, operator), sign in with the shared password
and get a link out to the hosted Grafana dashboard.

Examples:
  1) Run the portal:
      iotdash serve --host 0.0.0.0 --port 8080
  2) Point the dashboard link elsewhere:
      ANALYTICS_DASHBOARD_URL=https://grafana.example/d/abc iotdash serve
  3) Show who can sign in:
      iotdash roles
"#,
    after_help = "Use `iotdash <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// List the roles that can sign in and their emails
    Roles {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration (analytics dashboard URL)
    CheckConfig {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        yansi::disable();
    }

    let Some(command) = cli.command else {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::Roles { json } => {
            print_roles(&CredentialTable::builtin(), json);
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref());
            match config::validate_dashboard_url(&state.dashboard_url) {
                Ok(()) => {
                    println!(
                        "{} {} ({})",
                        yansi::Paint::new("Analytics dashboard link looks valid:").green(),
                        state.dashboard_url,
                        hostname_from_url(&state.dashboard_url)
                    );
                }
                Err(e) => {
                    eprintln!("{}", yansi::Paint::red(&e.to_string()));
                    process::exit(1);
                }
            }
        }
    }
}
