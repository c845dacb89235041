mod config;
mod credentials;
mod list;
mod prompt;
mod selector;
mod show;
mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use powerbi::types::{ApiUrl, AuthorityUrl, ClientId, Username};
use powerbi::AccessLevel;

use crate::credentials::Credentials;
use crate::selector::WorkspaceSelector;
use crate::token::IdentityArg;

#[derive(Parser)]
#[clap(
    author, version, about, long_about = None,
    propagate_version = false, disable_help_subcommand = true
)]
struct Cli {
    /// Power BI account username
    #[clap(short, long, global = true)]
    username: Option<Username>,

    /// Power BI account password
    #[clap(long, global = true)]
    password: Option<String>,

    /// Take the password from stdin
    #[clap(long, global = true)]
    password_stdin: bool,

    /// Application (client) ID registered with Azure AD
    #[clap(long, global = true)]
    client_id: Option<ClientId>,

    /// Bearer token to use instead of logging in
    #[clap(long, global = true)]
    token: Option<String>,

    /// Power BI REST API base URL
    #[clap(long, global = true)]
    api_url: Option<ApiUrl>,

    /// Configuration file (for testing)
    #[clap(long, global = true, hide = true)]
    config: Option<PathBuf>,

    /// Show debug logs
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List workspaces
    Workspaces,

    /// List reports
    Reports {
        /// Workspace ID or name, or "default" for My workspace
        #[clap(short, long)]
        workspace: Option<WorkspaceSelector>,
    },

    /// List datasets
    Datasets {
        /// Workspace ID or name, or "default" for My workspace
        #[clap(short, long)]
        workspace: Option<WorkspaceSelector>,
    },

    /// Show a report and its attributes
    Report {
        /// Report ID or name
        report: String,

        /// Workspace ID or name, or "default" for My workspace
        #[clap(short, long)]
        workspace: Option<WorkspaceSelector>,

        /// Print as JSON
        #[clap(long)]
        json: bool,
    },

    /// Generate an embed token for a report
    Token {
        /// Report ID or name
        report: String,

        /// Workspace ID or name, or "default" for My workspace
        #[clap(short, long)]
        workspace: Option<WorkspaceSelector>,

        /// View, Edit or Create
        #[clap(short, long, default_value_t = AccessLevel::View)]
        access_level: AccessLevel,

        /// Row-level security identity as USERNAME[:ROLE,ROLE...], may be repeated.
        /// Roles follow the last ":" in the value
        #[clap(long = "identity")]
        identities: Vec<IdentityArg>,
    },

    /// Show or change saved settings
    Config {
        /// Save the application (client) ID
        #[clap(long)]
        set_client_id: Option<ClientId>,

        /// Save the default username
        #[clap(long)]
        set_username: Option<Username>,

        /// Save the REST API base URL
        #[clap(long)]
        set_api_url: Option<ApiUrl>,

        /// Save the identity provider authority
        #[clap(long)]
        set_authority: Option<AuthorityUrl>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Cli = Cli::parse();
    init_logging(args.verbose);

    let credentials = Credentials {
        username: args.username,
        password: args.password,
        password_from_stdin: args.password_stdin,
        client_id: args.client_id,
        token: args.token,
        api_url: args.api_url,
        config_path: args.config.clone(),
    };

    match args.command {
        Commands::Workspaces => list::workspaces(&credentials.get_client()?),
        Commands::Reports { workspace } => {
            list::reports(&credentials.get_client()?, workspace.as_ref())
        }
        Commands::Datasets { workspace } => {
            list::datasets(&credentials.get_client()?, workspace.as_ref())
        }
        Commands::Report {
            report,
            workspace,
            json,
        } => show::report(&credentials.get_client()?, &report, workspace.as_ref(), json),
        Commands::Token {
            report,
            workspace,
            access_level,
            identities,
        } => token::token(
            &credentials.get_client()?,
            &report,
            workspace.as_ref(),
            access_level,
            identities,
        ),
        Commands::Config {
            set_client_id,
            set_username,
            set_api_url,
            set_authority,
        } => config::config(
            args.config.as_deref(),
            set_client_id,
            set_username,
            set_api_url,
            set_authority,
        ),
    }
}
