//! CLI structure and command definitions

use clap::{ArgGroup, Parser, Subcommand};

/// Camunda Cloud management CLI
#[derive(Parser, Debug)]
#[command(name = "ccctl")]
#[command(version, about = "Manage Camunda Cloud clusters and Zeebe clients")]
#[command(long_about = "
Manage Camunda Cloud clusters and Zeebe clients

Credentials come from CC_CLIENT_ID / CC_CLIENT_SECRET or from a profile:
    ccctl profile set prod --client-id ID --client-secret SECRET

EXAMPLES:
    # Create a cluster with the default channel, region and plan
    ccctl clusters create --name orders

    # Pick catalog entries by name
    ccctl clusters create --name orders --region 'Europe West 1D' --plan Development

    # Filter output with JMESPath
    ccctl clusters list -q '[].{name: name, id: uuid}'

    # Create credentials for a worker
    ccctl zb-client create --cluster CLUSTER_ID --name worker

    # Send request spans to a local OpenTelemetry collector
    ccctl --tracing-endpoint localhost:4318 clusters list

For more help on a specific command, run:
    ccctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "CCCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "CCCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Export spans to an OTLP/HTTP collector (host:port or URL)
    #[arg(long, global = true, env = "CC_TRACING_URL")]
    pub tracing_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON unless the command has a better default
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster operations
    #[command(subcommand, visible_alias = "cluster", visible_alias = "cl")]
    Clusters(ClusterCommands),

    /// Zeebe client credentials of a cluster
    #[command(subcommand, name = "zb-client", visible_alias = "zbc")]
    ZbClient(ZeebeClientCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof", visible_alias = "pr")]
    #[command(after_help = "EXAMPLES:
    # Create a profile
    ccctl profile set prod --client-id ID --client-secret SECRET

    # Point a profile at a non-production environment
    ccctl profile set int --client-id ID --client-secret SECRET \\
        --api-url https://api.cloud.ultrawombat.com \\
        --auth-url https://login.cloud.ultrawombat.com \\
        --audience api.cloud.ultrawombat.com

    # List, inspect and pick the default profile
    ccctl profile list
    ccctl profile show prod
    ccctl profile default prod
")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver", visible_alias = "v")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    #[command(after_help = "EXAMPLES:
    # Bash
    ccctl completions bash > ~/.local/share/bash-completion/completions/ccctl

    # Zsh
    ccctl completions zsh > ~/.zfunc/_ccctl
")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommands {
    /// List all clusters
    #[command(visible_alias = "ls")]
    List,

    /// Show a cluster by name, or the status of a cluster by id
    #[command(group(ArgGroup::new("lookup").required(true).args(["name", "id"])))]
    Get {
        /// Cluster name
        #[arg(long)]
        name: Option<String>,

        /// Cluster id
        #[arg(long)]
        id: Option<String>,
    },

    /// Show the channels, generations, regions and plans clusters can be created with
    #[command(visible_alias = "parameters")]
    Params,

    /// Show readiness and endpoints of a cluster
    Status {
        /// Cluster id
        id: String,
    },

    /// Create a cluster
    #[command(after_help = "EXAMPLES:
    # All defaults: default channel and generation, first region, Development plan
    ccctl clusters create --name orders

    # Select entries by name (unset fields keep their default)
    ccctl clusters create --name orders --channel Stable --region 'Europe West 1D'

    # Explicit catalog ids, as listed by 'ccctl clusters params'
    ccctl clusters create --name orders \\
        --channel-id C --generation-id G --region-id R --plan-id P
")]
    Create(ClusterCreateArgs),

    /// Delete a cluster
    #[command(visible_alias = "rm")]
    Delete {
        /// Cluster id
        id: String,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ClusterCreateArgs {
    /// Cluster name
    #[arg(long)]
    pub name: String,

    /// Use the catalog defaults for everything
    #[arg(long, conflicts_with_all = ["channel", "generation", "region", "plan", "channel_id", "generation_id", "region_id", "plan_id"])]
    pub default: bool,

    /// Channel name (substring match)
    #[arg(long)]
    pub channel: Option<String>,

    /// Generation name within the channel
    #[arg(long)]
    pub generation: Option<String>,

    /// Region name
    #[arg(long)]
    pub region: Option<String>,

    /// Plan name
    #[arg(long)]
    pub plan: Option<String>,

    /// Channel id
    #[arg(long, conflicts_with_all = ["channel", "generation", "region", "plan"])]
    pub channel_id: Option<String>,

    /// Generation id
    #[arg(long, conflicts_with_all = ["channel", "generation", "region", "plan"])]
    pub generation_id: Option<String>,

    /// Region id
    #[arg(long, conflicts_with_all = ["channel", "generation", "region", "plan"])]
    pub region_id: Option<String>,

    /// Plan id
    #[arg(long, conflicts_with_all = ["channel", "generation", "region", "plan"])]
    pub plan_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ZeebeClientCommands {
    /// List the Zeebe clients of a cluster
    #[command(visible_alias = "ls")]
    List {
        /// Cluster id
        #[arg(long)]
        cluster: String,
    },

    /// Show connection details of a Zeebe client
    Get {
        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// Client id
        #[arg(long)]
        client: String,
    },

    /// Create a Zeebe client; the secret is only shown once
    Create {
        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// Client name
        #[arg(long)]
        name: String,
    },

    /// Delete a Zeebe client
    #[command(visible_alias = "rm")]
    Delete {
        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// Client id
        #[arg(long)]
        client: String,
    },
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls", visible_alias = "l")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "sh", visible_alias = "get")]
    Show {
        /// Profile name to show
        name: String,
    },

    /// Set or create a profile
    #[command(visible_alias = "add", visible_alias = "create")]
    Set {
        /// Profile name
        name: String,

        /// API client id
        #[arg(long)]
        client_id: String,

        /// API client secret
        #[arg(long)]
        client_secret: String,

        /// Management API URL
        #[arg(long, default_value = ccctl_core::client::DEFAULT_API_URL)]
        api_url: String,

        /// Authorization server URL
        #[arg(long, default_value = ccctl_core::client::DEFAULT_AUTH_URL)]
        auth_url: String,

        /// Token audience
        #[arg(long, default_value = ccctl_core::models::DEFAULT_AUDIENCE)]
        audience: String,

        /// Store the client secret in the OS keyring instead of the config file
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,
    },

    /// Remove a profile
    #[command(visible_alias = "rm", visible_alias = "del", visible_alias = "delete")]
    Remove {
        /// Profile name to remove
        name: String,
    },

    /// Set the default profile
    #[command(visible_alias = "def")]
    Default {
        /// Profile name to use by default
        name: String,
    },
}
