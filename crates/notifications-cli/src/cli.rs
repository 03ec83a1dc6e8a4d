use clap::{Parser, Subcommand, ValueEnum};
use notifications_client::EndpointType;

#[derive(Parser)]
#[command(name = "notifications")]
#[command(about = "Seed and inspect a notifications backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config)
    #[arg(short, long, global = true, env = "NOTIFICATIONS_URL")]
    pub server: Option<String>,

    /// Path inserted before every API path when going through a proxy
    #[arg(long, global = true, env = "NOTIFICATIONS_PROXY_PREFIX")]
    pub proxy_prefix: Option<String>,

    /// File holding the x-rh-identity token
    #[arg(short, long, global = true, env = "NOTIFICATIONS_IDENTITY_FILE")]
    pub identity_file: Option<String>,

    /// Config profile name
    #[arg(
        short,
        long,
        global = true,
        env = "NOTIFICATIONS_PROFILE",
        default_value = "default"
    )]
    pub profile: String,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create (or reuse) bundle, application, event type and behavior group,
    /// create an endpoint and wire them together
    Setup(SetupArgs),
    /// Delete a bundle by name and verify it is gone
    DeleteBundle(DeleteBundleArgs),
    /// Delete an application by name
    DeleteApplication(DeleteApplicationArgs),
    /// List endpoints
    ListEndpoints,
    /// Delete an endpoint by id
    DeleteEndpoint(DeleteEndpointArgs),
    /// Link an endpoint straight to an event type
    AttachEndpoint(AttachEndpointArgs),
    /// Print the event log for an event type
    History(HistoryArgs),
    /// Print recent deliveries of every endpoint linked to an event type
    EndpointHistory(EndpointHistoryArgs),
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum EndpointKind {
    #[default]
    Webhook,
    Camel,
}

impl From<EndpointKind> for EndpointType {
    fn from(kind: EndpointKind) -> Self {
        match kind {
            EndpointKind::Webhook => EndpointType::Webhook,
            EndpointKind::Camel => EndpointType::Camel,
        }
    }
}

#[derive(clap::Args)]
pub struct SetupArgs {
    #[arg(long, default_value = "a-bundle")]
    pub bundle: String,
    #[arg(long, default_value = "A bundle")]
    pub bundle_display_name: String,
    #[arg(long, default_value = "my-app")]
    pub application: String,
    #[arg(long, default_value = "My application")]
    pub application_display_name: String,
    #[arg(long, default_value = "et1")]
    pub event_type: String,
    #[arg(long, default_value = "Event type one")]
    pub event_type_display_name: String,
    #[arg(long, default_value = "Operators")]
    pub behavior_group: String,
    /// Endpoint name (also used as its description)
    #[arg(long, default_value = "my-endpoint")]
    pub endpoint: String,
    #[arg(long, default_value = "webhook")]
    pub endpoint_type: EndpointKind,
    /// Camel sub type (e.g. slack, splunk)
    #[arg(long)]
    pub sub_type: Option<String>,
    /// Delivery target
    #[arg(long, default_value = "http://localhost:8085/webhook")]
    pub url: String,
    /// Webhook secret token
    #[arg(long)]
    pub secret_token: Option<String>,
}

#[derive(clap::Args)]
pub struct DeleteBundleArgs {
    /// Bundle name
    pub name: String,
}

#[derive(clap::Args)]
pub struct DeleteApplicationArgs {
    /// Bundle name
    pub bundle: String,
    /// Application name
    pub name: String,
}

#[derive(clap::Args)]
pub struct DeleteEndpointArgs {
    /// Endpoint id
    pub id: String,
}

#[derive(clap::Args)]
pub struct AttachEndpointArgs {
    pub event_type_id: String,
    pub endpoint_id: String,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Event type display name
    pub event_type: String,
    /// Bundle name
    #[arg(long, default_value = "rhel")]
    pub bundle: String,
    /// Application name
    #[arg(long, default_value = "policies")]
    pub application: String,
}

#[derive(clap::Args)]
pub struct EndpointHistoryArgs {
    /// Event type id
    pub event_type_id: String,
    /// Number of deliveries shown per endpoint
    #[arg(long, default_value_t = 5)]
    pub limit: u32,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, proxy_prefix, identity_file)
    pub key: String,
    /// Value
    pub value: String,
}
