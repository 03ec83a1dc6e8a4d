mod cli;
mod commands;
mod config;
mod error;
mod identity;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use notifications_client::{Identity, NotificationsClient};

use cli::{Cli, Commands};
use config::Settings;
use output::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_level);

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(error::exit_code(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = config::config_path()?;
    let profile = &cli.profile;

    match &cli.command {
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(&config_path, profile)?;
                let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "(not set)".into());
                println!("{}: {}", "Profile".cyan(), profile);
                println!("{}: {}", "Server".cyan(), show(&cfg.server));
                println!("{}: {}", "Proxy prefix".cyan(), show(&cfg.proxy_prefix));
                println!("{}: {}", "Identity file".cyan(), show(&cfg.identity_file));
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(&config_path, profile)?;
                cfg.set(&set_args.key, &set_args.value)?;
                config::save_profile(&config_path, profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
        Commands::Setup(args) => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::setup::setup(&client, &identity, args).await?;
        }
        Commands::DeleteBundle(args) => {
            let (client, _) = connect(&cli, &config_path)?;
            commands::bundle::delete_bundle(&client, &args.name).await?;
        }
        Commands::DeleteApplication(args) => {
            let (client, _) = connect(&cli, &config_path)?;
            commands::bundle::delete_application(&client, &args.bundle, &args.name).await?;
        }
        Commands::ListEndpoints => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::endpoint::list(&client, &identity).await?;
        }
        Commands::DeleteEndpoint(args) => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::endpoint::delete(&client, &identity, &args.id).await?;
        }
        Commands::AttachEndpoint(args) => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::endpoint::attach(&client, &identity, &args.event_type_id, &args.endpoint_id)
                .await?;
        }
        Commands::History(args) => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::history::history(&client, &identity, args).await?;
        }
        Commands::EndpointHistory(args) => {
            let (client, identity) = connect_with_identity(&cli, &config_path)?;
            commands::history::endpoint_history(&client, &identity, args).await?;
        }
    }

    Ok(())
}

fn connect(cli: &Cli, config_path: &std::path::Path) -> Result<(NotificationsClient, Settings)> {
    let profile = config::load_profile(config_path, &cli.profile)?;
    let settings = Settings::resolve(
        cli.server.as_deref(),
        cli.proxy_prefix.as_deref(),
        cli.identity_file.as_deref(),
        profile,
    )?;
    let client = NotificationsClient::new(&settings.client)?;
    tracing::debug!(root = %client.paths().root(), "using backend");
    Ok((client, settings))
}

fn connect_with_identity(
    cli: &Cli,
    config_path: &std::path::Path,
) -> Result<(NotificationsClient, Identity)> {
    let (client, settings) = connect(cli, config_path)?;
    let identity = identity::load(settings.identity_file.as_deref())?;
    Ok((client, identity))
}
