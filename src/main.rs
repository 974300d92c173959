mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use sv_core::config::Config;

struct StartOverrides {
    host: Option<String>,
    port: Option<u16>,
    stash_url: Option<String>,
    api_key: Option<String>,
}

fn apply_overrides(config: &mut Config, overrides: StartOverrides) {
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(url) = overrides.stash_url {
        config.stash.graphql_url = url;
    }
    if let Some(key) = overrides.api_key {
        config.stash.api_key = Some(key);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "stash_vr=trace,sv_server=trace,sv_synth=trace,sv_stash=debug,sv_core=debug,tower_http=debug".to_string()
        } else {
            "stash_vr=info,sv_server=info,sv_synth=info,sv_stash=info,sv_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            stash_url,
            api_key,
        } => {
            let mut config = Config::load_or_default(cli.config.as_deref());
            apply_overrides(
                &mut config,
                StartOverrides {
                    host,
                    port,
                    stash_url,
                    api_key,
                },
            );
            tracing::info!("Starting stash-vr {}", env!("CARGO_PKG_VERSION"));

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(sv_server::start(config))?;
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Inspect { path } => inspect_path(&path),
        Commands::Version => {
            println!("stash-vr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)?;
            let config = Config::from_json(&contents)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Stash: {}", config.stash.graphql_url);
    println!(
        "  API key: {}",
        if config.stash.api_key.is_some() { "set" } else { "not set" }
    );
    println!("  Stream mode: {:?}", config.synthesis.stream_mode);
    println!("  Favorite tag: {}", config.synthesis.favorite_tag);

    let warnings = config.validate();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}

fn inspect_path(path: &str) -> Result<()> {
    let is_vr = sv_parser::is_vr_path(path);
    let keys = sv_parser::projection_keys(path, is_vr);
    let descriptor = sv_parser::infer_projection(path, is_vr);

    println!("Path: {path}");
    println!("VR: {is_vr}");
    let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    println!("Matched keys: [{}]", names.join(", "));
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            StartOverrides {
                host: None,
                port: Some(9999),
                stash_url: Some("http://stash:9999/graphql".into()),
                api_key: None,
            },
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.stash.graphql_url, "http://stash:9999/graphql");
        assert!(config.stash.api_key.is_none());
    }

    #[test]
    fn cli_parses_start_flags() {
        let cli = Cli::try_parse_from([
            "stash-vr", "-v", "start", "--port", "9000", "--host", "127.0.0.1",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Start { host, port, .. } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn cli_parses_inspect() {
        let cli = Cli::try_parse_from(["stash-vr", "inspect", "/media/VR/a_mkx200.mp4"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { ref path } if path.ends_with("mkx200.mp4")));
    }
}
