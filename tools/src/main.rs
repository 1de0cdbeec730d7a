//! race-server: HTTP front end for the race simulator.
//!
//! Usage:
//!   race-server
//!   race-server --config server.json
//!   race-server --bind 0.0.0.0:3001 --seed 42 --store sqlite --db races.db
//!   race-server --store memory

mod routes;

use anyhow::Result;
use race_core::{
    config::{ServerConfig, StoreConfig},
    engine::RaceEngine,
    store::open_store,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;

    println!("Race server");
    println!("  bind:   {}", config.bind_addr);
    println!("  speeds: {}..={}", config.min_speed, config.max_speed);
    println!("  store:  {:?}", config.store);
    println!();

    let store = open_store(&config.store)?;
    let engine = RaceEngine::new(&config, store)?;
    log::info!("Engine ready, master seed {}", engine.master_seed());

    let app = routes::create(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("Listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// File config (if any) first, then command-line overrides.
fn build_config(args: &[String]) -> Result<ServerConfig> {
    let mut config = match find_arg(args, "--config") {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = find_arg(args, "--bind") {
        config.bind_addr = bind.to_string();
    }
    if let Some(seed) = find_arg(args, "--seed") {
        config.seed = Some(seed.parse()?);
    }
    if let Some(kind) = find_arg(args, "--store") {
        let path = find_arg(args, "--db").map(str::to_string);
        config.store = match kind {
            "memory" => StoreConfig::Memory,
            "json" | "json_file" => StoreConfig::JsonFile {
                path: path.unwrap_or_else(|| race_core::config::DEFAULT_JSON_PATH.into()),
            },
            "sqlite" => StoreConfig::Sqlite {
                path: path.unwrap_or_else(|| "races.db".into()),
            },
            other => anyhow::bail!("Unknown store kind '{other}' (memory | json | sqlite)"),
        };
    }

    config.validate()?;
    Ok(config)
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("race-server")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = build_config(&args(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.seed, None);
        assert_eq!(config.store, StoreConfig::JsonFile { path: "races.json".into() });
    }

    #[test]
    fn flags_override() {
        let config = build_config(&args(&[
            "--bind", "0.0.0.0:9000", "--seed", "42", "--store", "sqlite", "--db", "x.db",
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.store, StoreConfig::Sqlite { path: "x.db".into() });
    }

    #[test]
    fn bad_flags_fail() {
        assert!(build_config(&args(&["--store", "redis"])).is_err());
        assert!(build_config(&args(&["--seed", "lots"])).is_err());
    }
}
