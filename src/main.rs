use clap::Parser;
use nameclaim::{Config, SignupService, UsernameRegistry};
use std::path::PathBuf;
use std::sync::Arc;

/// Demonstration driver: one registry instance, the four operations with
/// literal arguments, results printed. Not part of the registry contract.
#[derive(Debug, Parser)]
#[command(name = "nameclaim", about = "Username registry walkthrough")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the numeric-suffix probe cap
    #[arg(long)]
    max_suffix_probes: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(cap) = args.max_suffix_probes {
        cfg.max_suffix_probes = cap;
    }

    let registry = Arc::new(UsernameRegistry::with_config(cfg));
    let signup = SignupService::new(registry);

    signup.register_username(Some("john_doe"), Some("user123"))?;

    println!("john_doe available:   {}", signup.check_availability(Some("john_doe"))?);
    println!("jane_smith available: {}", signup.check_availability(Some("jane_smith"))?);

    println!("alternatives for john_doe: {:?}", signup.suggest_alternatives(Some("john_doe"))?);

    for _ in 0..3 {
        signup.check_availability(Some("admin"))?;
    }

    match signup.most_attempted() {
        Some(name) => println!("most attempted: {name}"),
        None => println!("most attempted: none"),
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,nameclaim=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
