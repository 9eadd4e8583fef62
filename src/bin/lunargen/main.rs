//! Lunargen CLI - C header scanner and API glue generator

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("lunargen=debug")
    } else if cli.quiet {
        EnvFilter::new("lunargen=error")
    } else {
        EnvFilter::new("lunargen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = CommandContext::new(&cli)?;

    // Execute command
    match cli.command {
        Commands::Generate => commands::generate::execute(&ctx),
        Commands::Api(args) => commands::api::execute(&ctx, args),
        Commands::DynamicModule(args) => commands::dynamic_module::execute(&ctx, args),
        Commands::NativeApi(args) => commands::native_api::execute(&ctx, args),
        Commands::LuaConstants(args) => commands::lua_constants::execute(&ctx, args),
        Commands::Embed(args) => commands::embed::execute(&ctx, args),
        Commands::Version(args) => commands::version::execute(&ctx, args),
        Commands::Modules(args) => commands::modules::execute(&ctx, args),
        Commands::Scan(args) => commands::scan::execute(&ctx, args),
    }
}
