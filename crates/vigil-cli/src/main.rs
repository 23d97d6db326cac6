use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod opener;
mod output;
mod pipeline;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("vigil error: {error:#}");
            1
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;
    ui::init(&flags);

    let config = bootstrap::load_config(&flags).context("failed to load vigil configuration")?;
    commands::dispatch::dispatch(&cli.command, &flags, config).await
}

/// Log level used when `VIGIL_LOG` is unset.
const fn default_log_level(flags: &cli::GlobalFlags) -> &'static str {
    if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("VIGIL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(flags)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::default_log_level;
    use crate::cli::Cli;

    #[test]
    fn log_level_follows_global_flags() {
        let level = |args: &[&str]| {
            let cli = Cli::try_parse_from(args.iter().copied()).expect("cli should parse");
            default_log_level(&cli.global_flags())
        };

        assert_eq!(level(&["vigil", "pages"]), "warn");
        assert_eq!(level(&["vigil", "pages", "--verbose"]), "debug");
        assert_eq!(level(&["vigil", "-q", "-v", "pages"]), "error");
    }
}
