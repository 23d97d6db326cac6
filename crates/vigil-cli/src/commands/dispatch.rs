use vigil_config::VigilConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to its handler. Returns the process exit code.
pub async fn dispatch(
    command: &Commands,
    flags: &GlobalFlags,
    config: VigilConfig,
) -> anyhow::Result<i32> {
    match command {
        Commands::Audit(args) => commands::audit::handle(args, flags, config).await,
        Commands::Pages(args) => commands::pages::handle(args, flags, config),
        Commands::Serve(args) => commands::serve::handle(args, flags, config).await,
    }
}
