use std::path::PathBuf;

use anyhow::Context;
use vigil_config::VigilConfig;

use crate::cli::GlobalFlags;

/// Enter the project directory (if given) and load the layered config.
///
/// Relative paths in the config resolve against the project directory.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<VigilConfig> {
    if let Some(project) = &flags.project {
        let root = PathBuf::from(project);
        anyhow::ensure!(
            root.is_dir(),
            "invalid --project '{}': directory does not exist",
            root.display()
        );
        std::env::set_current_dir(&root)
            .with_context(|| format!("failed to enter project directory {}", root.display()))?;
        tracing::debug!(project = %root.display(), "using project directory");
    }

    VigilConfig::load_with_dotenv().map_err(anyhow::Error::from)
}
