use vigil_config::VigilConfig;
use vigil_core::PageListResponse;
use vigil_site::discovery;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PagesArgs;
use crate::output::output;

/// Handle `vigil pages`.
pub fn handle(args: &PagesArgs, flags: &GlobalFlags, config: VigilConfig) -> anyhow::Result<i32> {
    let build_path = args.build.clone().unwrap_or(config.site.build_path);
    let pages = discovery::list(&build_path)?;

    let response = PageListResponse {
        build_path: build_path.display().to_string(),
        pages: pages.into_iter().map(|page| page.file_name).collect(),
    };
    output(&response, flags.format)?;
    Ok(0)
}
