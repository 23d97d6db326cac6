use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use vigil_core::{FormFactor, ReportFormat};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the build, audit every page, write and open reports.
    Audit(AuditArgs),
    /// List the audit-eligible pages in the build directory.
    Pages(PagesArgs),
    /// Serve the build directory until interrupted.
    Serve(ServeArgs),
}

/// Arguments for `vigil audit`. Each flag overrides the loaded config.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Build directory to serve and audit.
    #[arg(long)]
    pub build: Option<PathBuf>,
    /// Port for the static server.
    #[arg(long)]
    pub port: Option<u16>,
    /// Report directory (emptied before the run).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Report format.
    #[arg(long, value_enum)]
    pub report_format: Option<ReportFormatArg>,
    /// Audit category (repeatable); replaces the configured list.
    #[arg(long)]
    pub category: Vec<String>,
    /// Device to emulate.
    #[arg(long, value_enum)]
    pub form_factor: Option<FormFactorArg>,
    /// Per-audit deadline in seconds (0 disables).
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Do not open reports after a successful run.
    #[arg(long)]
    pub no_open: bool,
}

/// Arguments for `vigil pages`.
#[derive(Clone, Debug, Args)]
pub struct PagesArgs {
    /// Build directory to scan.
    #[arg(long)]
    pub build: Option<PathBuf>,
}

/// Arguments for `vigil serve`.
#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Build directory to serve.
    #[arg(long)]
    pub build: Option<PathBuf>,
    /// Port to listen on.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportFormatArg {
    /// Lighthouse's full report
    Html,
    /// Compact one-page summary
    Summary,
    /// Structured result
    Json,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(value: ReportFormatArg) -> Self {
        match value {
            ReportFormatArg::Html => Self::Html,
            ReportFormatArg::Summary => Self::Summary,
            ReportFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormFactorArg {
    Mobile,
    Desktop,
}

impl From<FormFactorArg> for FormFactor {
    fn from(value: FormFactorArg) -> Self {
        match value {
            FormFactorArg::Mobile => Self::Mobile,
            FormFactorArg::Desktop => Self::Desktop,
        }
    }
}
