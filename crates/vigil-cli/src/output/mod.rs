use serde::Serialize;
use vigil_core::{PageListResponse, RunSummary};

use crate::cli::OutputFormat;

/// Human-readable rendering used by `--format text`.
pub trait TextRender {
    fn render_text(&self) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + TextRender>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.render_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TextRender>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

impl TextRender for RunSummary {
    fn render_text(&self) -> String {
        let mut lines = Vec::new();
        if self.exit_code == 0 {
            lines.push(format!(
                "audited {} page(s), wrote {} report(s), opened {}",
                self.pages.len(),
                self.reports.len(),
                self.opened
            ));
        } else {
            let stage = self.failed_at.unwrap_or(self.state);
            lines.push(format!(
                "audit run failed during {stage} after {} of {} page(s)",
                self.reports.len(),
                self.pages.len()
            ));
        }
        lines.extend(self.reports.iter().map(|report| format!("  {report}")));
        if let Some(error) = &self.error {
            lines.push(format!("error: {error}"));
        }
        lines.join("\n")
    }
}

impl TextRender for PageListResponse {
    fn render_text(&self) -> String {
        if self.pages.is_empty() {
            return format!("no pages in {}", self.build_path);
        }
        self.pages.join("\n")
    }
}
