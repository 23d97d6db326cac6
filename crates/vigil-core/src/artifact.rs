//! Build artifacts: pages eligible for an audit run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::ReportFormat;

/// File extension that marks a build output as an audit-eligible page.
pub const PAGE_EXTENSION: &str = "html";

/// A page discovered directly under the build directory.
///
/// Identified by its file name relative to the build directory. Immutable once
/// discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct BuildArtifact {
    pub file_name: String,
}

impl BuildArtifact {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Whether `file_name` ends in the page extension (`.html`, case-sensitive).
    ///
    /// A bare `.html` counts as a page too.
    #[must_use]
    pub fn is_page(file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext == PAGE_EXTENSION)
    }

    /// URL of this page on a server rooted at `base` (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            urlencoding::encode(&self.file_name)
        )
    }

    /// File name of the report for this page in the given format.
    ///
    /// HTML reports keep the page's own name; other formats swap the extension.
    #[must_use]
    pub fn report_file_name(&self, format: ReportFormat) -> String {
        let stem = self
            .file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(stem, _)| stem);
        format!("{stem}.{}", format.extension())
    }
}

impl fmt::Display for BuildArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("index.html", true)]
    #[case("about.html", true)]
    #[case("style.css", false)]
    #[case("app.js", false)]
    #[case("page.HTML", false)]
    #[case(".html", true)]
    #[case("notes.html.bak", false)]
    #[case("html", false)]
    fn page_extension_detection(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(BuildArtifact::is_page(name), expected);
    }

    #[test]
    fn url_joins_base_and_encodes_name() {
        let artifact = BuildArtifact::new("my page.html");
        assert_eq!(
            artifact.url("http://127.0.0.1:3000/"),
            "http://127.0.0.1:3000/my%20page.html"
        );
    }

    #[test]
    fn report_names_follow_format() {
        let artifact = BuildArtifact::new("about.html");
        assert_eq!(artifact.report_file_name(ReportFormat::Html), "about.html");
        assert_eq!(artifact.report_file_name(ReportFormat::Summary), "about.html");
        assert_eq!(artifact.report_file_name(ReportFormat::Json), "about.json");
    }

    #[test]
    fn bare_extension_page_keeps_its_name() {
        let artifact = BuildArtifact::new(".html");
        assert_eq!(artifact.report_file_name(ReportFormat::Html), ".html");
        assert_eq!(artifact.report_file_name(ReportFormat::Json), ".json");
        assert_eq!(artifact.url("http://127.0.0.1:3000"), "http://127.0.0.1:3000/.html");
    }
}
