//! Self-contained HTML rendering.

use std::fmt::{self, Display, Formatter};

use vigil_core::{AuditResult, CategoryScore, Diagnostic, Metric, ScoreBand};

const STYLE: &str = r#"
:root { --pass: #0c6; --average: #fa3; --fail: #f33; --unscored: #999; }
* { box-sizing: border-box; }
body { margin: 0; font: 14px/1.5 system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; color: #212121; background: #f5f5f5; }
main { max-width: 960px; margin: 0 auto; padding: 24px; }
header h1 { font-size: 20px; margin: 0 0 4px; word-break: break-all; }
header p { margin: 0; color: #616161; }
section { background: #fff; border-radius: 8px; padding: 16px 20px; margin-top: 16px; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
h2 { font-size: 16px; margin: 0 0 12px; }
.gauges { display: flex; flex-wrap: wrap; gap: 24px; justify-content: center; }
.gauge { width: 120px; text-align: center; }
.gauge .ring { width: 88px; height: 88px; margin: 0 auto 8px; border-radius: 50%; border: 8px solid var(--unscored); display: flex; align-items: center; justify-content: center; font-size: 24px; font-weight: 600; }
.pass .ring { border-color: var(--pass); color: #080; }
.average .ring { border-color: var(--average); color: #c33300; }
.fail .ring { border-color: var(--fail); color: #c00; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #eee; }
td.value { font-variant-numeric: tabular-nums; }
.dot { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 6px; background: var(--unscored); }
.dot.pass { background: var(--pass); } .dot.average { background: var(--average); } .dot.fail { background: var(--fail); }
ul.diagnostics { list-style: none; margin: 0; padding: 0; }
ul.diagnostics li { padding: 8px 0; border-bottom: 1px solid #eee; }
ul.diagnostics p { margin: 4px 0 0 16px; color: #616161; }
footer { margin-top: 16px; color: #757575; font-size: 12px; text-align: center; }
"#;

/// An [`AuditResult`] rendered as a standalone HTML page via [`Display`].
#[derive(Debug, Clone, Copy)]
pub struct HtmlReport<'a> {
    result: &'a AuditResult,
}

impl<'a> HtmlReport<'a> {
    #[must_use]
    pub const fn new(result: &'a AuditResult) -> Self {
        Self { result }
    }
}

impl Display for HtmlReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(
            f,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        writeln!(
            f,
            "<title>Audit report: {}</title>",
            Escaped(&result.final_url)
        )?;
        writeln!(f, "<style>{STYLE}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<main>")?;

        writeln!(f, "<header>")?;
        writeln!(f, "<h1>{}</h1>", Escaped(&result.final_url))?;
        if result.final_url != result.requested_url {
            writeln!(
                f,
                "<p>Requested {}</p>",
                Escaped(&result.requested_url)
            )?;
        }
        writeln!(f, "<p>Emulated {} device</p>", result.form_factor)?;
        writeln!(f, "</header>")?;

        write_categories(f, &result.categories)?;
        write_metrics(f, &result.metrics)?;
        write_diagnostics(f, &result.diagnostics)?;

        writeln!(
            f,
            "<footer>Lighthouse {} &middot; fetched {}</footer>",
            Escaped(&result.tool_version),
            result.fetch_time.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "</main>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_categories(f: &mut Formatter<'_>, categories: &[CategoryScore]) -> fmt::Result {
    if categories.is_empty() {
        return Ok(());
    }
    writeln!(f, "<section>")?;
    writeln!(f, "<div class=\"gauges\">")?;
    for category in categories {
        let score = category
            .percent()
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        writeln!(
            f,
            "<div class=\"gauge {}\" data-category=\"{}\"><div class=\"ring\">{score}</div>{}</div>",
            category.band().as_str(),
            Escaped(&category.id),
            Escaped(&category.title)
        )?;
    }
    writeln!(f, "</div>")?;
    writeln!(f, "</section>")
}

fn write_metrics(f: &mut Formatter<'_>, metrics: &[Metric]) -> fmt::Result {
    if metrics.is_empty() {
        return Ok(());
    }
    writeln!(f, "<section>")?;
    writeln!(f, "<h2>Metrics</h2>")?;
    writeln!(f, "<table>")?;
    writeln!(f, "<thead><tr><th>Metric</th><th>Value</th></tr></thead>")?;
    writeln!(f, "<tbody>")?;
    for metric in metrics {
        let value = metric.display_value.as_deref().unwrap_or("n/a");
        writeln!(
            f,
            "<tr><td><span class=\"dot {}\"></span>{}</td><td class=\"value\">{}</td></tr>",
            ScoreBand::of(metric.score).as_str(),
            Escaped(&metric.title),
            Escaped(value)
        )?;
    }
    writeln!(f, "</tbody>")?;
    writeln!(f, "</table>")?;
    writeln!(f, "</section>")
}

fn write_diagnostics(f: &mut Formatter<'_>, diagnostics: &[Diagnostic]) -> fmt::Result {
    writeln!(f, "<section>")?;
    writeln!(f, "<h2>Diagnostics</h2>")?;
    if diagnostics.is_empty() {
        writeln!(f, "<p>No failing checks.</p>")?;
        return writeln!(f, "</section>");
    }
    writeln!(f, "<ul class=\"diagnostics\">")?;
    for diagnostic in diagnostics {
        write!(
            f,
            "<li><span class=\"dot {}\"></span><strong>{}</strong>",
            ScoreBand::of(diagnostic.score).as_str(),
            Escaped(&diagnostic.title)
        )?;
        if let Some(value) = &diagnostic.display_value {
            write!(f, " &mdash; {}", Escaped(value))?;
        }
        if !diagnostic.description.is_empty() {
            write!(f, "<p>{}</p>", Escaped(&diagnostic.description))?;
        }
        writeln!(f, "</li>")?;
    }
    writeln!(f, "</ul>")?;
    writeln!(f, "</section>")
}

/// Text escaped for use in HTML element content and quoted attributes.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            Escaped(r#"<a href="x">Tom & 'Jerry'</a>"#).to_string(),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(Escaped("Largest Contentful Paint").to_string(), "Largest Contentful Paint");
    }

    #[test]
    fn multibyte_text_survives_escaping() {
        assert_eq!(Escaped("Größe <1 s>").to_string(), "Größe &lt;1 s&gt;");
    }
}
