//! HTML Output
//!
//! Single-file page drawing a grouped bar chart with error bars through the
//! Plotly CDN bundle.

use crate::report::Report;
use crate::series::{ChartLayout, ChartRenderer, Series};
use serde::Serialize;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Serialize)]
struct ErrorBars<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    array: &'a [f64],
    visible: bool,
}

#[derive(Serialize)]
struct Trace<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    x: &'a [String],
    y: &'a [f64],
    error_y: ErrorBars<'a>,
}

impl<'a> From<&'a Series> for Trace<'a> {
    fn from(series: &'a Series) -> Self {
        Self {
            kind: "bar",
            name: &series.name,
            x: &series.x,
            y: &series.y,
            error_y: ErrorBars {
                kind: "data",
                array: &series.error,
                visible: true,
            },
        }
    }
}

/// Renders series as a standalone Plotly HTML page
#[derive(Debug, Clone, Default)]
pub struct HtmlChart;

impl ChartRenderer for HtmlChart {
    fn render(&mut self, series: &[Series], layout: &ChartLayout) -> String {
        let traces: Vec<Trace<'_>> = series.iter().map(Trace::from).collect();
        let data = serde_json::to_string(&traces).unwrap_or_else(|_| "[]".to_string());
        let layout_json = serde_json::json!({
            "title": { "text": layout.title },
            "barmode": "group",
            "yaxis": { "title": { "text": layout.y_title } },
        });

        page(
            &html_escape(&layout.title),
            &script_escape(&data),
            &script_escape(&layout_json.to_string()),
        )
    }
}

/// Generate the HTML dashboard for a full report
pub fn generate_html_report(report: &Report, layout: &ChartLayout) -> String {
    let html = HtmlChart.render(&report.series, layout);

    let mut rows = String::new();
    for cmp in &report.comparisons {
        for entry in &cmp.entries {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{:.4}</td><td>{:.2}x</td></tr>\n",
                html_escape(&cmp.group),
                html_escape(&entry.kind),
                entry.mean_ms,
                entry.speedup
            ));
        }
    }
    if rows.is_empty() {
        return html;
    }

    let table = format!(
        "<table>\n<tr><th>group</th><th>kind</th><th>mean (ms)</th><th>speedup</th></tr>\n{rows}</table>\n"
    );
    html.replace("<!-- table -->", &table)
}

fn page(title: &str, data: &str, layout: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; margin-top: 1em; }}
td, th {{ border: 1px solid #ccc; padding: 4px 10px; text-align: right; }}
</style>
</head>
<body>
<div id="chart"></div>
<!-- table -->
<script>
Plotly.newPlot("chart", {data}, {layout});
</script>
</body>
</html>
"#
    )
}

/// JSON embedded in a `<script>` element must not contain `<`, or a label
/// like `</script>` would close the element early.
fn script_escape(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
