//! Comparison Renderer
//!
//! Renders one or more runs into a static HTML report juxtaposing their
//! identities, params, metrics, dicts, and artifacts. The report is a
//! transient string, regenerated on demand, suitable for notebook display
//! or export to a file.
//!
//! ## Usage
//!
//! ```rust
//! use runreg::{compare_runs, ExperimentRun};
//!
//! let mut a = ExperimentRun::builder("exp").variant_id("baseline").build();
//! a.log_metric("accuracy", 0.91);
//! let mut b = ExperimentRun::builder("exp").variant_id("tuned").build();
//! b.log_metric("accuracy", 0.94);
//!
//! let html = compare_runs(&[&a, &b]);
//! assert!(html.contains("<h2>Metrics</h2>"));
//! ```

mod html;

use std::collections::BTreeSet;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::run::{Artifact, ArtifactKind, ExperimentRun};

use html::{escape, maps_to_html_table, overview_table};

/// Table stylesheet prepended when `inject_css` is set, for standalone
/// HTML export (notebooks bring their own styles).
const TABLE_STYLE: &str = "<style>table{text-align:center}th{background-color:#ddd;color:#000}\
tr:nth-child(odd){background-color:#e7e6e6;color:#000}tr:nth-child(2n)\
{background-color:#fff;color:#000}tr:hover{background-color:#d1eaff}tbo\
dy{font-family:monospace;font-weight:400}</style>";

/// Plotly runtime, loaded from the CDN iff any Plotly figure is rendered.
const PLOTLY_SETUP: &str = "<script type=\"text/javascript\">\
window.PlotlyConfig = {MathJaxConfig: 'local'};</script>\
<script src=\"https://cdn.plot.ly/plotly-2.32.0.min.js\" charset=\"utf-8\"></script>";

/// Options for [`compare_runs_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    /// Prepend the table stylesheet. Useful when exporting the report to a
    /// file; notebook frontends usually style tables themselves.
    pub inject_css: bool,
}

/// Render a side-by-side HTML comparison of one or more runs.
///
/// Equivalent to [`compare_runs_with`] with default options.
#[must_use]
pub fn compare_runs(runs: &[&ExperimentRun]) -> String {
    compare_runs_with(runs, &CompareOptions::default())
}

/// Render a side-by-side HTML comparison of one or more runs.
///
/// The report contains an overview table, `Params` and `Metrics` tables,
/// one table per named dict, and an `Artifacts` section with every
/// artifact id logged by any of the runs.
#[must_use]
pub fn compare_runs_with(runs: &[&ExperimentRun], options: &CompareOptions) -> String {
    let mut html = String::new();
    if options.inject_css {
        html.push_str(TABLE_STYLE);
    }

    html.push_str(&overview_table(runs));

    html.push_str("<h2>Params</h2>");
    let params: Vec<_> = runs.iter().map(|er| er.params()).collect();
    html.push_str(&maps_to_html_table(&params));

    html.push_str("<h2>Metrics</h2>");
    let metrics: Vec<_> = runs.iter().map(|er| er.metrics()).collect();
    html.push_str(&maps_to_html_table(&metrics));

    let dict_names: BTreeSet<&str> = runs
        .iter()
        .flat_map(|er| er.dicts().keys())
        .map(String::as_str)
        .collect();
    for name in dict_names {
        html.push_str(&format!("<h2>{}</h2>", escape(name)));
        let empty = std::collections::BTreeMap::new();
        let maps: Vec<_> = runs
            .iter()
            .map(|er| er.dicts().get(name).unwrap_or(&empty))
            .collect();
        html.push_str(&maps_to_html_table(&maps));
    }

    html.push_str("<h2>Artifacts</h2>");
    let artifact_ids: BTreeSet<&str> = runs
        .iter()
        .flat_map(|er| er.artifacts().keys())
        .map(String::as_str)
        .collect();

    let mut uses_plotly = false;
    let mut figure_seq = 0usize;
    for id in artifact_ids {
        html.push_str(&format!("<h3>{}</h3>", escape(id)));
        for (i, run) in runs.iter().enumerate() {
            if let Some(artifact) = run.artifacts().get(id) {
                html.push_str(&format!("<h4>Run {}</h4>", i + 1));
                html.push_str(&render_artifact(artifact, &mut figure_seq, &mut uses_plotly));
            }
        }
    }

    let mut document = String::from("<html><body>");
    if uses_plotly {
        document.push_str(PLOTLY_SETUP);
    }
    document.push_str(&html);
    document.push_str("</body></html>");
    document
}

fn render_artifact(artifact: &Artifact, figure_seq: &mut usize, uses_plotly: &mut bool) -> String {
    match artifact.kind() {
        ArtifactKind::Png | ArtifactKind::Jpeg => {
            let mime = artifact
                .kind()
                .mime_type()
                .unwrap_or("application/octet-stream");
            format!(
                "<img src=\"data:{mime};base64,{}\">",
                BASE64.encode(artifact.bytes())
            )
        }
        ArtifactKind::PlotlyJson => render_plotly_figure(artifact, figure_seq, uses_plotly)
            .unwrap_or_else(|| placeholder(artifact)),
        // Trusted fragment, inlined verbatim
        ArtifactKind::Html => match std::str::from_utf8(artifact.bytes()) {
            Ok(fragment) => fragment.to_string(),
            Err(_) => placeholder(artifact),
        },
        ArtifactKind::Binary => match std::str::from_utf8(artifact.bytes()) {
            Ok(text) => format!("<pre>{}</pre>", escape(text)),
            Err(_) => placeholder(artifact),
        },
    }
}

/// Render a Plotly figure into a div + script pair.
///
/// The payload is parsed and re-serialized through `serde_json` so only
/// well-formed JSON reaches the script block, and `</` is escaped so a
/// string value cannot terminate the script element early. Returns `None`
/// for payloads that are not valid JSON.
fn render_plotly_figure(
    artifact: &Artifact,
    figure_seq: &mut usize,
    uses_plotly: &mut bool,
) -> Option<String> {
    let raw = std::str::from_utf8(artifact.bytes()).ok()?;
    let figure: serde_json::Value = serde_json::from_str(raw).ok()?;
    let figure_json = serde_json::to_string(&figure).ok()?.replace("</", "<\\/");

    *uses_plotly = true;
    *figure_seq += 1;
    let div_id = format!("runreg-figure-{figure_seq}");
    Some(format!(
        "<div id=\"{div_id}\"></div>\
         <script type=\"text/javascript\">\
         var fig = {figure_json};\
         Plotly.newPlot(\"{div_id}\", fig.data, fig.layout);\
         </script>"
    ))
}

fn placeholder(artifact: &Artifact) -> String {
    format!(
        "<p><em>{} ({} bytes)</em></p>",
        escape(artifact.filename()),
        artifact.size_bytes()
    )
}
