//! HTML building blocks for comparison reports.

use std::collections::{BTreeMap, BTreeSet};

use crate::run::{ExperimentRun, LogValue};

/// Escape text for interpolation into HTML.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a table juxtaposing key/value maps, one column per run.
///
/// Rows are the sorted union of keys across all maps; a map missing a key
/// renders an empty cell.
pub(crate) fn maps_to_html_table(maps: &[&BTreeMap<String, LogValue>]) -> String {
    let keys: BTreeSet<&str> = maps.iter().flat_map(|m| m.keys()).map(String::as_str).collect();

    let mut html = String::from("<table><tr><th></th>");
    for i in 0..maps.len() {
        html.push_str(&format!("<th>Run {}</th>", i + 1));
    }
    html.push_str("</tr>");

    for key in keys {
        html.push_str(&format!("<tr><td>{}</td>", escape(key)));
        for map in maps {
            let cell = map.get(key).map(|v| escape(&v.to_string())).unwrap_or_default();
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// Render the identity/timestamp overview table, one row per run.
pub(crate) fn overview_table(runs: &[&ExperimentRun]) -> String {
    let mut html = String::from(
        "<table><tr><th></th><th>Experiment id</th><th>Variant id</th>\
         <th>Run id</th><th>Timestamp (UTC)</th></tr>",
    );
    for (i, run) in runs.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>Run {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            i + 1,
            escape(run.experiment_id()),
            escape(run.variant_id()),
            escape(run.run_id()),
            run.timestamp_utc(),
        ));
    }
    html.push_str("</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#x27;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_maps_table_union_of_keys() {
        let mut a = BTreeMap::new();
        a.insert("lr".to_string(), LogValue::from(0.1));
        let mut b = BTreeMap::new();
        b.insert("momentum".to_string(), LogValue::from(0.9));

        let html = maps_to_html_table(&[&a, &b]);
        assert!(html.contains("<th>Run 1</th><th>Run 2</th>"));
        assert!(html.contains("<tr><td>lr</td><td>0.1</td><td></td></tr>"));
        assert!(html.contains("<tr><td>momentum</td><td></td><td>0.9</td></tr>"));
    }

    #[test]
    fn test_maps_table_escapes_values() {
        let mut a = BTreeMap::new();
        a.insert("note".to_string(), LogValue::from("<script>"));
        let html = maps_to_html_table(&[&a]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
