//! Comparison Report Tests
//!
//! Structure and escaping of the rendered HTML report.

use runreg::{compare_runs, compare_runs_with, CompareOptions, ExperimentRun};

fn baseline() -> ExperimentRun {
    let mut run = ExperimentRun::builder("translation")
        .variant_id("baseline")
        .run_id("run-1")
        .build();
    run.log_param("learning_rate", 0.001);
    run.log_param("optimizer", "adam");
    run.log_metric("bleu", 27.4);
    run.log_text("greedy decoding", "notes");
    run
}

fn tuned() -> ExperimentRun {
    let mut run = ExperimentRun::builder("translation")
        .variant_id("tuned")
        .run_id("run-2")
        .build();
    run.log_param("learning_rate", 0.0003);
    run.log_param("warmup_steps", 4000);
    run.log_metric("bleu", 29.1);
    run.log_text("beam size 4", "notes");
    run
}

#[test]
fn test_overview_lists_each_run() {
    let (a, b) = (baseline(), tuned());
    let report = compare_runs(&[&a, &b]);

    assert!(report.contains("<th>Experiment id</th>"));
    assert!(report.contains("<td>baseline</td>"));
    assert!(report.contains("<td>tuned</td>"));
    assert!(report.contains("<td>run-1</td>"));
    assert!(report.contains("<td>run-2</td>"));
}

#[test]
fn test_param_table_shows_union_of_keys() {
    let (a, b) = (baseline(), tuned());
    let report = compare_runs(&[&a, &b]);

    // Key logged by both runs, different values side by side
    assert!(report.contains("<tr><td>learning_rate</td><td>0.001</td><td>0.0003</td></tr>"));
    // Key logged by only one run renders an empty cell for the other
    assert!(report.contains("<tr><td>warmup_steps</td><td></td><td>4000</td></tr>"));
}

#[test]
fn test_metric_section_present() {
    let report = compare_runs(&[&baseline()]);
    assert!(report.contains("<h2>Metrics</h2>"));
    assert!(report.contains("<td>bleu</td>"));
}

#[test]
fn test_dict_sections_rendered_by_name() {
    let mut run = baseline();
    run.log_dict("hardware", [("gpu", "a100"), ("count", "8")]);
    let report = compare_runs(&[&run]);

    assert!(report.contains("<h2>hardware</h2>"));
    assert!(report.contains("<td>gpu</td>"));
}

#[test]
fn test_artifact_section_per_run_headings() {
    let (a, b) = (baseline(), tuned());
    let report = compare_runs(&[&a, &b]);

    assert!(report.contains("<h2>Artifacts</h2>"));
    assert!(report.contains("<h3>notes</h3>"));
    assert!(report.contains("<h4>Run 1</h4>"));
    assert!(report.contains("<h4>Run 2</h4>"));
    assert!(report.contains("<pre>greedy decoding</pre>"));
    assert!(report.contains("<pre>beam size 4</pre>"));
}

#[test]
fn test_artifact_missing_from_one_run_is_skipped() {
    let mut a = baseline();
    a.log_figure(vec![0x89, 0x50], "confusion");
    let b = tuned();
    let report = compare_runs(&[&a, &b]);

    let confusion_section = report
        .split("<h3>confusion</h3>")
        .nth(1)
        .expect("confusion heading missing");
    // Only run 1 logged the figure, so only one run heading before the next h3
    let section_end = confusion_section.find("<h3>").unwrap_or(confusion_section.len());
    let section = &confusion_section[..section_end];
    assert!(section.contains("<h4>Run 1</h4>"));
    assert!(!section.contains("<h4>Run 2</h4>"));
}

#[test]
fn test_ids_and_values_are_escaped() {
    let mut run = ExperimentRun::builder("<exp>").run_id("run&1").build();
    run.log_param("command", "python train.py --flag=\"<value>\"");
    let report = compare_runs(&[&run]);

    assert!(report.contains("&lt;exp&gt;"));
    assert!(report.contains("run&amp;1"));
    assert!(!report.contains("<exp>"));
    assert!(report.contains("&quot;&lt;value&gt;&quot;"));
}

#[test]
fn test_css_injection_for_export() {
    let run = baseline();
    let styled = compare_runs_with(&[&run], &CompareOptions { inject_css: true });
    assert!(styled.contains("<style>"));
    assert!(styled.contains("font-family:monospace"));
}

#[test]
fn test_single_run_report() {
    let report = compare_runs(&[&baseline()]);
    assert!(report.starts_with("<html><body>"));
    assert!(report.ends_with("</body></html>"));
    assert!(report.contains("<h2>Params</h2>"));
}

#[test]
fn test_live_and_reloaded_runs_render_identically() {
    let store = runreg::MemoryStore::new();
    let run = baseline();
    let path = runreg::persist::save_run_to_registry_with(&run, "reg", &store, false).unwrap();
    let reloaded = runreg::persist::load_run_from_path_with(&path, &store).unwrap();

    assert_eq!(compare_runs(&[&run]), compare_runs(&[&reloaded]));
}
