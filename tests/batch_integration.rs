//! Batch Integration Test
//!
//! Writes a small folder of LAS files to a temp directory, runs the batch driver
//! end to end and checks outputs, per-well skips and the summary counts.

use las_window::batch::{collect_well_ids, list_log_files, write_well_ids, BatchRunner};
use las_window::{FailureKind, LasFile, RunConfig};
use std::fs;
use std::path::Path;

fn las_text(uwi: &str, curves: &[&str], rows: &[Vec<f64>]) -> String {
    let mut text = String::from(
        "~Version Information\n VERS.   2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0\n WRAP.    NO : ONE LINE PER DEPTH STEP\n",
    );
    text.push_str("~Well Information\n");
    text.push_str(" STRT.FT  1000.0 : START DEPTH\n");
    text.push_str(" STEP.FT     0.5 : STEP\n");
    text.push_str(" NULL.   -999.25 : NULL VALUE\n");
    text.push_str(&format!(" UWI .   {uwi} : UNIQUE WELL ID\n"));
    text.push_str("~Curve Information\n DEPT.FT : DEPTH\n");
    for c in curves {
        text.push_str(&format!(" {c}.V/V : {c}\n"));
    }
    text.push_str("~ASCII\n");
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        text.push_str(&format!(" {}\n", line.join(" ")));
    }
    text
}

fn rows(with_sw: bool) -> Vec<Vec<f64>> {
    (0..8)
        .map(|i| {
            let depth = 1000.0 + 0.5 * f64::from(i);
            if with_sw {
                vec![depth, 0.2, 0.5]
            } else {
                vec![depth, 0.2]
            }
        })
        .collect()
}

fn write_folder(dir: &Path) {
    fs::write(dir.join("alpha.las"), las_text("05-001-00001", &["PHIT", "SW"], &rows(true))).unwrap();
    fs::write(dir.join("bravo.LAS"), las_text("05-001-00002", &["PHIT", "SW"], &rows(true))).unwrap();
    fs::write(dir.join("charlie.las"), las_text("05-001-00003", &["PHIT"], &rows(false))).unwrap();
    fs::write(dir.join("notes.txt"), "not a log").unwrap();
}

fn config_for(input: &Path, output: &Path) -> RunConfig {
    let mut config = RunConfig::default();
    config.input.folder = input.to_path_buf();
    config.input.output_dir = Some(output.to_path_buf());
    config.window.ft_above = 1.0;
    config.window.ft_below = 0.5;
    config
}

#[test]
fn batch_processes_good_wells_and_counts_missing_curve() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_folder(input.path());

    let runner = BatchRunner::new(&config_for(input.path(), output.path())).unwrap();
    let summary = runner.run().expect("batch should not abort on per-well errors");

    assert_eq!(summary.processed, 3, "txt file must be ignored");
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.succeeded(), 2);

    let failure = &summary.failures[0];
    assert_eq!(failure.kind, FailureKind::MissingInputCurve);
    assert_eq!(failure.well_id.as_deref(), Some("05-001-00003"));
    assert!(failure.message.contains("'SW'"));

    assert!(output.path().join("alpha_calculated.las").exists());
    assert!(output.path().join("bravo_calculated.LAS").exists());

    let mut written: Vec<&str> = summary.outputs.iter().map(|w| w.well_id.as_str()).collect();
    written.sort_unstable();
    assert_eq!(written, vec!["05-001-00001", "05-001-00002"]);
    assert!(!output.path().join("charlie_calculated.las").exists());
}

#[test]
fn batch_output_carries_derived_curves() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_folder(input.path());

    BatchRunner::new(&config_for(input.path(), output.path()))
        .unwrap()
        .run()
        .unwrap();

    let las = LasFile::read(&output.path().join("alpha_calculated.las")).unwrap();
    assert_eq!(las.log.well_id, "05-001-00001");

    let names: Vec<&str> = las.log.mnemonics().collect();
    assert_eq!(
        names,
        vec![
            "PHIT",
            "SW",
            "SoPhiH",
            "OOIP",
            "SoPhiH_1.5ft_window_1ft_up_0.5ft_down",
            "OOIP_1.5ft_window_1ft_up_0.5ft_down",
        ]
    );

    let so = las.log.get("SoPhiH").unwrap();
    assert_eq!(so.unit, "hydrocarbon_ft", "LAS units carry no spaces");
    assert!((so.values[0].unwrap() - 0.05).abs() < 1e-6);

    let window = las.log.get("OOIP_1.5ft_window_1ft_up_0.5ft_down").unwrap();
    assert_eq!(window.unit, "bbls/acre");
    assert_eq!(window.values[0], None, "first sample has no full window");
    assert_eq!(window.values[7], None, "last sample has no full window");
    // OOIP per sample = 7758 * 0.05 / 1.25 = 310.32; interior window = 2 samples
    assert!((window.values[3].unwrap() - 620.64).abs() < 1e-4);
}

#[test]
fn rerun_in_place_skips_previous_outputs() {
    let dir = tempfile::tempdir().unwrap();
    write_folder(dir.path());

    let mut config = RunConfig::default();
    config.input.folder = dir.path().to_path_buf();
    config.window.ft_above = 1.0;
    config.window.ft_below = 0.5;

    let runner = BatchRunner::new(&config).unwrap();
    assert_eq!(runner.run().unwrap().processed, 3);
    assert_eq!(runner.run().unwrap().processed, 3, "calculated files are not inputs");

    let listed = list_log_files(dir.path(), "las", "").unwrap();
    assert_eq!(listed.len(), 5);
}

#[test]
fn well_without_porosity_is_skipped_with_no_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("alpha.las"), las_text("05-001-00001", &["PHIT", "SW"], &rows(true))).unwrap();
    // SW-only log: same column count as the PHIT-only rows
    fs::write(input.path().join("delta.las"), las_text("05-001-00004", &["SW"], &rows(false))).unwrap();

    let summary = BatchRunner::new(&config_for(input.path(), output.path()))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.errors, 1);

    let failure = &summary.failures[0];
    assert_eq!(failure.kind, FailureKind::MissingInputCurve);
    assert_eq!(failure.well_id.as_deref(), Some("05-001-00004"));
    assert!(failure.message.contains("'PHIT'"));
    assert!(!output.path().join("delta_calculated.las").exists());
}

#[test]
fn unreadable_file_is_counted_not_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_folder(input.path());
    fs::write(input.path().join("broken.las"), "~Version\n VERS. 3.0 : LAS 3\n").unwrap();

    let summary = BatchRunner::new(&config_for(input.path(), output.path()))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.errors, 2);
    assert!(summary
        .failures
        .iter()
        .any(|f| f.kind == FailureKind::Read && f.well_id.is_none()));
}

#[test]
fn sub_step_window_is_a_per_well_error() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_folder(input.path());

    let mut config = config_for(input.path(), output.path());
    config.window.ft_above = 0.25;
    let summary = BatchRunner::new(&config).unwrap().run().unwrap();
    assert_eq!(summary.errors, 3);
    assert!(summary
        .failures
        .iter()
        .filter(|f| f.well_id.as_deref() != Some("05-001-00003"))
        .all(|f| f.kind == FailureKind::InvalidWindow));
}

#[test]
fn well_ids_are_listed_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    write_folder(dir.path());

    let ids = collect_well_ids(dir.path(), "las").unwrap();
    assert_eq!(ids, vec!["05-001-00001", "05-001-00002", "05-001-00003"]);

    let out = dir.path().join("uwis.txt");
    write_well_ids(&ids, &out).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "05-001-00001\n05-001-00002\n05-001-00003\n"
    );
}
