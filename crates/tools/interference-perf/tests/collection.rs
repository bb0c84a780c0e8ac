//! End-to-end collection over synthetic result trees.

use std::fs;
use std::path::Path;

use interference_perf::collect::{self, collect_matmult, collect_sdvbs};
use interference_perf::compare::Comparison;
use interference_perf::config::{ExperimentConfig, LogLayout, MatmultSpace, SdvbsSpace};
use interference_perf::dataset::{Benchmark, TestCaseKey};
use interference_perf::metrics;
use interference_perf::output;

/// Synthetic measurements for one test case.
struct Case {
    solo: Option<f64>,
    interfered: Option<f64>,
    bandwidths: [Option<f64>; 3],
}

fn write_matmult_case(root: &Path, dim: u32, algo: u32, case: &Case) {
    let dir = root.join(format!("dim{dim}_algo{algo}"));
    fs::create_dir_all(&dir).unwrap();
    if let Some(t) = case.solo {
        fs::write(
            dir.join("victim_solo.log"),
            format!("matmult_opt{algo}  {t:.6}  chsum: 19043.350654\n"),
        )
        .unwrap();
    }
    if let Some(t) = case.interfered {
        fs::write(
            dir.join("victim_with_3_write_attackers.log"),
            format!("matmult_opt{algo}  {t:.6}  chsum: 19043.350654\n"),
        )
        .unwrap();
    }
    write_attackers(&dir, &case.bandwidths);
}

fn write_sdvbs_case(root: &Path, workload: &str, case: &Case) {
    let dir = root.join(workload);
    fs::create_dir_all(&dir).unwrap();
    for (name, cycles) in [
        ("victim_solo.log", case.solo),
        ("victim_with_3_write_attackers.log", case.interfered),
    ] {
        if let Some(c) = cycles {
            // An earlier, stale run precedes the one that counts.
            fs::write(
                dir.join(name),
                format!(
                    "Input size\t\t- (640x480)\nCycles elapsed\t\t- 1\n\
                     Input size\t\t- (640x480)\nCycles elapsed\t\t- {c}\n"
                ),
            )
            .unwrap();
        }
    }
    write_attackers(&dir, &case.bandwidths);
}

fn write_attackers(dir: &Path, bandwidths: &[Option<f64>; 3]) {
    for (core, bw) in (1..=3).zip(bandwidths) {
        if let Some(bw) = bw {
            fs::write(
                dir.join(format!("log-attack-core{core}.log")),
                format!("allocating buffer\nbandwidth {bw:.2} MB/s\n"),
            )
            .unwrap();
        }
    }
}

#[test]
fn matmult_round_trip_matches_formulas() {
    let root = tempfile::tempdir().unwrap();
    let cases = [
        (
            1024,
            0,
            Case {
                solo: Some(2.5),
                interfered: Some(10.0),
                bandwidths: [Some(433.77), Some(500.25), Some(612.5)],
            },
        ),
        (
            1024,
            3,
            Case {
                solo: Some(4.0),
                interfered: Some(3.0),
                bandwidths: [None, Some(1200.5), None],
            },
        ),
        (
            2048,
            4,
            Case {
                solo: None,
                interfered: Some(80.0),
                bandwidths: [None, None, None],
            },
        ),
    ];
    for (dim, algo, case) in &cases {
        write_matmult_case(root.path(), *dim, *algo, case);
    }

    let collection = collect_matmult(root.path(), &MatmultSpace::default(), &LogLayout::default());
    let dataset = &collection.dataset;

    // Seven of the ten configured cases have no directory.
    assert_eq!(dataset.len(), 3);
    assert_eq!(collection.missing_cases.len(), 7);
    assert!(collection.unreadable_logs.is_empty());

    for (dim, algo, case) in &cases {
        let key = TestCaseKey::Matmult {
            dimension: *dim,
            algorithm: *algo,
        };
        let m = dataset.get(&key).unwrap();
        assert_eq!(m.solo(), case.solo);
        assert_eq!(m.interfered(), case.interfered);
        assert_eq!(m.slowdown(), metrics::slowdown(case.solo, case.interfered));
        assert_eq!(
            m.aggregate_bandwidth(),
            metrics::aggregate_bandwidth(&case.bandwidths)
        );
        let present: Vec<f64> = case.bandwidths.iter().flatten().copied().collect();
        assert_eq!(m.attacker_bandwidths(), present.as_slice());
    }

    // Speedups are kept, not clamped.
    let speedup = dataset
        .get(&TestCaseKey::Matmult {
            dimension: 1024,
            algorithm: 3,
        })
        .unwrap();
    assert_eq!(speedup.slowdown(), Some(0.75));
}

#[test]
fn sdvbs_uses_last_cycle_report() {
    let root = tempfile::tempdir().unwrap();
    write_sdvbs_case(
        root.path(),
        "sift",
        &Case {
            solo: Some(1000.0),
            interfered: Some(4500.0),
            bandwidths: [Some(100.0), Some(200.0), Some(300.0)],
        },
    );

    let collection = collect_sdvbs(root.path(), &SdvbsSpace::default(), &LogLayout::default());
    assert_eq!(collection.dataset.len(), 1);
    let m = collection
        .dataset
        .get(&TestCaseKey::Workload("sift".into()))
        .unwrap();
    assert_eq!(m.solo(), Some(1000.0));
    assert_eq!(m.slowdown(), Some(4.5));
    assert_eq!(m.aggregate_bandwidth(), Some(600.0));
}

#[test]
fn case_directory_with_no_logs_is_still_collected() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("stitch")).unwrap();

    let collection = collect::collect(root.path(), Benchmark::Sdvbs, &ExperimentConfig::default());
    let m = collection
        .dataset
        .get(&TestCaseKey::Workload("stitch".into()))
        .unwrap();
    assert_eq!(m.solo(), None);
    assert_eq!(m.slowdown(), None);
    assert_eq!(m.aggregate_bandwidth(), None);
    assert!(m.attacker_bandwidths().is_empty());
}

#[test]
fn unparseable_logs_are_absent() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("dim1024_algo1");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("victim_solo.log"), "Segmentation fault\n").unwrap();
    fs::write(
        dir.join("victim_with_3_write_attackers.log"),
        "matmult_opt1  12.5  chsum: 1.0\n",
    )
    .unwrap();
    fs::write(dir.join("log-attack-core1.log"), b"\xff\xfebandwidth 10.5 MB/s\n").unwrap();

    let collection = collect_matmult(root.path(), &MatmultSpace::default(), &LogLayout::default());
    let m = collection
        .dataset
        .get(&TestCaseKey::Matmult {
            dimension: 1024,
            algorithm: 1,
        })
        .unwrap();
    assert_eq!(m.solo(), None);
    assert_eq!(m.interfered(), Some(12.5));
    assert_eq!(m.slowdown(), None);
    assert_eq!(m.aggregate_bandwidth(), Some(10.5));
}

#[test]
fn custom_layout_and_key_space() {
    let root = tempfile::tempdir().unwrap();
    let config = ExperimentConfig::from_toml_str(
        r#"
        [matmult]
        dimensions = [256]
        algorithms = [7]

        [layout]
        interfered-log = "victim_with_2_write_attackers.log"
        attacker-cores = 2
        "#,
    )
    .unwrap();

    let dir = root.path().join("dim256_algo7");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("victim_solo.log"), "matmult_opt7 1.0 chsum: 0\n").unwrap();
    fs::write(
        dir.join("victim_with_2_write_attackers.log"),
        "matmult_opt7 3.0 chsum: 0\n",
    )
    .unwrap();
    fs::write(dir.join("log-attack-core2.log"), "bandwidth 50.0 MB/s\n").unwrap();
    // Beyond the configured core count; ignored.
    fs::write(dir.join("log-attack-core3.log"), "bandwidth 999.0 MB/s\n").unwrap();

    let collection = collect::collect(root.path(), Benchmark::Matmult, &config);
    assert!(collection.missing_cases.is_empty());
    let m = collection
        .dataset
        .get(&TestCaseKey::Matmult {
            dimension: 256,
            algorithm: 7,
        })
        .unwrap();
    assert_eq!(m.slowdown(), Some(3.0));
    assert_eq!(m.attacker_bandwidths(), &[50.0]);
}

#[test]
fn two_partial_trees_compare_over_their_union() {
    let one_bank = tempfile::tempdir().unwrap();
    let all_banks = tempfile::tempdir().unwrap();
    let full = Case {
        solo: Some(1.0),
        interfered: Some(2.0),
        bandwidths: [Some(100.0), Some(100.0), Some(100.0)],
    };
    write_sdvbs_case(one_bank.path(), "disparity", &full);
    write_sdvbs_case(all_banks.path(), "tracking", &full);

    let config = ExperimentConfig::default();
    let one = collect::collect(one_bank.path(), Benchmark::Sdvbs, &config).dataset;
    let all = collect::collect(all_banks.path(), Benchmark::Sdvbs, &config).dataset;
    let comparison = Comparison::new(&one, &all, &config.key_space(Benchmark::Sdvbs));

    let labels: Vec<String> = comparison.rows().iter().map(|r| r.key.label()).collect();
    assert_eq!(labels, ["disparity", "tracking"]);
    assert_eq!(comparison.rows()[0].all_banks.slowdown, 0.0);
    assert_eq!(comparison.rows()[1].one_bank.aggregate_bandwidth, 0.0);
    assert_eq!(comparison.rows()[1].all_banks.aggregate_bandwidth, 300.0);

    // The datasets are only borrowed by the comparison.
    assert_eq!(one.len(), 1);
    assert_eq!(all.len(), 1);

    let table = output::format_summary(Benchmark::Sdvbs, &comparison);
    assert!(table.lines().any(|l| l.starts_with("disparity")));
    assert!(table.lines().any(|l| l.starts_with("tracking")));
}
