//! Numbered names: the N-th request gets `initial + increment * (N - 1)`,
//! zero-padded to the width of the last number.

use std::path::{Path, PathBuf};

use batch_rename::naming::{NamingOptions, plan};
use batch_rename::transform::Pipeline;

fn args(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("f{i}.txt"))).collect()
}

fn numbers(initial: i64, increment: i64, n: usize, zero_pad: bool) -> Vec<String> {
    let options = NamingOptions {
        format: "{N}".into(),
        initial,
        increment,
        zero_pad,
        ..Default::default()
    };
    let cwd = std::env::temp_dir();
    plan(&args(n), &Pipeline::default(), &options, &cwd)
        .requests
        .iter()
        .map(|r| r.target_name().trim_end_matches(".txt").to_string())
        .collect()
}

#[test]
fn monotonic_sequence() {
    for (initial, increment) in [(1, 1), (0, 5), (100, -7), (-3, 2)] {
        let got = numbers(initial, increment, 12, false);
        for (i, n) in got.iter().enumerate() {
            assert_eq!(n.parse::<i64>().unwrap(), initial + increment * i as i64);
        }
    }
}

#[test]
fn zero_padding_uses_last_width() {
    let got = numbers(1, 1, 100, true);
    assert_eq!(got[0], "001");
    assert_eq!(got[99], "100");
    assert!(got.iter().all(|n| n.len() == 3));

    let got = numbers(8, 1, 3, true);
    assert_eq!(got, ["08", "09", "10"]);
}

#[cfg(unix)]
#[test]
fn no_placeholder_means_no_counting() {
    let options = NamingOptions {
        format: "{}-copy".into(),
        ..Default::default()
    };
    let batch = plan(&args(2), &Pipeline::default(), &options, Path::new("/"));
    let names: Vec<_> = batch.requests.iter().map(|r| r.target_name()).collect();
    assert_eq!(names, ["f0-copy.txt", "f1-copy.txt"]);
}

#[cfg(unix)]
#[test]
fn escaped_placeholder_stays_literal() {
    let options = NamingOptions {
        format: r"\{N}{N}".into(),
        ..Default::default()
    };
    let batch = plan(&args(1), &Pipeline::default(), &options, Path::new("/"));
    assert_eq!(batch.requests[0].target_name(), r"\{N}1.txt");
}
