#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fabric-tell-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// 假的搜索程序：当且仅当 minterminals <= maxradix^2 时有解
fn write_fake_search(dir: &PathBuf) -> PathBuf {
    let path = dir.join("fake_search.sh");
    fs::write(
        &path,
        r##"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --maxradix) radix=$2; shift 2 ;;
    --minterminals) terms=$2; shift 2 ;;
    *) shift ;;
  esac
done
echo "# Dimensions Widths Weights Concentration Terminals Routers Radix Channels"
limit=$((radix * radix))
if [ "$terms" -le "$limit" ]; then
  echo "1 1 [$radix] [1] $radix $limit $radix $radix $((limit * 2))"
fi
"##,
    )
    .expect("write fake search tool");
    let mut perms = fs::metadata(&path).expect("stat fake search").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake search");
    path
}

#[test]
fn scale_prints_csv_row_per_radix() {
    let dir = unique_temp_dir("scale-csv");
    let exe = write_fake_search(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_scale"))
        .args([exe.to_str().unwrap(), "3", "5", "2", "0.5", "-c", "2"])
        .output()
        .expect("run scale");
    assert!(
        output.status.success(),
        "scale failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "radix,terms,routers,channels,terms/router,channels/term\n\
         3,9,3,18,3,2\n\
         4,16,4,32,4,2\n\
         5,25,5,50,5,2\n"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn scale_json_output() {
    let dir = unique_temp_dir("scale-json");
    let exe = write_fake_search(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_scale"))
        .args([exe.to_str().unwrap(), "4", "4", "3", "0.5", "--json"])
        .output()
        .expect("run scale");
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(rows[0]["radix"], 4);
    assert_eq!(rows[0]["terminals"], 16);
    assert_eq!(rows[0]["channels"], 32);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn scale_exits_nonzero_when_radix_range_is_inverted() {
    let output = Command::new(env!("CARGO_BIN_EXE_scale"))
        .args(["/bin/true", "8", "4", "2", "0.5"])
        .output()
        .expect("run scale");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("maxradix"), "stderr={stderr}");
}

#[test]
fn scale_verbose_json_keeps_stdout_parseable() {
    let dir = unique_temp_dir("scale-verbose-json");
    let exe = write_fake_search(&dir);

    let output = Command::new(env!("CARGO_BIN_EXE_scale"))
        .args([exe.to_str().unwrap(), "3", "3", "2", "0.5", "--json", "-v"])
        .output()
        .expect("run scale");
    assert!(output.status.success());
    let rows: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document");
    assert_eq!(rows[0]["radix"], 3);
    assert_eq!(rows[0]["terminals"], 9);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"hyperxsearch\""), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}
