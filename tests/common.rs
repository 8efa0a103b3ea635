#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Command for the binary, with HOME pointing at a per-test directory so
/// the config file and the anonymous identity never touch the real home.
pub fn prc(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("photoreport");
    cmd.env("HOME", home).env("APPDATA", home);
    cmd
}

/// Fresh per-test home directory inside the system temp dir.
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_photoreport_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_photoreport.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh home + database, initialized through `init --test`.
pub fn init_report(name: &str) -> (String, String) {
    let home = setup_home(name);
    let db = setup_test_db(name);
    prc(&home)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();
    (home, db)
}

/// Smallest byte stream the PDF writer accepts as a JPEG (3x2, grey).
pub fn tiny_jpeg() -> Vec<u8> {
    vec![
        0xFF, 0xD8, // SOI
        0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x02, 0x00, 0x03, 0x01, 0x01, 0x11, 0x00, // SOF0
        0xFF, 0xD9, // EOI
    ]
}

/// Write `tiny_jpeg()` to a temp file and return its path.
pub fn tiny_jpeg_file(name: &str) -> String {
    let p = temp_out(name, "jpg");
    fs::write(&p, tiny_jpeg()).expect("write jpeg");
    p
}
