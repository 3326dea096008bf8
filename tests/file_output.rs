// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use tierlog::Config;
use tierlog::Logger;

fn file_config(dir: &Path, level: &str) -> Config {
    Config {
        level: level.to_string(),
        write: true,
        path: dir.to_path_buf(),
        file_name: "app".to_string(),
        ..Config::default()
    }
}

fn bucket_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_str().unwrap();
            name.starts_with("app.") && name.ends_with(".log")
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}

fn read_bucket(dir: &Path) -> String {
    let files = bucket_files(dir);
    assert_eq!(files.len(), 1, "{files:?}");
    fs::read_to_string(&files[0]).unwrap()
}

#[test]
fn test_warn_goes_to_out_and_bucket() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::from_config(&file_config(temp_dir.path(), "warn")).unwrap();

    logger.info("dropped by the level gate", &[]);
    logger.warn("disk almost full", &[]);
    logger.flush();

    let out = fs::read_to_string(temp_dir.path().join("app.out")).unwrap();
    assert!(out.contains("level=warn"), "{out}");
    assert!(out.contains("disk almost full"), "{out}");
    assert!(!out.contains("dropped"), "{out}");
    assert!(!temp_dir.path().join("app.err").exists());

    let bucket = read_bucket(temp_dir.path());
    assert!(bucket.contains("disk almost full"), "{bucket}");
}

#[test]
fn test_error_goes_to_err_only() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::from_config(&file_config(temp_dir.path(), "info")).unwrap();

    logger.error("failed to connect to %s", &[&"db"]);
    logger.flush();

    let err = fs::read_to_string(temp_dir.path().join("app.err")).unwrap();
    assert!(err.contains("level=error"), "{err}");
    assert!(err.contains("failed to connect to db"), "{err}");
    assert!(!temp_dir.path().join("app.out").exists());
    assert!(read_bucket(temp_dir.path()).contains("failed to connect to db"));
}

#[test]
fn test_unknown_level_emits_debug() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::from_config(&file_config(temp_dir.path(), "verbose")).unwrap();
    assert_eq!(logger.max_level(), tierlog::Level::Debug);

    logger.debugln(&[&"cache", &"miss"]);
    logger.flush();

    let out = fs::read_to_string(temp_dir.path().join("app.out")).unwrap();
    assert!(out.contains("level=debug"), "{out}");
    assert!(out.contains("cache miss"), "{out}");
}

#[test]
fn test_json_formatter_with_caller() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let config = Config {
        formatter: "json".to_string(),
        debug: true,
        ..file_config(temp_dir.path(), "info")
    };
    let logger = Logger::from_config(&config).unwrap();

    logger.info("user %s logged in", &[&"alice"]);
    logger.flush();

    let bucket = read_bucket(temp_dir.path());
    let line: serde_json::Value = serde_json::from_str(bucket.trim_end()).unwrap();
    assert_eq!(line["level"], "info");
    assert_eq!(line["msg"], "user alice logged in");
    let caller = line["caller"].as_str().unwrap();
    assert!(caller.starts_with("tests/file_output.rs:"), "{caller}");
}

#[test]
fn test_panic_skips_files() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::from_config(&file_config(temp_dir.path(), "info")).unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("unreachable state", &[]);
    }));
    assert!(result.is_err());
    logger.flush();

    assert!(!read_bucket(temp_dir.path()).contains("unreachable state"));
    assert!(!temp_dir.path().join("app.out").exists());
    assert!(!temp_dir.path().join("app.err").exists());
}

#[test]
fn test_nested_directory_is_created() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let dir = temp_dir.path().join("nested").join("deeper");
    let logger = Logger::from_config(&file_config(&dir, "info")).unwrap();

    logger.info("hello", &[]);
    logger.flush();

    assert!(dir.join("app.out").exists());
    assert_eq!(bucket_files(&dir).len(), 1);
}

#[test]
fn test_unusable_directory_is_an_error() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let err = Logger::from_config(&file_config(&blocker, "info")).unwrap_err();
    assert!(
        format!("{err:#}").contains("failed to create log directory"),
        "{err:#}"
    );
    assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
}
