//! Layout rules for this repository: the unit tree mirrors `src/`, every test
//! file holds tests, and every declared bench target exists

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    // Harness roots and module declarations hold no tests of their own
    const NON_TEST_FILES: [&str; 3] = ["main.rs", "mod.rs", "lib.rs"];

    /// Rust source files under `root`, relative to it
    fn rust_files(root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir)
                .unwrap_or_else(|error| panic!("cannot read {}: {error}", dir.display()));
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    if let Ok(relative) = path.strip_prefix(root) {
                        found.insert(relative.to_path_buf());
                    }
                }
            }
        }

        found
    }

    fn holds_tests(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_none_or(|name| !NON_TEST_FILES.contains(&name))
    }

    fn listing(paths: &[&PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Each solver source file has a unit test file at the same relative path
    #[test]
    fn test_unit_tree_mirrors_src() {
        let sources = rust_files(Path::new("src"));
        let units = rust_files(Path::new("tests/unit"));

        let untested: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| holds_tests(path) && !units.contains(*path))
            .collect();
        assert!(
            untested.is_empty(),
            "src files without tests/unit counterparts:\n{}",
            listing(&untested)
        );

        let orphaned: Vec<&PathBuf> = units
            .iter()
            .filter(|path| holds_tests(path) && !sources.contains(*path))
            .collect();
        assert!(
            orphaned.is_empty(),
            "tests/unit files for missing src files:\n{}",
            listing(&orphaned)
        );
    }

    // Test files other than harness roots contain at least one test
    #[test]
    fn test_test_files_contain_tests() {
        let tests_root = Path::new("tests");
        let empty: Vec<PathBuf> = rust_files(tests_root)
            .into_iter()
            .filter(|path| holds_tests(path))
            .filter(|path| {
                fs::read_to_string(tests_root.join(path))
                    .is_ok_and(|text| !text.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "test files without #[test] functions:\n{}",
            listing(&empty.iter().collect::<Vec<_>>())
        );
    }

    // Bench targets in Cargo.toml and files in benches/ match one to one
    #[test]
    fn test_bench_targets_exist() {
        let manifest = fs::read_to_string("Cargo.toml").expect("manifest readable");
        let declared: BTreeSet<PathBuf> = manifest
            .split("[[bench]]")
            .skip(1)
            .filter_map(|section| {
                section
                    .lines()
                    .find_map(|line| line.trim().strip_prefix("name = "))
                    .map(|name| PathBuf::from(format!("{}.rs", name.trim_matches('"'))))
            })
            .collect();
        let present = rust_files(Path::new("benches"));

        assert!(!declared.is_empty(), "no bench targets declared");
        assert_eq!(declared, present);
    }
}
