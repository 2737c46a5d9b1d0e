//! Source rules for the engine, checked at test time.
//!
//! The engine runs inside browser event handlers, where a panic takes the
//! whole board down and a swallowed error loses a card edit silently. Each
//! rule names a source pattern and how many production lines may contain it.

use std::fs;
use std::path::{Path, PathBuf};

struct Rule {
    pattern: &'static str,
    budget: usize,
    reason: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, reason: "panics in an event handler" },
    Rule { pattern: ".expect(", budget: 0, reason: "panics in an event handler" },
    Rule { pattern: "panic!(", budget: 0, reason: "panics in an event handler" },
    Rule { pattern: "unreachable!(", budget: 0, reason: "panics in an event handler" },
    Rule { pattern: "todo!(", budget: 0, reason: "unfinished engine path" },
    Rule { pattern: "unimplemented!(", budget: 0, reason: "unfinished engine path" },
    Rule { pattern: "let _ =", budget: 0, reason: "discards a result unread" },
    Rule { pattern: ".ok()", budget: 0, reason: "discards an error unread" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, reason: "hides unused engine code" },
    Rule { pattern: "println!(", budget: 0, reason: "console output belongs to the host" },
    Rule { pattern: "dbg!(", budget: 0, reason: "leftover debugging" },
];

/// Modules the scan must reach; a miss means the walk started in the wrong place.
const REQUIRED_MODULES: [&str; 4] = ["engine.rs", "doc.rs", "input.rs", "persist.rs"];

/// Production sources under `src/`: every `.rs` file except `*_test.rs`.
fn engine_sources() -> Vec<(PathBuf, String)> {
    let mut pending = vec![PathBuf::from("src")];
    let mut sources = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if is_production_source(&path) {
                if let Ok(text) = fs::read_to_string(&path) {
                    sources.push((path, text));
                }
            }
        }
    }
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    sources
}

fn is_production_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".rs") && !name.ends_with("_test.rs")
}

/// `path:line` for every line containing `pattern`.
fn offending_lines(sources: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    sources
        .iter()
        .flat_map(|(path, text)| {
            text.lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(index, _)| format!("{}:{}", path.display(), index + 1))
        })
        .collect()
}

#[test]
fn engine_sources_stay_within_budgets() {
    let sources = engine_sources();
    let violations: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let lines = offending_lines(&sources, rule.pattern);
            (lines.len() > rule.budget).then(|| {
                format!(
                    "`{}` ({}): {} found, budget {}\n    {}",
                    rule.pattern,
                    rule.reason,
                    lines.len(),
                    rule.budget,
                    lines.join("\n    ")
                )
            })
        })
        .collect();

    assert!(violations.is_empty(), "engine source rules broken:\n{}", violations.join("\n"));
}

#[test]
fn scan_reaches_every_engine_module() {
    let sources = engine_sources();
    for module in REQUIRED_MODULES {
        assert!(
            sources.iter().any(|(path, _)| path.ends_with(module)),
            "source scan did not reach {module}; run from the canvas crate root"
        );
    }
}

#[test]
fn scan_skips_sibling_test_files() {
    assert!(is_production_source(Path::new("src/engine.rs")));
    assert!(!is_production_source(Path::new("src/engine_test.rs")));
    assert!(!is_production_source(Path::new("src/notes.md")));
}
