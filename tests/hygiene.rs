//! Hygiene: enforces coding standards at test time.
//!
//! Scans production sources under `src/` (sibling `*_test.rs` files are
//! skipped) for patterns that are banned or budgeted. A budget never grows:
//! adding a hit means removing another one first.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    note: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics abort the whole widget.
    Budget { pattern: ".unwrap()", max: 0, note: "propagate or log instead" },
    Budget { pattern: ".expect(", max: 0, note: "propagate or log instead" },
    Budget { pattern: "panic!(", max: 0, note: "no panics in the widget" },
    Budget { pattern: "unreachable!(", max: 0, note: "model the case instead" },
    Budget { pattern: "todo!(", max: 0, note: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, note: "finish the stub" },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0, note: "inspect or log the value" },
    // Optional parses (timestamps, intervals, error bodies, DOM lookup) and
    // `Response::ok()`.
    Budget { pattern: ".ok()", max: 5, note: "prefer matching on the error" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, note: "delete unused code" },
    // Closures leaked for the page lifetime: openConversation listener,
    // startChatWith global, the mounted view.
    Budget { pattern: ".forget()", max: 3, note: "only page-lifetime handles may leak" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits<'a>(files: &'a [SourceFile], pattern: &str) -> Vec<(&'a str, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then_some((file.path.as_str(), count))
        })
        .collect()
}

fn format_hits(hits: &[(&str, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({}).\n{}",
                budget.pattern,
                budget.max,
                budget.note,
                format_hits(&found)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn raw_html_only_from_escaped_message_bodies() {
    let files = source_files();
    let offenders: Vec<String> = files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .filter(|line| line.contains("inner_html=") && !line.contains("inner_html=message_html("))
                .map(move |line| format!("  {}: {}", file.path, line.trim()))
        })
        .collect();
    assert!(offenders.is_empty(), "inner_html must be fed by message_html:\n{}", offenders.join("\n"));
}

#[test]
fn endpoint_paths_live_in_the_api_module() {
    let files = source_files();
    let offenders: Vec<&str> = files
        .iter()
        .filter(|file| !file.path.replace('\\', "/").ends_with("net/api.rs"))
        .filter(|file| file.content.contains("\"/conversations") || file.content.contains("\"/unread-count"))
        .map(|file| file.path.as_str())
        .collect();
    assert!(offenders.is_empty(), "endpoint paths outside net/api.rs: {offenders:?}");
}
