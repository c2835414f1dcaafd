// psort-core/tests/filter_tests.rs
//
// Include/exclude predicates and directory pruning during traversal.

use psort_core::filter::{PathFilter, PatternRole, PatternSet, normalize};
use psort_core::walker::collect_candidates;
use std::fs;
use std::path::{Path, PathBuf};

fn pats(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// PatternSet Tests
// ============================================================================

#[test]
fn test_exclude_bare_directory_covers_subtree() {
    let set = PatternSet::new(&pats(&["vendor"]), PatternRole::Exclude);
    assert!(set.matches("vendor/lib/File.ext"));
    assert!(set.matches("vendor"));
}

#[test]
fn test_exclude_no_partial_segment_match() {
    let set = PatternSet::new(&pats(&["vendor"]), PatternRole::Exclude);
    assert!(!set.matches("vendors/File.ext"));
    assert!(!set.matches("src/vendor/File.ext"));
}

#[test]
fn test_include_has_no_directory_prefix_rule() {
    let set = PatternSet::new(&pats(&["src"]), PatternRole::Include);
    assert!(!set.matches("src/File.php"));
    assert!(set.matches("src"));
}

#[test]
fn test_recursive_marker_matches_basename_at_any_depth() {
    let set = PatternSet::new(&pats(&["**/*.php"]), PatternRole::Include);
    assert!(set.matches("a.php"));
    assert!(set.matches("app/Http/Controllers/a.php"));
    assert!(!set.matches("app/a.phps"));
}

#[test]
fn test_star_does_not_cross_separator() {
    let set = PatternSet::new(&pats(&["src/*.php"]), PatternRole::Include);
    assert!(set.matches("src/a.php"));
    assert!(!set.matches("src/sub/a.php"));
}

#[test]
fn test_inner_double_star_is_a_single_segment() {
    let set = PatternSet::new(&pats(&["src/**/*.php"]), PatternRole::Include);
    assert!(!set.matches("src/a.php"));
    assert!(set.matches("src/x/a.php"));
    assert!(!set.matches("src/x/y/a.php"));
}

#[test]
fn test_trailing_double_star_stays_in_segment() {
    let set = PatternSet::new(&pats(&["build/**"]), PatternRole::Exclude);
    assert!(set.matches("build/out.php"));
    assert!(!set.matches("build/gen/out.php"));
    assert!(!set.matches("src/build.php"));
}

#[test]
fn test_escaped_star_is_literal() {
    let set = PatternSet::new(&pats(&["src/\\**.php"]), PatternRole::Include);
    assert!(set.matches("src/*a.php"));
    assert!(!set.matches("src/a.php"));
}

#[test]
fn test_question_mark_and_class() {
    let set = PatternSet::new(&pats(&["lib/?.[ch]"]), PatternRole::Include);
    assert!(set.matches("lib/a.c"));
    assert!(set.matches("lib/b.h"));
    assert!(!set.matches("lib/ab.c"));
    assert!(!set.matches("lib/a.o"));
}

#[test]
fn test_invalid_glob_never_matches() {
    let set = PatternSet::new(&pats(&["src/[.php", "**/[x"]), PatternRole::Include);
    assert!(!set.is_empty());
    assert!(!set.matches("src/[.php"));
    assert!(!set.matches("src/a.php"));
    assert!(!set.matches("[x"));
}

#[test]
fn test_invalid_glob_does_not_disable_others() {
    let set = PatternSet::new(&pats(&["[", "**/*.php"]), PatternRole::Include);
    assert!(set.matches("a/b.php"));
}

#[test]
fn test_empty_set_matches_nothing() {
    let set = PatternSet::new(&[], PatternRole::Exclude);
    assert!(set.is_empty());
    assert!(!set.matches("anything"));
}

// ============================================================================
// PathFilter Tests
// ============================================================================

#[test]
fn test_normalize_strips_curdir() {
    assert_eq!(normalize(Path::new("./src/a.php")), "src/a.php");
    assert_eq!(normalize(Path::new("src")), "src");
    assert_eq!(normalize(Path::new(".")), "");
}

#[test]
fn test_file_needs_include_and_no_exclude() {
    let filter = PathFilter::new(&pats(&["**/*.php"]), &pats(&["vendor", "**/*Test.php"]));
    assert!(filter.should_process_file(Path::new("src/User.php")));
    assert!(!filter.should_process_file(Path::new("vendor/lib/User.php")));
    assert!(!filter.should_process_file(Path::new("tests/UserTest.php")));
    assert!(!filter.should_process_file(Path::new("src/readme.md")));
}

#[test]
fn test_empty_include_selects_nothing() {
    let filter = PathFilter::new(&[], &[]);
    assert!(!filter.should_process_file(Path::new("src/User.php")));
    assert!(filter.should_visit_dir(Path::new("src")));
}

#[test]
fn test_dir_visit_uses_exclude() {
    let filter = PathFilter::new(&pats(&["**/*.php"]), &pats(&["vendor", "**/node_modules"]));
    assert!(!filter.should_visit_dir(Path::new("vendor")));
    assert!(!filter.should_visit_dir(Path::new("web/node_modules")));
    assert!(filter.should_visit_dir(Path::new("vendors")));
}

// ============================================================================
// Traversal Tests
// ============================================================================

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "<?php\n").unwrap();
}

fn relative(root: &Path, found: Vec<PathBuf>) -> Vec<String> {
    found
        .into_iter()
        .map(|p| normalize(p.strip_prefix(root).unwrap()))
        .collect()
}

#[test]
fn test_walk_prunes_excluded_directories() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/A.php");
    touch(dir.path(), "vendor/lib/B.php");
    touch(dir.path(), "vendors/C.php");

    let filter = PathFilter::new(&pats(&["**/*.php"]), &pats(&["vendor"]));
    let found = relative(dir.path(), collect_candidates(dir.path(), &filter).unwrap());

    assert_eq!(found, vec!["src/A.php", "vendors/C.php"]);
}

#[test]
fn test_walk_pruned_subtree_not_rescued_by_include() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "build/gen/keep.php");
    touch(dir.path(), "app/keep.php");

    let filter = PathFilter::new(&pats(&["**/keep.php", "build/gen/keep.php"]), &pats(&["build"]));
    let found = relative(dir.path(), collect_candidates(dir.path(), &filter).unwrap());

    assert_eq!(found, vec!["app/keep.php"]);
}

#[test]
fn test_walk_full_path_include() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/A.php");
    touch(dir.path(), "src/deep/B.php");

    let filter = PathFilter::new(&pats(&["src/*.php"]), &[]);
    let found = relative(dir.path(), collect_candidates(dir.path(), &filter).unwrap());

    assert_eq!(found, vec!["src/A.php"]);
}

#[test]
fn test_walk_inner_double_star_include() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/a.php");
    touch(dir.path(), "src/x/a.php");
    touch(dir.path(), "src/x/y/a.php");

    let filter = PathFilter::new(&pats(&["src/**/*.php"]), &[]);
    let found = relative(dir.path(), collect_candidates(dir.path(), &filter).unwrap());

    assert_eq!(found, vec!["src/x/a.php"]);
}

#[test]
fn test_walk_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let filter = PathFilter::new(&pats(&["**/*"]), &[]);
    let result = collect_candidates(&dir.path().join("nope"), &filter);
    assert!(matches!(result, Err(psort_core::PsortError::Traversal(_))));
}
