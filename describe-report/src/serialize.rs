// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize a `Report` as Markdown.

use crate::{FileResult, GroupIndex, GroupName, GroupTree, Report};
use swrite::{SWrite, swrite};

static REPORT_HEADING_PREFIX: &str = "# ";
static FILE_HEADING_PREFIX: &str = "## File: ";
static INDENT: &str = "  ";

pub(crate) fn serialize_report(report: &Report, out: &mut String) {
    // Use the destructuring syntax to ensure that all fields are handled.
    let Report { name, files } = report;

    swrite!(out, "{REPORT_HEADING_PREFIX}{name}\n");
    for file in files {
        serialize_file(file, out);
    }
}

fn serialize_file(file: &FileResult, out: &mut String) {
    // The leading newline separates this block from the heading or the previous file.
    swrite!(out, "\n{FILE_HEADING_PREFIX}{}\n\n", file.base_name());

    let tree = file.group_tree();
    serialize_forest(&tree, tree.top_level(), 0, out);
}

pub(crate) fn serialize_forest(
    tree: &GroupTree,
    groups: impl IntoIterator<Item = GroupIndex>,
    depth: usize,
    out: &mut String,
) {
    for index in groups {
        serialize_group(tree, index, depth, out);
    }
}

fn serialize_group(tree: &GroupTree, index: GroupIndex, depth: usize, out: &mut String) {
    let node = &tree[index];

    if let GroupName::Named(name) = node.name() {
        write_indent(depth, out);
        swrite!(out, "{name}\n");
    }

    for test in node.tests() {
        write_indent(depth + 1, out);
        swrite!(out, "{} {}\n", test.status.icon(), test.title);
    }

    serialize_forest(tree, node.children(), depth + 1, out);
}

fn write_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssertionRecord, TestStatus};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn file(path: &str, assertions: impl IntoIterator<Item = AssertionRecord>) -> FileResult {
        let mut file = FileResult::new(path);
        file.add_assertions(assertions);
        file
    }

    fn render_file(file: &FileResult) -> String {
        let mut out = String::new();
        serialize_file(file, &mut out);
        out
    }

    #[test]
    fn test_mixed_root_and_group() {
        let file = file(
            "src/tests/sample.test.ts",
            [
                AssertionRecord::new("a", TestStatus::Passed),
                AssertionRecord::with_ancestors(["G"], "b", TestStatus::Failed),
                AssertionRecord::with_ancestors(["G"], "c", TestStatus::Skipped),
            ],
        );

        assert_eq!(
            render_file(&file),
            "\n## File: sample.test.ts\n\n  ✓ a\nG\n  ✗ b\n  ? c\n"
        );
    }

    #[test]
    fn test_nested_groups_indent() {
        let file = file(
            "nested.test.ts",
            [
                AssertionRecord::with_ancestors(["A", "B"], "in b", TestStatus::Passed),
                AssertionRecord::with_ancestors(["A", "C"], "in c", TestStatus::Todo),
            ],
        );

        assert_eq!(
            file.group_tree().render(0),
            indoc! {"
                A
                  B
                    ✓ in b
                  C
                    ? in c
            "}
        );
    }

    #[test]
    fn test_render_at_depth() {
        let file = file(
            "depth.test.ts",
            [
                AssertionRecord::new("top", TestStatus::Passed),
                AssertionRecord::with_ancestors(["G"], "inner", TestStatus::Failed),
            ],
        );

        assert_eq!(
            file.group_tree().render(2),
            "      ✓ top\n    G\n      ✗ inner\n"
        );
    }

    #[test]
    fn test_group_tests_before_children() {
        // Direct tests are listed before child groups, even if a child group was seen first.
        let file = file(
            "order.test.ts",
            [
                AssertionRecord::with_ancestors(["outer", "inner"], "deep", TestStatus::Passed),
                AssertionRecord::with_ancestors(["outer"], "shallow", TestStatus::Passed),
            ],
        );

        assert_eq!(
            file.group_tree().render(0),
            indoc! {"
                outer
                  ✓ shallow
                  inner
                    ✓ deep
            "}
        );
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert_eq!(report.to_markdown(), "# Test Results\n");
    }

    #[test]
    fn test_report_with_files() {
        let mut report = Report::new("Nightly");
        report.add_files([
            file(
                "/ci/a.test.ts",
                [AssertionRecord::with_ancestors(["suite"], "works", TestStatus::Passed)],
            ),
            file(
                "/ci/b.test.ts",
                [AssertionRecord::new(
                    "flaky",
                    TestStatus::Unrecognized("retried".to_owned()),
                )],
            ),
        ]);

        assert_eq!(
            report.to_markdown(),
            indoc! {"
                # Nightly

                ## File: a.test.ts

                suite
                  ✓ works

                ## File: b.test.ts

                  ? flaky
            "}
        );
    }

    #[test]
    fn test_titles_rendered_verbatim() {
        let file = file(
            "raw.test.ts",
            [AssertionRecord::with_ancestors(
                ["# not a heading", "*emphasis*"],
                "`code` and <html>",
                TestStatus::Passed,
            )],
        );

        assert_eq!(
            file.group_tree().render(0),
            "# not a heading\n  *emphasis*\n    ✓ `code` and <html>\n"
        );
    }

    fn report_strategy() -> impl Strategy<Value = Report> {
        let assertion = (
            prop::collection::vec(prop::sample::select(vec!["A", "B"]), 0..3),
            "[a-z ]{0,6}",
            "[a-z]{0,7}",
        )
            .prop_map(|(ancestors, title, status)| {
                AssertionRecord::with_ancestors(ancestors, title, TestStatus::from(status))
            });
        let file_result = ("[a-z]{1,5}\\.test\\.ts", prop::collection::vec(assertion, 0..16))
            .prop_map(|(path, assertions)| file(&path, assertions));
        prop::collection::vec(file_result, 0..4).prop_map(|files| {
            let mut report = Report::default();
            report.add_files(files);
            report
        })
    }

    #[proptest]
    fn rendering_is_idempotent(#[strategy(report_strategy())] report: Report) {
        let first = report.to_markdown();
        let second = report.clone().to_markdown();
        prop_assert_eq!(first, second);
    }

    #[proptest]
    fn every_assertion_gets_one_line(#[strategy(report_strategy())] report: Report) {
        let markdown = report.to_markdown();
        let test_lines = markdown
            .lines()
            .filter(|line| {
                let trimmed = line.trim_start_matches(' ');
                trimmed.starts_with("✓ ") || trimmed.starts_with("✗ ") || trimmed.starts_with("? ")
            })
            .count();
        prop_assert_eq!(test_lines, report.assertion_count());
    }
}
