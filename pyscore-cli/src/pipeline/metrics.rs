//! Size and shape metrics

use crate::models::Metrics;
use crate::parsers::{NodeKind, SyntaxTree};
use crate::source::SourceUnit;

/// Collect line counts and function/class statistics for one file.
///
/// `lines_of_code` is the raw line count; blank and comment lines are
/// counted in it as well as in their own fields.
pub fn collect(unit: &SourceUnit, tree: &SyntaxTree) -> Metrics {
    let lines = unit.lines();
    let mut blank_lines = 0;
    let mut comment_lines = 0;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_lines += 1;
        } else if trimmed.starts_with('#') {
            comment_lines += 1;
        }
    }

    let lengths: Vec<u32> = tree.functions().map(|(node, _)| node.line_span()).collect();
    let max_function_length = lengths.iter().copied().max().unwrap_or(0);
    let avg_function_length = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().map(|&l| f64::from(l)).sum::<f64>() / lengths.len() as f64
    };

    Metrics {
        lines_of_code: lines.len(),
        comment_lines,
        blank_lines,
        functions: lengths.len(),
        classes: tree.count(|k| matches!(k, NodeKind::ClassDef { .. })),
        max_function_length,
        avg_function_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::python;

    fn metrics_of(src: &str) -> Metrics {
        let unit = SourceUnit::from_text("m.py", src);
        let tree = python::parse(src).unwrap();
        collect(&unit, &tree)
    }

    #[test]
    fn test_line_classification() {
        let m = metrics_of("# header\n\nx = 1\n    # indented comment\n");
        // trailing newline yields a fifth, empty line
        assert_eq!(m.lines_of_code, 5);
        assert_eq!(m.comment_lines, 2);
        assert_eq!(m.blank_lines, 2);
        assert_eq!(m.functions, 0);
        assert_eq!(m.max_function_length, 0);
        assert_eq!(m.avg_function_length, 0.0);
    }

    #[test]
    fn test_function_lengths_include_nested() {
        let src = "\
class A:
    def m(self):
        def inner():
            return 1
        return inner()

def g():
    pass
";
        let m = metrics_of(src);
        assert_eq!(m.classes, 1);
        assert_eq!(m.functions, 3);
        // m: 2..5 -> 3, inner: 3..4 -> 1, g: 7..8 -> 1
        assert_eq!(m.max_function_length, 3);
        assert!((m.avg_function_length - 5.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_trivial_function() {
        let m = metrics_of("def f():\n    pass");
        assert_eq!(m.functions, 1);
        assert_eq!(m.classes, 0);
        assert_eq!(m.lines_of_code, 2);
        assert_eq!(m.max_function_length, 1);
    }
}
