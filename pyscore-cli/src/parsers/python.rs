//! Python parser using tree-sitter
//!
//! tree-sitter is error tolerant, so validity is decided here: any ERROR or
//! MISSING node makes the source invalid, and so do constructs the grammar
//! accepts but CPython rejects (Python 2 `print`/`exec` statements, `<>`,
//! a parameter without default after one with a default, a positional
//! argument after a keyword argument). Valid sources are lowered into a
//! [`SyntaxTree`].
//!
//! `async def` and `async for` are not lowered as functions or loops; only
//! their contents are kept.

use crate::error::AnalysisError;
use crate::parsers::tree::{Callee, FunctionInfo, Node, NodeKind, SyntaxTree};
use crate::parsers::ParseError;
use tree_sitter::Parser;

type TsNode<'t> = tree_sitter::Node<'t>;

/// Parse Python source into a syntax tree
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(AnalysisError::from)?;

    let tree = parser
        .parse(source, None)
        .ok_or(AnalysisError::ParserAborted)?;
    let root = tree.root_node();

    if let Some(err) = find_syntax_error(root) {
        return Err(err);
    }

    let lowering = Lowering {
        source: source.as_bytes(),
    };
    let module = Node::new(NodeKind::Module, 1, end_line(root))
        .with_children(lowering.lower_children(root, 0));
    Ok(SyntaxTree::new(module))
}

fn syntax(line: u32, message: impl Into<String>) -> ParseError {
    ParseError::Syntax {
        line,
        message: message.into(),
    }
}

/// First syntax problem in source order, if any
fn find_syntax_error(root: TsNode<'_>) -> Option<ParseError> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let line = start_line(node);
        if node.is_missing() {
            return Some(syntax(
                line,
                format!("invalid syntax: expected '{}' (line {line})", node.kind()),
            ));
        }
        if node.is_error() {
            return Some(syntax(line, format!("invalid syntax (line {line})")));
        }
        let err = match node.kind() {
            "print_statement" => Some(syntax(
                line,
                format!("Missing parentheses in call to 'print'. Did you mean print(...)? (line {line})"),
            )),
            "exec_statement" => Some(syntax(
                line,
                format!("Missing parentheses in call to 'exec' (line {line})"),
            )),
            "<>" => Some(syntax(line, format!("invalid syntax (line {line})"))),
            "parameters" | "lambda_parameters" => check_parameter_order(node),
            "argument_list" => check_argument_order(node),
            _ => None,
        };
        if err.is_some() {
            return err;
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Positional parameters after one with a default must have a default too,
/// up to the first `*` / `*args` / `**kwargs`
fn check_parameter_order(params: TsNode<'_>) -> Option<ParseError> {
    let mut seen_default = false;
    for param in code_children(params) {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None
            }
            "typed_parameter" if is_splat_parameter(param) => return None,
            "identifier" | "typed_parameter" | "tuple_pattern" if seen_default => {
                let line = start_line(param);
                return Some(syntax(
                    line,
                    format!("non-default argument follows default argument (line {line})"),
                ));
            }
            _ => {}
        }
    }
    None
}

/// `*args: T` / `**kw: T` are typed parameters wrapping a splat pattern
fn is_splat_parameter(param: TsNode<'_>) -> bool {
    code_children(param)
        .iter()
        .any(|c| matches!(c.kind(), "list_splat_pattern" | "dictionary_splat_pattern"))
}

/// Positional arguments may not follow keyword arguments or `**` unpacking
fn check_argument_order(args: TsNode<'_>) -> Option<ParseError> {
    let mut seen_keyword = false;
    let mut seen_kwargs = false;
    for arg in code_children(args) {
        let line = start_line(arg);
        match arg.kind() {
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => seen_kwargs = true,
            "list_splat" if seen_kwargs => {
                return Some(syntax(
                    line,
                    format!("iterable argument unpacking follows keyword argument unpacking (line {line})"),
                ))
            }
            "list_splat" => {}
            _ if seen_kwargs => {
                return Some(syntax(
                    line,
                    format!("positional argument follows keyword argument unpacking (line {line})"),
                ))
            }
            _ if seen_keyword => {
                return Some(syntax(
                    line,
                    format!("positional argument follows keyword argument (line {line})"),
                ))
            }
            _ => {}
        }
    }
    None
}

fn start_line(node: TsNode<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

fn end_line(node: TsNode<'_>) -> u32 {
    node.end_position().row as u32 + 1
}

/// Last line holding code inside `node`. Trailing comments are extras in
/// tree-sitter and may be attached to the enclosing block; skip them.
fn last_code_line(node: TsNode<'_>) -> u32 {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let last = current
            .children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .last();
        match last {
            Some(child) => current = child,
            None => return end_line(current),
        }
    }
}

/// Named children minus comments
fn code_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

struct Lowering<'s> {
    source: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: TsNode<'_>) -> String {
        node.utf8_text(self.source).unwrap_or_default().to_string()
    }

    fn field_text(&self, node: TsNode<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n))
            .unwrap_or_default()
    }

    fn lower_children(&self, node: TsNode<'_>, depth: u32) -> Vec<Node> {
        let mut out = Vec::new();
        for child in code_children(node) {
            self.lower(child, depth, &mut out);
        }
        out
    }

    /// Lower one grammar node whose parent sits at `parent_depth`. Kinds
    /// without a tree counterpart hand their children to the caller.
    fn lower(&self, node: TsNode<'_>, parent_depth: u32, out: &mut Vec<Node>) {
        let depth = if adds_level(node.kind()) {
            parent_depth + 1
        } else {
            parent_depth
        };

        let kind = match node.kind() {
            "function_definition" if !is_async(node) => {
                Some(NodeKind::FunctionDef(self.function_info(node)))
            }
            "class_definition" => Some(NodeKind::ClassDef {
                name: self.field_text(node, "name"),
            }),
            "try_statement" if !has_child_kind(node, "except_group_clause") => {
                Some(NodeKind::Try)
            }
            "except_clause" => Some(NodeKind::ExceptHandler {
                bare: is_bare_except(node),
            }),
            "except_group_clause" => Some(NodeKind::ExceptHandler { bare: false }),
            "for_statement" if !is_async(node) => Some(NodeKind::For),
            "call" => Some(NodeKind::Call {
                callee: self.callee(node),
            }),
            "expression_statement" => Some(NodeKind::ExprStmt {
                call: self.statement_call(node),
            }),
            _ => None,
        };

        let children = self.lower_children(node, depth);
        match kind {
            Some(kind) => out.push(
                Node::new(kind, start_line(node), last_code_line(node))
                    .at_depth(depth)
                    .with_children(children),
            ),
            None => out.extend(children),
        }
    }

    fn function_info(&self, node: TsNode<'_>) -> FunctionInfo {
        let has_docstring = node
            .child_by_field_name("body")
            .is_some_and(|body| self.has_docstring(body));
        let has_type_hints = node.child_by_field_name("return_type").is_some()
            || node
                .child_by_field_name("parameters")
                .is_some_and(has_annotated_parameter);

        FunctionInfo {
            name: self.field_text(node, "name"),
            has_docstring,
            has_type_hints,
        }
    }

    fn has_docstring(&self, body: TsNode<'_>) -> bool {
        let Some(first) = code_children(body).into_iter().next() else {
            return false;
        };
        if first.kind() != "expression_statement" {
            return false;
        }
        match code_children(first).as_slice() {
            [expr] => self
                .string_value(*expr)
                .is_some_and(|text| !text.trim().is_empty()),
            _ => false,
        }
    }

    /// Literal text of a plain `str` literal. f-strings and bytes are not
    /// docstrings.
    fn string_value(&self, node: TsNode<'_>) -> Option<String> {
        match node.kind() {
            "string" => {
                let mut value = String::new();
                for part in code_children(node) {
                    match part.kind() {
                        "string_start" => {
                            let prefix = self.text(part);
                            if prefix.chars().any(|c| matches!(c, 'f' | 'F' | 'b' | 'B')) {
                                return None;
                            }
                        }
                        "string_content" => value.push_str(&self.text(part)),
                        "interpolation" => return None,
                        _ => {}
                    }
                }
                Some(value)
            }
            "concatenated_string" => code_children(node)
                .into_iter()
                .map(|part| self.string_value(part))
                .collect(),
            _ => None,
        }
    }

    fn callee(&self, call: TsNode<'_>) -> Callee {
        let Some(function) = call.child_by_field_name("function").map(unwrap_parens) else {
            return Callee::Other;
        };
        match function.kind() {
            "identifier" => Callee::Name(self.text(function)),
            "attribute" => function
                .child_by_field_name("attribute")
                .map(|attr| Callee::Attribute(self.text(attr)))
                .unwrap_or(Callee::Other),
            _ => Callee::Other,
        }
    }

    /// Callee of the statement when the statement is exactly one call
    fn statement_call(&self, stmt: TsNode<'_>) -> Option<Callee> {
        match code_children(stmt).as_slice() {
            [expr] => {
                let expr = unwrap_parens(*expr);
                (expr.kind() == "call").then(|| self.callee(expr))
            }
            _ => None,
        }
    }
}

/// Whether a grammar node is a level of its own in Python's syntax. Blocks,
/// `else:`/`finally:` wrappers, parentheses, argument lists and the like are
/// not.
fn adds_level(kind: &str) -> bool {
    !matches!(
        kind,
        "block"
            | "else_clause"
            | "finally_clause"
            | "decorated_definition"
            | "argument_list"
            | "parenthesized_expression"
            | "assignment"
            | "augmented_assignment"
            | "with_clause"
            | "as_pattern"
            | "pair"
            | "default_parameter"
            | "typed_default_parameter"
            | "type"
    )
}

fn is_async(node: TsNode<'_>) -> bool {
    has_child_kind(node, "async")
}

/// Direct child of the given kind, named or not
fn has_child_kind(node: TsNode<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// `((expr))` -> `expr`
fn unwrap_parens(mut node: TsNode<'_>) -> TsNode<'_> {
    while node.kind() == "parenthesized_expression" {
        match code_children(node).as_slice() {
            [inner] => node = *inner,
            _ => break,
        }
    }
    node
}

/// `except:` has no child besides its block
fn is_bare_except(node: TsNode<'_>) -> bool {
    code_children(node).iter().all(|c| c.kind() == "block")
}

fn has_annotated_parameter(params: TsNode<'_>) -> bool {
    code_children(params)
        .iter()
        .any(|p| matches!(p.kind(), "typed_parameter" | "typed_default_parameter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> SyntaxTree {
        parse(src).expect("valid python")
    }

    fn only_function(tree: &SyntaxTree) -> (&Node, &FunctionInfo) {
        let mut funcs = tree.functions();
        let f = funcs.next().expect("one function");
        assert!(funcs.next().is_none());
        f
    }

    #[test]
    fn test_function_lines_and_name() {
        let tree = parse_ok("x = 1\n\ndef compute(a, b):\n    c = a + b\n    return c\n");
        let (node, info) = only_function(&tree);
        assert_eq!(info.name, "compute");
        assert_eq!(node.start_line, 3);
        assert_eq!(node.end_line, 5);
        assert_eq!(node.line_span(), 2);
    }

    #[test]
    fn test_trailing_comment_not_part_of_function() {
        let tree = parse_ok("def f():\n    pass\n    # trailing\n\nx = 1\n");
        let (node, _) = only_function(&tree);
        assert_eq!(node.end_line, 2);
    }

    #[test]
    fn test_decorated_function_starts_at_def() {
        let tree = parse_ok("@decorator\ndef f():\n    return 1\n");
        let (node, _) = only_function(&tree);
        assert_eq!(node.start_line, 2);
    }

    #[test]
    fn test_docstring_detection() {
        let tree = parse_ok(
            "def a():\n    \"\"\"Does a.\"\"\"\n\ndef b():\n    x = 1\n\ndef c():\n    \"\"\"   \"\"\"\n\ndef d():\n    f\"doc {x}\"\n\ndef e():\n    # note\n    'doc'\n",
        );
        let docs: Vec<(String, bool)> = tree
            .functions()
            .map(|(_, f)| (f.name.clone(), f.has_docstring))
            .collect();
        assert_eq!(
            docs,
            vec![
                ("a".to_string(), true),
                ("b".to_string(), false),
                ("c".to_string(), false),
                ("d".to_string(), false),
                ("e".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_type_hint_detection() {
        let tree = parse_ok(
            "def a(x: int):\n    pass\n\ndef b(x) -> int:\n    return 1\n\ndef c(x, y=2):\n    pass\n\ndef d(x: int = 3):\n    pass\n",
        );
        let hints: Vec<bool> = tree.functions().map(|(_, f)| f.has_type_hints).collect();
        assert_eq!(hints, vec![true, true, false, true]);
    }

    #[test]
    fn test_nested_and_class_functions_are_kept() {
        let tree = parse_ok(
            "class A:\n    def m(self):\n        def inner():\n            pass\n        return inner\n",
        );
        assert_eq!(tree.functions().count(), 2);
        assert_eq!(
            tree.count(|k| matches!(k, NodeKind::ClassDef { .. })),
            1
        );
    }

    #[test]
    fn test_except_handlers() {
        let tree = parse_ok(
            "try:\n    a()\nexcept ValueError as e:\n    pass\nexcept:\n    pass\n",
        );
        let handlers: Vec<(u32, bool)> = tree
            .walk()
            .filter_map(|n| match n.kind {
                NodeKind::ExceptHandler { bare } => Some((n.start_line, bare)),
                _ => None,
            })
            .collect();
        assert_eq!(handlers, vec![(3, false), (5, true)]);
        assert_eq!(tree.count(|k| matches!(k, NodeKind::Try)), 1);
    }

    #[test]
    fn test_calls_and_statement_calls() {
        let tree = parse_ok("items.append(1)\nprint(len(x))\ny = eval('1')\n");
        let callees: Vec<Callee> = tree.calls().map(|(_, c)| c.clone()).collect();
        assert_eq!(
            callees,
            vec![
                Callee::Attribute("append".into()),
                Callee::Name("print".into()),
                Callee::Name("eval".into()),
                // nested in print's arguments, so one level deeper
                Callee::Name("len".into()),
            ]
        );

        let stmt_calls: Vec<Option<Callee>> = tree
            .walk()
            .filter_map(|n| match &n.kind {
                NodeKind::ExprStmt { call } => Some(call.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            stmt_calls,
            vec![
                Some(Callee::Attribute("append".into())),
                Some(Callee::Name("print".into())),
                None,
            ]
        );
    }

    #[test]
    fn test_for_loop_contains_body_calls() {
        let tree = parse_ok("for i in range(3):\n    out.append(i)\n");
        let loop_node = tree
            .walk()
            .find(|n| n.kind == NodeKind::For)
            .expect("for loop");
        assert_eq!(loop_node.start_line, 1);
        assert_eq!(loop_node.end_line, 2);
        assert!(loop_node
            .descendants()
            .any(|n| matches!(&n.kind, NodeKind::ExprStmt { call: Some(c) } if c.is_method("append"))));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse("def ok():\n    pass\n\ndef broken(:\n    pass\n").unwrap_err();
        match err {
            ParseError::Syntax { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("line 4"), "{message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_python2_print_is_syntax_error() {
        let err = parse("print \"hello\"\n").unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert_eq!(line, 1),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    fn syntax_error(src: &str) -> (u32, String) {
        match parse(src).unwrap_err() {
            ParseError::Syntax { line, message } => (line, message),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_default_parameter_after_default_is_syntax_error() {
        let (line, message) = syntax_error("def f(a=1, b):\n    pass\n");
        assert_eq!(line, 1);
        assert!(message.contains("non-default argument"), "{message}");

        let (line, _) = syntax_error("x = 1\ng = lambda a=1, b: 0\n");
        assert_eq!(line, 2);

        let (line, _) = syntax_error("def f(\n    a: int = 1,\n    b: int,\n):\n    pass\n");
        assert_eq!(line, 3);
    }

    #[test]
    fn test_valid_parameter_orders_parse() {
        parse_ok("def f(a, b=1, *args, c, d=2, **kw):\n    pass\n");
        parse_ok("def g(a=1, /, b=2, *, c):\n    pass\n");
        parse_ok("def h(a: int = 1, *rest: int, k: str):\n    pass\n");
        parse_ok("k = lambda a, b=1: a + b\n");
    }

    #[test]
    fn test_python2_not_equal_is_syntax_error() {
        let (line, message) = syntax_error("a = 1\nif a <> 2:\n    pass\n");
        assert_eq!(line, 2);
        assert!(message.contains("invalid syntax"), "{message}");
    }

    #[test]
    fn test_argument_order() {
        let (line, message) = syntax_error("f(a=1, 2)\n");
        assert_eq!(line, 1);
        assert!(message.contains("positional argument follows keyword argument"), "{message}");

        let (_, message) = syntax_error("f(**kw, x)\n");
        assert!(message.contains("keyword argument unpacking"), "{message}");

        parse_ok("f(1, *rest, key=2, *more, **kw)\n");
    }

    #[test]
    fn test_async_def_and_for_are_not_lowered() {
        let tree = parse_ok("async def Fetch():\n    pass\n");
        assert_eq!(tree.functions().count(), 0);

        let tree = parse_ok(
            "async def main(items):\n    async for item in items:\n        out.append(item)\n\n    def helper():\n        pass\n",
        );
        let names: Vec<&str> = tree.functions().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["helper"]);
        assert!(!tree.walk().any(|n| n.kind == NodeKind::For));
        // the loop body is still there
        assert!(tree
            .calls()
            .any(|(_, c)| c.is_method("append")));
    }

    #[test]
    fn test_try_star_is_not_a_try() {
        let tree = parse_ok("try:\n    run()\nexcept* ValueError:\n    pass\n");
        assert!(!tree.walk().any(|n| n.kind == NodeKind::Try));
        assert!(tree
            .walk()
            .any(|n| n.kind == NodeKind::ExceptHandler { bare: false }));
    }

    #[test]
    fn test_parenthesized_statement_call() {
        let tree = parse_ok("for x in xs:\n    (out.append(x))\n");
        let stmt_calls: Vec<Option<Callee>> = tree
            .walk()
            .filter_map(|n| match &n.kind {
                NodeKind::ExprStmt { call } => Some(call.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(stmt_calls, vec![Some(Callee::Attribute("append".into()))]);

        let tree = parse_ok("(print)('hi')\n");
        let callees: Vec<Callee> = tree.calls().map(|(_, c)| c.clone()).collect();
        assert_eq!(callees, vec![Callee::Name("print".into())]);
    }

    #[test]
    fn test_depth_follows_python_nesting() {
        let tree = parse_ok("if ready:\n    def inner():\n        pass\n\ndef outer():\n    pass\n");
        let depths: Vec<(&str, u32)> = tree
            .functions()
            .map(|(n, f)| (f.name.as_str(), n.depth))
            .collect();
        assert_eq!(depths, vec![("outer", 1), ("inner", 2)]);
    }

    #[test]
    fn test_empty_source_is_valid() {
        let tree = parse_ok("");
        assert!(tree.root().children.is_empty());
    }
}
