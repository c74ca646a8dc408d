//! Syntax tree consumed by the analyzers
//!
//! Only the node kinds the analyzers care about are materialized. Grammar
//! nodes in between (blocks, arguments, binary operators, ...) are flattened
//! into their nearest kept ancestor, so "is inside" relations survive while the
//! tree stays small.
//!
//! Every node also records its syntactic depth, counted over Python's own
//! syntax (a block or a decorator wrapper adds no level, a nested statement
//! does). Walks visit nodes level by level by that depth, in source order
//! within a level, so issues come out in the same order a breadth-first walk
//! over the Python AST produces them.

/// What a call expression calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    /// A bare name, e.g. `eval(...)`
    Name(String),
    /// A method/attribute call; holds the attribute name, e.g. `append`
    Attribute(String),
    /// Anything else (subscripts, calls of calls, lambdas)
    Other,
}

impl Callee {
    pub fn is_name(&self, name: &str) -> bool {
        matches!(self, Callee::Name(n) if n == name)
    }

    pub fn is_method(&self, name: &str) -> bool {
        matches!(self, Callee::Attribute(n) if n == name)
    }
}

/// Facts about a function definition gathered at parse time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// First statement of the body is a non-empty string literal
    pub has_docstring: bool,
    /// Return annotation or at least one annotated parameter
    pub has_type_hints: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Module,
    FunctionDef(FunctionInfo),
    ClassDef { name: String },
    Try,
    /// `bare` is true for `except:` without an exception type
    ExceptHandler { bare: bool },
    For,
    Call { callee: Callee },
    /// Expression statement; `call` is set when the whole statement is one call
    ExprStmt { call: Option<Callee> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub start_line: u32,
    pub end_line: u32,
    /// Syntactic depth; the module is 0
    pub depth: u32,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, start_line: u32, end_line: u32) -> Self {
        Self {
            kind,
            start_line,
            end_line,
            depth: 0,
            children: Vec::new(),
        }
    }

    pub fn at_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Breadth-first walk over this node and every descendant
    pub fn walk(&self) -> Walk<'_> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev());
        }
        // stable: source order is kept within a level
        nodes.sort_by_key(|n| n.depth);
        Walk {
            nodes: nodes.into_iter(),
        }
    }

    /// Breadth-first walk over descendants only
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        self.walk().skip(1)
    }

    pub fn as_function(&self) -> Option<&FunctionInfo> {
        match &self.kind {
            NodeKind::FunctionDef(info) => Some(info),
            _ => None,
        }
    }

    /// Lines spanned after the header line
    pub fn line_span(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line)
    }
}

pub struct Walk<'a> {
    nodes: std::vec::IntoIter<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next()
    }
}

/// A parsed module. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    root: Node,
}

impl SyntaxTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Every node, root included, level by level
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// All function definitions, nested ones included
    pub fn functions(&self) -> impl Iterator<Item = (&Node, &FunctionInfo)> {
        self.walk().filter_map(|n| n.as_function().map(|f| (n, f)))
    }

    /// All call expressions
    pub fn calls(&self) -> impl Iterator<Item = (&Node, &Callee)> {
        self.walk().filter_map(|n| match &n.kind {
            NodeKind::Call { callee } => Some((n, callee)),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.walk().filter(|n| pred(&n.kind)).count()
    }
}
