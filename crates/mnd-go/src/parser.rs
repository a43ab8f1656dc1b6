//! Go source parser using Tree-sitter.

use mnd_core::{ParseError, ParsedSource, SourceParser};
use tracing::trace;
use tree_sitter::{Language, Node as TsNode, Parser, TreeCursor};

use crate::lower::{lower_node, span};

/// Parses Go source and lowers it into a pre-order node stream.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    /// Creates a new Go parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for GoParser {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn parse(&self, source: &str) -> Result<ParsedSource, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::new(format!("failed to load Go grammar: {e}")))?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or_else(|| ParseError::new("parser produced no tree"))?;

        let parsed = lower_tree(&mut tree.root_node().walk(), src);
        trace!(
            "Lowered {} nodes, {} syntax errors",
            parsed.nodes.len(),
            parsed.syntax_errors.len()
        );
        Ok(parsed)
    }
}

/// Visits every node in pre-order, lowering the ones detectors care about.
/// Error subtrees are recorded and not descended into.
fn lower_tree(cursor: &mut TreeCursor<'_>, src: &[u8]) -> ParsedSource {
    let mut parsed = ParsedSource::default();
    loop {
        let node = cursor.node();
        let descend = if node.is_error() || node.is_missing() {
            parsed.syntax_errors.push(syntax_error(&node));
            false
        } else {
            if let Some(lowered) = lower_node(&node, src) {
                parsed.nodes.push(lowered);
            }
            true
        };
        if !advance(cursor, descend) {
            return parsed;
        }
    }
}

fn syntax_error(node: &TsNode<'_>) -> ParseError {
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        "unexpected syntax".to_owned()
    };
    ParseError::new(message).at_line(span(node).line)
}

/// Moves to the next node in pre-order, entering the current node's
/// children only if `descend`. Returns false once the walk is done.
fn advance(cursor: &mut TreeCursor<'_>, descend: bool) -> bool {
    if descend && cursor.goto_first_child() {
        return true;
    }
    loop {
        if cursor.goto_next_sibling() {
            return true;
        }
        if !cursor.goto_parent() {
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnd_core::{Expr, LiteralKind, Node, NodeKind};

    fn parse_file(source: &str) -> Vec<Node> {
        let parsed = GoParser::new().parse(source).expect("Go syntax tree");
        assert!(parsed.syntax_errors.is_empty(), "{:?}", parsed.syntax_errors);
        parsed.nodes
    }

    fn parse(body: &str) -> Vec<Node> {
        parse_file(&format!("package main\n\nfunc f() {{\n{body}\n}}\n"))
    }

    fn calls(nodes: &[Node]) -> Vec<&mnd_core::syntax::CallExpr> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Call(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lowers_call_arguments() {
        let nodes = parse("\tdoWork(5, \"label\")");
        let calls = calls(&nodes);
        assert_eq!(calls.len(), 1);

        let call = calls[0];
        assert!(matches!(&call.callee, Expr::Ident(id) if id.name == "doWork"));
        assert_eq!(call.args.len(), 2);
        let first = call.args[0].as_literal().unwrap();
        assert_eq!(first.kind, LiteralKind::Int);
        assert_eq!(first.text, "5");
        assert_eq!((first.span.line, first.span.column), (4, 9));
        assert_eq!(call.args[1].as_literal().unwrap().kind, LiteralKind::String);
    }

    #[test]
    fn comments_are_not_arguments() {
        let nodes = parse("\tdoWork(/* size */ 5)");
        assert_eq!(calls(&nodes)[0].args.len(), 1);
    }

    #[test]
    fn selector_callee_has_qualified_name() {
        let nodes = parse("\ttime.Sleep(30)");
        assert_eq!(
            calls(&nodes)[0].qualified_name().as_deref(),
            Some("time.Sleep")
        );
    }

    #[test]
    fn make_channel_argument_is_channel_type() {
        let nodes = parse("\tch := make(chan int, 5)\n\t_ = ch");
        let call = calls(&nodes)[0];
        assert!(matches!(call.args[0], Expr::ChanType(_)));
        assert_eq!(call.args[1].as_literal().unwrap().text, "5");
    }

    #[test]
    fn const_declaration_records_keyword_line() {
        let nodes = parse_file("package main\n\nconst (\n\tA = 1\n)\n\nconst B = time.Duration(5)\n");
        let lines: Vec<usize> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::ConstDecl(decl) => Some(decl.keyword.line),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![3, 7]);
    }

    #[test]
    fn declaration_precedes_nested_call() {
        let nodes = parse_file("package main\n\nconst B = time.Duration(5)\n");
        let kinds: Vec<NodeKind> = nodes.iter().map(Node::kind).collect();
        assert_eq!(kinds, vec![NodeKind::ConstDecl, NodeKind::Call]);
    }

    #[test]
    fn lowers_assignments() {
        let nodes = parse("\tx := 3\n\tx += a * 4\n\t_ = x");
        let assigns: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Assign(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(assigns.len(), 3);
        assert_eq!(assigns[0].op, ":=");
        assert_eq!(assigns[0].rhs[0].as_literal().unwrap().text, "3");
        assert_eq!(assigns[1].op, "+=");
        let bin = assigns[1].rhs[0].as_binary().unwrap();
        assert_eq!(bin.op, "*");
        assert_eq!(bin.right.as_literal().unwrap().text, "4");
    }

    #[test]
    fn lowers_keyed_element_value() {
        let nodes = parse("\t_ = Config{Port: 8080}");
        let value = nodes.iter().find_map(|n| match n {
            Node::KeyValue(kv) => Some(&kv.value),
            _ => None,
        });
        assert_eq!(value.and_then(Expr::as_literal).map(|l| l.text.as_str()), Some("8080"));
    }

    #[test]
    fn lowers_case_if_and_return() {
        let nodes = parse_file(
            "package main\n\nfunc f(x int) int {\n\tswitch x {\n\tcase 2, 3:\n\t}\n\tif x > 7 {\n\t\treturn 9\n\t}\n\treturn (x + 1)\n}\n",
        );

        let case = nodes.iter().find_map(|n| match n {
            Node::Case(c) => Some(c),
            _ => None,
        });
        assert_eq!(case.map(|c| c.values.len()), Some(2));

        let cond = nodes.iter().find_map(|n| match n {
            Node::If(stmt) => Some(&stmt.condition),
            _ => None,
        });
        assert_eq!(cond.and_then(Expr::as_binary).map(|b| b.op.as_str()), Some(">"));

        let returns: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Return(r) => Some(r),
                _ => None,
            })
            .collect();
        assert_eq!(returns.len(), 2);
        assert_eq!(returns[0].results[0].as_literal().unwrap().text, "9");
        assert!(matches!(returns[1].results[0], Expr::Paren(_)));
        assert!(nodes.iter().any(|n| n.kind() == NodeKind::Paren));
    }

    #[test]
    fn negative_literal_is_unary() {
        let nodes = parse("\tx := -5\n\t_ = x");
        let rhs = nodes.iter().find_map(|n| match n {
            Node::Assign(a) => a.rhs.first(),
            _ => None,
        });
        assert!(matches!(rhs, Some(Expr::Unary(u)) if u.op == "-"));
    }

    #[test]
    fn syntax_errors_keep_the_rest_of_the_file() {
        let parsed = GoParser::new()
            .parse("package main\n\nfunc ok() {\n\tg(5)\n}\n\nfunc broken( {\n")
            .expect("Go syntax tree");

        assert_eq!(calls(&parsed.nodes).len(), 1);
        assert!(!parsed.syntax_errors.is_empty());
        assert!(parsed
            .syntax_errors
            .iter()
            .all(|e| e.line.is_some_and(|line| line >= 5)));
    }

    #[test]
    fn unterminated_expression_reports_its_line() {
        let parsed = GoParser::new()
            .parse("package main\n\nfunc f() {\n\tx := (\n\th(7)\n}\n")
            .expect("Go syntax tree");
        assert!(!parsed.syntax_errors.is_empty());
        assert!(parsed
            .syntax_errors
            .iter()
            .all(|e| e.line.is_some_and(|line| line >= 4)));
    }

    #[test]
    fn empty_file_has_no_nodes() {
        let parsed = GoParser::new().parse("package main\n").expect("Go syntax tree");
        assert_eq!(parsed, ParsedSource::default());
    }
}
