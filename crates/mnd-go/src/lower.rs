//! Lowering of Tree-sitter Go nodes into the `mnd-core` syntax model.

use mnd_core::syntax::{
    AssignStmt, BinaryExpr, CallExpr, CaseClause, ConstDecl, Expr, Ident, IfStmt, KeyValueExpr,
    Literal, LiteralKind, Node, ParenExpr, ReturnStmt, SelectorExpr, Span, UnaryExpr,
};
use tree_sitter::Node as TsNode;

pub(crate) fn span(node: &TsNode<'_>) -> Span {
    let start = node.start_position();
    Span::new(
        start.row + 1,
        start.column + 1,
        node.start_byte(),
        node.end_byte() - node.start_byte(),
    )
}

fn text<'a>(node: &TsNode<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Named children that carry syntax, skipping interleaved comments.
fn operands<'t>(node: &TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    let children: Vec<_> = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

fn first_operand<'t>(node: &TsNode<'t>) -> Option<TsNode<'t>> {
    operands(node).into_iter().next()
}

fn field_expr(node: &TsNode<'_>, field: &str, src: &[u8]) -> Expr {
    node.child_by_field_name(field)
        .map_or_else(|| Expr::Other(span(node)), |child| lower_expr(&child, src))
}

fn field_text(node: &TsNode<'_>, field: &str, src: &[u8]) -> String {
    node.child_by_field_name(field)
        .map(|child| text(&child, src).to_owned())
        .unwrap_or_default()
}

/// Lowers the members of an `expression_list` (or a lone expression).
fn expr_list(node: Option<TsNode<'_>>, src: &[u8]) -> Vec<Expr> {
    match node {
        Some(list) if list.kind() == "expression_list" => operands(&list)
            .iter()
            .map(|child| lower_expr(child, src))
            .collect(),
        Some(single) => vec![lower_expr(&single, src)],
        None => Vec::new(),
    }
}

fn literal(node: &TsNode<'_>, kind: LiteralKind, src: &[u8]) -> Expr {
    Expr::Literal(Literal::new(kind, text(node, src), span(node)))
}

fn call(node: &TsNode<'_>, src: &[u8]) -> CallExpr {
    let args = node
        .child_by_field_name("arguments")
        .map(|list| {
            operands(&list)
                .iter()
                .map(|arg| lower_expr(arg, src))
                .collect()
        })
        .unwrap_or_default();

    CallExpr {
        callee: field_expr(node, "function", src),
        args,
        span: span(node),
    }
}

/// A conversion such as `[]byte(s)` reads as a call with one argument.
fn conversion(node: &TsNode<'_>, src: &[u8]) -> CallExpr {
    CallExpr {
        callee: node
            .child_by_field_name("type")
            .map_or_else(|| Expr::Other(span(node)), |ty| Expr::Other(span(&ty))),
        args: vec![field_expr(node, "operand", src)],
        span: span(node),
    }
}

fn paren(node: &TsNode<'_>, src: &[u8]) -> ParenExpr {
    ParenExpr {
        inner: first_operand(node)
            .map_or_else(|| Expr::Other(span(node)), |inner| lower_expr(&inner, src)),
        span: span(node),
    }
}

/// Lowers an expression node.
pub(crate) fn lower_expr(node: &TsNode<'_>, src: &[u8]) -> Expr {
    match node.kind() {
        "int_literal" => literal(node, LiteralKind::Int, src),
        "float_literal" => literal(node, LiteralKind::Float, src),
        "imaginary_literal" => literal(node, LiteralKind::Imaginary, src),
        "rune_literal" => literal(node, LiteralKind::Rune, src),
        "interpreted_string_literal" | "raw_string_literal" => {
            literal(node, LiteralKind::String, src)
        }
        "binary_expression" => Expr::Binary(Box::new(BinaryExpr {
            left: field_expr(node, "left", src),
            op: field_text(node, "operator", src),
            right: field_expr(node, "right", src),
            span: span(node),
        })),
        "unary_expression" => Expr::Unary(Box::new(UnaryExpr {
            op: field_text(node, "operator", src),
            operand: field_expr(node, "operand", src),
            span: span(node),
        })),
        "parenthesized_expression" => Expr::Paren(Box::new(paren(node, src))),
        "call_expression" => Expr::Call(Box::new(call(node, src))),
        "type_conversion_expression" => Expr::Call(Box::new(conversion(node, src))),
        "selector_expression" => Expr::Selector(Box::new(SelectorExpr {
            operand: field_expr(node, "operand", src),
            field: node.child_by_field_name("field").map_or_else(
                || Ident {
                    name: String::new(),
                    span: span(node),
                },
                |field| Ident {
                    name: text(&field, src).to_owned(),
                    span: span(&field),
                },
            ),
            span: span(node),
        })),
        "identifier" | "field_identifier" | "package_identifier" | "type_identifier" => {
            Expr::Ident(Ident {
                name: text(node, src).to_owned(),
                span: span(node),
            })
        }
        "channel_type" => Expr::ChanType(span(node)),
        "literal_element" => {
            first_operand(node).map_or_else(|| Expr::Other(span(node)), |e| lower_expr(&e, src))
        }
        _ => Expr::Other(span(node)),
    }
}

/// Lowers a node of interest, or returns `None` for everything else.
pub(crate) fn lower_node(node: &TsNode<'_>, src: &[u8]) -> Option<Node> {
    let lowered = match node.kind() {
        // The declaration starts with its `const` keyword.
        "const_declaration" => Node::ConstDecl(ConstDecl {
            keyword: Span {
                len: "const".len(),
                ..span(node)
            },
        }),
        "call_expression" => Node::Call(call(node, src)),
        "type_conversion_expression" => Node::Call(conversion(node, src)),
        "assignment_statement" => Node::Assign(AssignStmt {
            op: field_text(node, "operator", src),
            rhs: expr_list(node.child_by_field_name("right"), src),
            span: span(node),
        }),
        "short_var_declaration" => Node::Assign(AssignStmt {
            op: ":=".to_owned(),
            rhs: expr_list(node.child_by_field_name("right"), src),
            span: span(node),
        }),
        "keyed_element" => Node::KeyValue(KeyValueExpr {
            value: node
                .child_by_field_name("value")
                .or_else(|| operands(node).pop())
                .map_or_else(|| Expr::Other(span(node)), |value| lower_expr(&value, src)),
            span: span(node),
        }),
        "parenthesized_expression" => Node::Paren(paren(node, src)),
        "expression_case" => Node::Case(CaseClause {
            values: expr_list(node.child_by_field_name("value"), src),
            span: span(node),
        }),
        "if_statement" => Node::If(IfStmt {
            condition: field_expr(node, "condition", src),
            span: span(node),
        }),
        "return_statement" => Node::Return(ReturnStmt {
            results: expr_list(first_operand(node), src),
            span: span(node),
        }),
        _ => return None,
    };
    Some(lowered)
}
