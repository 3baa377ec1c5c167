//! Go extraction (§4.1.4): walks a tree-sitter-go parse tree. Handles
//! function and method declarations (with receiver and return-type
//! parsing), import specs, `:=`/`var` declarations, and call sites.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::{ExtractedFile, RawAssignment, RawCallSite, RawClass, RawFunction, RawImport, RawParameter, RhsKind};
use crate::error::ExtractError;
use crate::location::SourceLocation;

fn node_location(node: Node) -> SourceLocation {
    let point = node.start_position();
    SourceLocation::new(point.row as u32 + 1, point.column as u32)
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Go folds comparison and logical operators into the same
/// `binary_expression` node as arithmetic; the operator token (the first
/// unnamed child) is what tells them apart.
fn is_comparison_operator(node: Node, source: &str) -> bool {
    const BOOLEAN_OPERATORS: &[&str] = &["==", "!=", "<", "<=", ">", ">=", "&&", "||"];
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| !c.is_named() && BOOLEAN_OPERATORS.contains(&node_text(c, source)))
}

pub fn extract(path: &Path, source: &str) -> Result<ExtractedFile, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .expect("tree-sitter-go grammar is compiled for the loaded tree-sitter runtime");

    let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Parse {
        path: path.to_path_buf(),
        reason: "tree-sitter produced no tree (parser likely timed out or was cancelled)".to_string(),
    })?;

    let package_fqn = package_fqn_for(path);
    let mut out = ExtractedFile {
        path: path.to_path_buf(),
        ..Default::default()
    };

    let mut walker = Walker {
        source,
        package_fqn: &package_fqn,
        out: &mut out,
    };
    walker.walk_top_level(tree.root_node());

    Ok(out)
}

fn package_fqn_for(path: &Path) -> String {
    path.parent()
        .map(|p| p.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ".".to_string())
}

struct Walker<'a> {
    source: &'a str,
    package_fqn: &'a str,
    out: &'a mut ExtractedFile,
}

impl<'a> Walker<'a> {
    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.package_fqn, name)
    }

    fn walk_top_level(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_declaration" => self.walk_import_declaration(child),
                "function_declaration" => self.walk_function(child, None),
                "method_declaration" => self.walk_method(child),
                "type_declaration" => self.walk_type_declaration(child),
                _ => {}
            }
        }
    }

    fn walk_import_declaration(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "import_spec" {
                self.record_import_spec(child);
            } else if child.kind() == "import_spec_list" {
                let mut inner = child.walk();
                for spec in child.children(&mut inner) {
                    if spec.kind() == "import_spec" {
                        self.record_import_spec(spec);
                    }
                }
            }
        }
    }

    fn record_import_spec(&mut self, node: Node) {
        let Some(path_node) = node.child_by_field_name("path") else {
            return;
        };
        let module = node_text(path_node, self.source).trim_matches('"').to_string();
        let alias = node
            .child_by_field_name("name")
            .map(|n| node_text(n, self.source).to_string())
            .unwrap_or_else(|| module.rsplit('/').next().unwrap_or(&module).to_string());
        self.out.imports.push(RawImport {
            module,
            alias,
            location: node_location(node),
        });
    }

    fn walk_type_declaration(&mut self, node: Node) {
        let mut cursor = node.walk();
        for spec in node.children(&mut cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let Some(name_node) = spec.child_by_field_name("name") else {
                continue;
            };
            let is_struct = spec
                .child_by_field_name("type")
                .map(|t| t.kind() == "struct_type")
                .unwrap_or(false);
            if !is_struct {
                continue;
            }
            let name = node_text(name_node, self.source).to_string();
            self.out.classes.push(RawClass {
                name: name.clone(),
                qualified_name: self.qualify(&name),
                bases: Vec::new(),
                location: node_location(spec),
            });
        }
    }

    fn walk_function(&mut self, node: Node, receiver_type: Option<String>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, self.source).to_string();
        let fqn = match &receiver_type {
            Some(recv) => format!("{}.{}", self.qualify(recv), name),
            None => self.qualify(&name),
        };

        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.collect_parameters(p))
            .unwrap_or_default();

        let return_type_annotation = node.child_by_field_name("result").map(|r| self.parse_return_type(r));

        self.out.functions.push(RawFunction {
            name,
            qualified_name: fqn.clone(),
            params,
            receiver: receiver_type,
            return_type_annotation,
            location: node_location(node),
        });

        if let Some(body) = node.child_by_field_name("body") {
            self.walk_block(body, &fqn);
        }
    }

    fn walk_method(&mut self, node: Node) {
        let receiver_type = node
            .child_by_field_name("receiver")
            .and_then(|r| self.receiver_type_name(r));
        self.walk_function(node, receiver_type);
    }

    /// A method's receiver type, stripped of the leading `*` for pointer
    /// receivers so `(r *Router)` and `(r Router)` resolve to the same
    /// qualified name.
    fn receiver_type_name(&self, params: Node) -> Option<String> {
        let mut cursor = params.walk();
        for param in params.children(&mut cursor) {
            if param.kind() != "parameter_declaration" {
                continue;
            }
            let ty = param.child_by_field_name("type")?;
            let text = node_text(ty, self.source);
            return Some(text.trim_start_matches('*').to_string());
        }
        None
    }

    fn collect_parameters(&self, params: Node) -> Vec<RawParameter> {
        let mut out = Vec::new();
        let mut cursor = params.walk();
        for param in params.children(&mut cursor) {
            if param.kind() != "parameter_declaration" {
                continue;
            }
            let type_annotation = param
                .child_by_field_name("type")
                .map(|n| node_text(n, self.source).to_string());
            let mut inner = param.walk();
            let mut found_name = false;
            for child in param.children(&mut inner) {
                if child.kind() == "identifier" {
                    found_name = true;
                    out.push(RawParameter {
                        name: node_text(child, self.source).to_string(),
                        type_annotation: type_annotation.clone(),
                        default_literal: None,
                    });
                }
            }
            if !found_name {
                out.push(RawParameter {
                    name: String::new(),
                    type_annotation,
                    default_literal: None,
                });
            }
        }
        out
    }

    /// Parse a function's `result` field. Go's grammar gives a bare type
    /// node for a single unnamed return, a `parameter_list` for multiple
    /// or named returns. Multiple returns are joined with `, ` so the
    /// string form stays human-readable; only the first is what the
    /// return-type inference strategy (§4.3.5) actually consults.
    fn parse_return_type(&self, result: Node) -> String {
        if result.kind() == "parameter_list" {
            let mut cursor = result.walk();
            let parts: Vec<&str> = result
                .children(&mut cursor)
                .filter(|c| c.kind() == "parameter_declaration")
                .filter_map(|c| c.child_by_field_name("type"))
                .map(|t| node_text(t, self.source))
                .collect();
            parts.join(", ")
        } else {
            node_text(result, self.source).to_string()
        }
    }

    fn walk_block(&mut self, node: Node, function_fqn: &str) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk_statement(child, function_fqn);
        }
    }

    fn walk_statement(&mut self, node: Node, function_fqn: &str) {
        match node.kind() {
            "short_var_declaration" => self.record_short_var_declaration(node, function_fqn),
            "var_declaration" => self.record_var_declaration(node, function_fqn),
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.walk_statement(child, function_fqn);
                }
            }
        }
        self.record_calls(node, function_fqn);
    }

    fn record_short_var_declaration(&mut self, node: Node, function_fqn: &str) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        let Some(right) = node.child_by_field_name("right") else {
            return;
        };
        let targets = self.identifier_list(left);
        let values: Vec<Node> = {
            let mut cursor = right.walk();
            right.named_children(&mut cursor).collect()
        };
        for (target, value) in targets.iter().zip(values.iter()) {
            self.out.assignments.push(RawAssignment {
                function_qualified_name: function_fqn.to_string(),
                target: target.clone(),
                owner_class: None,
                type_annotation: None,
                rhs: self.classify_rhs(*value),
                location: node_location(node),
            });
        }
    }

    fn record_var_declaration(&mut self, node: Node, function_fqn: &str) {
        let mut cursor = node.walk();
        for spec in node.children(&mut cursor) {
            if spec.kind() != "var_spec" {
                continue;
            }
            let type_annotation = spec
                .child_by_field_name("type")
                .map(|n| node_text(n, self.source).to_string());
            let names = spec
                .child_by_field_name("name")
                .map(|n| self.identifier_list(n))
                .unwrap_or_default();
            let values: Vec<Node> = spec
                .child_by_field_name("value")
                .map(|v| {
                    let mut c = v.walk();
                    v.named_children(&mut c).collect()
                })
                .unwrap_or_default();
            for (i, name) in names.iter().enumerate() {
                let rhs = values.get(i).map(|v| self.classify_rhs(*v)).unwrap_or(RhsKind::Other);
                self.out.assignments.push(RawAssignment {
                    function_qualified_name: function_fqn.to_string(),
                    target: name.clone(),
                    owner_class: None,
                    type_annotation: type_annotation.clone(),
                    rhs,
                    location: node_location(spec),
                });
            }
        }
    }

    fn identifier_list(&self, node: Node) -> Vec<String> {
        if node.kind() == "identifier" {
            return vec![node_text(node, self.source).to_string()];
        }
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|c| c.kind() == "identifier")
            .map(|c| node_text(c, self.source).to_string())
            .collect()
    }

    /// RHS-by-AST-kind dispatch (§4.1.4): the Go grammar's literal node
    /// kinds map onto the same `RhsKind::Literal` shape the Python
    /// extractor produces, so downstream inference doesn't special-case
    /// the language.
    fn classify_rhs(&self, node: Node) -> RhsKind {
        match node.kind() {
            "interpreted_string_literal" | "raw_string_literal" => RhsKind::Literal { type_hint: "string".to_string() },
            "int_literal" => RhsKind::Literal { type_hint: "int".to_string() },
            "float_literal" => RhsKind::Literal { type_hint: "float64".to_string() },
            "true" | "false" => RhsKind::Literal { type_hint: "bool".to_string() },
            "binary_expression" if is_comparison_operator(node, self.source) => RhsKind::BooleanExpr,
            "unary_expression" if node_text(node, self.source).starts_with('!') => RhsKind::BooleanExpr,
            "composite_literal" => {
                let type_hint = node
                    .child_by_field_name("type")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_else(|| "struct".to_string());
                RhsKind::Literal { type_hint }
            }
            "call_expression" => {
                let callee = node
                    .child_by_field_name("function")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                RhsKind::Call { callee }
            }
            "identifier" => RhsKind::NameRef {
                name: node_text(node, self.source).to_string(),
            },
            "selector_expression" => {
                let base = node
                    .child_by_field_name("operand")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                let attr = node
                    .child_by_field_name("field")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                RhsKind::Attribute { base, attr }
            }
            _ => RhsKind::Other,
        }
    }

    fn record_calls(&mut self, node: Node, function_fqn: &str) {
        if node.kind() == "call_expression" {
            let callee_text = node
                .child_by_field_name("function")
                .map(|n| node_text(n, self.source).to_string())
                .unwrap_or_default();
            let argument_count = node
                .child_by_field_name("arguments")
                .map(|args| args.named_child_count())
                .unwrap_or(0);
            self.out.call_sites.push(RawCallSite {
                caller_qualified_name: function_fqn.to_string(),
                callee_text,
                argument_count,
                location: node_location(node),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extracts_function_with_single_return_type() {
        let source = "package main\n\nfunc greet(name string) string {\n\treturn name\n}\n";
        let extracted = extract(&PathBuf::from("pkg/greet.go"), source).expect("extract");
        let func = extracted.functions.iter().find(|f| f.name == "greet").expect("func");
        assert_eq!(func.return_type_annotation.as_deref(), Some("string"));
    }

    #[test]
    fn extracts_method_with_pointer_receiver() {
        let source = "package main\n\ntype Router struct{}\n\nfunc (r *Router) Handle(path string) {}\n";
        let extracted = extract(&PathBuf::from("pkg/router.go"), source).expect("extract");
        let method = extracted.functions.iter().find(|f| f.name == "Handle").expect("method");
        assert_eq!(method.receiver.as_deref(), Some("Router"));
        assert!(method.qualified_name.ends_with("Router.Handle"));
    }

    #[test]
    fn extracts_short_var_declaration() {
        let source = "package main\n\nfunc main() {\n\tcount := 1\n\t_ = count\n}\n";
        let extracted = extract(&PathBuf::from("pkg/main.go"), source).expect("extract");
        let assignment = extracted
            .assignments
            .iter()
            .find(|a| a.target == "count")
            .expect("short var decl");
        assert_eq!(assignment.rhs, RhsKind::Literal { type_hint: "int".to_string() });
    }

    #[test]
    fn classifies_comparison_as_boolean_expr() {
        let source = "package main\n\nfunc main() {\n\tok := 1 == 2\n\t_ = ok\n}\n";
        let extracted = extract(&PathBuf::from("pkg/main.go"), source).expect("extract");
        let assignment = extracted.assignments.iter().find(|a| a.target == "ok").expect("assignment");
        assert_eq!(assignment.rhs, RhsKind::BooleanExpr);
    }

    #[test]
    fn extracts_import_spec() {
        let source = "package main\n\nimport \"net/http\"\n";
        let extracted = extract(&PathBuf::from("pkg/main.go"), source).expect("extract");
        assert!(extracted.imports.iter().any(|i| i.module == "net/http" && i.alias == "http"));
    }

    #[test]
    fn extracts_call_expression() {
        let source = "package main\n\nfunc main() {\n\thttp.ListenAndServe(\":8080\", nil)\n}\n";
        let extracted = extract(&PathBuf::from("pkg/main.go"), source).expect("extract");
        assert!(extracted.call_sites.iter().any(|c| c.callee_text == "http.ListenAndServe"));
    }
}
