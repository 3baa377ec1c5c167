//! Python extraction (§4.1.1-§4.1.3): walks a tree-sitter-python parse
//! tree to pull out imports, class/function definitions, variable and
//! attribute assignments, and call sites.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::{ChainStep, ExtractedFile, RawAssignment, RawCallSite, RawClass, RawFunction, RawImport, RawParameter, RhsKind};
use crate::error::ExtractError;
use crate::location::SourceLocation;

fn node_location(node: Node) -> SourceLocation {
    let point = node.start_position();
    SourceLocation::new(point.row as u32 + 1, point.column as u32)
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Parse and extract everything from one Python source file.
pub fn extract(path: &Path, source: &str) -> Result<ExtractedFile, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .expect("tree-sitter-python grammar is compiled for the loaded tree-sitter runtime");

    let tree = parser.parse(source, None).ok_or_else(|| ExtractError::Parse {
        path: path.to_path_buf(),
        reason: "tree-sitter produced no tree (parser likely timed out or was cancelled)".to_string(),
    })?;

    let module_fqn = module_fqn_for(path);
    let mut out = ExtractedFile {
        path: path.to_path_buf(),
        ..Default::default()
    };

    let mut walker = Walker {
        source,
        module_fqn: &module_fqn,
        out: &mut out,
    };
    walker.walk_block(tree.root_node(), &[], None);

    Ok(out)
}

fn module_fqn_for(path: &Path) -> String {
    path.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

struct Walker<'a> {
    source: &'a str,
    module_fqn: &'a str,
    out: &'a mut ExtractedFile,
}

impl<'a> Walker<'a> {
    fn qualify(&self, scope: &[String], name: &str) -> String {
        let mut parts = vec![self.module_fqn.to_string()];
        parts.extend(scope.iter().cloned());
        parts.push(name.to_string());
        parts.join(".")
    }

    /// Walk a block of statements. `scope` is the stack of enclosing
    /// class/function names (for qualified-name construction);
    /// `current_function` is the qualified name assignments within this
    /// block belong to, or `None` at module level.
    fn walk_block(&mut self, node: Node, scope: &[String], current_function: Option<&str>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk_statement(child, scope, current_function);
        }
    }

    fn walk_statement(&mut self, node: Node, scope: &[String], current_function: Option<&str>) {
        match node.kind() {
            "function_definition" => self.walk_function(node, scope),
            "class_definition" => self.walk_class(node, scope),
            "import_statement" => self.walk_import(node),
            "import_from_statement" => self.walk_import_from(node),
            "expression_statement" => {
                if let Some(function_fqn) = current_function {
                    self.walk_expression_statement(node, scope, function_fqn);
                }
                self.record_calls(node, current_function);
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.walk_statement(child, scope, current_function);
                }
            }
        }
    }

    fn walk_function(&mut self, node: Node, scope: &[String]) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, self.source).to_string();
        let fqn = self.qualify(scope, &name);

        let mut params = Vec::new();
        let mut receiver = None;
        if let Some(params_node) = node.child_by_field_name("parameters") {
            let mut cursor = params_node.walk();
            for (i, param) in params_node.children(&mut cursor).enumerate() {
                match param.kind() {
                    "identifier" => {
                        let pname = node_text(param, self.source).to_string();
                        if i == 0 && !scope.is_empty() && (pname == "self" || pname == "cls") {
                            receiver = Some(pname);
                        } else {
                            params.push(RawParameter {
                                name: pname,
                                type_annotation: None,
                                default_literal: None,
                            });
                        }
                    }
                    "typed_parameter" => {
                        if let Some(p) = self.typed_parameter(param) {
                            params.push(p);
                        }
                    }
                    "default_parameter" | "typed_default_parameter" => {
                        if let Some(p) = self.default_parameter(param) {
                            params.push(p);
                        }
                    }
                    _ => {}
                }
            }
        }

        let return_type_annotation = node
            .child_by_field_name("return_type")
            .map(|n| node_text(n, self.source).to_string());

        self.out.functions.push(RawFunction {
            name: name.clone(),
            qualified_name: fqn.clone(),
            params,
            receiver,
            return_type_annotation,
            location: node_location(node),
        });

        let mut inner_scope = scope.to_vec();
        inner_scope.push(name);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_block(body, &inner_scope, Some(&fqn));
        }
    }

    fn typed_parameter(&self, node: Node) -> Option<RawParameter> {
        let mut cursor = node.walk();
        let mut name = None;
        let mut type_annotation = None;
        for child in node.children(&mut cursor) {
            match child.kind() {
                "identifier" if name.is_none() => name = Some(node_text(child, self.source).to_string()),
                "type" => type_annotation = Some(node_text(child, self.source).to_string()),
                _ => {}
            }
        }
        Some(RawParameter {
            name: name?,
            type_annotation,
            default_literal: None,
        })
    }

    fn default_parameter(&self, node: Node) -> Option<RawParameter> {
        let name_node = node.child_by_field_name("name")?;
        let name = node_text(name_node, self.source).to_string();
        let type_annotation = node
            .child_by_field_name("type")
            .map(|n| node_text(n, self.source).to_string());
        let default_literal = node
            .child_by_field_name("value")
            .map(|n| node_text(n, self.source).to_string());
        Some(RawParameter {
            name,
            type_annotation,
            default_literal,
        })
    }

    fn walk_class(&mut self, node: Node, scope: &[String]) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, self.source).to_string();
        let fqn = self.qualify(scope, &name);

        let mut bases = Vec::new();
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            let mut cursor = superclasses.walk();
            for child in superclasses.children(&mut cursor) {
                if child.kind() == "identifier" || child.kind() == "attribute" {
                    bases.push(node_text(child, self.source).to_string());
                }
            }
        }

        self.out.classes.push(RawClass {
            name: name.clone(),
            qualified_name: fqn,
            bases,
            location: node_location(node),
        });

        let mut inner_scope = scope.to_vec();
        inner_scope.push(name);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_block(body, &inner_scope, None);
        }
    }

    fn walk_import(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    let module = node_text(child, self.source).to_string();
                    let alias = module.split('.').next().unwrap_or(&module).to_string();
                    self.out.imports.push(RawImport {
                        module,
                        alias,
                        location: node_location(node),
                    });
                }
                "aliased_import" => {
                    if let (Some(name_node), Some(alias_node)) =
                        (child.child_by_field_name("name"), child.child_by_field_name("alias"))
                    {
                        self.out.imports.push(RawImport {
                            module: node_text(name_node, self.source).to_string(),
                            alias: node_text(alias_node, self.source).to_string(),
                            location: node_location(node),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_import_from(&mut self, node: Node) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            return;
        };
        let module_base = node_text(module_node, self.source).to_string();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "dotted_name" if child != module_node => {
                    let member = node_text(child, self.source).to_string();
                    self.out.imports.push(RawImport {
                        module: format!("{module_base}.{member}"),
                        alias: member,
                        location: node_location(node),
                    });
                }
                "aliased_import" => {
                    if let (Some(name_node), Some(alias_node)) =
                        (child.child_by_field_name("name"), child.child_by_field_name("alias"))
                    {
                        let member = node_text(name_node, self.source).to_string();
                        self.out.imports.push(RawImport {
                            module: format!("{module_base}.{member}"),
                            alias: node_text(alias_node, self.source).to_string(),
                            location: node_location(node),
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_expression_statement(&mut self, node: Node, scope: &[String], function_fqn: &str) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "assignment" {
                self.record_assignment(child, scope, function_fqn);
            }
        }
    }

    fn record_assignment(&mut self, node: Node, scope: &[String], function_fqn: &str) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        let Some(right) = node.child_by_field_name("right") else {
            return;
        };
        let type_annotation = node
            .child_by_field_name("type")
            .map(|n| node_text(n, self.source).to_string());
        let rhs = self.classify_rhs(right);
        let location = node_location(node);

        match left.kind() {
            "identifier" => {
                self.out.assignments.push(RawAssignment {
                    function_qualified_name: function_fqn.to_string(),
                    target: node_text(left, self.source).to_string(),
                    owner_class: None,
                    type_annotation,
                    rhs,
                    location,
                });
            }
            "attribute" => {
                let Some(object) = left.child_by_field_name("object") else {
                    return;
                };
                let Some(attr) = left.child_by_field_name("attribute") else {
                    return;
                };
                if node_text(object, self.source) == "self" && !scope.is_empty() {
                    let owner_fqn = self.qualify(&scope[..scope.len() - 1], &scope[scope.len() - 1]);
                    self.out.assignments.push(RawAssignment {
                        function_qualified_name: function_fqn.to_string(),
                        target: node_text(attr, self.source).to_string(),
                        owner_class: Some(owner_fqn),
                        type_annotation,
                        rhs,
                        location,
                    });
                }
            }
            _ => {}
        }
    }

    fn classify_rhs(&self, node: Node) -> RhsKind {
        match node.kind() {
            "string" => RhsKind::Literal { type_hint: "str".to_string() },
            "integer" => RhsKind::Literal { type_hint: "int".to_string() },
            "float" => RhsKind::Literal { type_hint: "float".to_string() },
            "true" | "false" => RhsKind::Literal { type_hint: "bool".to_string() },
            "list" => RhsKind::Literal { type_hint: "list".to_string() },
            "dictionary" => RhsKind::Literal { type_hint: "dict".to_string() },
            "set" => RhsKind::Literal { type_hint: "set".to_string() },
            "tuple" => RhsKind::Literal { type_hint: "tuple".to_string() },
            "none" => RhsKind::Literal { type_hint: "None".to_string() },
            "comparison_operator" | "boolean_operator" | "not_operator" => RhsKind::BooleanExpr,
            "call" => {
                if let Some(steps) = self.chain_steps(node) {
                    if steps.len() >= 3 {
                        return RhsKind::Chain(steps);
                    }
                }
                let callee = node
                    .child_by_field_name("function")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                RhsKind::Call { callee }
            }
            "identifier" => RhsKind::NameRef {
                name: node_text(node, self.source).to_string(),
            },
            "attribute" => {
                if let Some(steps) = self.chain_steps(node) {
                    if steps.len() >= 3 {
                        return RhsKind::Chain(steps);
                    }
                }
                let base = node
                    .child_by_field_name("object")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                let attr = node
                    .child_by_field_name("attribute")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                RhsKind::Attribute { base, attr }
            }
            _ => RhsKind::Other,
        }
    }

    /// Walk a `call`/`attribute`/`identifier` node into its [`ChainStep`]
    /// sequence (§4.3.5). `None` means this node isn't chain-worthy at all
    /// (e.g. the base of the expression is a call to a lowercase-named
    /// function, which isn't one of the two recognized chain bases).
    fn chain_steps(&self, node: Node) -> Option<Vec<ChainStep>> {
        match node.kind() {
            "call" => {
                let function = node.child_by_field_name("function")?;
                let arg_count = node
                    .child_by_field_name("arguments")
                    .map(|a| a.named_child_count())
                    .unwrap_or(0);
                match function.kind() {
                    "attribute" => {
                        let object = function.child_by_field_name("object")?;
                        let method = node_text(function.child_by_field_name("attribute")?, self.source).to_string();
                        let mut steps = self.chain_steps(object).unwrap_or_default();
                        steps.push(ChainStep::MethodCall { name: method, arg_count });
                        Some(steps)
                    }
                    "identifier" => {
                        let name = node_text(function, self.source).to_string();
                        let starts_uppercase = name.chars().next().is_some_and(|c| c.is_uppercase());
                        starts_uppercase.then(|| vec![ChainStep::Instantiation { class_name: name, arg_count }])
                    }
                    _ => None,
                }
            }
            "attribute" => {
                let object = node.child_by_field_name("object")?;
                let attr = node_text(node.child_by_field_name("attribute")?, self.source).to_string();
                let mut steps = self.chain_steps(object).unwrap_or_default();
                steps.push(ChainStep::Attribute(attr));
                Some(steps)
            }
            "identifier" => Some(vec![ChainStep::Identifier(node_text(node, self.source).to_string())]),
            _ => None,
        }
    }

    fn record_calls(&mut self, node: Node, current_function: Option<&str>) {
        let Some(caller) = current_function else {
            return;
        };
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "call" {
                let callee_text = child
                    .child_by_field_name("function")
                    .map(|n| node_text(n, self.source).to_string())
                    .unwrap_or_default();
                let argument_count = child
                    .child_by_field_name("arguments")
                    .map(|args| args.named_child_count())
                    .unwrap_or(0);
                self.out.call_sites.push(RawCallSite {
                    caller_qualified_name: caller.to_string(),
                    callee_text,
                    argument_count,
                    location: node_location(child),
                });
            }
            self.record_calls(child, current_function);
        }
    }
}
