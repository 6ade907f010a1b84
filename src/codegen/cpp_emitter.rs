//! C++ code emitter for transpiling the Maple AST.

use std::collections::HashSet;

use crate::parser::*;

/// Name of the file-scope map that `back`/`load` go through
const BACKUP_MAP: &str = "maple_backups";

/// What kind of artifact is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// A runnable program with a `main`
    Program,
    /// A header for a `lib` import
    Library,
}

/// Emits C++ code from a Maple AST
pub struct CppEmitter {
    output: String,
    indent: usize,
    mode: EmitMode,
    /// Namespace opened by `init`
    namespace: Option<String>,
    /// Functions defined by this unit, qualified with the namespace on call
    functions: HashSet<String>,
}

impl CppEmitter {
    pub fn new(mode: EmitMode) -> Self {
        Self {
            output: String::new(),
            indent: 0,
            mode,
            namespace: None,
            functions: HashSet::new(),
        }
    }

    /// Emit C++ code from a program
    pub fn emit(&mut self, program: &Program) -> String {
        self.namespace = program.namespace().map(str::to_string);
        self.functions = program.functions().map(|f| f.name.clone()).collect();

        self.emit_header();

        let mut has_imports = false;
        for module in program.imports() {
            self.writeln(&format!("#include \"{}.hpp\"", module));
            has_imports = true;
        }
        if has_imports {
            self.newline();
        }

        let statements: Vec<&Node> = program
            .nodes
            .iter()
            .filter(|node| {
                !matches!(
                    node,
                    Node::Function(_) | Node::LibraryImport { .. } | Node::NamespaceInit { .. }
                )
            })
            .collect();

        if let Some(namespace) = self.namespace.clone() {
            self.writeln(&format!("namespace {} {{", namespace));
            self.newline();
        }

        // Library variables are declared at namespace scope before the functions reading them
        if self.mode == EmitMode::Library {
            let mut declared = false;
            for node in &statements {
                if let Node::Declare(declare) = node {
                    self.emit_declaration(declare);
                    declared = true;
                }
            }
            if declared {
                self.newline();
            }
        }

        for function in program.functions() {
            self.emit_function(function);
            self.newline();
        }

        if let Some(namespace) = &self.namespace {
            let close = format!("}} // namespace {}", namespace);
            self.writeln(&close);
            self.newline();
        }

        if self.mode == EmitMode::Program {
            self.writeln("int main() {");
            self.indent += 1;
            for node in &statements {
                self.emit_node(node);
            }
            self.line("return 0;");
            self.indent -= 1;
            self.writeln("}");
        }

        std::mem::take(&mut self.output)
    }

    /// Emit the banner, standard includes, and the backup map
    fn emit_header(&mut self) {
        if self.mode == EmitMode::Library {
            self.writeln("#pragma once");
        }
        self.writeln("// Generated by maplec");
        self.writeln("// Do not edit - regenerate from the Maple source");
        self.newline();
        self.writeln("#include <cstdint>");
        self.writeln("#include <iostream>");
        self.writeln("#include <map>");
        self.writeln("#include <string>");
        self.newline();
        self.writeln("#ifndef MAPLE_BACKUPS");
        self.writeln("#define MAPLE_BACKUPS");
        self.writeln(&format!("static std::map<std::string, long double> {};", BACKUP_MAP));
        self.writeln("#endif");
        self.newline();
    }

    fn emit_function(&mut self, function: &FunctionNode) {
        let params = function
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", ty.to_cpp_type(), name))
            .collect::<Vec<_>>()
            .join(", ");

        self.line(&format!(
            "{} {}({}) {{",
            function.return_type.to_cpp_type(),
            function.name,
            params
        ));
        self.emit_block(&function.body);
        self.line("}");
    }

    fn emit_block(&mut self, nodes: &[Node]) {
        self.indent += 1;
        for node in nodes {
            self.emit_node(node);
        }
        self.indent -= 1;
    }

    fn emit_node(&mut self, node: &Node) {
        match node {
            Node::Run { count, body } => {
                self.line(&format!("for (int run = 0; run < {}; run++) {{", count));
                self.emit_block(body);
                self.line("}");
            }
            Node::Declare(declare) => self.emit_declaration(declare),
            Node::Set(set) => {
                let target = match &set.target_index {
                    Some(index) => format!("{}[{}]", set.target, index),
                    None => set.target.clone(),
                };
                let value = match &set.value {
                    SetValue::Plain(value) => value.clone(),
                    SetValue::Copied { literal, .. } => literal.clone(),
                    SetValue::Indexed { array, index } => format!("{}[{}]", array, index),
                };
                self.line(&format!("{} = {};", target, value));
            }
            Node::Output { name, index } => {
                let value = match index {
                    Some(index) => format!("{}[{}]", name, index),
                    None => name.clone(),
                };
                self.line(&format!("std::cout << {} << std::endl;", value));
            }
            Node::If(conditional) => {
                self.line(&format!("if ({}) {{", condition(&conditional.condition)));
                self.emit_block(&conditional.body);
            }
            Node::Elif(conditional) => {
                self.line(&format!("}} else if ({}) {{", condition(&conditional.condition)));
                self.emit_block(&conditional.body);
            }
            Node::Else { body } => {
                self.line("} else {");
                self.emit_block(body);
            }
            Node::End | Node::Roll => self.line("}"),
            Node::Loop(node) => {
                self.line(&format!(
                    "for (int32_t {var} = {}; {var} < {}; {var}++) {{",
                    node.start,
                    node.end,
                    var = node.variable
                ));
                self.emit_block(&node.body);
            }
            Node::SaveState { name } => {
                self.line(&format!("{}[\"{}\"] = {};", BACKUP_MAP, name, name));
            }
            Node::RestoreState { name } => {
                self.line(&format!(
                    "{name} = static_cast<decltype({name})>({map}[\"{name}\"]);",
                    name = name,
                    map = BACKUP_MAP
                ));
            }
            Node::Function(function) => self.emit_function(function),
            Node::Return { value } => match value {
                Some(value) => self.line(&format!("return {};", value)),
                None => self.line("return;"),
            },
            Node::Call(call) => {
                let call = self.call(call);
                self.line(&format!("{};", call));
            }
            Node::Expression(expr) => {
                let op = expr.op.as_str();
                let statement = match &expr.destination {
                    Some(destination) => {
                        format!("{} = {} {} {};", destination, expr.left, op, expr.right)
                    }
                    None => format!("{} {}= {};", expr.left, op, expr.right),
                };
                self.line(&statement);
            }
            Node::QualifiedCall { module, call } => {
                self.line(&format!("{}::{}({});", module, call.function, call.args.join(", ")));
            }
            Node::LibraryImport { .. } | Node::NamespaceInit { .. } => {}
        }
    }

    fn emit_declaration(&mut self, declare: &DeclareNode) {
        let qualifier = if declare.is_constant { "const " } else { "" };
        let ty = declare.ty.to_cpp_type();

        let statement = match &declare.init {
            Initializer::Value(value) => {
                format!("{}{} {} = {};", qualifier, ty, declare.name, value)
            }
            Initializer::Call(call) => {
                format!("{}{} {} = {};", qualifier, ty, declare.name, self.call(call))
            }
            Initializer::Array { size, values } => format!(
                "{}{} {}[{}] = {{{}}};",
                qualifier,
                ty,
                declare.name,
                size,
                values.join(", ")
            ),
        };
        self.line(&statement);
    }

    /// Call expression, qualified when it targets this unit's namespace
    fn call(&self, call: &CallNode) -> String {
        let args = call.args.join(", ");
        match &self.namespace {
            Some(namespace) if self.functions.contains(&call.function) => {
                format!("{}::{}({})", namespace, call.function, args)
            }
            _ => format!("{}({})", call.function, args),
        }
    }

    // === Helper methods ===

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn writeln(&mut self, s: &str) {
        self.write(s);
        self.output.push('\n');
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Indented line
    fn line(&mut self, s: &str) {
        self.write_indent();
        self.writeln(s);
    }
}

impl Default for CppEmitter {
    fn default() -> Self {
        Self::new(EmitMode::Program)
    }
}

fn condition(condition: &Condition) -> String {
    format!("{} {} {}", condition.left, condition.op.as_str(), condition.right)
}
