//! Prints the syntax tree as TypeScript/JSX source.

use crate::ast::{
    ArrowBody, Expr, FunctionDecl, JsxAttribute, JsxChild, JsxElement, ObjectLit, ObjectMember,
    Pattern, PropertyKey, Stmt, TemplatePart,
};
use std::fmt;

/// Source printer. Output is fully determined by the tree and the indent width.
#[derive(Debug, Clone)]
pub struct Printer {
    indent_width: usize,
    level: usize,
}

impl Printer {
    /// Create a printer with the given indent width in spaces.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            level: 0,
        }
    }

    /// Print a sequence of top-level statements separated by blank lines.
    pub fn print_module(&mut self, stmts: &[Stmt]) -> String {
        let mut out = stmts
            .iter()
            .map(|stmt| self.print_stmt(stmt))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }

    /// Print a statement at the current level, without leading indentation.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Const { pattern, init } => {
                format!("const {} = {};", self.print_pattern(pattern), self.print_expr(init))
            }
            Stmt::Expr(expr) => format!("{};", self.print_expr(expr)),
            Stmt::Return(Expr::Jsx(element)) => {
                let body = self.nested(|p| format!("{}{}", p.indent(), p.print_jsx(element)));
                format!("return (\n{}\n{});", body, self.indent())
            }
            Stmt::Return(expr) => format!("return {};", self.print_expr(expr)),
            Stmt::Function(decl) => self.print_function(decl),
        }
    }

    /// Print an expression at the current level.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Str(value) => quote(value),
            Expr::Num(value) => format_number(*value),
            Expr::Bool(value) => value.to_string(),
            Expr::Null => "null".to_string(),
            Expr::Object(object) => self.print_object(object),
            Expr::Array(items) => {
                let items: Vec<String> = items.iter().map(|item| self.print_expr(item)).collect();
                format!("[{}]", items.join(", "))
            }
            Expr::Call { callee, args } => {
                let callee = self.print_operand(callee);
                let args: Vec<String> = args.iter().map(|arg| self.print_expr(arg)).collect();
                format!("{}({})", callee, args.join(", "))
            }
            Expr::Member {
                object,
                property,
                optional,
            } => {
                let object = self.print_operand(object);
                let dot = if *optional { "?." } else { "." };
                format!("{}{}{}", object, dot, property)
            }
            Expr::Index {
                object,
                index,
                optional,
            } => {
                let object = self.print_operand(object);
                let open = if *optional { "?.[" } else { "[" };
                format!("{}{}{}]", object, open, self.print_expr(index))
            }
            Expr::Arrow { params, body } => {
                let body = match body {
                    ArrowBody::Expr(expr) if matches!(**expr, Expr::Object(_)) => {
                        format!("({})", self.print_expr(expr))
                    }
                    ArrowBody::Expr(expr) => self.print_expr(expr),
                    ArrowBody::Block(stmts) => self.print_block(stmts),
                };
                format!("({}) => {}", params.join(", "), body)
            }
            Expr::Binary { left, op, right } => {
                let left = self.print_binary_operand(left);
                let right = self.print_binary_operand(right);
                format!("{} {} {}", left, op.as_str(), right)
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let test = self.print_branch(test);
                let consequent = self.print_branch(consequent);
                let alternate = self.print_branch(alternate);
                format!("{} ? {} : {}", test, consequent, alternate)
            }
            Expr::Template(parts) => {
                let mut out = String::from("`");
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => out.push_str(&escape_template(text)),
                        TemplatePart::Expr(expr) => {
                            out.push_str("${");
                            out.push_str(&self.print_expr(expr));
                            out.push('}');
                        }
                    }
                }
                out.push('`');
                out
            }
            Expr::Jsx(element) => self.print_jsx(element),
        }
    }

    fn print_function(&mut self, decl: &FunctionDecl) -> String {
        let export = if decl.export_default { "export default " } else { "" };
        format!(
            "{}function {}({}) {}",
            export,
            decl.name,
            decl.params.join(", "),
            self.print_block(&decl.body)
        )
    }

    fn print_block(&mut self, stmts: &[Stmt]) -> String {
        if stmts.is_empty() {
            return "{}".to_string();
        }
        let lines = self.nested(|p| {
            stmts
                .iter()
                .map(|stmt| format!("{}{}", p.indent(), p.print_stmt(stmt)))
                .collect::<Vec<_>>()
        });
        format!("{{\n{}\n{}}}", lines.join("\n"), self.indent())
    }

    fn print_object(&mut self, object: &ObjectLit) -> String {
        if object.members.is_empty() {
            return "{}".to_string();
        }
        if object.multiline {
            let lines = self.nested(|p| {
                object
                    .members
                    .iter()
                    .map(|member| format!("{}{},", p.indent(), p.print_member(member)))
                    .collect::<Vec<_>>()
            });
            format!("{{\n{}\n{}}}", lines.join("\n"), self.indent())
        } else {
            let members: Vec<String> = object.members.iter().map(|m| self.print_member(m)).collect();
            format!("{{ {} }}", members.join(", "))
        }
    }

    fn print_member(&mut self, member: &ObjectMember) -> String {
        match member {
            ObjectMember::Spread(expr) => format!("...{}", self.print_binary_operand(expr)),
            ObjectMember::Property { key, value } => {
                format!("{}: {}", print_key(key), self.print_expr(value))
            }
        }
    }

    fn print_pattern(&self, pattern: &Pattern) -> String {
        match pattern {
            Pattern::Ident(name) => name.clone(),
            Pattern::Object { bindings, rest } => {
                let mut parts: Vec<String> = bindings
                    .iter()
                    .map(|(key, alias)| match alias {
                        Some(alias) => format!("{}: {}", key, alias),
                        None => key.clone(),
                    })
                    .collect();
                if let Some(rest) = rest {
                    parts.push(format!("...{}", rest));
                }
                format!("{{ {} }}", parts.join(", "))
            }
            Pattern::Array(names) => format!("[{}]", names.join(", ")),
        }
    }

    fn print_jsx(&mut self, element: &JsxElement) -> String {
        let mut open = format!("<{}", element.tag);
        for attribute in &element.attributes {
            open.push(' ');
            open.push_str(&self.print_jsx_attribute(attribute));
        }

        if element.children.is_empty() {
            return format!("{} />", open);
        }

        let children = self.nested(|p| {
            element
                .children
                .iter()
                .map(|child| {
                    let child = match child {
                        JsxChild::Element(element) => p.print_jsx(element),
                        JsxChild::Expr(expr) => format!("{{{}}}", p.print_expr(expr)),
                    };
                    format!("{}{}", p.indent(), child)
                })
                .collect::<Vec<_>>()
        });
        format!(
            "{}>\n{}\n{}</{}>",
            open,
            children.join("\n"),
            self.indent(),
            element.tag
        )
    }

    fn print_jsx_attribute(&mut self, attribute: &JsxAttribute) -> String {
        match attribute {
            JsxAttribute::Named {
                name,
                value: Expr::Str(text),
            } if !text.contains('"') && !text.contains('\\') => format!("{}=\"{}\"", name, text),
            JsxAttribute::Named { name, value } => format!("{}={{{}}}", name, self.print_expr(value)),
            JsxAttribute::Spread(expr) => format!("{{...{}}}", self.print_binary_operand(expr)),
        }
    }

    /// Callee or member object: anything that is not a primary expression
    /// gets parenthesized.
    fn print_operand(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Object(_)
            | Expr::Arrow { .. }
            | Expr::Binary { .. }
            | Expr::Conditional { .. }
            | Expr::Jsx(_) => format!("({})", self.print_expr(expr)),
            _ => self.print_expr(expr),
        }
    }

    fn print_binary_operand(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Arrow { .. } | Expr::Binary { .. } | Expr::Conditional { .. } => {
                format!("({})", self.print_expr(expr))
            }
            _ => self.print_expr(expr),
        }
    }

    fn print_branch(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Arrow { .. } | Expr::Conditional { .. } => format!("({})", self.print_expr(expr)),
            _ => self.print_expr(expr),
        }
    }

    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.level += 1;
        let result = f(self);
        self.level -= 1;
        result
    }

    fn indent(&self) -> String {
        " ".repeat(self.level * self.indent_width)
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Print a single expression with default settings.
pub fn print_expr(expr: &Expr) -> String {
    Printer::default().print_expr(expr)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_expr(self))
    }
}

fn print_key(key: &PropertyKey) -> String {
    match key {
        PropertyKey::Ident(name) => name.clone(),
        PropertyKey::Str(name) => quote(name),
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ObjectMember};

    #[test]
    fn test_literals() {
        assert_eq!(print_expr(&Expr::string("say \"hi\"")), r#""say \"hi\"""#);
        assert_eq!(print_expr(&Expr::Num(3.0)), "3");
        assert_eq!(print_expr(&Expr::Num(2.5)), "2.5");
        assert_eq!(print_expr(&Expr::Null), "null");
    }

    #[test]
    fn test_object_single_line() {
        let expr = Expr::object([
            ObjectMember::spread(Expr::ident("bio")),
            ObjectMember::property("firstName", Expr::string("John C")),
            ObjectMember::property("custom:role", Expr::Bool(true)),
        ]);
        assert_eq!(
            expr.to_string(),
            r#"{ ...bio, firstName: "John C", "custom:role": true }"#
        );
    }

    #[test]
    fn test_object_multiline_in_arrow() {
        let expr = Expr::call(
            Expr::ident("items").member("map"),
            [Expr::arrow(
                ["item"],
                Expr::object_multiline([
                    ObjectMember::spread(Expr::ident("item")),
                    ObjectMember::property("books", Expr::ident("bookItems")),
                ]),
            )],
        );
        assert_eq!(
            expr.to_string(),
            "items.map((item) => ({\n  ...item,\n  books: bookItems,\n}))"
        );
    }

    #[test]
    fn test_arrow_block_statement() {
        let stmt = Stmt::const_decl(
            "buttonClick",
            Expr::arrow_block(
                Vec::<String>::new(),
                vec![Stmt::Expr(Expr::call(Expr::ident("setLabel"), [Expr::string("done")]))],
            ),
        );
        assert_eq!(
            Printer::default().print_stmt(&stmt),
            "const buttonClick = () => {\n  setLabel(\"done\");\n};"
        );
    }

    #[test]
    fn test_binary_and_conditional() {
        let expr = Expr::conditional(
            Expr::binary(Expr::ident("itemsProp"), BinaryOp::StrictNe, Expr::ident("undefined")),
            Expr::ident("itemsProp"),
            Expr::ident("itemsDataStore"),
        );
        assert_eq!(
            expr.to_string(),
            "itemsProp !== undefined ? itemsProp : itemsDataStore"
        );
    }

    #[test]
    fn test_patterns() {
        let mut printer = Printer::default();
        let stmt = Stmt::Const {
            pattern: Pattern::Object {
                bindings: vec![("items".to_string(), Some("itemsProp".to_string())), ("overrides".to_string(), None)],
                rest: Some("rest".to_string()),
            },
            init: Expr::ident("props"),
        };
        assert_eq!(
            printer.print_stmt(&stmt),
            "const { items: itemsProp, overrides, ...rest } = props;"
        );

        let stmt = Stmt::Const {
            pattern: Pattern::Array(vec!["label".to_string(), "setLabel".to_string()]),
            init: Expr::call(Expr::ident("useStateMutationAction"), [Expr::string("")]),
        };
        assert_eq!(
            printer.print_stmt(&stmt),
            r#"const [label, setLabel] = useStateMutationAction("");"#
        );
    }

    #[test]
    fn test_template() {
        let expr = Expr::Template(vec![
            TemplatePart::Text("Hi ".to_string()),
            TemplatePart::Expr(Expr::ident("name")),
        ]);
        assert_eq!(expr.to_string(), "`Hi ${name}`");
    }

    #[test]
    fn test_jsx() {
        let element = JsxElement::new("Flex")
            .spread(Expr::ident("rest"))
            .child(JsxChild::Element(
                JsxElement::new("Text").attribute("children", Expr::string("Hello")),
            ));
        let stmt = Stmt::Return(Expr::Jsx(Box::new(element)));
        assert_eq!(
            Printer::default().print_stmt(&stmt),
            "return (\n  <Flex {...rest}>\n    <Text children=\"Hello\" />\n  </Flex>\n);"
        );
    }

    #[test]
    fn test_function() {
        let decl = FunctionDecl {
            name: "Card".to_string(),
            params: vec!["props".to_string()],
            body: vec![Stmt::Return(Expr::Null)],
            export_default: true,
        };
        assert_eq!(
            Printer::new(4).print_stmt(&Stmt::Function(decl)),
            "export default function Card(props) {\n    return null;\n}"
        );
    }
}
