//! Syntax tree for the TypeScript/JSX the generator emits.
//!
//! Nodes are plain data; constructors on [`Expr`] play the role of a syntax
//! factory so builders read close to the code they produce.

use regex::Regex;
use std::sync::OnceLock;

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Object(ObjectLit),
    Array(Vec<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: String,
        optional: bool,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
        optional: bool,
    },
    Arrow {
        params: Vec<String>,
        body: ArrowBody,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Template(Vec<TemplatePart>),
    Jsx(Box<JsxElement>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// `{ a, b }` on one line.
    pub fn object(members: impl IntoIterator<Item = ObjectMember>) -> Self {
        Self::Object(ObjectLit {
            members: members.into_iter().collect(),
            multiline: false,
        })
    }

    /// Object literal with one member per line.
    pub fn object_multiline(members: impl IntoIterator<Item = ObjectMember>) -> Self {
        Self::Object(ObjectLit {
            members: members.into_iter().collect(),
            multiline: true,
        })
    }

    pub fn call(callee: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args: args.into_iter().collect(),
        }
    }

    /// `self.property`.
    pub fn member(self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(self),
            property: property.into(),
            optional: false,
        }
    }

    /// `self?.property`.
    pub fn optional_member(self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(self),
            property: property.into(),
            optional: true,
        }
    }

    /// `self[index]`.
    pub fn index(self, index: Expr) -> Self {
        Self::Index {
            object: Box::new(self),
            index: Box::new(index),
            optional: false,
        }
    }

    /// `self.name`, or `self["name"]` when `name` is not an identifier.
    pub fn field(self, name: &str) -> Self {
        if is_identifier(name) {
            self.member(name)
        } else {
            self.index(Self::string(name))
        }
    }

    /// `root.b.c` from `root` and `["b", "c"]`.
    pub fn path<S: AsRef<str>>(root: &str, segments: &[S]) -> Self {
        segments
            .iter()
            .fold(Self::ident(root), |object, segment| object.field(segment.as_ref()))
    }

    pub fn arrow(params: impl IntoIterator<Item = impl Into<String>>, body: Expr) -> Self {
        Self::Arrow {
            params: params.into_iter().map(Into::into).collect(),
            body: ArrowBody::Expr(Box::new(body)),
        }
    }

    pub fn arrow_block(params: impl IntoIterator<Item = impl Into<String>>, body: Vec<Stmt>) -> Self {
        Self::Arrow {
            params: params.into_iter().map(Into::into).collect(),
            body: ArrowBody::Block(body),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Self {
        Self::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    /// Convert a JSON literal into the equivalent expression.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Num(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => Self::Array(items.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(map) => Self::object(
                map.iter()
                    .map(|(key, value)| ObjectMember::property(key.as_str(), Self::from_json(value))),
            ),
        }
    }
}

/// An object literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLit {
    pub members: Vec<ObjectMember>,
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// `...expr`
    Spread(Expr),
    /// `key: value`
    Property { key: PropertyKey, value: Expr },
}

impl ObjectMember {
    pub fn spread(expr: Expr) -> Self {
        Self::Spread(expr)
    }

    pub fn property(key: &str, value: Expr) -> Self {
        Self::Property {
            key: PropertyKey::new(key),
            value,
        }
    }
}

/// Object literal key, quoted only when it is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    Ident(String),
    Str(String),
}

impl PropertyKey {
    pub fn new(key: &str) -> Self {
        if is_identifier(key) {
            Self::Ident(key.to_string())
        } else {
            Self::Str(key.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ident(key) | Self::Str(key) => key,
        }
    }
}

/// Whether `name` can be written as a bare JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static pattern"))
        .is_match(name)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    StrictEq,
    StrictNe,
    Lt,
    Gt,
    Le,
    Ge,
    Or,
    Nullish,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Or => "||",
            Self::Nullish => "??",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Expr(Expr),
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Const { pattern: Pattern, init: Expr },
    Expr(Expr),
    Return(Expr),
    Function(FunctionDecl),
}

impl Stmt {
    /// `const name = init;`
    pub fn const_decl(name: impl Into<String>, init: Expr) -> Self {
        Self::Const {
            pattern: Pattern::Ident(name.into()),
            init,
        }
    }
}

/// `function name(params) { body }`, optionally `export default`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub export_default: bool,
}

/// Binding pattern on the left of a `const`.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Ident(String),
    /// `{ key: alias, other, ...rest }`
    Object {
        bindings: Vec<(String, Option<String>)>,
        rest: Option<String>,
    },
    /// `[first, second]`
    Array(Vec<String>),
}

/// `<Tag attr={value}>children</Tag>`
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub tag: String,
    pub attributes: Vec<JsxAttribute>,
    pub children: Vec<JsxChild>,
}

impl JsxElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, value: Expr) -> Self {
        self.attributes.push(JsxAttribute::Named {
            name: name.into(),
            value,
        });
        self
    }

    pub fn spread(mut self, expr: Expr) -> Self {
        self.attributes.push(JsxAttribute::Spread(expr));
        self
    }

    pub fn child(mut self, child: JsxChild) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttribute {
    /// `name="text"` for string literals, `name={expr}` otherwise.
    Named { name: String, value: Expr },
    /// `{...expr}`
    Spread(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Element(JsxElement),
    /// `{expr}`
    Expr(Expr),
}
