//! AST node definitions.

use coolc_common::{Atom, Interner};
use serde::Serialize;

use crate::arena::NodeArena;

/// Index of an expression node in its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExprId(pub u32);

impl ExprId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Integer arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ArithOp::Plus => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Comparison operators. All of them produce `Bool`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Leq,
    Eq,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Leq => "<=",
            CompareOp::Eq => "=",
        }
    }
}

/// One `name : Type => body` arm of a `case` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseBranch {
    pub name: Atom,
    pub type_decl: Atom,
    pub body: ExprId,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    IntConst(i64),
    BoolConst(bool),
    StringConst(String),
    /// A variable reference, including `self`.
    Object(Atom),
    Assign {
        name: Atom,
        value: ExprId,
    },
    /// `receiver.method(args)`; an implicit-self call has a `self` receiver.
    Dispatch {
        receiver: ExprId,
        method: Atom,
        args: Vec<ExprId>,
    },
    /// `receiver@type_name.method(args)`
    StaticDispatch {
        receiver: ExprId,
        type_name: Atom,
        method: Atom,
        args: Vec<ExprId>,
    },
    Cond {
        pred: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    Loop {
        pred: ExprId,
        body: ExprId,
    },
    Block(Vec<ExprId>),
    Let {
        name: Atom,
        type_decl: Atom,
        init: Option<ExprId>,
        body: ExprId,
    },
    Case {
        scrutinee: ExprId,
        branches: Vec<CaseBranch>,
    },
    New(Atom),
    IsVoid(ExprId),
    Arith {
        op: ArithOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Compare {
        op: CompareOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Neg(ExprId),
    Not(ExprId),
}

impl ExprKind {
    /// Short kind name, used in annotations and traces.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::IntConst(_) => "int_const",
            ExprKind::BoolConst(_) => "bool_const",
            ExprKind::StringConst(_) => "string_const",
            ExprKind::Object(_) => "object",
            ExprKind::Assign { .. } => "assign",
            ExprKind::Dispatch { .. } => "dispatch",
            ExprKind::StaticDispatch { .. } => "static_dispatch",
            ExprKind::Cond { .. } => "cond",
            ExprKind::Loop { .. } => "loop",
            ExprKind::Block(_) => "block",
            ExprKind::Let { .. } => "let",
            ExprKind::Case { .. } => "typcase",
            ExprKind::New(_) => "new",
            ExprKind::IsVoid(_) => "isvoid",
            ExprKind::Arith { .. } => "arith",
            ExprKind::Compare { .. } => "compare",
            ExprKind::Neg(_) => "neg",
            ExprKind::Not(_) => "comp",
        }
    }

    /// Direct sub-expressions in evaluation order.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::IntConst(_)
            | ExprKind::BoolConst(_)
            | ExprKind::StringConst(_)
            | ExprKind::Object(_)
            | ExprKind::New(_) => Vec::new(),
            ExprKind::Assign { value, .. } => vec![*value],
            ExprKind::Dispatch { receiver, args, .. }
            | ExprKind::StaticDispatch { receiver, args, .. } => {
                let mut out = Vec::with_capacity(args.len() + 1);
                out.push(*receiver);
                out.extend(args.iter().copied());
                out
            }
            ExprKind::Cond {
                pred,
                then_branch,
                else_branch,
            } => vec![*pred, *then_branch, *else_branch],
            ExprKind::Loop { pred, body } => vec![*pred, *body],
            ExprKind::Block(body) => body.clone(),
            ExprKind::Let { init, body, .. } => init.iter().copied().chain([*body]).collect(),
            ExprKind::Case {
                scrutinee,
                branches,
            } => std::iter::once(*scrutinee)
                .chain(branches.iter().map(|b| b.body))
                .collect(),
            ExprKind::IsVoid(e) | ExprKind::Neg(e) | ExprKind::Not(e) => vec![*e],
            ExprKind::Arith { lhs, rhs, .. } | ExprKind::Compare { lhs, rhs, .. } => {
                vec![*lhs, *rhs]
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Formal {
    pub name: Atom,
    pub type_decl: Atom,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub name: Atom,
    pub formals: Vec<Formal>,
    pub return_type: Atom,
    pub body: ExprId,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttrDecl {
    pub name: Atom,
    pub type_decl: Atom,
    pub init: Option<ExprId>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    Method(MethodDecl),
    Attribute(AttrDecl),
}

impl Feature {
    pub fn name(&self) -> Atom {
        match self {
            Feature::Method(method) => method.name,
            Feature::Attribute(attr) => attr.name,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Feature::Method(method) => method.line,
            Feature::Attribute(attr) => attr.line,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Atom,
    pub parent: Atom,
    pub features: Vec<Feature>,
    pub file: Atom,
    pub line: u32,
}

impl ClassDecl {
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Method(method) => Some(method),
            Feature::Attribute(_) => None,
        })
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttrDecl> {
        self.features.iter().filter_map(|feature| match feature {
            Feature::Attribute(attr) => Some(attr),
            Feature::Method(_) => None,
        })
    }
}

/// A whole program: the interned names, the expression arena and the class
/// declarations in source order.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub interner: Interner,
    pub arena: NodeArena,
    pub classes: Vec<ClassDecl>,
}

impl Program {
    /// Resolve an atom to its name.
    #[inline]
    pub fn name(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> Option<&ExprNode> {
        self.arena.get(id)
    }
}
