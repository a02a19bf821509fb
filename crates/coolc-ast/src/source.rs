//! JSON source form of a program, as emitted by the parser.
//!
//! The parser is a separate stage; it hands the checker one JSON document per
//! source file:
//!
//! ```json
//! {
//!   "file": "hello.cl",
//!   "classes": [{
//!     "name": "Main", "parent": "IO", "line": 1,
//!     "features": [{
//!       "kind": "method", "name": "main", "return_type": "Object", "line": 2,
//!       "body": { "kind": "dispatch", "method": "out_string", "line": 2,
//!                 "args": [{ "kind": "string", "value": "hi", "line": 2 }] }
//!     }]
//!   }]
//! }
//! ```
//!
//! `lower_sources` interns the names and moves every expression into one
//! `NodeArena`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::AstBuilder;
use crate::node::{ArithOp, CompareOp, ExprId, Feature, Program};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid AST document: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_parent() -> String {
    "Object".to_string()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceProgram {
    pub file: String,
    #[serde(default)]
    pub classes: Vec<SourceClass>,
}

impl SourceProgram {
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceClass {
    pub name: String,
    #[serde(default = "default_parent")]
    pub parent: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub features: Vec<SourceFeature>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceFeature {
    Method {
        name: String,
        #[serde(default)]
        formals: Vec<SourceFormal>,
        return_type: String,
        body: SourceExpr,
        #[serde(default)]
        line: u32,
    },
    Attribute {
        name: String,
        type_decl: String,
        #[serde(default)]
        init: Option<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceFormal {
    pub name: String,
    pub type_decl: String,
    #[serde(default)]
    pub line: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceBranch {
    pub name: String,
    pub type_decl: String,
    pub body: SourceExpr,
    #[serde(default)]
    pub line: u32,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum SourceBinaryOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Leq,
    #[serde(rename = "=")]
    Eq,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceExpr {
    Int {
        value: i64,
        #[serde(default)]
        line: u32,
    },
    Bool {
        value: bool,
        #[serde(default)]
        line: u32,
    },
    String {
        value: String,
        #[serde(default)]
        line: u32,
    },
    Object {
        name: String,
        #[serde(default)]
        line: u32,
    },
    Assign {
        name: String,
        value: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    /// A missing receiver means `self`.
    Dispatch {
        #[serde(default)]
        receiver: Option<Box<SourceExpr>>,
        method: String,
        #[serde(default)]
        args: Vec<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    StaticDispatch {
        receiver: Box<SourceExpr>,
        type_name: String,
        method: String,
        #[serde(default)]
        args: Vec<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    If {
        pred: Box<SourceExpr>,
        then_branch: Box<SourceExpr>,
        else_branch: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    While {
        pred: Box<SourceExpr>,
        body: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Block {
        body: Vec<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Let {
        name: String,
        type_decl: String,
        #[serde(default)]
        init: Option<Box<SourceExpr>>,
        body: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Case {
        scrutinee: Box<SourceExpr>,
        branches: Vec<SourceBranch>,
        #[serde(default)]
        line: u32,
    },
    New {
        type_name: String,
        #[serde(default)]
        line: u32,
    },
    IsVoid {
        expr: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Binary {
        op: SourceBinaryOp,
        lhs: Box<SourceExpr>,
        rhs: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Neg {
        expr: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
    Not {
        expr: Box<SourceExpr>,
        #[serde(default)]
        line: u32,
    },
}

impl SourceExpr {
    pub fn line(&self) -> u32 {
        match self {
            SourceExpr::Int { line, .. }
            | SourceExpr::Bool { line, .. }
            | SourceExpr::String { line, .. }
            | SourceExpr::Object { line, .. }
            | SourceExpr::Assign { line, .. }
            | SourceExpr::Dispatch { line, .. }
            | SourceExpr::StaticDispatch { line, .. }
            | SourceExpr::If { line, .. }
            | SourceExpr::While { line, .. }
            | SourceExpr::Block { line, .. }
            | SourceExpr::Let { line, .. }
            | SourceExpr::Case { line, .. }
            | SourceExpr::New { line, .. }
            | SourceExpr::IsVoid { line, .. }
            | SourceExpr::Binary { line, .. }
            | SourceExpr::Neg { line, .. }
            | SourceExpr::Not { line, .. } => *line,
        }
    }
}

/// Lower parsed source files into one program. Classes keep the order of the
/// files and of their declarations within each file.
pub fn lower_sources(sources: &[SourceProgram]) -> Program {
    let mut builder = AstBuilder::new("");
    for source in sources {
        let _span = tracing::debug_span!("lower_file", file = %source.file).entered();
        builder.set_file(&source.file);
        for class in &source.classes {
            let features = class
                .features
                .iter()
                .map(|feature| lower_feature(&mut builder, feature))
                .collect();
            builder
                .at_line(class.line)
                .class(&class.name, &class.parent, features);
        }
    }
    builder.finish()
}

fn lower_feature(b: &mut AstBuilder, feature: &SourceFeature) -> Feature {
    match feature {
        SourceFeature::Method {
            name,
            formals,
            return_type,
            body,
            line,
        } => {
            let body = lower_expr(b, body);
            let formals: Vec<(&str, &str)> = formals
                .iter()
                .map(|f| (f.name.as_str(), f.type_decl.as_str()))
                .collect();
            b.at_line(*line).method(name, &formals, return_type, body)
        }
        SourceFeature::Attribute {
            name,
            type_decl,
            init,
            line,
        } => {
            let init = init.as_ref().map(|init| lower_expr(b, init));
            b.at_line(*line).attribute(name, type_decl, init)
        }
    }
}

fn lower_expr(b: &mut AstBuilder, expr: &SourceExpr) -> ExprId {
    // Children are lowered first; the node itself takes its own line last.
    let line = expr.line();
    match expr {
        SourceExpr::Int { value, .. } => b.at_line(line).int(*value),
        SourceExpr::Bool { value, .. } => b.at_line(line).bool(*value),
        SourceExpr::String { value, .. } => b.at_line(line).string(value),
        SourceExpr::Object { name, .. } => b.at_line(line).object(name),
        SourceExpr::Assign { name, value, .. } => {
            let value = lower_expr(b, value);
            b.at_line(line).assign(name, value)
        }
        SourceExpr::Dispatch {
            receiver,
            method,
            args,
            ..
        } => {
            let receiver = match receiver {
                Some(receiver) => lower_expr(b, receiver),
                None => b.at_line(line).self_ref(),
            };
            let args = args.iter().map(|arg| lower_expr(b, arg)).collect();
            b.at_line(line).dispatch(receiver, method, args)
        }
        SourceExpr::StaticDispatch {
            receiver,
            type_name,
            method,
            args,
            ..
        } => {
            let receiver = lower_expr(b, receiver);
            let args = args.iter().map(|arg| lower_expr(b, arg)).collect();
            b.at_line(line)
                .static_dispatch(receiver, type_name, method, args)
        }
        SourceExpr::If {
            pred,
            then_branch,
            else_branch,
            ..
        } => {
            let pred = lower_expr(b, pred);
            let then_branch = lower_expr(b, then_branch);
            let else_branch = lower_expr(b, else_branch);
            b.at_line(line).cond(pred, then_branch, else_branch)
        }
        SourceExpr::While { pred, body, .. } => {
            let pred = lower_expr(b, pred);
            let body = lower_expr(b, body);
            b.at_line(line).loop_(pred, body)
        }
        SourceExpr::Block { body, .. } => {
            let body = body.iter().map(|e| lower_expr(b, e)).collect();
            b.at_line(line).block(body)
        }
        SourceExpr::Let {
            name,
            type_decl,
            init,
            body,
            ..
        } => {
            let init = init.as_ref().map(|init| lower_expr(b, init));
            let body = lower_expr(b, body);
            b.at_line(line).let_(name, type_decl, init, body)
        }
        SourceExpr::Case {
            scrutinee,
            branches,
            ..
        } => {
            let scrutinee = lower_expr(b, scrutinee);
            let branches = branches
                .iter()
                .map(|br| {
                    let body = lower_expr(b, &br.body);
                    b.at_line(br.line).branch(&br.name, &br.type_decl, body)
                })
                .collect();
            b.at_line(line).case_of(scrutinee, branches)
        }
        SourceExpr::New { type_name, .. } => b.at_line(line).new_object(type_name),
        SourceExpr::IsVoid { expr, .. } => {
            let expr = lower_expr(b, expr);
            b.at_line(line).is_void(expr)
        }
        SourceExpr::Binary { op, lhs, rhs, .. } => {
            let lhs = lower_expr(b, lhs);
            let rhs = lower_expr(b, rhs);
            let b = b.at_line(line);
            match op {
                SourceBinaryOp::Plus => b.arith(ArithOp::Plus, lhs, rhs),
                SourceBinaryOp::Sub => b.arith(ArithOp::Sub, lhs, rhs),
                SourceBinaryOp::Mul => b.arith(ArithOp::Mul, lhs, rhs),
                SourceBinaryOp::Div => b.arith(ArithOp::Div, lhs, rhs),
                SourceBinaryOp::Lt => b.compare(CompareOp::Lt, lhs, rhs),
                SourceBinaryOp::Leq => b.compare(CompareOp::Leq, lhs, rhs),
                SourceBinaryOp::Eq => b.compare(CompareOp::Eq, lhs, rhs),
            }
        }
        SourceExpr::Neg { expr, .. } => {
            let expr = lower_expr(b, expr);
            b.at_line(line).neg(expr)
        }
        SourceExpr::Not { expr, .. } => {
            let expr = lower_expr(b, expr);
            b.at_line(line).not(expr)
        }
    }
}
