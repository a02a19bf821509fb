//! Program construction.
//!
//! `AstBuilder` interns names and allocates nodes in one place, so the parser
//! lowering and hand-written test programs build trees the same way.
//! Every node takes the builder's current line; move it with `at_line`.

use coolc_common::{Atom, names};

use crate::node::{
    ArithOp, AttrDecl, CaseBranch, ClassDecl, CompareOp, ExprId, ExprKind, ExprNode, Feature,
    Formal, MethodDecl, Program,
};

pub struct AstBuilder {
    program: Program,
    file: Atom,
    line: u32,
}

impl AstBuilder {
    pub fn new(file: &str) -> Self {
        let mut program = Program::default();
        let file = program.interner.intern(file);
        Self {
            program,
            file,
            line: 1,
        }
    }

    /// File name recorded on subsequently declared classes.
    pub fn set_file(&mut self, file: &str) -> &mut Self {
        self.file = self.program.interner.intern(file);
        self
    }

    pub fn at_line(&mut self, line: u32) -> &mut Self {
        self.line = line;
        self
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn intern(&mut self, name: &str) -> Atom {
        self.program.interner.intern(name)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn finish(self) -> Program {
        self.program
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        self.program.arena.alloc(ExprNode {
            kind,
            line: self.line,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn int(&mut self, value: i64) -> ExprId {
        self.alloc(ExprKind::IntConst(value))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.alloc(ExprKind::BoolConst(value))
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        self.alloc(ExprKind::StringConst(value.to_string()))
    }

    pub fn object(&mut self, name: &str) -> ExprId {
        let name = self.intern(name);
        self.alloc(ExprKind::Object(name))
    }

    pub fn self_ref(&mut self) -> ExprId {
        self.alloc(ExprKind::Object(names::SELF))
    }

    pub fn assign(&mut self, name: &str, value: ExprId) -> ExprId {
        let name = self.intern(name);
        self.alloc(ExprKind::Assign { name, value })
    }

    pub fn dispatch(&mut self, receiver: ExprId, method: &str, args: Vec<ExprId>) -> ExprId {
        let method = self.intern(method);
        self.alloc(ExprKind::Dispatch {
            receiver,
            method,
            args,
        })
    }

    /// `method(args)` with the implicit `self` receiver.
    pub fn self_dispatch(&mut self, method: &str, args: Vec<ExprId>) -> ExprId {
        let receiver = self.self_ref();
        self.dispatch(receiver, method, args)
    }

    pub fn static_dispatch(
        &mut self,
        receiver: ExprId,
        type_name: &str,
        method: &str,
        args: Vec<ExprId>,
    ) -> ExprId {
        let type_name = self.intern(type_name);
        let method = self.intern(method);
        self.alloc(ExprKind::StaticDispatch {
            receiver,
            type_name,
            method,
            args,
        })
    }

    pub fn cond(&mut self, pred: ExprId, then_branch: ExprId, else_branch: ExprId) -> ExprId {
        self.alloc(ExprKind::Cond {
            pred,
            then_branch,
            else_branch,
        })
    }

    pub fn loop_(&mut self, pred: ExprId, body: ExprId) -> ExprId {
        self.alloc(ExprKind::Loop { pred, body })
    }

    pub fn block(&mut self, body: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::Block(body))
    }

    pub fn let_(
        &mut self,
        name: &str,
        type_decl: &str,
        init: Option<ExprId>,
        body: ExprId,
    ) -> ExprId {
        let name = self.intern(name);
        let type_decl = self.intern(type_decl);
        self.alloc(ExprKind::Let {
            name,
            type_decl,
            init,
            body,
        })
    }

    /// One `name : Type => body` arm, at the current line.
    pub fn branch(&mut self, name: &str, type_decl: &str, body: ExprId) -> CaseBranch {
        CaseBranch {
            name: self.intern(name),
            type_decl: self.intern(type_decl),
            body,
            line: self.line,
        }
    }

    /// `case scrutinee of name : Type => body; ... esac`
    pub fn case(&mut self, scrutinee: ExprId, branches: &[(&str, &str, ExprId)]) -> ExprId {
        let branches = branches
            .iter()
            .map(|&(name, type_decl, body)| self.branch(name, type_decl, body))
            .collect();
        self.case_of(scrutinee, branches)
    }

    pub fn case_of(&mut self, scrutinee: ExprId, branches: Vec<CaseBranch>) -> ExprId {
        self.alloc(ExprKind::Case {
            scrutinee,
            branches,
        })
    }

    pub fn new_object(&mut self, type_name: &str) -> ExprId {
        let type_name = self.intern(type_name);
        self.alloc(ExprKind::New(type_name))
    }

    pub fn is_void(&mut self, expr: ExprId) -> ExprId {
        self.alloc(ExprKind::IsVoid(expr))
    }

    pub fn arith(&mut self, op: ArithOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(ExprKind::Arith { op, lhs, rhs })
    }

    pub fn plus(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.arith(ArithOp::Plus, lhs, rhs)
    }

    pub fn compare(&mut self, op: CompareOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.alloc(ExprKind::Compare { op, lhs, rhs })
    }

    pub fn neg(&mut self, expr: ExprId) -> ExprId {
        self.alloc(ExprKind::Neg(expr))
    }

    pub fn not(&mut self, expr: ExprId) -> ExprId {
        self.alloc(ExprKind::Not(expr))
    }

    // =========================================================================
    // Features and classes
    // =========================================================================

    pub fn formal(&mut self, name: &str, type_decl: &str) -> Formal {
        Formal {
            name: self.intern(name),
            type_decl: self.intern(type_decl),
            line: self.line,
        }
    }

    pub fn method(
        &mut self,
        name: &str,
        formals: &[(&str, &str)],
        return_type: &str,
        body: ExprId,
    ) -> Feature {
        let formals = formals
            .iter()
            .map(|&(formal, type_decl)| self.formal(formal, type_decl))
            .collect();
        Feature::Method(MethodDecl {
            name: self.intern(name),
            formals,
            return_type: self.intern(return_type),
            body,
            line: self.line,
        })
    }

    pub fn attribute(&mut self, name: &str, type_decl: &str, init: Option<ExprId>) -> Feature {
        Feature::Attribute(AttrDecl {
            name: self.intern(name),
            type_decl: self.intern(type_decl),
            init,
            line: self.line,
        })
    }

    /// Declare a class; returns its name atom.
    pub fn class(&mut self, name: &str, parent: &str, features: Vec<Feature>) -> Atom {
        let name = self.intern(name);
        let parent = self.intern(parent);
        self.program.classes.push(ClassDecl {
            name,
            parent,
            features,
            file: self.file,
            line: self.line,
        });
        name
    }
}
