//! Expression rules.
//!
//! Every rule evaluates all of its sub-expressions before its own check, so
//! each node gets a type and independent errors are all found. A rule
//! reports only when its own inputs were well-typed; `NO_TYPE` inputs make
//! the result `NO_TYPE` silently.

use coolc_ast::{ArithOp, CaseBranch, CompareOp, ExprId, ExprKind, ExprNode};
use coolc_common::diagnostics::diagnostic_codes;
use coolc_common::{Atom, names};
use rustc_hash::FxHashSet;

use super::CheckerState;
use crate::context::ClassContext;
use crate::types::ClassId;

impl<'a> CheckerState<'a> {
    /// Type of `expr`, evaluating its rule on first use only.
    pub fn check_expr(&mut self, ctx: &ClassContext, expr: ExprId) -> ClassId {
        if let Some(ty) = self.types.get(expr) {
            return ty;
        }
        let program = self.program;
        let Some(node) = program.expr(expr) else {
            return ClassId::NO_TYPE;
        };

        if self.expr_depth >= self.options.max_expr_depth {
            if !self.depth_limit_reported {
                let limit = self.options.max_expr_depth.to_string();
                self.error_at(
                    ctx,
                    node.line,
                    diagnostic_codes::EXPRESSION_TOO_DEEP,
                    &[&limit],
                );
                self.depth_limit_reported = true;
            }
            self.types.insert(expr, ClassId::NO_TYPE);
            return ClassId::NO_TYPE;
        }

        self.expr_depth += 1;
        let ty = self.compute_expr_type(ctx, node);
        self.expr_depth -= 1;
        if self.expr_depth == 0 {
            self.depth_limit_reported = false;
        }

        tracing::trace!(
            expr = expr.0,
            kind = node.kind.name(),
            ty = self.type_name(ty),
            "checked expression"
        );
        self.types.insert(expr, ty);
        ty
    }

    fn compute_expr_type(&mut self, ctx: &ClassContext, node: &'a ExprNode) -> ClassId {
        let line = node.line;
        match &node.kind {
            ExprKind::IntConst(_) => ClassId::INT,
            ExprKind::BoolConst(_) => ClassId::BOOL,
            ExprKind::StringConst(_) => ClassId::STRING,
            ExprKind::Object(name) => self.check_object(ctx, line, *name),
            ExprKind::Assign { name, value } => self.check_assign(ctx, line, *name, *value),
            ExprKind::Dispatch {
                receiver,
                method,
                args,
            } => self.check_dispatch(ctx, line, *receiver, *method, args),
            ExprKind::StaticDispatch {
                receiver,
                type_name,
                method,
                args,
            } => self.check_static_dispatch(ctx, line, *receiver, *type_name, *method, args),
            ExprKind::Cond {
                pred,
                then_branch,
                else_branch,
            } => self.check_cond(ctx, line, *pred, *then_branch, *else_branch),
            ExprKind::Loop { pred, body } => self.check_loop(ctx, line, *pred, *body),
            ExprKind::Block(body) => self.check_block(ctx, body),
            ExprKind::Let {
                name,
                type_decl,
                init,
                body,
            } => self.check_let(ctx, line, *name, *type_decl, *init, *body),
            ExprKind::Case {
                scrutinee,
                branches,
            } => self.check_case(ctx, line, *scrutinee, branches),
            ExprKind::New(type_name) => self.check_new(ctx, line, *type_name),
            ExprKind::IsVoid(operand) => {
                if self.check_expr(ctx, *operand).is_no_type() {
                    ClassId::NO_TYPE
                } else {
                    ClassId::BOOL
                }
            }
            ExprKind::Arith { op, lhs, rhs } => self.check_arith(ctx, line, *op, *lhs, *rhs),
            ExprKind::Compare { op, lhs, rhs } => self.check_compare(ctx, line, *op, *lhs, *rhs),
            ExprKind::Neg(operand) => self.check_unary(
                ctx,
                line,
                *operand,
                ClassId::INT,
                diagnostic_codes::NEG_NOT_INT,
            ),
            ExprKind::Not(operand) => self.check_unary(
                ctx,
                line,
                *operand,
                ClassId::BOOL,
                diagnostic_codes::NOT_NOT_BOOL,
            ),
        }
    }

    fn check_object(&mut self, ctx: &ClassContext, line: u32, name: Atom) -> ClassId {
        match self.vars.lookup(name) {
            Some(ty) => ctx.resolve_self_type(ty),
            None => {
                let name = self.name(name);
                self.error_at(ctx, line, diagnostic_codes::UNDECLARED_IDENTIFIER, &[name]);
                ClassId::NO_TYPE
            }
        }
    }

    fn check_assign(&mut self, ctx: &ClassContext, line: u32, name: Atom, value: ExprId) -> ClassId {
        let value_ty = self.check_expr(ctx, value);
        let var_name = self.name(name);
        if name == names::SELF {
            self.error_at(ctx, line, diagnostic_codes::CANNOT_ASSIGN_TO_SELF, &[]);
            return ClassId::NO_TYPE;
        }
        let Some(declared) = self.vars.lookup(name) else {
            self.error_at(ctx, line, diagnostic_codes::ASSIGN_TO_UNDECLARED, &[var_name]);
            return ClassId::NO_TYPE;
        };
        let declared = ctx.resolve_self_type(declared);
        if value_ty.is_no_type() || declared.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if !self.tree.is_subtype(value_ty, declared) {
            let value_name = self.type_name(value_ty);
            let declared_name = self.type_name(declared);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::ASSIGN_MISMATCH,
                &[value_name, declared_name, var_name],
            );
            return ClassId::NO_TYPE;
        }
        value_ty
    }

    fn check_arith(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        op: ArithOp,
        lhs: ExprId,
        rhs: ExprId,
    ) -> ClassId {
        self.check_int_operands(ctx, line, op.as_str(), lhs, rhs, ClassId::INT)
    }

    fn check_compare(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        op: CompareOp,
        lhs: ExprId,
        rhs: ExprId,
    ) -> ClassId {
        match op {
            CompareOp::Lt | CompareOp::Leq => {
                self.check_int_operands(ctx, line, op.as_str(), lhs, rhs, ClassId::BOOL)
            }
            CompareOp::Eq => {
                let lhs_ty = self.check_expr(ctx, lhs);
                let rhs_ty = self.check_expr(ctx, rhs);
                if lhs_ty.is_no_type() || rhs_ty.is_no_type() {
                    return ClassId::NO_TYPE;
                }
                if (lhs_ty.is_basic() || rhs_ty.is_basic()) && lhs_ty != rhs_ty {
                    self.error_at(ctx, line, diagnostic_codes::ILLEGAL_BASIC_COMPARISON, &[]);
                    return ClassId::NO_TYPE;
                }
                ClassId::BOOL
            }
        }
    }

    /// `+ - * / < <=`: both operands `Int`.
    fn check_int_operands(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        op: &str,
        lhs: ExprId,
        rhs: ExprId,
        result: ClassId,
    ) -> ClassId {
        let lhs_ty = self.check_expr(ctx, lhs);
        let rhs_ty = self.check_expr(ctx, rhs);
        if lhs_ty.is_no_type() || rhs_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if lhs_ty != ClassId::INT || rhs_ty != ClassId::INT {
            let lhs_name = self.type_name(lhs_ty);
            let rhs_name = self.type_name(rhs_ty);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::NON_INT_ARGUMENTS,
                &[lhs_name, op, rhs_name],
            );
            return ClassId::NO_TYPE;
        }
        result
    }

    /// `~e` and `not e`: the operand must be exactly `expected`.
    fn check_unary(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        operand: ExprId,
        expected: ClassId,
        code: u32,
    ) -> ClassId {
        let ty = self.check_expr(ctx, operand);
        if ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if ty != expected {
            let name = self.type_name(ty);
            self.error_at(ctx, line, code, &[name]);
            return ClassId::NO_TYPE;
        }
        expected
    }

    fn check_cond(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        pred: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ClassId {
        let pred_ty = self.check_expr(ctx, pred);
        let then_ty = self.check_expr(ctx, then_branch);
        let else_ty = self.check_expr(ctx, else_branch);
        if pred_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if pred_ty != ClassId::BOOL {
            self.error_at(ctx, line, diagnostic_codes::IF_PREDICATE_NOT_BOOL, &[]);
            return ClassId::NO_TYPE;
        }
        self.tree.join(then_ty, else_ty)
    }

    fn check_loop(&mut self, ctx: &ClassContext, line: u32, pred: ExprId, body: ExprId) -> ClassId {
        let pred_ty = self.check_expr(ctx, pred);
        let body_ty = self.check_expr(ctx, body);
        if pred_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if pred_ty != ClassId::BOOL {
            self.error_at(ctx, line, diagnostic_codes::LOOP_CONDITION_NOT_BOOL, &[]);
            return ClassId::NO_TYPE;
        }
        if body_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        ClassId::OBJECT
    }

    fn check_block(&mut self, ctx: &ClassContext, body: &[ExprId]) -> ClassId {
        let mut last = ClassId::OBJECT;
        let mut well_typed = true;
        for &expr in body {
            last = self.check_expr(ctx, expr);
            well_typed &= !last.is_no_type();
        }
        if well_typed { last } else { ClassId::NO_TYPE }
    }

    fn check_let(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        name: Atom,
        type_decl: Atom,
        init: Option<ExprId>,
        body: ExprId,
    ) -> ClassId {
        let var_name = self.name(name);
        let mut well_typed = true;

        let declared = self.resolve_declared_type(ctx, type_decl);
        if name == names::SELF {
            self.error_at(ctx, line, diagnostic_codes::SELF_IN_LET, &[]);
            well_typed = false;
        }
        if declared.is_no_type() {
            let type_name = self.name(type_decl);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::UNDEFINED_LET_TYPE,
                &[var_name, type_name],
            );
            well_typed = false;
        }

        // The initializer does not see the new binding.
        if let Some(init) = init {
            let init_ty = self.check_expr(ctx, init);
            if init_ty.is_no_type() {
                well_typed = false;
            } else if !declared.is_no_type() && !self.tree.is_subtype(init_ty, declared) {
                let declared_name = self.name(type_decl);
                let init_name = self.type_name(init_ty);
                self.error_at(
                    ctx,
                    line,
                    diagnostic_codes::LET_INIT_MISMATCH,
                    &[var_name, declared_name, init_name],
                );
                well_typed = false;
            }
        }

        let body_ty = self.with_scope(|state| {
            if name != names::SELF {
                state.vars.add(name, declared);
            }
            state.check_expr(ctx, body)
        });
        if well_typed { body_ty } else { ClassId::NO_TYPE }
    }

    fn check_case(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        scrutinee: ExprId,
        branches: &'a [CaseBranch],
    ) -> ClassId {
        let scrutinee_ty = self.check_expr(ctx, scrutinee);
        let mut well_typed = !scrutinee_ty.is_no_type();
        let mut seen = FxHashSet::default();
        let mut result: Option<ClassId> = None;

        for branch in branches {
            let (branch_ty, valid) =
                self.check_case_branch_type(ctx, scrutinee_ty, branch, &mut seen);
            well_typed &= valid;

            let body_ty = self.with_scope(|state| {
                if branch.name != names::SELF {
                    state.vars.add(branch.name, branch_ty);
                }
                state.check_expr(ctx, branch.body)
            });
            well_typed &= !body_ty.is_no_type();
            result = Some(match result {
                Some(joined) => self.tree.join(joined, body_ty),
                None => body_ty,
            });
        }

        match result {
            Some(ty) if well_typed => ty,
            Some(_) => ClassId::NO_TYPE,
            None => {
                self.error_at(ctx, line, diagnostic_codes::EMPTY_CASE, &[]);
                ClassId::NO_TYPE
            }
        }
    }

    /// Validate a branch's declared type. Returns the type to bind the
    /// branch variable to and whether the branch is valid.
    fn check_case_branch_type(
        &mut self,
        ctx: &ClassContext,
        scrutinee_ty: ClassId,
        branch: &CaseBranch,
        seen: &mut FxHashSet<ClassId>,
    ) -> (ClassId, bool) {
        let line = branch.line;
        let type_name = self.name(branch.type_decl);
        let mut valid = true;

        if branch.name == names::SELF {
            self.error_at(ctx, line, diagnostic_codes::SELF_IN_CASE, &[]);
            valid = false;
        }
        if branch.type_decl == names::SELF_TYPE {
            let name = self.name(branch.name);
            self.error_at(ctx, line, diagnostic_codes::SELF_TYPE_CASE, &[name]);
            return (ClassId::NO_TYPE, false);
        }
        let ty = self.tree.lookup(branch.type_decl);
        if ty.is_no_type() {
            self.error_at(ctx, line, diagnostic_codes::UNDEFINED_CASE_TYPE, &[type_name]);
            return (ClassId::NO_TYPE, false);
        }
        if !seen.insert(ty) {
            self.error_at(ctx, line, diagnostic_codes::DUPLICATE_CASE_BRANCH, &[type_name]);
            valid = false;
        }
        if !scrutinee_ty.is_no_type()
            && !self.tree.is_subtype(ty, scrutinee_ty)
            && !self.tree.is_subtype(scrutinee_ty, ty)
        {
            let scrutinee_name = self.type_name(scrutinee_ty);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::CASE_BRANCH_UNRELATED,
                &[type_name, scrutinee_name],
            );
            valid = false;
        }
        (ty, valid)
    }

    fn check_new(&mut self, ctx: &ClassContext, line: u32, type_name: Atom) -> ClassId {
        let ty = self.resolve_declared_type(ctx, type_name);
        if ty.is_no_type() {
            let name = self.name(type_name);
            self.error_at(ctx, line, diagnostic_codes::UNDEFINED_NEW_TYPE, &[name]);
        }
        ty
    }
}
