//! Dispatch checking.
//!
//! `e.m(args)` looks `m` up from the static type of `e` (the current class
//! when that type is `SELF_TYPE`). `e@T.m(args)` looks it up from `T`, which
//! must be a defined ancestor of `e`'s type other than `SELF_TYPE`. In both
//! forms a declared `SELF_TYPE` return gives the receiver's type.

use coolc_ast::ExprId;
use coolc_common::diagnostics::diagnostic_codes;
use coolc_common::{Atom, names};

use super::CheckerState;
use crate::context::ClassContext;
use crate::types::ClassId;

impl<'a> CheckerState<'a> {
    pub(super) fn check_dispatch(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        receiver: ExprId,
        method: Atom,
        args: &[ExprId],
    ) -> ClassId {
        let receiver_ty = self.check_expr(ctx, receiver);
        let arg_types = self.check_args(ctx, args);
        if receiver_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        let lookup_class = ctx.resolve_self_type(receiver_ty);
        self.check_call(ctx, line, lookup_class, receiver_ty, method, &arg_types)
    }

    pub(super) fn check_static_dispatch(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        receiver: ExprId,
        type_name: Atom,
        method: Atom,
        args: &[ExprId],
    ) -> ClassId {
        let receiver_ty = self.check_expr(ctx, receiver);
        let arg_types = self.check_args(ctx, args);

        if type_name == names::SELF_TYPE {
            self.error_at(ctx, line, diagnostic_codes::STATIC_DISPATCH_SELF_TYPE, &[]);
            return ClassId::NO_TYPE;
        }
        let static_ty = self.tree.lookup(type_name);
        if static_ty.is_no_type() {
            let name = self.name(type_name);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::UNDEFINED_STATIC_DISPATCH_TYPE,
                &[name],
            );
            return ClassId::NO_TYPE;
        }
        if receiver_ty.is_no_type() {
            return ClassId::NO_TYPE;
        }
        if !self.tree.is_subtype(receiver_ty, static_ty) {
            let receiver_name = self.type_name(receiver_ty);
            let static_name = self.type_name(static_ty);
            self.error_at(
                ctx,
                line,
                diagnostic_codes::STATIC_DISPATCH_MISMATCH,
                &[receiver_name, static_name],
            );
            return ClassId::NO_TYPE;
        }
        self.check_call(ctx, line, static_ty, receiver_ty, method, &arg_types)
    }

    fn check_args(&mut self, ctx: &ClassContext, args: &[ExprId]) -> Vec<ClassId> {
        args.iter().map(|&arg| self.check_expr(ctx, arg)).collect()
    }

    /// Resolve `method` from `lookup_class` and match the actual argument
    /// types against its formals.
    fn check_call(
        &mut self,
        ctx: &ClassContext,
        line: u32,
        lookup_class: ClassId,
        receiver_ty: ClassId,
        method: Atom,
        arg_types: &[ClassId],
    ) -> ClassId {
        if arg_types.iter().any(|ty| ty.is_no_type()) {
            return ClassId::NO_TYPE;
        }
        let tree = self.tree;
        let method_name = self.name(method);
        let Some((owner, signature)) = tree.find_method(lookup_class, method) else {
            self.error_at(ctx, line, diagnostic_codes::UNDEFINED_METHOD, &[method_name]);
            return ClassId::NO_TYPE;
        };
        tracing::trace!(
            method = method_name,
            owner = self.type_name(owner),
            "resolved dispatch"
        );

        if signature.arity() != arg_types.len() {
            self.error_at(
                ctx,
                line,
                diagnostic_codes::WRONG_ARGUMENT_COUNT,
                &[method_name],
            );
            return ClassId::NO_TYPE;
        }

        let mut well_typed = true;
        for (index, (&actual, &formal)) in arg_types.iter().zip(&signature.params).enumerate() {
            // An undefined formal type was reported with the declaration.
            if formal.is_no_type() {
                well_typed = false;
                continue;
            }
            if !tree.is_subtype(actual, formal) {
                let actual_name = self.type_name(actual);
                let formal_name = self.type_name(formal);
                let position = (index + 1).to_string();
                self.error_at(
                    ctx,
                    line,
                    diagnostic_codes::ARGUMENT_MISMATCH,
                    &[method_name, actual_name, &position, formal_name],
                );
                well_typed = false;
            }
        }
        if !well_typed {
            return ClassId::NO_TYPE;
        }

        match signature.ret {
            ClassId::SELF_TYPE => receiver_ty,
            ret => ret,
        }
    }
}
