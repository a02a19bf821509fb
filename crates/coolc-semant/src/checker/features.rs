//! Class feature checking: attributes, methods and formal parameters.

use coolc_ast::{AttrDecl, ClassDecl, Feature, Formal, MethodDecl};
use coolc_common::diagnostics::diagnostic_codes;
use coolc_common::names;

use super::CheckerState;
use crate::context::ClassContext;
use crate::types::ClassId;

impl<'a> CheckerState<'a> {
    /// Check one user class inside its already-open scope. A class is
    /// well-typed iff none of its features reported an error.
    pub(crate) fn check_class(&mut self, ctx: &ClassContext, decl: &'a ClassDecl) -> bool {
        let _span = tracing::debug_span!("check_class", class = self.name(decl.name)).entered();
        let errors_before = self.reporter.error_count();

        // All attributes are visible to every body, whatever the order.
        for attr in decl.attributes() {
            self.bind_attribute(ctx, attr);
        }
        for feature in &decl.features {
            match feature {
                Feature::Attribute(attr) => self.check_attribute_init(ctx, attr),
                Feature::Method(method) => self.check_method(ctx, method),
            }
        }

        let well_typed = self.reporter.error_count() == errors_before;
        tracing::debug!(well_typed, "class checked");
        well_typed
    }

    fn bind_attribute(&mut self, ctx: &ClassContext, attr: &AttrDecl) {
        let name = self.name(attr.name);
        if attr.name == names::SELF {
            self.error_at(ctx, attr.line, diagnostic_codes::SELF_ATTRIBUTE, &[]);
            return;
        }
        if self.vars.probe(attr.name).is_some() {
            self.error_at(
                ctx,
                attr.line,
                diagnostic_codes::ATTRIBUTE_MULTIPLY_DEFINED,
                &[name],
            );
            return;
        }
        if self.vars.lookup(attr.name).is_some() {
            self.error_at(
                ctx,
                attr.line,
                diagnostic_codes::ATTRIBUTE_OF_INHERITED_CLASS,
                &[name],
            );
            return;
        }

        let ty = self.resolve_declared_type(ctx, attr.type_decl);
        if ty.is_no_type() {
            let type_name = self.name(attr.type_decl);
            self.error_at(
                ctx,
                attr.line,
                diagnostic_codes::UNDEFINED_ATTRIBUTE_TYPE,
                &[name, type_name],
            );
        }
        // Subclasses share this binding, so SELF_TYPE is resolved per use.
        let bound = if attr.type_decl == names::SELF_TYPE {
            ClassId::SELF_TYPE
        } else {
            ty
        };
        self.vars.add(attr.name, bound);
    }

    fn check_attribute_init(&mut self, ctx: &ClassContext, attr: &AttrDecl) {
        let Some(init) = attr.init else {
            return;
        };
        let inferred = self.check_expr(ctx, init);
        let declared = self.resolve_declared_type(ctx, attr.type_decl);
        if inferred.is_no_type() || declared.is_no_type() {
            return;
        }
        if !self.tree.is_subtype(inferred, declared) {
            let name = self.name(attr.name);
            let declared_name = self.name(attr.type_decl);
            let inferred_name = self.type_name(inferred);
            self.error_at(
                ctx,
                attr.line,
                diagnostic_codes::ATTRIBUTE_INIT_MISMATCH,
                &[name, declared_name, inferred_name],
            );
        }
    }

    fn check_method(&mut self, ctx: &ClassContext, method: &MethodDecl) {
        let _span = tracing::trace_span!("check_method", method = self.name(method.name)).entered();
        self.with_scope(|state| {
            for formal in &method.formals {
                state.bind_formal(ctx, formal);
            }

            let name = state.name(method.name);
            let declared_name = state.name(method.return_type);
            let expected = state.resolve_declared_type(ctx, method.return_type);
            if expected.is_no_type() {
                state.error_at(
                    ctx,
                    method.line,
                    diagnostic_codes::UNDEFINED_RETURN_TYPE,
                    &[name, declared_name],
                );
            }

            let body = state.check_expr(ctx, method.body);
            if body.is_no_type() || expected.is_no_type() {
                return;
            }
            if !state.tree.is_subtype(body, expected) {
                let body_name = state.type_name(body);
                state.error_at(
                    ctx,
                    method.line,
                    diagnostic_codes::RETURN_MISMATCH,
                    &[name, declared_name, body_name],
                );
            }
        });
    }

    fn bind_formal(&mut self, ctx: &ClassContext, formal: &Formal) {
        let name = self.name(formal.name);
        if formal.name == names::SELF {
            self.error_at(ctx, formal.line, diagnostic_codes::SELF_FORMAL, &[]);
            return;
        }
        if self.vars.probe(formal.name).is_some() {
            self.error_at(
                ctx,
                formal.line,
                diagnostic_codes::FORMAL_MULTIPLY_DEFINED,
                &[name],
            );
            return;
        }

        let ty = if formal.type_decl == names::SELF_TYPE {
            self.error_at(ctx, formal.line, diagnostic_codes::SELF_TYPE_FORMAL, &[name]);
            ClassId::NO_TYPE
        } else {
            let ty = self.tree.lookup(formal.type_decl);
            if ty.is_no_type() {
                let type_name = self.name(formal.type_decl);
                self.error_at(
                    ctx,
                    formal.line,
                    diagnostic_codes::UNDEFINED_FORMAL_TYPE,
                    &[name, type_name],
                );
            }
            ty
        };
        self.vars.add(formal.name, ty);
    }
}
