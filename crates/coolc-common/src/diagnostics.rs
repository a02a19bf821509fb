//! Diagnostic types and message lookup for the semantic checker.
//!
//! Every diagnostic has a numeric code and a message template with `{0}`,
//! `{1}`, ... placeholders. Codes are grouped by kind:
//!
//! - `1xxx` structural (class hierarchy) errors; these stop analysis
//! - `2xxx` redefinitions inside a class
//! - `3xxx` name errors (undeclared identifiers, undefined types, misuse of `self`)
//! - `4xxx` type mismatches

use serde::Serialize;
use std::fmt;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    /// A problem in the analyzed program.
    Error = 1,
    /// An internal invariant of the checker was violated.
    Internal = 2,
}

/// A positioned semantic diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, line: u32, message: String, code: u32) -> Self {
        Self {
            file,
            line,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a diagnostic for a violated checker invariant. It carries no
    /// source position.
    #[must_use]
    pub const fn internal(message: String, code: u32) -> Self {
        Self {
            file: String::new(),
            line: 0,
            message_text: message,
            category: DiagnosticCategory::Internal,
            code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            DiagnosticCategory::Internal => write!(f, "{}", self.message_text),
            DiagnosticCategory::Error => {
                write!(f, "{}:{}: {}", self.file, self.line, self.message_text)
            }
        }
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
///
/// The template is scanned once, so placeholder text inside an argument is
/// copied through untouched. Placeholders without a matching argument are
/// kept as written.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let arg = if digits > 0 && after[digits..].starts_with('}') {
            after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
        } else {
            None
        };
        match arg {
            Some(arg) => {
                result.push_str(arg);
                rest = &after[digits + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Printed by the driver when analysis found errors.
pub const COMPILATION_HALTED: &str = "Compilation halted due to static semantic errors.";

pub mod diagnostic_codes {
    // Structural
    pub const CLASS_PREVIOUSLY_DEFINED: u32 = 1001;
    pub const REDEFINITION_OF_BASIC_CLASS: u32 = 1002;
    pub const CANNOT_INHERIT_CLASS: u32 = 1003;
    pub const INHERITS_FROM_UNDEFINED_CLASS: u32 = 1004;
    pub const INHERITANCE_CYCLE: u32 = 1005;
    pub const HIERARCHY_CORRUPTED: u32 = 1006;

    // Redefinition
    pub const METHOD_MULTIPLY_DEFINED: u32 = 2001;
    pub const ATTRIBUTE_MULTIPLY_DEFINED: u32 = 2002;
    pub const ATTRIBUTE_OF_INHERITED_CLASS: u32 = 2003;
    pub const FORMAL_MULTIPLY_DEFINED: u32 = 2004;

    // Names
    pub const UNDECLARED_IDENTIFIER: u32 = 3001;
    pub const ASSIGN_TO_UNDECLARED: u32 = 3002;
    pub const CANNOT_ASSIGN_TO_SELF: u32 = 3003;
    pub const SELF_ATTRIBUTE: u32 = 3004;
    pub const SELF_FORMAL: u32 = 3005;
    pub const SELF_IN_LET: u32 = 3006;
    pub const SELF_IN_CASE: u32 = 3007;
    pub const UNDEFINED_ATTRIBUTE_TYPE: u32 = 3008;
    pub const UNDEFINED_FORMAL_TYPE: u32 = 3009;
    pub const SELF_TYPE_FORMAL: u32 = 3010;
    pub const UNDEFINED_RETURN_TYPE: u32 = 3011;
    pub const UNDEFINED_LET_TYPE: u32 = 3012;
    pub const UNDEFINED_CASE_TYPE: u32 = 3013;
    pub const SELF_TYPE_CASE: u32 = 3014;
    pub const UNDEFINED_NEW_TYPE: u32 = 3015;
    pub const UNDEFINED_STATIC_DISPATCH_TYPE: u32 = 3016;
    pub const STATIC_DISPATCH_SELF_TYPE: u32 = 3017;
    pub const UNDEFINED_METHOD: u32 = 3018;

    // Type mismatch
    pub const ASSIGN_MISMATCH: u32 = 4001;
    pub const NON_INT_ARGUMENTS: u32 = 4002;
    pub const NEG_NOT_INT: u32 = 4003;
    pub const NOT_NOT_BOOL: u32 = 4004;
    pub const ILLEGAL_BASIC_COMPARISON: u32 = 4005;
    pub const IF_PREDICATE_NOT_BOOL: u32 = 4006;
    pub const LOOP_CONDITION_NOT_BOOL: u32 = 4007;
    pub const LET_INIT_MISMATCH: u32 = 4008;
    pub const DUPLICATE_CASE_BRANCH: u32 = 4009;
    pub const CASE_BRANCH_UNRELATED: u32 = 4010;
    pub const WRONG_ARGUMENT_COUNT: u32 = 4011;
    pub const ARGUMENT_MISMATCH: u32 = 4012;
    pub const STATIC_DISPATCH_MISMATCH: u32 = 4013;
    pub const RETURN_MISMATCH: u32 = 4014;
    pub const ATTRIBUTE_INIT_MISMATCH: u32 = 4015;
    pub const EXPRESSION_TOO_DEEP: u32 = 4016;
    pub const EMPTY_CASE: u32 = 4017;
}

pub mod diagnostic_messages {
    pub const CLASS_PREVIOUSLY_DEFINED: &str = "Class {0} was previously defined.";
    pub const REDEFINITION_OF_BASIC_CLASS: &str = "Redefinition of basic class {0}.";
    pub const CANNOT_INHERIT_CLASS: &str = "Class {0} cannot inherit class {1}.";
    pub const INHERITS_FROM_UNDEFINED_CLASS: &str =
        "Class {0} inherits from an undefined class {1}.";
    pub const INHERITANCE_CYCLE: &str =
        "Class {0}, or an ancestor of {0}, is involved in an inheritance cycle.";
    pub const HIERARCHY_CORRUPTED: &str =
        "Internal error: {0} of {1} classes are unreachable from Object.";

    pub const METHOD_MULTIPLY_DEFINED: &str = "Method {0} is multiply defined.";
    pub const ATTRIBUTE_MULTIPLY_DEFINED: &str = "Attribute {0} is multiply defined in class.";
    pub const ATTRIBUTE_OF_INHERITED_CLASS: &str =
        "Attribute {0} is an attribute of an inherited class.";
    pub const FORMAL_MULTIPLY_DEFINED: &str = "Formal parameter {0} is multiply defined.";

    pub const UNDECLARED_IDENTIFIER: &str = "Undeclared identifier {0}.";
    pub const ASSIGN_TO_UNDECLARED: &str = "Assignment to undeclared variable {0}.";
    pub const CANNOT_ASSIGN_TO_SELF: &str = "Cannot assign to 'self'.";
    pub const SELF_ATTRIBUTE: &str = "'self' cannot be the name of an attribute.";
    pub const SELF_FORMAL: &str = "'self' cannot be the name of a formal parameter.";
    pub const SELF_IN_LET: &str = "'self' cannot be bound in a 'let' expression.";
    pub const SELF_IN_CASE: &str = "'self' bound in 'case'.";
    pub const UNDEFINED_ATTRIBUTE_TYPE: &str = "Class {1} of attribute {0} is undefined.";
    pub const UNDEFINED_FORMAL_TYPE: &str = "Class {1} of formal parameter {0} is undefined.";
    pub const SELF_TYPE_FORMAL: &str = "Formal parameter {0} cannot have type SELF_TYPE.";
    pub const UNDEFINED_RETURN_TYPE: &str = "Undefined return type {1} in method {0}.";
    pub const UNDEFINED_LET_TYPE: &str = "Class {1} of let-bound identifier {0} is undefined.";
    pub const UNDEFINED_CASE_TYPE: &str = "Class {0} of case branch is undefined.";
    pub const SELF_TYPE_CASE: &str =
        "Identifier {0} declared with type SELF_TYPE in case branch.";
    pub const UNDEFINED_NEW_TYPE: &str = "'new' used with undefined class {0}.";
    pub const UNDEFINED_STATIC_DISPATCH_TYPE: &str = "Static dispatch to undefined class {0}.";
    pub const STATIC_DISPATCH_SELF_TYPE: &str = "Static dispatch to SELF_TYPE.";
    pub const UNDEFINED_METHOD: &str = "Dispatch to undefined method {0}.";

    pub const ASSIGN_MISMATCH: &str =
        "Type {0} of assigned expression does not conform to declared type {1} of identifier {2}.";
    pub const NON_INT_ARGUMENTS: &str = "non-Int arguments: {0} {1} {2}";
    pub const NEG_NOT_INT: &str = "Argument of '~' has type {0} instead of Int.";
    pub const NOT_NOT_BOOL: &str = "Argument of 'not' has type {0} instead of Bool.";
    pub const ILLEGAL_BASIC_COMPARISON: &str = "Illegal comparison with a basic type.";
    pub const IF_PREDICATE_NOT_BOOL: &str = "Predicate of 'if' does not have type Bool.";
    pub const LOOP_CONDITION_NOT_BOOL: &str = "Loop condition does not have type Bool.";
    pub const LET_INIT_MISMATCH: &str = "Inferred type {2} of initialization of {0} does not conform to identifier's declared type {1}.";
    pub const DUPLICATE_CASE_BRANCH: &str = "Duplicate branch {0} in case statement.";
    pub const CASE_BRANCH_UNRELATED: &str =
        "Case branch type {0} is unrelated to expression type {1}.";
    pub const WRONG_ARGUMENT_COUNT: &str = "Method {0} called with wrong number of arguments.";
    pub const ARGUMENT_MISMATCH: &str =
        "In call of method {0}, type {1} of parameter #{2} does not conform to declared type {3}.";
    pub const STATIC_DISPATCH_MISMATCH: &str =
        "Expression type {0} does not conform to declared static dispatch type {1}.";
    pub const RETURN_MISMATCH: &str = "Inferred return type {2} of method {0} does not conform to declared return type {1}.";
    pub const ATTRIBUTE_INIT_MISMATCH: &str = "Inferred type {2} of initialization of attribute {0} does not conform to declared type {1}.";
    pub const EXPRESSION_TOO_DEEP: &str = "Expression nesting exceeds the maximum depth of {0}.";
    pub const EMPTY_CASE: &str = "Case expression has no branches.";
}

macro_rules! messages {
    ($($name:ident),* $(,)?) => {
        /// Every message definition, for lookup by code.
        pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
            $(DiagnosticMessage {
                code: diagnostic_codes::$name,
                category: DiagnosticCategory::Error,
                message: diagnostic_messages::$name,
            },)*
        ];
    };
}

messages!(
    CLASS_PREVIOUSLY_DEFINED,
    REDEFINITION_OF_BASIC_CLASS,
    CANNOT_INHERIT_CLASS,
    INHERITS_FROM_UNDEFINED_CLASS,
    INHERITANCE_CYCLE,
    METHOD_MULTIPLY_DEFINED,
    ATTRIBUTE_MULTIPLY_DEFINED,
    ATTRIBUTE_OF_INHERITED_CLASS,
    FORMAL_MULTIPLY_DEFINED,
    UNDECLARED_IDENTIFIER,
    ASSIGN_TO_UNDECLARED,
    CANNOT_ASSIGN_TO_SELF,
    SELF_ATTRIBUTE,
    SELF_FORMAL,
    SELF_IN_LET,
    SELF_IN_CASE,
    UNDEFINED_ATTRIBUTE_TYPE,
    UNDEFINED_FORMAL_TYPE,
    SELF_TYPE_FORMAL,
    UNDEFINED_RETURN_TYPE,
    UNDEFINED_LET_TYPE,
    UNDEFINED_CASE_TYPE,
    SELF_TYPE_CASE,
    UNDEFINED_NEW_TYPE,
    UNDEFINED_STATIC_DISPATCH_TYPE,
    STATIC_DISPATCH_SELF_TYPE,
    UNDEFINED_METHOD,
    ASSIGN_MISMATCH,
    NON_INT_ARGUMENTS,
    NEG_NOT_INT,
    NOT_NOT_BOOL,
    ILLEGAL_BASIC_COMPARISON,
    IF_PREDICATE_NOT_BOOL,
    LOOP_CONDITION_NOT_BOOL,
    LET_INIT_MISMATCH,
    DUPLICATE_CASE_BRANCH,
    CASE_BRANCH_UNRELATED,
    WRONG_ARGUMENT_COUNT,
    ARGUMENT_MISMATCH,
    STATIC_DISPATCH_MISMATCH,
    RETURN_MISMATCH,
    ATTRIBUTE_INIT_MISMATCH,
    EXPRESSION_TOO_DEEP,
    EMPTY_CASE,
);

/// Look up a diagnostic message definition by code.
///
/// The internal-error code is not listed; it has no user-facing template.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
