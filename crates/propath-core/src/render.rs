//! Rendering closed expressions as property-path strings.
//!
//! Concatenation renders as juxtaposition, alternation as `(a|b)`, closure
//! as a trailing `*`. Labels are emitted verbatim, separator included, so
//! `"taskChildren."` stays `"taskChildren."` in the output.

use crate::expr::Expr;

/// Sentinel rendered for the empty language.
pub const NO_PATH: &str = "no path";

/// Render a closed expression to its path-string form.
pub fn render(expr: &Expr) -> String {
    if expr.is_empty_language() {
        return NO_PATH.to_owned();
    }
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

fn write_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Symbol(label) => out.push_str(label),
        Expr::Epsilon => {}
        // Constructors keep ∅ out of compound expressions; a nested one
        // would mean a broken invariant upstream.
        Expr::Empty => out.push_str(NO_PATH),
        Expr::Concat(factors) => {
            for factor in factors {
                write_expr(factor, out);
            }
        }
        Expr::Union(branches) => {
            out.push('(');
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                write_expr(branch, out);
            }
            out.push(')');
        }
        Expr::Star(operand) => {
            // Unions already carry parentheses and single symbols need
            // none; only multi-factor operands get wrapped.
            if matches!(**operand, Expr::Concat(_)) {
                out.push('(');
                write_expr(operand, out);
                out.push(')');
            } else {
                write_expr(operand, out);
            }
            out.push('*');
        }
    }
}
