//! Regular-expression algebra over association labels.
//!
//! `Expr` is the closed algebraic form: it never references an automaton
//! state. The constructors simplify on construction so intermediate results
//! stay normalized throughout elimination:
//!
//! - `ε · x = x`, `∅ · x = ∅`
//! - `∅ ∪ x = x`
//! - `(ε)* = ε`, `(∅)* = ε`, `(x*)* = x*`
//! - nested `concat`/`union` flatten; duplicate union branches collapse

/// A closed regular expression over association labels.
///
/// Invariants upheld by the constructors:
/// - `Concat` and `Union` hold at least two operands
/// - `Concat` holds no `Epsilon` or `Empty`, and no nested `Concat`
/// - `Union` holds no `Empty`, no nested `Union`, and no duplicates
/// - `Star` never wraps `Epsilon`, `Empty`, or another `Star`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A single association label, used verbatim in rendered paths.
    Symbol(String),
    /// The empty word.
    Epsilon,
    /// The empty language: no path exists.
    Empty,
    /// Juxtaposition of factors.
    Concat(Vec<Expr>),
    /// Alternation of branches.
    Union(Vec<Expr>),
    /// Kleene closure.
    Star(Box<Expr>),
}

impl Expr {
    /// A single-label expression.
    pub fn symbol(label: impl Into<String>) -> Self {
        Expr::Symbol(label.into())
    }

    /// Concatenation with epsilon identity and empty annihilation.
    pub fn concat(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut out = Vec::new();
        for factor in factors {
            match factor {
                Expr::Epsilon => {}
                Expr::Empty => return Expr::Empty,
                Expr::Concat(inner) => out.extend(inner),
                other => out.push(other),
            }
        }
        match out.len() {
            0 => Expr::Epsilon,
            1 => out.pop().unwrap(),
            _ => Expr::Concat(out),
        }
    }

    /// Union with empty identity, flattening, and duplicate removal.
    ///
    /// Branch order is preserved, so a fixed construction order yields a
    /// fixed expression shape.
    pub fn union(branches: impl IntoIterator<Item = Expr>) -> Self {
        let mut out: Vec<Expr> = Vec::new();
        for branch in branches {
            match branch {
                Expr::Empty => {}
                Expr::Union(inner) => {
                    for b in inner {
                        if !out.contains(&b) {
                            out.push(b);
                        }
                    }
                }
                other => {
                    if !out.contains(&other) {
                        out.push(other);
                    }
                }
            }
        }
        match out.len() {
            0 => Expr::Empty,
            1 => out.pop().unwrap(),
            _ => Expr::Union(out),
        }
    }

    /// Kleene closure. `(ε)*` and `(∅)*` collapse to `ε`, `(x*)*` to `x*`.
    pub fn star(operand: Expr) -> Self {
        match operand {
            Expr::Epsilon | Expr::Empty => Expr::Epsilon,
            star @ Expr::Star(_) => star,
            other => Expr::Star(Box::new(other)),
        }
    }

    /// `self` followed by `other`.
    pub fn then(self, other: Expr) -> Expr {
        Expr::concat([self, other])
    }

    /// `self` or `other`.
    pub fn or(self, other: Expr) -> Expr {
        Expr::union([self, other])
    }

    /// Whether this is the empty language.
    #[must_use]
    pub fn is_empty_language(&self) -> bool {
        matches!(self, Expr::Empty)
    }

    /// Whether this is exactly the empty word.
    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Expr::Epsilon)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::render(self))
    }
}
