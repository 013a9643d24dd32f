//! Bounded language enumeration for equivalence testing.
//!
//! Different elimination orders legitimately produce differently-shaped
//! expressions for the same graph, so tests over cyclic graphs compare
//! languages instead of strings: every word up to a length bound from the
//! solved expression must match a walk of the original automaton, and vice
//! versa.

use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexMap;
use propath_core::{Expr, TypeId};

use crate::automaton::Graph;

/// A word over the label alphabet.
pub type Word = Vec<String>;

/// All words of `expr`'s language with at most `max_len` labels.
pub fn language_of(expr: &Expr, max_len: usize) -> BTreeSet<Word> {
    match expr {
        Expr::Empty => BTreeSet::new(),
        Expr::Epsilon => BTreeSet::from([vec![]]),
        Expr::Symbol(label) => {
            if max_len >= 1 {
                BTreeSet::from([vec![label.clone()]])
            } else {
                BTreeSet::new()
            }
        }
        Expr::Union(branches) => branches
            .iter()
            .flat_map(|branch| language_of(branch, max_len))
            .collect(),
        Expr::Concat(factors) => {
            let mut acc = BTreeSet::from([vec![]]);
            for factor in factors {
                let mut next = BTreeSet::new();
                for prefix in &acc {
                    for word in language_of(factor, max_len - prefix.len()) {
                        let mut combined = prefix.clone();
                        combined.extend(word);
                        next.insert(combined);
                    }
                }
                acc = next;
                if acc.is_empty() {
                    break;
                }
            }
            acc
        }
        Expr::Star(operand) => {
            let mut acc = BTreeSet::from([vec![]]);
            loop {
                let mut grew = false;
                for prefix in acc.clone() {
                    for word in language_of(operand, max_len - prefix.len()) {
                        if word.is_empty() {
                            continue;
                        }
                        let mut combined = prefix.clone();
                        combined.extend(word);
                        if acc.insert(combined) {
                            grew = true;
                        }
                    }
                }
                if !grew {
                    break acc;
                }
            }
        }
    }
}

/// All label sequences of length ≤ `max_len` along walks from the start
/// state to `finish`.
pub fn walk(graph: &Graph, finish: TypeId, max_len: usize) -> BTreeSet<Word> {
    let mut outgoing: IndexMap<TypeId, Vec<(String, TypeId)>> = IndexMap::new();
    for edge in graph.edges() {
        outgoing
            .entry(edge.source)
            .or_default()
            .push((edge.label.clone(), edge.target));
    }

    let start = graph.start().expect("walk requires a start state");
    let mut words = BTreeSet::new();
    let mut queue: VecDeque<(TypeId, Word)> = VecDeque::from([(start, vec![])]);

    while let Some((state, word)) = queue.pop_front() {
        if state == finish {
            words.insert(word.clone());
        }
        if word.len() == max_len {
            continue;
        }
        if let Some(successors) = outgoing.get(&state) {
            for (label, target) in successors {
                let mut next = word.clone();
                next.push(label.clone());
                queue.push_back((*target, next));
            }
        }
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Expr {
        Expr::symbol(s)
    }

    fn word(labels: &[&str]) -> Word {
        labels.iter().map(|l| (*l).to_owned()).collect()
    }

    #[test]
    fn star_language_is_bounded_powers() {
        let lang = language_of(&Expr::star(sym("a")), 3);
        let expected: BTreeSet<Word> = [
            word(&[]),
            word(&["a"]),
            word(&["a", "a"]),
            word(&["a", "a", "a"]),
        ]
        .into();
        assert_eq!(lang, expected);
    }

    #[test]
    fn concat_respects_budget() {
        let e = Expr::concat([sym("a"), sym("b")]);
        assert_eq!(language_of(&e, 1), BTreeSet::new());
        assert_eq!(language_of(&e, 2), BTreeSet::from([word(&["a", "b"])]));
    }

    #[test]
    fn walk_matches_simple_chain() {
        let a = TypeId::from_raw(0);
        let b = TypeId::from_raw(1);
        let mut graph = Graph::new();
        graph.add_edge("x", a, b).unwrap();
        graph.set_start(a);

        assert_eq!(walk(&graph, b, 2), BTreeSet::from([word(&["x"])]));
        assert_eq!(walk(&graph, a, 2), BTreeSet::from([word(&[])]));
    }
}
