//! Hygienic α-renamer `R: Expr → Expr` (spec §4.4).
//!
//! A tree-rebuilding traversal carrying an immutable name map
//! `original → fresh`. At each binder (`Let`, `Fn`, `Fun`) a fresh name is
//! minted by appending a monotonic counter — grounded on
//! `original_source/Vpl14/Visitor.py`'s `RenameVisitor` (`self._counter`,
//! `f"{base}_{self._counter}"`) — and the map is extended for the
//! traversal into the binder's body. `Let`'s definition is traversed under
//! the *outer* map (the binder is not yet in scope in its own
//! definition); `Fun` binds its own name before descending into its body,
//! so recursive calls resolve to the fresh name (spec §4.4).
//!
//! The teacher mutates the AST node in place (`exp.identifier = newId`);
//! this port instead consumes the tree and rebuilds it, since the AST's
//! fields sit behind pattern-matched enum variants rather than mutable
//! struct fields — same traversal shape, idiomatic ownership.

use mlc_par::Expr;
use rustc_hash::FxHashMap;

type Env = FxHashMap<String, String>;

/// Generates `base_0`, `base_1`, … on each call, one counter shared across
/// an entire renaming pass.
pub struct Renamer {
    counter: u32,
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renamer {
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    fn fresh(&mut self, base: &str) -> String {
        let name = format!("{base}_{}", self.counter);
        self.counter += 1;
        name
    }

    /// Rename every binder in `expr` to a globally unique name.
    pub fn rename(&mut self, expr: Expr) -> Expr {
        self.rename_with(expr, &Env::default())
    }

    fn rename_with(&mut self, expr: Expr, env: &Env) -> Expr {
        match expr {
            Expr::Num(..) | Expr::Bln(..) => expr,
            Expr::Var(name, span) => match env.get(&name) {
                Some(fresh) => Expr::Var(fresh.clone(), span),
                None => Expr::Var(name, span),
            },
            Expr::Add(a, b, s) => {
                Expr::Add(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Sub(a, b, s) => {
                Expr::Sub(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Mul(a, b, s) => {
                Expr::Mul(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Div(a, b, s) => {
                Expr::Div(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Mod(a, b, s) => {
                Expr::Mod(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Eql(a, b, s) => {
                Expr::Eql(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Leq(a, b, s) => {
                Expr::Leq(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Lth(a, b, s) => {
                Expr::Lth(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::And(a, b, s) => {
                Expr::And(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Or(a, b, s) => Expr::Or(self.rename_box(a, env), self.rename_box(b, env), s),
            Expr::App(a, b, s) => {
                Expr::App(self.rename_box(a, env), self.rename_box(b, env), s)
            }
            Expr::Neg(e, s) => Expr::Neg(self.rename_box(e, env), s),
            Expr::Not(e, s) => Expr::Not(self.rename_box(e, env), s),
            Expr::IfThenElse(c, t, e, s) => Expr::IfThenElse(
                self.rename_box(c, env),
                self.rename_box(t, env),
                self.rename_box(e, env),
                s,
            ),
            Expr::Let(name, ty, def, body, s) => {
                let def = self.rename_box(def, env);
                let fresh = self.fresh(&name);
                let mut inner = env.clone();
                inner.insert(name, fresh.clone());
                let body = self.rename_box(body, &inner);
                Expr::Let(fresh, ty, def, body, s)
            }
            Expr::Fn(formal, ty, body, s) => {
                let fresh = self.fresh(&formal);
                let mut inner = env.clone();
                inner.insert(formal, fresh.clone());
                let body = self.rename_box(body, &inner);
                Expr::Fn(fresh, ty, body, s)
            }
            Expr::Fun(fname, formal, body, s) => {
                let fresh_fname = self.fresh(&fname);
                let fresh_formal = self.fresh(&formal);
                let mut inner = env.clone();
                inner.insert(fname, fresh_fname.clone());
                inner.insert(formal, fresh_formal.clone());
                let body = self.rename_box(body, &inner);
                Expr::Fun(fresh_fname, fresh_formal, body, s)
            }
        }
    }

    // Every call site already holds a `Box<Expr>` (the AST's own boxed
    // fields); taking it by value here just shuffles the existing box
    // rather than allocating an avoidable one.
    #[allow(clippy::boxed_local)]
    fn rename_box(&mut self, expr: Box<Expr>, env: &Env) -> Box<Expr> {
        Box::new(self.rename_with(*expr, env))
    }
}

/// Rename every binder in `expr` to a globally unique name (spec §4.4).
pub fn rename(expr: Expr) -> Expr {
    Renamer::new().rename(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_lex::Lexer;
    use mlc_par::Parser;
    use std::collections::HashSet;

    fn parse(src: &str) -> Expr {
        let tokens = Lexer::new(src).tokenize().unwrap();
        Parser::new(tokens).parse().unwrap()
    }

    /// Collects every name introduced at a binder (`Let`/`Fn`/`Fun`), in
    /// traversal order.
    fn binder_names(expr: &Expr) -> Vec<String> {
        let mut names = Vec::new();
        fn walk(expr: &Expr, names: &mut Vec<String>) {
            match expr {
                Expr::Num(..) | Expr::Bln(..) | Expr::Var(..) => {}
                Expr::Add(a, b, _)
                | Expr::Sub(a, b, _)
                | Expr::Mul(a, b, _)
                | Expr::Div(a, b, _)
                | Expr::Mod(a, b, _)
                | Expr::Eql(a, b, _)
                | Expr::Leq(a, b, _)
                | Expr::Lth(a, b, _)
                | Expr::And(a, b, _)
                | Expr::Or(a, b, _)
                | Expr::App(a, b, _) => {
                    walk(a, names);
                    walk(b, names);
                }
                Expr::Neg(e, _) | Expr::Not(e, _) => walk(e, names),
                Expr::IfThenElse(c, t, e, _) => {
                    walk(c, names);
                    walk(t, names);
                    walk(e, names);
                }
                Expr::Let(name, _, def, body, _) => {
                    names.push(name.clone());
                    walk(def, names);
                    walk(body, names);
                }
                Expr::Fn(formal, _, body, _) => {
                    names.push(formal.clone());
                    walk(body, names);
                }
                Expr::Fun(fname, formal, body, _) => {
                    names.push(fname.clone());
                    names.push(formal.clone());
                    walk(body, names);
                }
            }
        }
        walk(expr, &mut names);
        names
    }

    fn contains_var(expr: &Expr, name: &str) -> bool {
        match expr {
            Expr::Var(n, _) => n == name,
            Expr::Num(..) | Expr::Bln(..) => false,
            Expr::Add(a, b, _)
            | Expr::Sub(a, b, _)
            | Expr::Mul(a, b, _)
            | Expr::Div(a, b, _)
            | Expr::Mod(a, b, _)
            | Expr::Eql(a, b, _)
            | Expr::Leq(a, b, _)
            | Expr::Lth(a, b, _)
            | Expr::And(a, b, _)
            | Expr::Or(a, b, _)
            | Expr::App(a, b, _) => contains_var(a, name) || contains_var(b, name),
            Expr::Neg(e, _) | Expr::Not(e, _) => contains_var(e, name),
            Expr::IfThenElse(c, t, e, _) => {
                contains_var(c, name) || contains_var(t, name) || contains_var(e, name)
            }
            Expr::Let(_, _, def, body, _) => contains_var(def, name) || contains_var(body, name),
            Expr::Fn(_, _, body, _) => contains_var(body, name),
            Expr::Fun(_, _, body, _) => contains_var(body, name),
        }
    }

    #[test]
    fn every_binder_gets_a_unique_name() {
        let scenarios = [
            "1 * 2 - 3",
            "let v : int <- 21 in v + v end",
            "if 2 < 3 then 1 else 2 end",
            "(fn v : int => v + 1) 2",
            "let f : int -> int <- (fn x : int => x * x) in f (f 3) end",
            "let rec f x <- if x < 2 then 1 else x * f (x - 1) end in f 5 end",
        ];
        for src in scenarios {
            let renamed = rename(parse(src));
            let names = binder_names(&renamed);
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(
                names.len(),
                unique.len(),
                "duplicate binder name after renaming {src:?}: {names:?}"
            );
        }
    }

    #[test]
    fn shadowed_names_get_distinct_fresh_names() {
        let renamed = rename(parse("let v <- 1 in let v <- 2 in v end end"));
        let names = binder_names(&renamed);
        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
    }

    #[test]
    fn free_variable_is_left_unrenamed() {
        let renamed = rename(parse("x + 1"));
        match renamed {
            Expr::Add(lhs, _, _) => assert!(matches!(*lhs, Expr::Var(ref n, _) if n == "x")),
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn bound_use_is_rewritten_to_the_fresh_binder_name() {
        let renamed = rename(parse("let v <- 1 in v end"));
        match renamed {
            Expr::Let(fresh, _, _, body, _) => match *body {
                Expr::Var(used, _) => assert_eq!(used, fresh),
                other => panic!("expected Var body, got {other:?}"),
            },
            other => panic!("expected Let, got {other:?}"),
        }
    }

    #[test]
    fn recursive_function_binds_its_own_name_before_the_body() {
        let renamed = rename(parse(
            "let rec f x <- if x < 2 then 1 else x * f (x - 1) end in f 5 end",
        ));
        match renamed {
            Expr::Let(_, _, def, _, _) => match *def {
                Expr::Fun(fresh_fname, _, body, _) => {
                    assert!(contains_var(&body, &fresh_fname));
                }
                other => panic!("expected Fun, got {other:?}"),
            },
            other => panic!("expected Let, got {other:?}"),
        }
    }
}
