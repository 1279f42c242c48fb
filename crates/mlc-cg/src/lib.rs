//! Code generator targeting the abstract machine of `mlc-vm` (spec §4.5).
//!
//! Each recursive call lowers a subexpression and returns the **symbolic
//! register** holding its value, matching spec's per-node lowering table
//! and its branch-patching discipline (`Program::patch_target`, called
//! right after the target block is emitted). `fresh_reg()` mints
//! `tmp0, tmp1, …`, disjoint from every renamed source identifier (which
//! always carries a `_N` suffix — see `mlc-rn`).
//!
//! **Calling convention for named closures.** `Var x` returning its
//! register directly, unchanged (spec: "renamer guarantees it is
//! unique"), means every closure's formal parameter already has a
//! globally unique name by the time code generation runs — there is only
//! one compiled copy of any given `Fn`/`Fun` body's instructions, reused
//! at every call site. Spec's literal per-node table describes the
//! application of a *named* closure as a deep-copy-and-rename-and-inline
//! operation; this generator instead compiles the body **once** as a
//! reusable subroutine and calls it via `jal`/`jalr`, following the
//! `sp`-based stack spec §4.6 already sets up ("`sp := |memory|`...stack
//! grows toward 0"), which only makes sense if calls use a real return
//! stack. This resolves spec §9's open "recursive functions" question in
//! favor of runtime dispatch over unbounded compile-time inlining: a
//! `Fun`'s body can call itself, and naively re-inlining at every
//! recursive occurrence does not terminate at compile time in general,
//! whereas textual inlining the literal-`Fn`-applied-at-its-own-call-site
//! case (spec's other bullet) is still done directly, since an anonymous
//! lambda has no name to recurse with and is applied exactly once at the
//! textual site it appears. See DESIGN.md for the full resolution.
//!
//! Because the renamer already makes every formal globally unique before
//! this stage runs, literal-`Fn` inlining needs no deep-copy-and-rename
//! step either (spec's literal text): binding the formal to the
//! argument's register via a plain copy instruction is sufficient, the
//! same way `Let` binds any other name.
//!
//! **Operand spilling across calls.** Every invocation of a given closure
//! reuses the same physical registers (there is only one compiled copy of
//! its body), so a left operand still needed after evaluating a right
//! operand that may recurse cannot simply be copied into another
//! register — a deeper recursive call would clobber the copy too.
//! `lower_pair` instead spills the left operand to the `sp`-indexed stack
//! before lowering the right operand and reloads it after; because the
//! push/pop is itself properly nested at every call depth, this survives
//! arbitrarily deep recursion.
//!
//! **Scope.** Every one of spec §8's six end-to-end scenarios applies a
//! function either as a literal `Fn` at its call site or as a `Var`
//! naming a `Let`/`Fun`-bound closure — the two cases this generator
//! handles. A closure flowing through `if`/`let` as an unresolved runtime
//! value (e.g. `let f <- if c then (fn x => x) else (fn y => y+1) in ...`)
//! is out of scope: VPL 14 itself only inlines literal lambdas and
//! otherwise relies on a side channel (spec §9), so full first-class
//! closures were never part of the source system being modeled here.

use mlc_par::Expr;
use mlc_util::Symbol;
use mlc_vm::instruction::Instruction;
use mlc_vm::interpreter::{sp, x0};
use mlc_vm::program::Program;
use rustc_hash::FxHashMap;

/// Where a `Let`-bound `Fn`/`Fun` was compiled to, and the registers
/// reserved for calling it.
#[derive(Clone, Copy, Debug)]
struct ClosureInfo {
    formal: Symbol,
    entry: usize,
    /// Return-address register, unique per closure, saved/restored around
    /// each call so reentrant (recursive) calls don't clobber it.
    ra: Symbol,
    /// Register the subroutine leaves its result in before returning.
    ret: Symbol,
}

pub struct CodeGen {
    program: Program,
    next_tmp: u32,
    closures: FxHashMap<Symbol, ClosureInfo>,
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen {
    pub fn new() -> Self {
        Self {
            program: Program::new(),
            next_tmp: 0,
            closures: FxHashMap::default(),
        }
    }

    fn fresh_reg(&mut self) -> Symbol {
        let name = format!("tmp{}", self.next_tmp);
        self.next_tmp += 1;
        Symbol::intern(&name)
    }

    /// Lower `expr` into the program, appending instructions, and return
    /// the register holding its final value.
    pub fn lower(&mut self, expr: &Expr) -> Symbol {
        match expr {
            Expr::Num(n, _) => {
                let t = self.fresh_reg();
                self.emit(Instruction::Addi { rd: t, rs1: x0(), imm: *n });
                t
            }
            Expr::Bln(b, _) => {
                let t = self.fresh_reg();
                self.emit(Instruction::Addi { rd: t, rs1: x0(), imm: *b as i64 });
                t
            }
            Expr::Var(name, _) => Symbol::intern(name),

            Expr::Add(a, b, _) => self.binop(a, b, |rd, rs1, rs2| Instruction::Add { rd, rs1, rs2 }),
            Expr::Sub(a, b, _) => self.binop(a, b, |rd, rs1, rs2| Instruction::Sub { rd, rs1, rs2 }),
            Expr::Mul(a, b, _) => self.binop(a, b, |rd, rs1, rs2| Instruction::Mul { rd, rs1, rs2 }),
            Expr::Div(a, b, _) => self.binop(a, b, |rd, rs1, rs2| Instruction::Div { rd, rs1, rs2 }),
            Expr::Mod(a, b, _) => self.lower_mod(a, b),

            Expr::Lth(a, b, _) => self.binop(a, b, |rd, rs1, rs2| Instruction::Slt { rd, rs1, rs2 }),
            Expr::Leq(a, b, _) => {
                // a <= b  ==  not (b < a)
                let (a_reg, b_reg) = self.lower_pair(a, b);
                let u = self.fresh_reg();
                self.emit(Instruction::Slt { rd: u, rs1: b_reg, rs2: a_reg });
                let t = self.fresh_reg();
                self.emit(Instruction::Xori { rd: t, rs1: u, imm: 1 });
                t
            }
            Expr::Eql(a, b, _) => {
                let (a_reg, b_reg) = self.lower_pair(a, b);
                self.lower_zero_test(a_reg, b_reg)
            }
            Expr::Neg(e, _) => {
                let e_reg = self.lower(e);
                let t = self.fresh_reg();
                self.emit(Instruction::Sub { rd: t, rs1: x0(), rs2: e_reg });
                t
            }
            Expr::Not(e, _) => {
                let e_reg = self.lower(e);
                self.lower_zero_test(e_reg, x0())
            }

            Expr::And(a, b, _) => self.lower_and_or(a, b, true),
            Expr::Or(a, b, _) => self.lower_and_or(a, b, false),

            Expr::IfThenElse(c, t, e, _) => self.lower_if(c, t, e),

            Expr::Let(name, _, def, body, _) => self.lower_let(name, def, body),

            // A bare Fn/Fun reachable only via App's function position or
            // a Let's definition — both handled specially above/below.
            Expr::Fn(..) | Expr::Fun(..) => {
                unreachable!("a bare Fn/Fun outside of App or Let position reached lower()")
            }

            Expr::App(f, a, _) => self.lower_app(f, a),
        }
    }

    fn emit(&mut self, instr: Instruction) -> usize {
        self.program.push(instr)
    }

    /// Lowers `a` then `b`, defensively spilling `a`'s value to the stack
    /// first. A register-only copy is not enough: `b` may contain a
    /// (possibly recursive) call, and every invocation of a given closure
    /// reuses the *same* physical registers, so a recursive call several
    /// levels deep would clobber a plain register copy made at a shallower
    /// level. Spilling through memory, balanced push/pop around `b`,
    /// survives any depth of nested calls because each level's own
    /// save/restore is itself properly nested on the same stack.
    fn lower_pair(&mut self, a: &Expr, b: &Expr) -> (Symbol, Symbol) {
        let a_reg = self.lower(a);
        let sp_reg = sp();
        self.emit(Instruction::Addi { rd: sp_reg, rs1: sp_reg, imm: -1 });
        self.emit(Instruction::Sw { reg: a_reg, rs1: sp_reg, offset: 0 });
        let b_reg = self.lower(b);
        let saved = self.fresh_reg();
        self.emit(Instruction::Lw { reg: saved, rs1: sp_reg, offset: 0 });
        self.emit(Instruction::Addi { rd: sp_reg, rs1: sp_reg, imm: 1 });
        (saved, b_reg)
    }

    fn binop(
        &mut self,
        a: &Expr,
        b: &Expr,
        ctor: fn(Symbol, Symbol, Symbol) -> Instruction,
    ) -> Symbol {
        let (a_reg, b_reg) = self.lower_pair(a, b);
        let dest = self.fresh_reg();
        self.emit(ctor(dest, a_reg, b_reg));
        dest
    }

    /// `a mod b` via `a - floor_div(a, b) * b`; the ISA has no dedicated
    /// remainder opcode (spec §4.6's 14 opcodes), so it's synthesized
    /// from `div`/`mul`/`sub`.
    fn lower_mod(&mut self, a: &Expr, b: &Expr) -> Symbol {
        let (a_reg, b_reg) = self.lower_pair(a, b);
        let q = self.fresh_reg();
        self.emit(Instruction::Div { rd: q, rs1: a_reg, rs2: b_reg });
        let qb = self.fresh_reg();
        self.emit(Instruction::Mul { rd: qb, rs1: q, rs2: b_reg });
        let dest = self.fresh_reg();
        self.emit(Instruction::Sub { rd: dest, rs1: a_reg, rs2: qb });
        dest
    }

    /// `1` exactly when `a_reg == b_reg` (spec's `Eql`/`Not` pattern:
    /// `sub d, a, b; slti x, d, 1; slti y, d, 0; xor t, x, y`).
    fn lower_zero_test(&mut self, a_reg: Symbol, b_reg: Symbol) -> Symbol {
        let d = self.fresh_reg();
        self.emit(Instruction::Sub { rd: d, rs1: a_reg, rs2: b_reg });
        let x = self.fresh_reg();
        self.emit(Instruction::Slti { rd: x, rs1: d, imm: 1 });
        let y = self.fresh_reg();
        self.emit(Instruction::Slti { rd: y, rs1: d, imm: 0 });
        let t = self.fresh_reg();
        self.emit(Instruction::Xor { rd: t, rs1: x, rs2: y });
        t
    }

    /// Short-circuit `and`/`or` via branch (spec §4.5): `b` is only
    /// evaluated when it can affect the result.
    fn lower_and_or(&mut self, a: &Expr, b: &Expr, is_and: bool) -> Symbol {
        let a_reg = self.lower(a);
        let dest = self.fresh_reg();
        let branch = self.emit(Instruction::Beq { rs1: a_reg, rs2: x0(), target: 0 });
        if is_and {
            let b_reg = self.lower(b);
            self.emit(Instruction::Addi { rd: dest, rs1: b_reg, imm: 0 });
            let jump = self.emit(Instruction::Jal { rd: x0(), target: 0 });
            let else_start = self.program.next_index();
            self.program.patch_target(branch, else_start);
            self.emit(Instruction::Addi { rd: dest, rs1: x0(), imm: 0 });
            let end = self.program.next_index();
            self.program.patch_target(jump, end);
        } else {
            self.emit(Instruction::Addi { rd: dest, rs1: x0(), imm: 1 });
            let jump = self.emit(Instruction::Jal { rd: x0(), target: 0 });
            let right_start = self.program.next_index();
            self.program.patch_target(branch, right_start);
            let b_reg = self.lower(b);
            self.emit(Instruction::Addi { rd: dest, rs1: b_reg, imm: 0 });
            let end = self.program.next_index();
            self.program.patch_target(jump, end);
        }
        dest
    }

    fn lower_if(&mut self, c: &Expr, t: &Expr, e: &Expr) -> Symbol {
        let c_reg = self.lower(c);
        let dest = self.fresh_reg();
        let branch = self.emit(Instruction::Beq { rs1: c_reg, rs2: x0(), target: 0 });
        let then_reg = self.lower(t);
        self.emit(Instruction::Addi { rd: dest, rs1: then_reg, imm: 0 });
        let jump = self.emit(Instruction::Jal { rd: x0(), target: 0 });
        let else_start = self.program.next_index();
        self.program.patch_target(branch, else_start);
        let else_reg = self.lower(e);
        self.emit(Instruction::Addi { rd: dest, rs1: else_reg, imm: 0 });
        let end = self.program.next_index();
        self.program.patch_target(jump, end);
        dest
    }

    fn lower_let(&mut self, name: &str, def: &Expr, body: &Expr) -> Symbol {
        match def {
            Expr::Fn(formal, _, fbody, _) => {
                self.compile_closure(Symbol::intern(name), Symbol::intern(formal), fbody);
            }
            // A `Fun`'s own self-name is renamed independently of the
            // enclosing `Let`'s name (see mlc-rn): recursive calls inside
            // `fbody` resolve to `fname`, while call sites outside the
            // `Let` resolve to `name`. Register the closure under both.
            Expr::Fun(fname, formal, fbody, _) => {
                let info = self.compile_closure(Symbol::intern(fname), Symbol::intern(formal), fbody);
                self.closures.insert(Symbol::intern(name), info);
            }
            _ => {
                let def_reg = self.lower(def);
                self.emit(Instruction::Addi { rd: Symbol::intern(name), rs1: def_reg, imm: 0 });
            }
        }
        self.lower(body)
    }

    /// Compile `body` once as a reusable subroutine reached by `jal`,
    /// guarded by a leading unconditional jump so straight-line execution
    /// doesn't fall into it. Registered under `name` *before* lowering
    /// the body so a `Fun`'s recursive call to itself resolves.
    fn compile_closure(&mut self, name: Symbol, formal: Symbol, body: &Expr) -> ClosureInfo {
        let ra = Symbol::intern(&format!("{name}_ra"));
        let ret = Symbol::intern(&format!("{name}_ret"));
        let skip = self.emit(Instruction::Jal { rd: x0(), target: 0 });
        let entry = self.program.next_index();
        let info = ClosureInfo { formal, entry, ra, ret };
        self.closures.insert(name, info);

        let body_reg = self.lower(body);
        self.emit(Instruction::Addi { rd: ret, rs1: body_reg, imm: 0 });
        self.emit(Instruction::Jalr { rd: x0(), rs1: ra, offset: 0 });

        let after = self.program.next_index();
        self.program.patch_target(skip, after);
        // Seed `ra` so the very first call's save-to-stack reads a defined
        // register rather than failing with `UndefinedRegister`.
        self.emit(Instruction::Addi { rd: ra, rs1: x0(), imm: 0 });
        info
    }

    fn lower_app(&mut self, f: &Expr, a: &Expr) -> Symbol {
        match f {
            // An anonymous lambda applied at its own call site: the
            // renamer already made `formal` globally unique, so binding
            // it to the argument's register and lowering the body
            // in place is sound without any deep-copy/re-rename step.
            Expr::Fn(formal, _, fbody, _) => {
                let arg_reg = self.lower(a);
                self.emit(Instruction::Addi { rd: Symbol::intern(formal), rs1: arg_reg, imm: 0 });
                self.lower(fbody)
            }
            Expr::Var(name, _) => {
                let sym = Symbol::intern(name);
                let info = *self
                    .closures
                    .get(&sym)
                    .unwrap_or_else(|| panic!("application target `{name}` is not a known closure"));
                self.lower_call(&info, a)
            }
            other => panic!("unsupported application target {other:?}"),
        }
    }

    /// Call a previously-compiled closure: save its return-address
    /// register on the stack (so a reentrant/recursive call doesn't
    /// clobber the caller's), bind the formal, jump in, then restore.
    fn lower_call(&mut self, info: &ClosureInfo, arg: &Expr) -> Symbol {
        let arg_reg = self.lower(arg);
        let sp_reg = sp();
        self.emit(Instruction::Addi { rd: sp_reg, rs1: sp_reg, imm: -1 });
        self.emit(Instruction::Sw { reg: info.ra, rs1: sp_reg, offset: 0 });
        self.emit(Instruction::Addi { rd: info.formal, rs1: arg_reg, imm: 0 });
        self.emit(Instruction::Jal { rd: info.ra, target: info.entry });
        self.emit(Instruction::Lw { reg: info.ra, rs1: sp_reg, offset: 0 });
        self.emit(Instruction::Addi { rd: sp_reg, rs1: sp_reg, imm: 1 });
        info.ret
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}

/// Lower a complete (type-checked, renamed) expression into a program and
/// the register holding its final result.
pub fn generate(expr: &Expr) -> (Program, Symbol) {
    let mut cg = CodeGen::new();
    let result = cg.lower(expr);
    (cg.into_program(), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_lex::Lexer;
    use mlc_par::Parser;
    use mlc_vm::{Interpreter, Value};

    fn run(src: &str) -> Value {
        let tokens = Lexer::new(src).tokenize().unwrap();
        let ast = Parser::new(tokens).parse().unwrap();
        mlc_sem::infer(&ast).unwrap();
        let renamed = mlc_rn::rename(ast);
        let (program, result_reg) = generate(&renamed);
        let mut vm = Interpreter::new(64);
        vm.run(&program).unwrap();
        vm.register(result_reg).unwrap()
    }

    #[test]
    fn scenario_1_arithmetic() {
        assert_eq!(run("1 * 2 - 3"), Value::Int(-1));
    }

    #[test]
    fn scenario_2_let_binding() {
        assert_eq!(run("let v : int <- 21 in v + v end"), Value::Int(42));
    }

    #[test]
    fn scenario_3_if_then_else() {
        assert_eq!(run("if 2 < 3 then 1 else 2 end"), Value::Int(1));
    }

    #[test]
    fn scenario_4_literal_fn_application() {
        assert_eq!(run("(fn v : int => v + 1) 2"), Value::Int(3));
    }

    #[test]
    fn scenario_5_named_closure_applied_twice() {
        assert_eq!(
            run("let f : int -> int <- (fn x : int => x * x) in f (f 3) end"),
            Value::Int(81)
        );
    }

    #[test]
    fn scenario_6_recursive_function() {
        assert_eq!(
            run("let rec f x <- if x < 2 then 1 else x * f (x - 1) end in f 5 end"),
            Value::Int(120)
        );
    }

    #[test]
    fn modulo_lowers_via_div_mul_sub() {
        assert_eq!(run("7 mod 2"), Value::Int(1));
        assert_eq!(run("~7 mod 2"), Value::Int(1)); // floor-mod, not truncating
    }

    #[test]
    fn and_short_circuits_without_evaluating_the_right_operand() {
        // If `and` didn't short-circuit, `1 / 0` would fail at runtime.
        // The VM itself is untyped: booleans are represented as 0/1.
        assert_eq!(run("false and (1 = (1 / 0))"), Value::Int(0));
    }

    #[test]
    fn or_short_circuits_without_evaluating_the_right_operand() {
        assert_eq!(run("true or (1 = (1 / 0))"), Value::Int(1));
    }

    #[test]
    fn equality_and_negation() {
        assert_eq!(run("(3 = 3)"), Value::Int(1));
        assert_eq!(run("not (3 = 4)"), Value::Int(1));
        assert_eq!(run("~3 + 4"), Value::Int(1));
    }

    #[test]
    fn leq_matches_not_greater_than() {
        assert_eq!(run("3 <= 3"), Value::Int(1));
        assert_eq!(run("4 <= 3"), Value::Int(0));
    }
}
