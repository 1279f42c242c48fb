//! The abstract RISC-style machine (spec §4.6): a flat, name-addressed
//! register file, fixed-size word memory, and a fetch-execute loop over a
//! monotonically-growing, branch-patched instruction stream. Grounded on
//! `original_source/Vpl14/Asm.py`'s opcode set and semantics, narrowed
//! from the teacher's GC-backed runtime (`faxc-runtime`, which targeted a
//! heap-allocating bytecode VM) down to this closed, non-allocating
//! instruction set — there is no garbage collector here (spec §9
//! Non-goals).

pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod program;
pub mod value;

pub use error::{RuntimeError, RuntimeResult};
pub use instruction::{InstrIdx, Instruction};
pub use interpreter::{sp, x0, Interpreter};
pub use program::Program;
pub use value::Value;
