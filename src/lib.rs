//! TinyBF: a small imperative language that transpiles to Brainfuck, plus a
//! Brainfuck interpreter and stepping debugger to run the result.
//!
//! The pipeline is `source text -> Parser -> Generator -> peephole::optimize
//! -> Brainfuck text`, after which [`run`] executes it directly or [`step`]
//! / [`DebugSession`] walk it one instruction at a time.
//!
//! ```
//! let code = tinybf::transpile("let num x = 3\nadd x 2\nprint_dec x").unwrap();
//! let output = tinybf::run(&code, "", None).unwrap();
//! assert_eq!(output, "5");
//! ```

mod ast;
mod codegen;
mod debug;
mod error;
mod interpreter;
mod lexer;
mod parser;
mod peephole;

pub use ast::{Expr, Statement, VarType};
pub use debug::DebugSession;
pub use error::{InterpreterError, ParseError, SemanticError, TinyBfError, UnbalancedBrackets};
pub use error::{PointerOutOfRange, StepLimitExceeded};
pub use interpreter::{run, step, Snapshot, Stepper, TAPE_LENGTH};

use codegen::Generator;
use parser::Parser;

/// Parse and lower TinyBF source into optimized Brainfuck text.
pub fn transpile(source: &str) -> Result<String, TinyBfError> {
    let program = Parser::new(source).parse()?;
    let mut generator = Generator::new();
    generator.lower_program(&program)?;
    Ok(peephole::optimize(&generator.into_code()))
}
