//! Error taxonomy for every stage of the core pipeline.
//!
//! Each subsystem gets its own [`thiserror::Error`] enum so callers can match
//! on exactly what failed; [`TinyBfError`] unifies them for callers who just
//! want one `Result` type across `transpile`/`run`/`step`.

/// Failures detected while turning source text into a token/statement stream.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// The first token on a line did not match any known statement form.
    #[error("line {line}: unknown statement keyword '{keyword}'")]
    UnknownKeyword { line: usize, keyword: String },

    /// A recognized keyword was followed by the wrong shape of tokens.
    #[error("line {line}: {detail}")]
    MalformedStatement { line: usize, detail: String },

    /// A numeric literal fell outside `0..=255`.
    #[error("line {line}: numeric literal {value} is out of range (0..=255)")]
    LiteralOutOfRange { line: usize, value: i64 },

    /// `''` with no content between the quotes.
    #[error("line {line}: empty character literal")]
    EmptyCharLiteral { line: usize },

    /// A `\x` escape that isn't one of the fixed set the language supports.
    #[error("line {line}: unknown escape sequence '\\{escape}'")]
    UnknownEscape { line: usize, escape: char },

    /// An `if`/`else`/`for` block was opened but never closed with `}`.
    #[error("line {line}: missing closing '}}'")]
    MissingClosingBrace { line: usize },

    /// `else` appeared without a preceding `if` block to attach to.
    #[error("line {line}: 'else' without a matching 'if'")]
    DanglingElse { line: usize },

    /// A stray `}` with no open block to close.
    #[error("line {line}: extra closing '}}'")]
    ExtraClosingBrace { line: usize },
}

/// Failures detected while lowering a parsed AST to Brainfuck.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum SemanticError {
    /// A variable was read or assigned before any `let` declared it.
    #[error("undeclared variable '{name}'")]
    Undeclared { name: String },

    /// `let` re-declared an existing variable with a different `VarType`.
    #[error("variable '{name}' was already declared with a different type")]
    TypeConflict { name: String },

    /// An operator required one `VarType` but the variable holds another.
    #[error("'{name}' must be '{expected}' for this operation, but is '{found}'")]
    WrongOperandType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A statement's shape demanded an operand that wasn't supplied.
    #[error("statement is missing a required operand")]
    MissingOperand,
}

/// Bracket mismatch discovered by the interpreter's preflight scan.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("unmatched brackets in program")]
pub struct UnbalancedBrackets;

/// The data pointer tried to move outside `[0, 30000)`.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("pointer moved outside the tape bounds [0, 30000)")]
pub struct PointerOutOfRange;

/// The interpreter's step budget was exhausted before the program halted.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("step limit of {limit} exceeded")]
pub struct StepLimitExceeded {
    pub limit: u64,
}

/// Failures that can occur while executing or stepping a Brainfuck program.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum InterpreterError {
    #[error(transparent)]
    UnbalancedBrackets(#[from] UnbalancedBrackets),
    #[error(transparent)]
    PointerOutOfRange(#[from] PointerOutOfRange),
    #[error(transparent)]
    StepLimitExceeded(#[from] StepLimitExceeded),
}

/// Umbrella error covering every stage of `transpile` → `run`/`step`.
#[derive(Debug, thiserror::Error, Clone)]
pub enum TinyBfError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}

impl From<UnbalancedBrackets> for TinyBfError {
    fn from(err: UnbalancedBrackets) -> Self {
        TinyBfError::Interpreter(InterpreterError::UnbalancedBrackets(err))
    }
}

impl From<PointerOutOfRange> for TinyBfError {
    fn from(err: PointerOutOfRange) -> Self {
        TinyBfError::Interpreter(InterpreterError::PointerOutOfRange(err))
    }
}

impl From<StepLimitExceeded> for TinyBfError {
    fn from(err: StepLimitExceeded) -> Self {
        TinyBfError::Interpreter(InterpreterError::StepLimitExceeded(err))
    }
}
