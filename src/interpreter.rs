//! A plain Brainfuck interpreter and a lazy, step-at-a-time variant used by
//! the debugger.

use crate::error::{InterpreterError, PointerOutOfRange, StepLimitExceeded};
use crate::peephole::build_jump_table;

pub const TAPE_LENGTH: usize = 30_000;

/// Run `code` to completion (or until `max_steps` is exhausted) and return
/// everything it printed.
pub fn run(code: &str, input: &str, max_steps: Option<u64>) -> Result<String, InterpreterError> {
    let bytes = code.as_bytes();
    let jump_table = build_jump_table(bytes)?;
    let input_bytes = input.as_bytes();
    let mut input_pos = 0usize;

    let mut tape = vec![0u8; TAPE_LENGTH];
    let mut pointer = 0usize;
    let mut pc = 0usize;
    let mut output = String::new();
    let mut steps = 0u64;

    while pc < bytes.len() {
        if let Some(limit) = max_steps {
            if steps >= limit {
                return Err(StepLimitExceeded { limit }.into());
            }
        }
        match bytes[pc] {
            b'+' => tape[pointer] = tape[pointer].wrapping_add(1),
            b'-' => tape[pointer] = tape[pointer].wrapping_sub(1),
            b'>' => {
                if pointer + 1 >= TAPE_LENGTH {
                    return Err(PointerOutOfRange.into());
                }
                pointer += 1;
            }
            b'<' => {
                if pointer == 0 {
                    return Err(PointerOutOfRange.into());
                }
                pointer -= 1;
            }
            b'.' => output.push(tape[pointer] as char),
            b',' => {
                tape[pointer] = input_bytes.get(input_pos).copied().unwrap_or(0);
                input_pos += 1;
            }
            b'[' => {
                if tape[pointer] == 0 {
                    pc = jump_table[pc];
                }
            }
            b']' => {
                if tape[pointer] != 0 {
                    pc = jump_table[pc];
                }
            }
            _ => {}
        }
        pc += 1;
        steps += 1;
    }
    Ok(output)
}

/// A point-in-time view of interpreter state, handed out by `Stepper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub step: u64,
    pub pc: usize,
    pub command: Option<char>,
    pub pointer: usize,
    pub tape_start: usize,
    pub tape: Vec<u8>,
    pub output: String,
    pub code_length: usize,
}

impl Snapshot {
    /// The state of a freshly constructed session, before anything runs.
    /// `window` is a radius around the pointer, so the tape span is
    /// `2 * window + 1` cells wide (clamped to the tape's own bounds).
    pub fn initial(code: &str, window: usize) -> Self {
        let end = (window + 1).min(TAPE_LENGTH);
        Snapshot {
            step: 0,
            pc: 0,
            command: None,
            pointer: 0,
            tape_start: 0,
            tape: vec![0u8; end],
            output: String::new(),
            code_length: code.len(),
        }
    }
}

/// A lazy, single-pass, non-restartable Brainfuck interpreter that yields a
/// [`Snapshot`] after every executed instruction, plus one terminal
/// snapshot when the program halts.
pub struct Stepper {
    code: Vec<u8>,
    jump_table: Vec<usize>,
    input: Vec<u8>,
    input_pos: usize,
    window: usize,
    max_steps: Option<u64>,
    tape: Vec<u8>,
    pointer: usize,
    pc: usize,
    output: String,
    steps: u64,
    finished: bool,
}

/// Construct a [`Stepper`] over `code`, preflighting bracket balance.
pub fn step(code: &str, input: &str, window: usize, max_steps: Option<u64>) -> Result<Stepper, InterpreterError> {
    let bytes = code.as_bytes().to_vec();
    let jump_table = build_jump_table(&bytes)?;
    Ok(Stepper {
        code: bytes,
        jump_table,
        input: input.as_bytes().to_vec(),
        input_pos: 0,
        window,
        max_steps,
        tape: vec![0u8; TAPE_LENGTH],
        pointer: 0,
        pc: 0,
        output: String::new(),
        steps: 0,
        finished: false,
    })
}

impl Stepper {
    /// `self.window` is a radius around the pointer: the reported span is
    /// `tape[pointer - window .. pointer + window + 1]`, clamped to the
    /// tape's own bounds.
    fn snapshot(&self, command: Option<char>) -> Snapshot {
        let start = self.pointer.saturating_sub(self.window);
        let end = (self.pointer + self.window + 1).min(TAPE_LENGTH);
        Snapshot {
            step: self.steps,
            pc: self.pc,
            command,
            pointer: self.pointer,
            tape_start: start,
            tape: self.tape[start..end].to_vec(),
            output: self.output.clone(),
            code_length: self.code.len(),
        }
    }
}

impl Iterator for Stepper {
    type Item = Result<Snapshot, InterpreterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.pc >= self.code.len() {
            self.finished = true;
            return Some(Ok(self.snapshot(None)));
        }
        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                self.finished = true;
                return Some(Err(StepLimitExceeded { limit }.into()));
            }
        }

        let command = self.code[self.pc] as char;
        match self.code[self.pc] {
            b'+' => self.tape[self.pointer] = self.tape[self.pointer].wrapping_add(1),
            b'-' => self.tape[self.pointer] = self.tape[self.pointer].wrapping_sub(1),
            b'>' => {
                if self.pointer + 1 >= TAPE_LENGTH {
                    self.finished = true;
                    return Some(Err(PointerOutOfRange.into()));
                }
                self.pointer += 1;
            }
            b'<' => {
                if self.pointer == 0 {
                    self.finished = true;
                    return Some(Err(PointerOutOfRange.into()));
                }
                self.pointer -= 1;
            }
            b'.' => self.output.push(self.tape[self.pointer] as char),
            b',' => {
                self.tape[self.pointer] = self.input.get(self.input_pos).copied().unwrap_or(0);
                self.input_pos += 1;
            }
            b'[' => {
                if self.tape[self.pointer] == 0 {
                    self.pc = self.jump_table[self.pc];
                }
            }
            b']' => {
                if self.tape[self.pointer] != 0 {
                    self.pc = self.jump_table[self.pc];
                }
            }
            _ => {}
        }
        self.pc += 1;
        self.steps += 1;
        Some(Ok(self.snapshot(Some(command))))
    }
}
