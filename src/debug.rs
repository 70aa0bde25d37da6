//! Interactive stepping session: breakpoints, step history, and run-until.

use crate::error::InterpreterError;
use crate::interpreter::{self, Snapshot, Stepper};
use std::collections::{BTreeSet, VecDeque};

/// A debugging session wrapping a [`Stepper`] with breakpoints and a
/// bounded history of recent snapshots.
pub struct DebugSession {
    code: String,
    input: String,
    window: usize,
    max_steps: Option<u64>,
    history_limit: usize,
    stepper: Stepper,
    breakpoints: BTreeSet<usize>,
    history: VecDeque<Snapshot>,
    last_state: Snapshot,
    hit_breakpoint: Option<usize>,
    finished: bool,
}

impl DebugSession {
    pub fn new(
        code: impl Into<String>,
        input: impl Into<String>,
        window: usize,
        max_steps: Option<u64>,
        history_limit: usize,
    ) -> Result<Self, InterpreterError> {
        let code = code.into();
        let input = input.into();
        let stepper = interpreter::step(&code, &input, window, max_steps)?;
        let initial = Snapshot::initial(&code, window);
        let mut history = VecDeque::new();
        history.push_back(initial.clone());
        Ok(DebugSession {
            code,
            input,
            window,
            max_steps,
            history_limit,
            stepper,
            breakpoints: BTreeSet::new(),
            history,
            last_state: initial,
            hit_breakpoint: None,
            finished: false,
        })
    }

    fn record(&mut self, snapshot: Snapshot) {
        self.last_state = snapshot.clone();
        self.history.push_back(snapshot);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    /// Advance at most `count` steps, or until the program halts or a
    /// breakpoint's `pc` is reached (whichever comes first).
    pub fn step_forward(&mut self, count: u64) -> Result<&Snapshot, InterpreterError> {
        self.hit_breakpoint = None;
        for _ in 0..count {
            if self.finished {
                break;
            }
            match self.stepper.next() {
                None => {
                    self.finished = true;
                    break;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                Some(Ok(snapshot)) => {
                    let halted = snapshot.command.is_none();
                    let pc = snapshot.pc;
                    let hit = self.breakpoints.contains(&pc);
                    self.record(snapshot);
                    if halted {
                        self.finished = true;
                        break;
                    }
                    if hit {
                        self.hit_breakpoint = Some(pc);
                        break;
                    }
                }
            }
        }
        Ok(&self.last_state)
    }

    /// Run until a breakpoint's `pc` is reached, the program halts, or
    /// `limit` steps have been taken (whichever comes first).
    pub fn run_until_break(&mut self, limit: Option<u64>) -> Result<&Snapshot, InterpreterError> {
        self.hit_breakpoint = None;
        let mut taken = 0u64;
        loop {
            if self.finished {
                break;
            }
            if let Some(limit) = limit {
                if taken >= limit {
                    break;
                }
            }
            match self.stepper.next() {
                None => {
                    self.finished = true;
                    break;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                Some(Ok(snapshot)) => {
                    let halted = snapshot.command.is_none();
                    let pc = snapshot.pc;
                    let hit = self.breakpoints.contains(&pc);
                    self.record(snapshot);
                    taken += 1;
                    if halted {
                        self.finished = true;
                        break;
                    }
                    if hit {
                        self.hit_breakpoint = Some(pc);
                        break;
                    }
                }
            }
        }
        Ok(&self.last_state)
    }

    /// Start a fresh interpreter run from the beginning, keeping breakpoints.
    pub fn restart(&mut self) -> Result<(), InterpreterError> {
        self.stepper = interpreter::step(&self.code, &self.input, self.window, self.max_steps)?;
        let initial = Snapshot::initial(&self.code, self.window);
        self.history.clear();
        self.history.push_back(initial.clone());
        self.last_state = initial;
        self.hit_breakpoint = None;
        self.finished = false;
        Ok(())
    }

    pub fn add_breakpoint(&mut self, pc: usize) {
        self.breakpoints.insert(pc);
    }

    pub fn remove_breakpoint(&mut self, pc: usize) -> bool {
        self.breakpoints.remove(&pc)
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn list_breakpoints(&self) -> Vec<usize> {
        self.breakpoints.iter().copied().collect()
    }

    pub fn current_state(&self) -> &Snapshot {
        &self.last_state
    }

    pub fn history(&self) -> impl Iterator<Item = &Snapshot> {
        self.history.iter()
    }

    /// The `pc` stepping last halted on due to a breakpoint, or `None` if
    /// the most recent `step_forward`/`run_until_break` call didn't hit one.
    pub fn hit_breakpoint(&self) -> Option<usize> {
        self.hit_breakpoint
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
