//! Lowers a TinyBF statement tree into raw Brainfuck source.
//!
//! The generator keeps a flat cell layout (`cell_map`), a simulated data
//! pointer, and an `output` buffer it appends Brainfuck characters to. Cells
//! are never freed or reused once allocated; `next_cell` only grows.

mod layout;
mod lower;
mod macros;

use crate::ast::{Statement, VarType};
use crate::error::SemanticError;
use std::collections::HashMap;

pub(crate) const HOME_CELL: usize = 0;
pub(crate) const TEMP_A: usize = 1;
pub(crate) const TEMP_B: usize = 2;
pub(crate) const FIRST_DYNAMIC_CELL: usize = 3;

/// Brainfuck code generator. One instance lowers one program.
pub struct Generator {
    cell_map: HashMap<String, usize>,
    var_types: HashMap<String, VarType>,
    pointer: usize,
    next_cell: usize,
    output: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            cell_map: HashMap::new(),
            var_types: HashMap::new(),
            pointer: HOME_CELL,
            next_cell: FIRST_DYNAMIC_CELL,
            output: String::new(),
        }
    }

    /// Lower every top-level statement, leaving the pointer at the home cell.
    pub fn lower_program(&mut self, program: &[Statement]) -> Result<(), SemanticError> {
        for statement in program {
            self.lower_statement(statement)?;
        }
        Ok(())
    }

    pub fn into_code(self) -> String {
        self.output
    }
}
