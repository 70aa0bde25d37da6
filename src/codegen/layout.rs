//! Cell allocation and pointer-movement helpers shared by every macro.

use super::{Generator, FIRST_DYNAMIC_CELL, HOME_CELL, TEMP_A, TEMP_B};
use crate::ast::VarType;
use crate::error::SemanticError;

impl Generator {
    /// Look up a declared variable's cell, or allocate+register it on first `let`.
    pub(super) fn ensure_cell(&mut self, name: &str, var_type: VarType) -> Result<usize, SemanticError> {
        if let Some(&cell) = self.cell_map.get(name) {
            let existing = self.var_types[name];
            if existing != var_type {
                return Err(SemanticError::TypeConflict {
                    name: name.to_string(),
                });
            }
            return Ok(cell);
        }
        let cell = self.next_cell;
        self.next_cell += 1;
        self.cell_map.insert(name.to_string(), cell);
        self.var_types.insert(name.to_string(), var_type);
        self.move_to(cell);
        self.zero_current();
        Ok(cell)
    }

    /// Look up a variable that must already be declared.
    pub(super) fn get_var(&self, name: &str) -> Result<usize, SemanticError> {
        self.cell_map
            .get(name)
            .copied()
            .ok_or_else(|| SemanticError::Undeclared {
                name: name.to_string(),
            })
    }

    pub(super) fn require_type(&self, name: &str, expected: VarType) -> Result<(), SemanticError> {
        let found = self.var_types[name];
        if found != expected {
            return Err(SemanticError::WrongOperandType {
                name: name.to_string(),
                expected: expected.as_str(),
                found: found.as_str(),
            });
        }
        Ok(())
    }

    /// Allocate a brand-new scratch cell, never reused, always zero on return.
    pub(super) fn alloc_scratch(&mut self) -> usize {
        let cell = self.next_cell;
        self.next_cell += 1;
        cell
    }

    /// Pick whichever fixed scratch cell (`temp_a`/`temp_b`) sits closer to `target`.
    ///
    /// Both are always lower-indexed than any user or dynamically allocated
    /// cell, so `move_to(target)` from the returned scratch cell always walks
    /// forward (`>`), never backward.
    pub(super) fn pick_nearby_scratch(&self, target: usize) -> usize {
        let dist_a = target.abs_diff(TEMP_A);
        let dist_b = target.abs_diff(TEMP_B);
        if dist_a <= dist_b {
            TEMP_A
        } else {
            TEMP_B
        }
    }

    /// Emit `<`/`>` to walk the simulated pointer to `cell`.
    pub(super) fn move_to(&mut self, cell: usize) {
        if cell > self.pointer {
            self.output.push_str(&">".repeat(cell - self.pointer));
        } else if cell < self.pointer {
            self.output.push_str(&"<".repeat(self.pointer - cell));
        }
        self.pointer = cell;
    }

    /// Move to `cell` and clear it with `[-]`.
    pub(super) fn zero_cell(&mut self, cell: usize) {
        self.move_to(cell);
        self.zero_current();
    }

    /// Clear whatever cell the pointer currently sits on.
    pub(super) fn zero_current(&mut self) {
        self.output.push_str("[-]");
    }

    /// Return the pointer to the home cell. Called at every statement boundary.
    pub(super) fn return_home(&mut self) {
        self.move_to(HOME_CELL);
    }
}
