//! Statement-level lowering: turns one AST node into Brainfuck, always
//! returning the pointer to the home cell when it's done.

use super::{Generator, TEMP_A};
use crate::ast::{Expr, Statement, VarType};
use crate::error::SemanticError;

enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Generator {
    /// Evaluate `expr` into `dest`, overwriting whatever it held. `num` and
    /// `char` are both plain bytes, so no type check happens here.
    fn eval_expr_into(&mut self, expr: &Expr, dest: usize) -> Result<(), SemanticError> {
        match expr {
            Expr::NumberLiteral(value) => {
                self.zero_cell(dest);
                let scratch = self.pick_nearby_scratch(dest);
                self.scaled_increment(dest, *value, scratch);
            }
            Expr::CharLiteral(value) => {
                self.zero_cell(dest);
                let scratch = self.pick_nearby_scratch(dest);
                self.scaled_increment(dest, *value, scratch);
            }
            Expr::Identifier(name) => {
                let src = self.get_var(name)?;
                self.zero_cell(dest);
                self.copy_cell(src, dest, TEMP_A);
            }
        }
        Ok(())
    }

    /// Type the literal/identifier an expression refers to, without emitting
    /// any code (used to validate arithmetic operand types up front).
    fn expr_type(&self, expr: &Expr) -> Result<VarType, SemanticError> {
        match expr {
            Expr::NumberLiteral(_) => Ok(VarType::Num),
            Expr::CharLiteral(_) => Ok(VarType::Char),
            Expr::Identifier(name) => {
                self.get_var(name)?;
                Ok(self.var_types[name])
            }
        }
    }

    pub(super) fn lower_statement(&mut self, statement: &Statement) -> Result<(), SemanticError> {
        match statement {
            Statement::Let {
                name,
                decl_type,
                init_expr,
            } => self.lower_let(name, *decl_type, init_expr)?,
            Statement::Set { name, expr } => self.lower_set(name, expr)?,
            Statement::Add { name, expr } => self.lower_arith(name, expr, ArithOp::Add)?,
            Statement::Sub { name, expr } => self.lower_arith(name, expr, ArithOp::Sub)?,
            Statement::Mul { name, expr } => self.lower_arith(name, expr, ArithOp::Mul)?,
            Statement::Div { name, expr } => self.lower_arith(name, expr, ArithOp::Div)?,
            Statement::PrintChar { name } => {
                let cell = self.get_var(name)?;
                self.require_type(name, VarType::Char)?;
                self.emit_output(cell);
            }
            Statement::PrintNum { name } => {
                let cell = self.get_var(name)?;
                self.require_type(name, VarType::Num)?;
                self.emit_output(cell);
            }
            Statement::PrintDec { name } => {
                let cell = self.get_var(name)?;
                self.require_type(name, VarType::Num)?;
                self.print_dec(cell);
            }
            Statement::InputChar { name } => {
                let cell = self.get_var(name)?;
                self.require_type(name, VarType::Char)?;
                self.move_to(cell);
                self.output.push(',');
            }
            Statement::InputNum { name } => {
                let cell = self.get_var(name)?;
                self.require_type(name, VarType::Num)?;
                self.move_to(cell);
                self.output.push(',');
            }
            Statement::If {
                cond_name,
                then_block,
                else_block,
            } => self.lower_if(cond_name, then_block, else_block.as_deref())?,
            Statement::For {
                name,
                start_expr,
                end_expr,
                body,
            } => self.lower_for(name, start_expr, end_expr, body)?,
        }
        self.return_home();
        Ok(())
    }

    /// `let`/`set` assignments place no type restriction between the
    /// declared/target type and the initializer: `num` and `char` are both
    /// plain bytes, so a `char` variable can be assigned from a `num`
    /// expression and vice versa.
    fn lower_let(&mut self, name: &str, decl_type: VarType, init_expr: &Expr) -> Result<(), SemanticError> {
        let cell = self.ensure_cell(name, decl_type)?;
        self.eval_expr_into(init_expr, cell)?;
        Ok(())
    }

    fn lower_set(&mut self, name: &str, expr: &Expr) -> Result<(), SemanticError> {
        let cell = self.get_var(name)?;
        self.eval_expr_into(expr, cell)?;
        Ok(())
    }

    /// `add`/`sub` place no type restriction on their target (both `num`
    /// and `char` are plain bytes); `mul`'s target may be either type too.
    /// Only `div` requires a `num` target, since a `char` quotient wouldn't
    /// mean anything. Operands, literal or identifier, are taken as raw
    /// byte values regardless of which type tagged them.
    fn lower_arith(&mut self, name: &str, expr: &Expr, op: ArithOp) -> Result<(), SemanticError> {
        let cell = self.get_var(name)?;
        if matches!(op, ArithOp::Div) {
            self.require_type(name, VarType::Num)?;
        }

        match expr {
            Expr::NumberLiteral(v) | Expr::CharLiteral(v) => {
                let v = *v;
                match op {
                    ArithOp::Add => {
                        let scratch = self.pick_nearby_scratch(cell);
                        self.scaled_increment(cell, v, scratch);
                    }
                    ArithOp::Sub => {
                        let scratch = self.pick_nearby_scratch(cell);
                        self.scaled_decrement(cell, v, scratch);
                    }
                    ArithOp::Mul => self.multiply_by_literal(cell, v),
                    ArithOp::Div => {
                        let quotient = self.alloc_scratch();
                        self.divide_by_literal(cell, v, quotient);
                        self.zero_cell(cell);
                        self.transfer_add(quotient, cell);
                    }
                }
            }
            Expr::Identifier(operand_name) => {
                let operand_cell = self.get_var(operand_name)?;
                match op {
                    ArithOp::Add => self.transfer_add_nondestructive(operand_cell, cell),
                    ArithOp::Sub => self.transfer_subtract_nondestructive(operand_cell, cell),
                    ArithOp::Mul => self.multiply_by_cell(cell, operand_cell),
                    ArithOp::Div => {
                        let quotient = self.alloc_scratch();
                        self.divide_cells(cell, operand_cell, quotient);
                        self.zero_cell(cell);
                        self.transfer_add(quotient, cell);
                    }
                }
            }
        }
        Ok(())
    }

    fn transfer_add_nondestructive(&mut self, src: usize, dst: usize) {
        self.copy_cell(src, dst, TEMP_A);
    }

    fn transfer_subtract_nondestructive(&mut self, src: usize, dst: usize) {
        let copy = self.alloc_scratch();
        self.copy_cell(src, copy, TEMP_A);
        self.transfer_subtract(copy, dst);
    }

    fn lower_if(
        &mut self,
        cond_name: &str,
        then_block: &[Statement],
        else_block: Option<&[Statement]>,
    ) -> Result<(), SemanticError> {
        let cond_cell = self.get_var(cond_name)?;
        self.require_type(cond_name, VarType::Num)?;

        // `cond_copy` must be a freshly allocated cell, not one of the
        // shared `temp_a`/`temp_b`: it stays live across the recursive
        // `lower_statement` calls below, and a nested statement (a `div`
        // or `mul`, say) will itself reach for `temp_a`/`temp_b` as
        // transient scratch, which would clobber a shared cell mid-loop.
        let cond_copy = self.alloc_scratch();
        self.copy_cell(cond_cell, cond_copy, TEMP_A);

        if let Some(else_stmts) = else_block {
            // `lower_if` is hand-written rather than built on `emit_if`
            // because the then/else bodies recurse into `lower_statement`,
            // which returns a `Result` that needs `?` to propagate through
            // nested blocks — `emit_if`'s closure is infallible by design.
            let else_flag = self.alloc_scratch();
            self.emit_linear_increment(else_flag, 1);

            self.move_to(cond_copy);
            self.output.push('[');
            self.zero_cell(else_flag);
            for stmt in then_block {
                self.lower_statement(stmt)?;
            }
            self.zero_cell(cond_copy);
            self.output.push(']');

            let mut result = Ok(());
            self.move_to(else_flag);
            self.output.push('[');
            for stmt in else_stmts {
                if let Err(e) = self.lower_statement(stmt) {
                    result = Err(e);
                    break;
                }
            }
            self.zero_cell(else_flag);
            self.output.push(']');
            result?;
        } else {
            self.move_to(cond_copy);
            self.output.push('[');
            for stmt in then_block {
                self.lower_statement(stmt)?;
            }
            self.zero_cell(cond_copy);
            self.output.push(']');
        }

        Ok(())
    }

    fn lower_for(
        &mut self,
        name: &str,
        start_expr: &Expr,
        end_expr: &Expr,
        body: &[Statement],
    ) -> Result<(), SemanticError> {
        let start_type = self.expr_type(start_expr)?;
        let end_type = self.expr_type(end_expr)?;
        if start_type != VarType::Num || end_type != VarType::Num {
            return Err(SemanticError::WrongOperandType {
                name: name.to_string(),
                expected: "num",
                found: if start_type != VarType::Num { start_type.as_str() } else { end_type.as_str() },
            });
        }

        let cell = self.ensure_cell(name, VarType::Num)?;
        self.eval_expr_into(start_expr, cell)?;

        let start_copy = self.alloc_scratch();
        self.copy_cell(cell, start_copy, TEMP_A);

        let iter_cell = self.alloc_scratch();
        self.eval_expr_into(end_expr, iter_cell)?;
        self.transfer_subtract(start_copy, iter_cell);

        let mut result = Ok(());
        self.move_to(iter_cell);
        self.output.push('[');
        self.output.push('-');
        for stmt in body {
            if let Err(e) = self.lower_statement(stmt) {
                result = Err(e);
                break;
            }
        }
        self.emit_linear_increment(cell, 1);
        self.move_to(iter_cell);
        self.output.push(']');
        result?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Generator;
    use crate::ast::{Expr, Statement, VarType};

    fn lower(stmts: Vec<Statement>) -> String {
        let mut gen = Generator::new();
        gen.lower_program(&stmts).unwrap();
        gen.into_code()
    }

    #[test]
    fn let_zero_literal_clears_the_cell() {
        let code = lower(vec![Statement::Let {
            name: "x".to_string(),
            decl_type: VarType::Num,
            init_expr: Expr::NumberLiteral(0),
        }]);
        assert!(!code.contains('+'));
    }

    #[test]
    fn let_large_literal_uses_a_loop_not_200_pluses() {
        let code = lower(vec![Statement::Let {
            name: "x".to_string(),
            decl_type: VarType::Num,
            init_expr: Expr::NumberLiteral(200),
        }]);
        let plus_count = code.chars().filter(|&c| c == '+').count();
        assert!(plus_count < 200);
        assert!(code.contains("[->"));
    }

    #[test]
    fn statement_lowering_returns_pointer_to_home() {
        let mut gen = Generator::new();
        let stmts = vec![
            Statement::Let {
                name: "x".to_string(),
                decl_type: VarType::Num,
                init_expr: Expr::NumberLiteral(5),
            },
            Statement::Add {
                name: "x".to_string(),
                expr: Expr::NumberLiteral(3),
            },
        ];
        gen.lower_program(&stmts).unwrap();
        assert_eq!(gen.pointer, crate::codegen::HOME_CELL);
    }

    #[test]
    fn undeclared_variable_in_set_is_an_error() {
        let mut gen = Generator::new();
        let stmts = vec![Statement::Set {
            name: "missing".to_string(),
            expr: Expr::NumberLiteral(1),
        }];
        assert!(gen.lower_program(&stmts).is_err());
    }

    #[test]
    fn print_char_requires_char_type() {
        let mut gen = Generator::new();
        let stmts = vec![
            Statement::Let {
                name: "n".to_string(),
                decl_type: VarType::Num,
                init_expr: Expr::NumberLiteral(1),
            },
            Statement::PrintChar { name: "n".to_string() },
        ];
        assert!(gen.lower_program(&stmts).is_err());
    }
}
