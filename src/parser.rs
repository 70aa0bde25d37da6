//! Recursive-descent parser turning preprocessed lines into a `Statement` tree.

use crate::ast::{Expr, Statement, VarType};
use crate::error::ParseError;
use crate::lexer::{preprocess, tokenize};

/// Parses a whole TinyBF source string into its top-level statement list.
pub struct Parser {
    lines: Vec<(usize, String)>,
    pos: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            lines: preprocess(source),
            pos: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Vec<Statement>, ParseError> {
        let stmts = self.parse_block()?;
        if self.pos < self.lines.len() {
            let (line, _) = self.lines[self.pos];
            return Err(ParseError::ExtraClosingBrace { line });
        }
        Ok(stmts)
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut stmts = Vec::new();
        while self.pos < self.lines.len() {
            let (line_no, text) = self.lines[self.pos].clone();
            if text == "}" {
                return Ok(stmts);
            }
            self.pos += 1;
            stmts.push(self.parse_statement(line_no, &text)?);
        }
        Ok(stmts)
    }

    fn expect_close(&mut self, opening_line: usize) -> Result<(), ParseError> {
        if self.pos >= self.lines.len() || self.lines[self.pos].1 != "}" {
            return Err(ParseError::MissingClosingBrace { line: opening_line });
        }
        self.pos += 1;
        Ok(())
    }

    fn try_parse_else(&mut self) -> Result<Option<Vec<Statement>>, ParseError> {
        if self.pos >= self.lines.len() {
            return Ok(None);
        }
        let (line, text) = self.lines[self.pos].clone();
        let tokens = tokenize(&text);
        if tokens.len() == 2 && tokens[0] == "else" && tokens[1] == "{" {
            self.pos += 1;
            let else_block = self.parse_block()?;
            self.expect_close(line)?;
            return Ok(Some(else_block));
        }
        Ok(None)
    }

    fn parse_statement(&mut self, line: usize, text: &str) -> Result<Statement, ParseError> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "empty statement".to_string(),
            });
        }
        match tokens[0].as_str() {
            "let" => self.parse_let(line, &tokens),
            "set" => self.parse_set(line, &tokens),
            "add" | "sub" | "mul" | "div" => self.parse_arith(line, &tokens),
            "print_char" | "print_num" | "print_dec" => self.parse_print(line, &tokens),
            "input_char" | "input_num" => self.parse_input(line, &tokens),
            "if" => self.parse_if(line, &tokens),
            "else" => Err(ParseError::DanglingElse { line }),
            "for" => self.parse_for(line, &tokens),
            "}" => Err(ParseError::ExtraClosingBrace { line }),
            other => Err(ParseError::UnknownKeyword {
                line,
                keyword: other.to_string(),
            }),
        }
    }

    fn parse_let(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 5 || tokens[3] != "=" {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "expected 'let <num|char> <name> = <expr>'".to_string(),
            });
        }
        let decl_type = match tokens[1].as_str() {
            "num" => VarType::Num,
            "char" => VarType::Char,
            other => {
                return Err(ParseError::MalformedStatement {
                    line,
                    detail: format!("unknown type '{other}'"),
                });
            }
        };
        let init_expr = parse_expr(&tokens[4], line)?;
        Ok(Statement::Let {
            name: tokens[2].clone(),
            decl_type,
            init_expr,
        })
    }

    fn parse_set(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 4 || tokens[2] != "=" {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "expected 'set <name> = <expr>'".to_string(),
            });
        }
        Ok(Statement::Set {
            name: tokens[1].clone(),
            expr: parse_expr(&tokens[3], line)?,
        })
    }

    fn parse_arith(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 3 {
            return Err(ParseError::MalformedStatement {
                line,
                detail: format!("expected '{} <name> <expr>'", tokens[0]),
            });
        }
        let name = tokens[1].clone();
        let expr = parse_expr(&tokens[2], line)?;
        Ok(match tokens[0].as_str() {
            "add" => Statement::Add { name, expr },
            "sub" => Statement::Sub { name, expr },
            "mul" => Statement::Mul { name, expr },
            "div" => Statement::Div { name, expr },
            _ => unreachable!(),
        })
    }

    fn parse_print(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 2 {
            return Err(ParseError::MalformedStatement {
                line,
                detail: format!("expected '{} <name>'", tokens[0]),
            });
        }
        let name = tokens[1].clone();
        Ok(match tokens[0].as_str() {
            "print_char" => Statement::PrintChar { name },
            "print_num" => Statement::PrintNum { name },
            "print_dec" => Statement::PrintDec { name },
            _ => unreachable!(),
        })
    }

    fn parse_input(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 2 {
            return Err(ParseError::MalformedStatement {
                line,
                detail: format!("expected '{} <name>'", tokens[0]),
            });
        }
        let name = tokens[1].clone();
        Ok(match tokens[0].as_str() {
            "input_char" => Statement::InputChar { name },
            "input_num" => Statement::InputNum { name },
            _ => unreachable!(),
        })
    }

    fn parse_if(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 3 || tokens[2] != "{" {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "expected 'if <name> {'".to_string(),
            });
        }
        let cond_name = tokens[1].clone();
        if is_literal_token(&cond_name) {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "'if' condition must be an identifier, not a literal".to_string(),
            });
        }
        let then_block = self.parse_block()?;
        self.expect_close(line)?;
        let else_block = self.try_parse_else()?;
        Ok(Statement::If {
            cond_name,
            then_block,
            else_block,
        })
    }

    fn parse_for(&mut self, line: usize, tokens: &[String]) -> Result<Statement, ParseError> {
        if tokens.len() != 7 || tokens[2] != "from" || tokens[4] != "to" || tokens[6] != "{" {
            return Err(ParseError::MalformedStatement {
                line,
                detail: "expected 'for <name> from <expr> to <expr> {'".to_string(),
            });
        }
        let name = tokens[1].clone();
        let start_expr = parse_expr(&tokens[3], line)?;
        let end_expr = parse_expr(&tokens[5], line)?;
        let body = self.parse_block()?;
        self.expect_close(line)?;
        Ok(Statement::For {
            name,
            start_expr,
            end_expr,
            body,
        })
    }
}

fn is_literal_token(token: &str) -> bool {
    token.starts_with('\'') || token.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn parse_expr(token: &str, line: usize) -> Result<Expr, ParseError> {
    if token.starts_with('\'') {
        parse_char_literal(token, line).map(Expr::CharLiteral)
    } else if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        parse_number_literal(token, line).map(Expr::NumberLiteral)
    } else {
        Ok(Expr::Identifier(token.to_string()))
    }
}

fn parse_number_literal(token: &str, line: usize) -> Result<u8, ParseError> {
    let value: i64 = token.parse().map_err(|_| ParseError::MalformedStatement {
        line,
        detail: format!("invalid numeric literal '{token}'"),
    })?;
    if !(0..=255).contains(&value) {
        return Err(ParseError::LiteralOutOfRange { line, value });
    }
    Ok(value as u8)
}

fn parse_char_literal(token: &str, line: usize) -> Result<u8, ParseError> {
    let inner = token
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(|| ParseError::MalformedStatement {
            line,
            detail: format!("invalid character literal '{token}'"),
        })?;

    match inner.chars().count() {
        0 => Err(ParseError::EmptyCharLiteral { line }),
        1 => {
            let c = inner.chars().next().unwrap();
            if !c.is_ascii() {
                return Err(ParseError::MalformedStatement {
                    line,
                    detail: format!("character literal '{token}' is not a single ASCII byte"),
                });
            }
            Ok(c as u8)
        }
        2 => {
            let mut chars = inner.chars();
            let backslash = chars.next().unwrap();
            let escape = chars.next().unwrap();
            if backslash != '\\' {
                return Err(ParseError::MalformedStatement {
                    line,
                    detail: format!("invalid character literal '{token}'"),
                });
            }
            match escape {
                'n' => Ok(10),
                't' => Ok(9),
                'r' => Ok(13),
                '0' => Ok(0),
                '\\' => Ok(92),
                '\'' => Ok(39),
                '"' => Ok(34),
                other => Err(ParseError::UnknownEscape { line, escape: other }),
            }
        }
        _ => Err(ParseError::MalformedStatement {
            line,
            detail: format!("invalid character literal '{token}'"),
        }),
    }
}
