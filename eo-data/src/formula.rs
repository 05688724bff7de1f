use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormulaParseError {
    #[error("formula '{name}' has an unbalanced expression: {stack_depth} values left on the stack")]
    UnbalancedExpression { name: String, stack_depth: usize },
    #[error("formula '{name}' underflowed its stack at operator '{op}'")]
    StackUnderflow { name: String, op: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
}

impl OpKind {
    fn from_word(word: &str) -> Option<OpKind> {
        match word {
            "+" => Some(OpKind::Add),
            "-" => Some(OpKind::Sub),
            "*" => Some(OpKind::Mul),
            "/" => Some(OpKind::Div),
            "min" => Some(OpKind::Min),
            "max" => Some(OpKind::Max),
            _ => None,
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            OpKind::Add => a + b,
            OpKind::Sub => a - b,
            OpKind::Mul => a * b,
            OpKind::Div => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            OpKind::Min => a.min(b),
            OpKind::Max => a.max(b),
        }
    }
}

#[derive(Debug, Clone)]
enum Token {
    Number(f64),
    Variable(String),
    Op(OpKind),
}

/// A variable bag passed to formula evaluation: attacker fields unprefixed,
/// target/peer fields under a `target_` prefix, per §6.
#[derive(Debug, Clone, Default)]
pub struct VariableBag {
    values: HashMap<String, f64>,
}

impl VariableBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f64) -> &mut Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> f64 {
        *self.values.get(name).unwrap_or(&0.0)
    }
}

/// A parsed reverse-Polish-notation program, tokenized once and evaluated
/// against a fresh variable bag each call.
#[derive(Debug, Clone)]
pub struct FormulaProgram {
    tokens: Vec<Token>,
}

impl FormulaProgram {
    pub fn parse(name: &str, source: &str) -> Result<FormulaProgram, FormulaParseError> {
        let mut tokens = Vec::new();
        let mut stack_depth: i64 = 0;

        for word in source.split_whitespace() {
            let token = if let Some(op) = OpKind::from_word(word) {
                if stack_depth < 2 {
                    return Err(FormulaParseError::StackUnderflow {
                        name: name.to_string(),
                        op: word.to_string(),
                    });
                }
                stack_depth -= 1;
                Token::Op(op)
            } else {
                stack_depth += 1;
                match word.parse::<f64>() {
                    Ok(number) => Token::Number(number),
                    Err(_) => Token::Variable(word.to_string()),
                }
            };
            tokens.push(token);
        }

        if stack_depth != 1 {
            return Err(FormulaParseError::UnbalancedExpression {
                name: name.to_string(),
                stack_depth: stack_depth.max(0) as usize,
            });
        }

        Ok(FormulaProgram { tokens })
    }

    pub fn evaluate(&self, vars: &VariableBag) -> f64 {
        let mut stack: Vec<f64> = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Number(n) => stack.push(*n),
                Token::Variable(name) => stack.push(vars.get(name)),
                Token::Op(op) => {
                    let b = stack.pop().unwrap_or(0.0);
                    let a = stack.pop().unwrap_or(0.0);
                    stack.push(op.apply(a, b));
                }
            }
        }
        stack.pop().unwrap_or(0.0)
    }
}

/// The damage/hit-rate formula source, authoritative game-balance knobs.
/// Programs are parsed on first lookup and cached by name so hot combat
/// code never reparses RPN text mid-tick.
#[derive(Debug, Clone, Default)]
pub struct Formulas {
    sources: HashMap<String, String>,
    cache: HashMap<String, FormulaProgram>,
}

impl Formulas {
    pub fn new(sources: HashMap<String, String>) -> Self {
        Self {
            sources,
            cache: HashMap::new(),
        }
    }

    /// Evaluates the named formula, parsing and caching it on first use.
    /// Returns `None` when no formula with that name is configured, in
    /// which case the caller falls back to its built-in default.
    pub fn evaluate(&mut self, name: &str, vars: &VariableBag) -> Option<f64> {
        if !self.cache.contains_key(name) {
            let source = self.sources.get(name)?;
            match FormulaProgram::parse(name, source) {
                Ok(program) => {
                    self.cache.insert(name.to_string(), program);
                }
                Err(err) => {
                    log::warn!("formula '{name}' failed to parse: {err}");
                    return None;
                }
            }
        }
        self.cache.get(name).map(|program| program.evaluate(vars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_simple_arithmetic() {
        let program = FormulaProgram::parse("test", "mindam maxdam +").unwrap();
        let mut vars = VariableBag::new();
        vars.set("mindam", 10.0).set("maxdam", 20.0);
        assert_eq!(program.evaluate(&vars), 30.0);
    }

    #[test]
    fn unbalanced_expression_is_rejected() {
        assert!(FormulaProgram::parse("test", "mindam maxdam").is_err());
    }

    #[test]
    fn caches_parsed_program_across_calls() {
        let mut formulas = Formulas::new(HashMap::from([(
            "damage".to_string(),
            "mindam maxdam +".to_string(),
        )]));
        let mut vars = VariableBag::new();
        vars.set("mindam", 1.0).set("maxdam", 2.0);
        assert_eq!(formulas.evaluate("damage", &vars), Some(3.0));
        assert_eq!(formulas.cache.len(), 1);
        assert_eq!(formulas.evaluate("damage", &vars), Some(3.0));
        assert_eq!(formulas.cache.len(), 1);
    }

    #[test]
    fn missing_formula_returns_none() {
        let mut formulas = Formulas::new(HashMap::new());
        assert_eq!(formulas.evaluate("damage", &VariableBag::new()), None);
    }
}
