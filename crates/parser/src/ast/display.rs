//! HAL-like rendering of expressions for diagnostics and logs.

use super::expr::*;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(id) => f.write_str(&id.name),
            Expr::Number(n) => f.write_str(&n.text),
            Expr::String(s) => write!(f, "'{}'", s.value),
            Expr::Boolean(b) => f.write_str(if b.value { "true" } else { "false" }),
            Expr::Binary(b) => write!(f, "{} {} {}", b.left, b.op, b.right),
            Expr::Unary(u) => write!(f, "{}{}", u.op, u.operand),
            Expr::Call(c) => {
                write!(f, "{}(", c.callee)?;
                for (i, arg) in c.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Member(m) => write!(f, "{}.{}", m.object, m.field),
            Expr::Index(i) => write!(f, "{}[{}]", i.array, i.index),
            Expr::Paren(p) => write!(f, "({})", p.inner),
        }
    }
}
