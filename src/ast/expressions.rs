use std::fmt;

use crate::ast::Connective;

/// Boolean expression tree built by the parser.
///
/// Every comparison has already been reduced to a [`BoolExpr::Leaf`] by the
/// time the tree exists; what remains is the connective and parenthesis
/// structure of the rule. An unparenthesised chain is a left-leaning spine of
/// [`BoolExpr::Binary`] nodes.
///
/// `Display` renders the boolean-algebra string (`1&(0|1)`).
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExpr {
    /// Empty rule; evaluates to `false`
    Empty,

    /// Result of one comparison
    Leaf(bool),

    /// Parenthesised sub-expression
    Group(Box<BoolExpr>),

    /// Two operands joined by `&&` or `||`
    Binary {
        op: Connective,
        left: Box<BoolExpr>,
        right: Box<BoolExpr>,
    },
}

impl BoolExpr {
    /// Joins `self` and `right` under `op`, keeping the chain left-associative.
    pub fn join(self, op: Connective, right: BoolExpr) -> BoolExpr {
        BoolExpr::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Flattens the left spine of a chain.
    ///
    /// `1&0|1` comes back as `(1, [(&, 0), (|, 1)])`. Long chains are walked
    /// in a loop instead of recursing once per connective.
    pub fn chain(&self) -> (&BoolExpr, Vec<(Connective, &BoolExpr)>) {
        let mut links = Vec::new();
        let mut node = self;
        while let BoolExpr::Binary { op, left, right } = node {
            links.push((*op, right.as_ref()));
            node = left;
        }
        links.reverse();
        (node, links)
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolExpr::Empty => Ok(()),
            BoolExpr::Leaf(b) => write!(f, "{}", *b as u8),
            BoolExpr::Group(inner) => write!(f, "({})", inner),
            BoolExpr::Binary { .. } => {
                let (first, links) = self.chain();
                write!(f, "{}", first)?;
                for (op, right) in links {
                    write!(f, "{}{}", op, right)?;
                }
                Ok(())
            }
        }
    }
}
