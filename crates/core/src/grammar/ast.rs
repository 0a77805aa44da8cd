use serde::{Deserialize, Serialize};

/// A boolean expression rebuilt from the postfix instruction sequence.
///
/// Each node owns its children. Negations folded into a contact name (a
/// leading `/`) stay in the name; only unfoldable `not`s become [`Expr::Not`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Expr {
    /// A named input, from `in`.
    Contact {
        /// Contact name, possibly carrying a leading `/`.
        name: String,
    },
    /// A system function call, treated as an opaque operand.
    Call {
        /// Function name followed by its argument tokens.
        tokens: Vec<String>,
    },
    /// Logical negation of the operand.
    Not {
        /// Negated subtree.
        operand: Box<Expr>,
    },
    /// Series connection: both sides must conduct.
    And {
        /// Earlier-pushed operand.
        left: Box<Expr>,
        /// Later-pushed operand.
        right: Box<Expr>,
    },
    /// Parallel connection: either side may conduct.
    Or {
        /// Earlier-pushed operand.
        left: Box<Expr>,
        /// Later-pushed operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Lowercase kind name, as used in the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Contact { .. } => "contact",
            Expr::Call { .. } => "call",
            Expr::Not { .. } => "not",
            Expr::And { .. } => "and",
            Expr::Or { .. } => "or",
        }
    }

    /// A contact leaf.
    pub fn contact(name: impl Into<String>) -> Self {
        Expr::Contact { name: name.into() }
    }

    /// Series combination of two subtrees.
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Parallel combination of two subtrees.
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Negation of a subtree.
    pub fn not(operand: Expr) -> Self {
        Expr::Not {
            operand: Box::new(operand),
        }
    }

    /// Terms of a left-leaning chain of [`Expr::And`] nodes, left to right.
    ///
    /// A non-`and` expression is its own single term.
    pub fn series_terms(&self) -> Vec<&Expr> {
        let mut terms = Vec::new();
        let mut node = self;
        while let Expr::And { left, right } = node {
            terms.push(right.as_ref());
            node = left;
        }
        terms.push(node);
        terms.reverse();
        terms
    }

    /// Move the boxed children out, leaving empty contacts behind.
    fn take_children(&mut self, into: &mut Vec<Expr>) {
        let hollow = || Expr::Contact {
            name: String::new(),
        };
        match self {
            Expr::Contact { .. } | Expr::Call { .. } => {}
            Expr::Not { operand } => into.push(std::mem::replace(operand.as_mut(), hollow())),
            Expr::And { left, right } | Expr::Or { left, right } => {
                into.push(std::mem::replace(left.as_mut(), hollow()));
                into.push(std::mem::replace(right.as_mut(), hollow()));
            }
        }
    }

    /// Branches of a left-leaning chain of [`Expr::Or`] nodes, in drawing order.
    ///
    /// A non-`or` expression is its own single branch.
    pub fn or_branches(&self) -> Vec<&Expr> {
        let mut branches = Vec::new();
        let mut node = self;
        while let Expr::Or { left, right } = node {
            branches.push(right.as_ref());
            node = left;
        }
        branches.push(node);
        branches.reverse();
        branches
    }
}

// Long series chains nest one box per contact; tear them down with a work
// list so dropping never recurses more than one level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

/// One completed rung expression: a value written to a named coil.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coil {
    /// Coil name, possibly carrying a leading `/`.
    pub name: String,
    /// Expression driving the coil.
    pub value: Expr,
}
