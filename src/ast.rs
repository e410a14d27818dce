//! # Rule Language - Syntax Types
//!
//! Types shared by the pipeline stages of the rule language, a small
//! JavaScript-flavoured syntax for business rules:
//!
//! ```text
//! COUNTRY == "MA" && (AMOUNT > 500 || AMOUNT == 0)
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified lexemes produced by the lexer and the resolver
//! - **[operators]** - Comparison operators and logical connectives
//! - **[expressions]** - The boolean tree the parser builds
//!
//! ## Pipeline
//!
//! ```text
//! text -> Lexer -> TokenStream -> Resolver -> Parser -> BoolExpr -> Evaluator -> bool
//! ```
//!
//! The resolver folds every value together with its trailing method calls
//! (`"a,b".split(",")`) into one value token. The parser checks the grammar,
//! evaluates each `value operator value` triple on the spot and keeps only
//! the resulting `0`/`1` leaves plus the connectives and parentheses.
//!
//! ## Operator Precedence
//!
//! There is none between `&&` and `||`. Chains fold left to right and
//! parentheses are the only grouping:
//!
//! ```text
//! 1 == 1 || 1 == 0 && 1 == 0    // (true || false) && false -> false
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::BoolExpr;
pub use operators::{ComparisonOp, Connective};
pub use tokens::{Token, TokenGroup, TokenKind};
