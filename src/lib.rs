pub mod ast;
pub mod bindings;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod stream;
pub mod value;

pub use ast::{BoolExpr, ComparisonOp, Connective, Token, TokenGroup, TokenKind};
pub use bindings::Bindings;
pub use config::{EngineConfig, Limits};
pub use engine::{Engine, Rule};
pub use error::{CallError, RuleError};
pub use evaluator::{evaluate, evaluate_algebra};
pub use functions::{Callable, Registry};
pub use grammar::Grammar;
pub use lexer::{Lexer, Location};
pub use parser::Parser;
pub use resolver::Resolver;
pub use stream::TokenStream;
pub use value::{RegexLiteral, Value};
