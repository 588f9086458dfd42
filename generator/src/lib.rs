//! # reportgen-generator
//!
//! Generates BeanShell evaluator scripts from report expression graphs.
//!
//! A [`GenerationContext`] holds the parameter, field and variable tables of
//! one dataset or crosstab together with its expressions. The generator turns
//! it into a script exposing `init(...)` plus one `evaluate` method per
//! evaluation phase (current, old, estimated), each switching on the
//! expression id.
//!
//! ## Example
//!
//! ```rust
//! use reportgen_generator::{generate, Expression, ExpressionChunk, GenerationContext};
//!
//! let context = GenerationContext::new("Invoice").with_expressions(vec![Expression::new(
//!     0,
//!     "java.lang.String",
//!     vec![ExpressionChunk::ResourceRef("title".to_string())],
//! )]);
//! let script = generate(&context)?;
//! assert!(script.contains("super.evaluator.str(\"title\")"));
//! # Ok::<(), reportgen_generator::GeneratorError>(())
//! ```

pub mod ast;
pub mod beanshell;
pub mod chunk;
pub mod error;
pub mod literal;
pub mod phase;

pub use ast::{Expression, ExpressionChunk, GenerationContext, Symbol, SymbolKind, SymbolTable};
pub use beanshell::{
    generate, generate_with_config, write_script_to_file, BeanShellConfig, BeanShellGenerator,
    BeanShellOutput,
};
pub use chunk::{ChunkCompiler, CompiledExpression};
pub use error::GeneratorError;
pub use phase::{EvaluationPhase, PhaseAffixes};
