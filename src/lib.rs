pub use builder::{CommandSpec, EnvPatch, build, build_for_shell};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use quote::{DialectQuoter, QuoteMode, Quoted, Token};

pub mod assemble;
pub mod builder;
pub mod cli;
pub mod dialect;
mod error;
pub mod logger;
pub mod quote;
