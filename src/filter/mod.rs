//! Filter-expression language for querying inventory and results.
//!
//! Syntax (clauses joined by `,` are ANDed together):
//!
//!   field<value             - value is a substring
//!   field!<value            - value is not a substring
//!   field=value             - exact match
//!   field!=value            - no exact match
//!   field{value             - starts with
//!   field!{value            - does not start with
//!   field}value             - ends with
//!   field!}value            - does not end with
//!
//! Field names address the flattened record, so nested values are reachable
//! with dotted names (`network.ip{10.`). Result filtering ignores the field
//! name and tests the bare value.

mod ast;
mod eval;
mod parser;

pub use ast::*;
pub use eval::{filter_inventory, filter_results};
pub use parser::classify;
