//! Parser tests grouped by grammar area.

mod cst;
mod declarations;
mod expressions;
mod precedence;
