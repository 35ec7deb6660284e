//! LSP protocol feature implementations.
//!
//! This module provides implementations for the server's features:
//! - Custom statement-resolution requests and their payloads
//! - Document symbols (statement outline)

mod commands;
mod symbols;

pub use commands::{
    current_statement, document_text, next_statement, selection_text, CurrentStatementResponse,
    NextStatementResponse, Placement, ResolvedStatement, SelectionTextParams, TextResponse,
};
pub use symbols::statement_symbols;
