//! SQL statement navigation language server.
//!
//! Resolves the statement under the cursor, the cursor position for the
//! statement that follows it, and a per-statement outline. The server never
//! executes SQL: clients receive resolved text and positions (plus at most
//! a single newline edit to apply) and drive their own execution channel.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};

mod document;
mod lsp;
pub(crate) mod settings;
mod statement;

pub use document::{DocumentState, DocumentStore, LineIndex};
pub use lsp::{
    current_statement, document_text, next_statement, selection_text, statement_symbols,
    CurrentStatementResponse, NextStatementResponse, Placement, ResolvedStatement,
    SelectionTextParams, TextResponse,
};
pub use settings::{
    discover_settings, keyword_set_from_settings, load_settings, Settings, StatementSettings,
};
pub use statement::{
    logical_statement_at, next_statement_start, split, statement_at, KeywordSet, NextPlacement,
    NoStatement, Segment, Statement, DEFAULT_KEYWORDS,
};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    workspace_root: OnceLock<PathBuf>,
    keywords: OnceLock<KeywordSet>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            workspace_root: OnceLock::new(),
            keywords: OnceLock::new(),
        }
    }

    fn keyword_set(&self) -> &KeywordSet {
        // Initialized from settings during `initialize`; a client that
        // skips initialization gets the defaults.
        self.keywords.get_or_init(KeywordSet::default)
    }

    fn document(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri)
    }

    /// Handler for `sqlsp/currentStatement`.
    pub(crate) async fn current_statement(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<CurrentStatementResponse> {
        let Some(doc) = self.document(&params.text_document.uri) else {
            return Ok(CurrentStatementResponse {
                statement: None,
                reason: None,
            });
        };
        Ok(lsp::current_statement(
            &doc.line_index,
            self.keyword_set(),
            params.position,
        ))
    }

    /// Handler for `sqlsp/nextStatementStart`.
    pub(crate) async fn next_statement_start(
        &self,
        params: TextDocumentPositionParams,
    ) -> Result<NextStatementResponse> {
        let Some(doc) = self.document(&params.text_document.uri) else {
            return Ok(NextStatementResponse { placement: None });
        };
        Ok(lsp::next_statement(
            &doc.line_index,
            self.keyword_set(),
            params.position,
        ))
    }

    /// Handler for `sqlsp/selectionText`.
    pub(crate) async fn selection_text(&self, params: SelectionTextParams) -> Result<TextResponse> {
        let Some(doc) = self.document(&params.text_document.uri) else {
            return Ok(TextResponse { text: None });
        };
        Ok(lsp::selection_text(&doc.line_index, params.range))
    }

    /// Handler for `sqlsp/documentText`.
    pub(crate) async fn document_text(
        &self,
        params: TextDocumentIdentifier,
    ) -> Result<TextResponse> {
        let Some(doc) = self.document(&params.uri) else {
            return Ok(TextResponse { text: None });
        };
        Ok(lsp::document_text(&doc.line_index))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Extract workspace root from params
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        if let Some(root) = workspace_root {
            let _ = self.workspace_root.set(root.clone());

            // Discover settings by walking up the directory tree
            let (settings, _settings_dir) = settings::discover_settings(&root);
            let _ = self
                .keywords
                .set(settings::keyword_set_from_settings(&settings));
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                document_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "SQL statement navigation server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.documents.open(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents.open(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let Some(doc) = self.document(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(DocumentSymbolResponse::Nested(statement_symbols(
            &doc.line_index,
        ))))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(Backend::new)
        .custom_method("sqlsp/currentStatement", Backend::current_statement)
        .custom_method("sqlsp/nextStatementStart", Backend::next_statement_start)
        .custom_method("sqlsp/selectionText", Backend::selection_text)
        .custom_method("sqlsp/documentText", Backend::document_text)
        .finish()
}
