// ==========================================
// Capacidade dos CDs - biblioteca
// ==========================================
// Planilha diária de operação → capacidade, backlog e fluxo fiscal
// por centro de distribuição.
// ==========================================

// Domínio - registros de resultado
pub mod domain;

// Configuração - layout da planilha
pub mod config;

// Importação - leitura e derivações
pub mod importer;

// Relatório - junção com backlog fluxo, CSV
pub mod report;

// API - fluxo de upload
pub mod api;

// Logs
pub mod logging;

// ==========================================
// Reexportações
// ==========================================

pub use config::LayoutConfig;
pub use domain::{CapacityReport, CdRecord, FlowBacklog, LayoutVariant, PerdaRecord, StatusValue};
pub use importer::{
    derive_backlog, extract_cds, lookup_previous_day_flow, process_day, process_flow_backlog,
    CalamineWorkbook, CapacityImporter, CapacityImporterImpl, ImportError, ImportResult,
    InMemoryWorkbook, WorkbookSource,
};
pub use api::{ApiError, ApiResponse, CapacityApi, UploadedFile};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Capacidade dos CDs";
