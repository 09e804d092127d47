// ==========================================
// Capacidade dos CDs - camada de importação
// ==========================================
// Responsabilidade: planilha → CapacityReport / FlowBacklog
// Leitura por coordenadas fixas, coerção tolerante, derivações
// ==========================================

pub mod capacity_extractor;
pub mod capacity_importer_impl;
pub mod capacity_importer_trait;
pub mod data_cleaner;
pub mod derivation;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod flow_backlog;
pub mod name_alias;

pub use capacity_extractor::{extract_cds, extract_report, process_day, MAX_DAY};
pub use capacity_importer_impl::CapacityImporterImpl;
pub use capacity_importer_trait::CapacityImporter;
pub use data_cleaner::{parse_number_or, scale_capacity_ratio, NumberPolicy};
pub use derivation::derive_backlog;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{CellRef, SheetGrid, CD_COLUMNS};
pub use file_parser::{CalamineWorkbook, InMemoryWorkbook, WorkbookSource, ALLOWED_EXTENSIONS};
pub use flow_backlog::{lookup_previous_day_flow, process_flow_backlog};
pub use name_alias::{canonical_name, matches_site};
