// ==========================================
// Capacidade dos CDs - Implementação da importação
// ==========================================
// Abre a pasta com calamine e delega para a extração do dia
// ou para a busca do backlog fluxo.
// ==========================================

use crate::config::LayoutConfig;
use crate::domain::capacity::{CapacityReport, FlowBacklog};
use crate::importer::capacity_extractor::process_day;
use crate::importer::capacity_importer_trait::CapacityImporter;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::CalamineWorkbook;
use crate::importer::flow_backlog::process_flow_backlog;
use std::path::Path;

// ==========================================
// CapacityImporterImpl
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CapacityImporterImpl {
    layout: LayoutConfig,
}

impl CapacityImporterImpl {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }
}

impl CapacityImporter for CapacityImporterImpl {
    fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    fn import_day<P: AsRef<Path>>(&self, file_path: P, dia: u32) -> ImportResult<CapacityReport> {
        let path = file_path.as_ref();
        tracing::debug!(path = %path.display(), dia, variant = %self.layout.variant, "Importando planilha de capacidade");

        let mut workbook = CalamineWorkbook::open(path)?;
        process_day(&mut workbook, dia, &self.layout)
    }

    fn import_flow_backlog<P: AsRef<Path>>(&self, file_path: P, dia: u32) -> ImportResult<FlowBacklog> {
        let path = file_path.as_ref();
        tracing::debug!(path = %path.display(), dia, "Importando backlog fluxo");

        let mut workbook = CalamineWorkbook::open(path)?;
        process_flow_backlog(&mut workbook, dia, &self.layout)
    }
}
