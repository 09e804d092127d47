// ==========================================
// Capacidade dos CDs - Trait de importação
// ==========================================
// Responsabilidade: interface de importação de pastas de trabalho
// (sem implementação)
// ==========================================

use crate::config::LayoutConfig;
use crate::domain::capacity::{CapacityReport, FlowBacklog};
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// CapacityImporter Trait
// ==========================================
// Implementador: CapacityImporterImpl
pub trait CapacityImporter: Send + Sync {
    /// Layout usado na leitura
    fn layout(&self) -> &LayoutConfig;

    /// Importa a aba do dia da planilha de capacidade
    ///
    /// # Retorno
    /// - Ok(CapacityReport): CDs e perdas do dia
    /// - Err(SheetNotFound): aba "<dia>" ausente
    /// - Err(Unexpected): falha ao abrir/ler a pasta, com contexto
    ///
    /// # Etapas
    /// 1. abrir a pasta (extensão e existência já verificadas)
    /// 2. localizar a aba do dia
    /// 3. mapear o bloco de CDs e derivar backlog pelo bloco de perdas
    fn import_day<P: AsRef<Path>>(&self, file_path: P, dia: u32) -> ImportResult<CapacityReport>;

    /// Importa o backlog fluxo do dia anterior (aba de dinâmicas)
    fn import_flow_backlog<P: AsRef<Path>>(&self, file_path: P, dia: u32) -> ImportResult<FlowBacklog>;
}
