// ==========================================
// Capacidade dos CDs - camada de domínio
// ==========================================
// Registros de resultado e tipos compartilhados.
// Sem acesso a planilhas aqui.
// ==========================================

pub mod capacity;
pub mod types;

pub use capacity::{CapacityReport, CdRecord, FlowBacklog, PerdaRecord};
pub use types::{LayoutVariant, StatusValue};
