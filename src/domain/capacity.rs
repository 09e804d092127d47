// ==========================================
// Capacidade dos CDs - modelo de resultado
// ==========================================
// Um CdRecord por linha não vazia do bloco de CDs,
// um PerdaRecord pareado por posição na lista.
// ==========================================

use crate::domain::types::StatusValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CdRecord - métricas de um centro de distribuição
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdRecord {
    pub nome: String,

    // ===== Capacidades (percentuais) =====
    pub capacidade_geral: Option<f64>,  // round(X / C * 100)
    pub capacidade_pallet: Option<f64>, // AM, heurística de escala
    pub capacidade_caixas: Option<f64>, // AH, heurística de escala

    // ===== Status de abertura =====
    pub status_inclusao: Option<StatusValue>,
    pub status_caixas: Option<StatusValue>,
    pub status_pallets: Option<StatusValue>,

    // ===== Dock de vendas =====
    pub dock_vendas: f64,
    pub inclusao: Option<f64>,
    pub total_com_inclusao: f64,

    // ===== Dock total =====
    pub dock_total_vendas: f64,
    pub dock_total_transferencias: f64,
    pub dock_total_geral: f64,

    pub agendamentos: f64,
    pub backlog_transferencias: f64,
    pub total_fluxo: Option<f64>, // só na variante fiscal

    // ===== Derivados do bloco de perdas =====
    pub backlog_vendas: f64,
    pub backlog_expedido: Option<f64>,
    pub fluxo_fiscal: Option<f64>,
    pub backlog_total: f64,
}

// ==========================================
// PerdaRecord - projeção para relatório
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerdaRecord {
    pub nome: String,
    pub perda_w: f64,
    pub perda_t: f64,
    /// Igual ao backlog_vendas do CD correspondente
    pub backlog: f64,
}

// ==========================================
// CapacityReport - resultado do dia
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub dia: u32,
    pub cds: Vec<CdRecord>,
    pub perdas: Vec<PerdaRecord>,
}

impl CapacityReport {
    /// Procura um CD pelo nome exato
    pub fn cd(&self, nome: &str) -> Option<&CdRecord> {
        self.cds.iter().find(|cd| cd.nome == nome)
    }

    pub fn total_backlog(&self) -> f64 {
        self.cds.iter().map(|cd| cd.backlog_total).sum()
    }
}

/// Backlog de fluxo do dia anterior, por nome canônico do CD
pub type FlowBacklog = BTreeMap<String, f64>;
