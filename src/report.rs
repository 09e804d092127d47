// ==========================================
// Capacidade dos CDs - relatório diário
// ==========================================
// Junta o resultado do dia com o backlog fluxo do dia anterior
// e gera a tabela de CDs em CSV para o relatório em texto.
// ==========================================

use crate::domain::capacity::{CapacityReport, FlowBacklog};
use crate::importer::name_alias::matches_site;
use serde::Serialize;
use std::io::Write;

/// Backlog fluxo do CD, procurando o local correspondente no mapa
pub fn site_flow_backlog(cd_name: &str, backlog: &FlowBacklog) -> Option<f64> {
    backlog
        .iter()
        .find(|(site, _)| matches_site(cd_name, site))
        .map(|(_, value)| *value)
}

/// Linha do relatório: CD + backlog fluxo do dia anterior
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<'a> {
    pub nome: &'a str,
    pub capacidade_geral: Option<f64>,
    pub capacidade_pallet: Option<f64>,
    pub capacidade_caixas: Option<f64>,
    pub total_com_inclusao: f64,
    pub dock_total_geral: f64,
    pub agendamentos: f64,
    pub backlog_vendas: f64,
    pub backlog_transferencias: f64,
    pub backlog_total: f64,
    pub fluxo_fiscal: Option<f64>,
    pub backlog_fluxo: Option<f64>,
}

/// Monta as linhas do relatório, na ordem dos CDs
pub fn report_rows<'a>(report: &'a CapacityReport, backlog: &FlowBacklog) -> Vec<ReportRow<'a>> {
    report
        .cds
        .iter()
        .map(|cd| ReportRow {
            nome: &cd.nome,
            capacidade_geral: cd.capacidade_geral,
            capacidade_pallet: cd.capacidade_pallet,
            capacidade_caixas: cd.capacidade_caixas,
            total_com_inclusao: cd.total_com_inclusao,
            dock_total_geral: cd.dock_total_geral,
            agendamentos: cd.agendamentos,
            backlog_vendas: cd.backlog_vendas,
            backlog_transferencias: cd.backlog_transferencias,
            backlog_total: cd.backlog_total,
            fluxo_fiscal: cd.fluxo_fiscal,
            backlog_fluxo: site_flow_backlog(&cd.nome, backlog),
        })
        .collect()
}

/// Escreve a tabela de CDs em CSV (campos ausentes ficam vazios)
pub fn write_csv<W: Write>(
    writer: W,
    report: &CapacityReport,
    backlog: &FlowBacklog,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in report_rows(report, backlog) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
