// ==========================================
// Capacidade dos CDs - extração da aba do dia
// ==========================================
// Fluxo:
// 1. localizar a aba "<dia>"
// 2. percorrer o bloco de CDs (linhas fixas) → CdRecord
// 3. derivar backlog / fluxo fiscal pelo bloco de perdas → PerdaRecord
// Função pura sobre a grade carregada; nada é guardado entre chamadas.
// ==========================================

use crate::config::LayoutConfig;
use crate::domain::capacity::{CapacityReport, CdRecord};
use crate::importer::derivation::derive_backlog;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{
    read_row, CdField, RowReading, SheetGrid, CD_COLUMNS, SALES_ADDENDS, TRANSFER_ADDENDS,
};
use crate::importer::file_parser::WorkbookSource;
use calamine::{Data, Range};

/// Maior dia aceito (abas "1".."31")
pub const MAX_DAY: u32 = 31;

/// Nome da aba de um dia
pub fn day_sheet_name(dia: u32) -> String {
    dia.to_string()
}

// ==========================================
// Extração por CD
// ==========================================

/// Lê o bloco de CDs e monta um registro por linha com nome.
///
/// Campos derivados do bloco de perdas saem zerados aqui e são
/// preenchidos por `derive_backlog`.
pub fn extract_cds(sheet: &Range<Data>, layout: &LayoutConfig) -> ImportResult<Vec<CdRecord>> {
    let grid = SheetGrid::new(sheet);
    let mut cds = Vec::new();

    for row in layout.cd_rows() {
        let reading = read_row(&grid, row, CD_COLUMNS, layout.variant)?;

        match build_cd(&reading) {
            Some(cd) => cds.push(cd),
            None => tracing::debug!(row, "Linha de CD sem nome, ignorada"),
        }
    }

    Ok(cds)
}

/// Monta o CdRecord a partir da linha lida; linha sem nome → None
fn build_cd(reading: &RowReading) -> Option<CdRecord> {
    let nome = reading.label(CdField::Nome)?.to_string();

    let capacidade_geral = general_capacity(
        reading.number(CdField::CapacidadeNumerador),
        reading.number(CdField::CapacidadeDenominador),
    );

    let dock_vendas = reading.amount(CdField::DockVendas);
    let inclusao = reading.number(CdField::Inclusao).filter(|v| *v != 0.0);
    let total_com_inclusao = match inclusao {
        Some(extra) => dock_vendas + extra,
        None => dock_vendas,
    };

    let dock_total_vendas = reading.sum(SALES_ADDENDS);
    let dock_total_transferencias = reading.sum(TRANSFER_ADDENDS);
    let backlog_transferencias = reading.amount(CdField::BacklogTransferencias);

    let total_fluxo = if reading.has(CdField::TotalFluxo) {
        Some(reading.amount(CdField::TotalFluxo))
    } else {
        None
    };

    Some(CdRecord {
        nome,
        capacidade_geral,
        capacidade_pallet: reading.number(CdField::CapacidadePallet),
        capacidade_caixas: reading.number(CdField::CapacidadeCaixas),
        status_inclusao: reading.status(CdField::StatusInclusao),
        status_caixas: reading.status(CdField::StatusCaixas),
        status_pallets: reading.status(CdField::StatusPallets),
        dock_vendas,
        inclusao,
        total_com_inclusao,
        dock_total_vendas,
        dock_total_transferencias,
        dock_total_geral: dock_total_vendas + dock_total_transferencias,
        agendamentos: reading.amount(CdField::Agendamentos),
        backlog_transferencias,
        total_fluxo,
        backlog_vendas: 0.0,
        backlog_expedido: None,
        fluxo_fiscal: None,
        backlog_total: backlog_transferencias,
    })
}

/// Capacidade geral = round(X / C * 100); sem heurística de escala
pub fn general_capacity(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(x), Some(c)) if c != 0.0 => {
            let value = (x / c * 100.0).round();
            value.is_finite().then_some(value)
        }
        _ => None,
    }
}

// ==========================================
// Extração completa de um dia
// ==========================================

/// Extrai CDs e perdas de uma aba já carregada
pub fn extract_report(
    sheet: &Range<Data>,
    dia: u32,
    layout: &LayoutConfig,
) -> ImportResult<CapacityReport> {
    let mut cds = extract_cds(sheet, layout)?;
    let perdas = derive_backlog(&mut cds, sheet, layout);

    tracing::info!(dia, cds = cds.len(), variant = %layout.variant, "Aba do dia processada");

    Ok(CapacityReport { dia, cds, perdas })
}

/// Localiza a aba do dia na pasta e extrai o relatório.
///
/// Aba ausente é erro estrutural; demais falhas chegam com contexto.
pub fn process_day<W: WorkbookSource + ?Sized>(
    workbook: &mut W,
    dia: u32,
    layout: &LayoutConfig,
) -> ImportResult<CapacityReport> {
    if dia == 0 || dia > MAX_DAY {
        return Err(ImportError::InvalidDay(dia));
    }

    let sheet_name = day_sheet_name(dia);
    if !workbook.has_sheet(&sheet_name) {
        tracing::warn!(sheet = %sheet_name, "Aba do dia não encontrada");
        return Err(ImportError::SheetNotFound(sheet_name));
    }

    let sheet = workbook.load_sheet(&sheet_name)?;
    extract_report(&sheet, dia, layout)
        .map_err(|e| ImportError::unexpected(format!("Falha ao extrair o dia {}", dia), e))
}
