// ==========================================
// Capacidade dos CDs - backlog fluxo do dia anterior
// ==========================================
// Pasta separada, aba "Dinâmicas":
// - linha de cabeçalho com as datas (108)
// - linhas 109..119 com os CDs (coluna A, ou B se A vazia/total)
// Busca a coluna do dia ANTERIOR ao dia informado.
// Dia 1 ou coluna não encontrada → mapa vazio (não é erro).
// ==========================================

use crate::config::LayoutConfig;
use crate::domain::capacity::FlowBacklog;
use crate::importer::data_cleaner::{cell_datetime, cell_text, is_blank, number_or_zero, raw_label};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::SheetGrid;
use crate::importer::file_parser::WorkbookSource;
use crate::importer::name_alias::canonical_name;
use calamine::{Data, Range};
use chrono::Datelike;

const PRIMARY_NAME_COL: u32 = 1; // A
const SECONDARY_NAME_COL: u32 = 2; // B

/// O cabeçalho corresponde ao dia procurado?
///
/// Ordem das verificações:
/// 1. texto do cabeçalho contém o número do dia
/// 2. data/hora com dia do mês igual
/// 3. texto "DD/MM/AAAA" com DD igual
pub fn header_matches(cell: Option<&Data>, target_day: u32) -> bool {
    if is_blank(cell) {
        return false;
    }
    let text = match cell_text(cell) {
        Some(t) => t,
        None => return false,
    };

    if text.contains(&target_day.to_string()) {
        return true;
    }

    if let Some(dt) = cell_datetime(cell) {
        return dt.day() == target_day;
    }

    if text.contains('/') {
        return text
            .split('/')
            .next()
            .and_then(|d| d.trim().parse::<u32>().ok())
            .map_or(false, |d| d == target_day);
    }

    false
}

/// Primeira coluna (1-based) do cabeçalho que corresponde ao dia
pub fn find_day_column(grid: &SheetGrid<'_>, layout: &LayoutConfig, target_day: u32) -> Option<u32> {
    layout
        .dynamics_scan_cols()
        .find(|col| header_matches(grid.cell(layout.dynamics_header_row, *col), target_day))
}

/// Nome do CD da linha: coluna A, ou B quando A está vazia ou é o total
fn row_name(grid: &SheetGrid<'_>, row: u32, total_label: &str) -> Option<String> {
    let usable = |name: Option<String>| name.filter(|n| n != total_label);

    usable(raw_label(grid.cell(row, PRIMARY_NAME_COL)))
        .or_else(|| usable(raw_label(grid.cell(row, SECONDARY_NAME_COL))))
}

/// Backlog fluxo por CD no dia anterior a `dia`
pub fn lookup_previous_day_flow(
    sheet: &Range<Data>,
    dia: u32,
    layout: &LayoutConfig,
) -> FlowBacklog {
    let mut backlog = FlowBacklog::new();

    if dia <= 1 {
        tracing::debug!(dia, "Sem dia anterior, backlog fluxo vazio");
        return backlog;
    }
    let previous_day = dia - 1;

    let grid = SheetGrid::new(sheet);
    let column = match find_day_column(&grid, layout, previous_day) {
        Some(col) => col,
        None => {
            tracing::warn!(previous_day, "Coluna do dia anterior não encontrada");
            return backlog;
        }
    };

    for row in layout.dynamics_rows() {
        let name = match row_name(&grid, row, &layout.dynamics_total_label) {
            Some(n) => n,
            None => continue,
        };

        let value = number_or_zero(grid.cell(row, column));
        backlog.insert(canonical_name(&name), value);
    }

    tracing::info!(previous_day, column, cds = backlog.len(), "Backlog fluxo lido");
    backlog
}

/// Abre a aba de dinâmicas e faz a busca; aba ausente é erro estrutural
pub fn process_flow_backlog<W: WorkbookSource + ?Sized>(
    workbook: &mut W,
    dia: u32,
    layout: &LayoutConfig,
) -> ImportResult<FlowBacklog> {
    if !workbook.has_sheet(&layout.dynamics_sheet) {
        return Err(ImportError::DynamicsSheetNotFound(layout.dynamics_sheet.clone()));
    }
    if dia <= 1 {
        return Ok(FlowBacklog::new());
    }

    let sheet = workbook.load_sheet(&layout.dynamics_sheet)?;
    Ok(lookup_previous_day_flow(&sheet, dia, layout))
}
