// ==========================================
// Capacidade dos CDs - derivação de backlog e fluxo fiscal
// ==========================================
// Bloco de perdas: linha = início do bloco de CDs + deslocamento + posição
// do CD na lista já filtrada (não a linha de origem do CD).
// Colunas: G = perdas W, H = perdas T, I = faturado/expedido (fiscal)
// ==========================================

use crate::config::LayoutConfig;
use crate::domain::capacity::{CdRecord, PerdaRecord};
use crate::importer::data_cleaner::number_or_zero;
use crate::importer::field_mapper::SheetGrid;
use calamine::{Data, Range};

const PERDA_W_COL: u32 = 7; // G
const PERDA_T_COL: u32 = 8; // H
const FATURADO_EXPEDIDO_COL: u32 = 9; // I

/// Valores lidos de uma linha do bloco de perdas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LossReading {
    pub perda_w: f64,
    pub perda_t: f64,
    /// None na variante básica
    pub faturado_expedido: Option<f64>,
}

/// Backlog de vendas = (W + T) - faturado/expedido, nunca negativo
pub fn sales_backlog(loss: &LossReading) -> f64 {
    let gross = loss.perda_w + loss.perda_t;
    (gross - loss.faturado_expedido.unwrap_or(0.0)).max(0.0)
}

/// Fluxo fiscal = total de fluxo - faturado/expedido, nunca negativo
pub fn fiscal_flow(total_fluxo: f64, faturado_expedido: f64) -> f64 {
    (total_fluxo - faturado_expedido).max(0.0)
}

/// Preenche backlog_vendas / backlog_expedido / fluxo_fiscal / backlog_total
/// em cada CD e devolve a lista de perdas pareada por posição.
pub fn derive_backlog(
    cds: &mut [CdRecord],
    sheet: &Range<Data>,
    layout: &LayoutConfig,
) -> Vec<PerdaRecord> {
    let grid = SheetGrid::new(sheet);
    let fiscal = layout.variant.tracks_fiscal_flow();

    cds.iter_mut()
        .enumerate()
        .map(|(index, cd)| {
            let row = layout.perda_row(index);
            let loss = LossReading {
                perda_w: number_or_zero(grid.cell(row, PERDA_W_COL)),
                perda_t: number_or_zero(grid.cell(row, PERDA_T_COL)),
                faturado_expedido: fiscal
                    .then(|| number_or_zero(grid.cell(row, FATURADO_EXPEDIDO_COL))),
            };
            apply_loss(cd, &loss)
        })
        .collect()
}

/// Aplica a leitura de perdas a um CD e devolve a projeção de relatório
pub fn apply_loss(cd: &mut CdRecord, loss: &LossReading) -> PerdaRecord {
    let backlog_vendas = sales_backlog(loss);

    cd.backlog_vendas = backlog_vendas;
    cd.backlog_expedido = loss.faturado_expedido;
    cd.fluxo_fiscal = match (cd.total_fluxo, loss.faturado_expedido) {
        (Some(total), Some(billed)) => Some(fiscal_flow(total, billed)),
        _ => None,
    };
    cd.backlog_total = backlog_vendas + cd.backlog_transferencias;

    PerdaRecord {
        nome: cd.nome.clone(),
        perda_w: loss.perda_w,
        perda_t: loss.perda_t,
        backlog: backlog_vendas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LayoutVariant;
    use crate::importer::capacity_extractor::extract_cds;

    fn loss(w: f64, t: f64, billed: Option<f64>) -> LossReading {
        LossReading {
            perda_w: w,
            perda_t: t,
            faturado_expedido: billed,
        }
    }

    #[test]
    fn test_sales_backlog_floor() {
        assert_eq!(sales_backlog(&loss(50.0, 30.0, Some(100.0))), 0.0);
        assert_eq!(sales_backlog(&loss(50.0, 30.0, Some(20.0))), 60.0);
        assert_eq!(sales_backlog(&loss(50.0, 30.0, None)), 80.0);
    }

    #[test]
    fn test_fiscal_flow_floor() {
        assert_eq!(fiscal_flow(100.0, 40.0), 60.0);
        assert_eq!(fiscal_flow(10.0, 40.0), 0.0);
    }

    #[test]
    fn test_derive_backlog_fiscal_variant() {
        let mut range: Range<Data> = Range::new((0, 0), (30, 40));
        range.set_value((3, 1), Data::String("IGARASSU".to_string())); // B4
        range.set_value((3, 6), Data::Float(90.0)); // G4 total de fluxo
        range.set_value((3, 18), Data::Float(15.0)); // S4 backlog transf.
        range.set_value((15, 6), Data::Float(50.0)); // G16
        range.set_value((15, 7), Data::Float(30.0)); // H16
        range.set_value((15, 8), Data::Float(20.0)); // I16

        let layout = LayoutConfig::default();
        let mut cds = extract_cds(&range, &layout).unwrap();
        let perdas = derive_backlog(&mut cds, &range, &layout);

        let cd = &cds[0];
        assert_eq!(cd.backlog_vendas, 60.0);
        assert_eq!(cd.backlog_expedido, Some(20.0));
        assert_eq!(cd.fluxo_fiscal, Some(70.0));
        assert_eq!(cd.backlog_total, 75.0);

        assert_eq!(perdas.len(), 1);
        assert_eq!(perdas[0].nome, "IGARASSU");
        assert_eq!(perdas[0].perda_w, 50.0);
        assert_eq!(perdas[0].perda_t, 30.0);
        assert_eq!(perdas[0].backlog, 60.0);
    }

    #[test]
    fn test_derive_backlog_basic_variant_ignores_billed() {
        let mut range: Range<Data> = Range::new((0, 0), (30, 40));
        range.set_value((3, 1), Data::String("SERRA".to_string()));
        range.set_value((15, 6), Data::Float(50.0));
        range.set_value((15, 7), Data::Float(30.0));
        range.set_value((15, 8), Data::Float(100.0));

        let layout = LayoutConfig::with_variant(LayoutVariant::Basic);
        let mut cds = extract_cds(&range, &layout).unwrap();
        let perdas = derive_backlog(&mut cds, &range, &layout);

        assert_eq!(cds[0].backlog_vendas, 80.0);
        assert_eq!(cds[0].backlog_expedido, None);
        assert_eq!(cds[0].fluxo_fiscal, None);
        assert_eq!(perdas[0].backlog, 80.0);
    }

    #[test]
    fn test_non_numeric_losses_default_to_zero() {
        let mut range: Range<Data> = Range::new((0, 0), (30, 40));
        range.set_value((3, 1), Data::String("SERRA".to_string()));
        range.set_value((15, 6), Data::String("-".to_string()));
        range.set_value((15, 7), Data::Float(12.0));

        let layout = LayoutConfig::default();
        let mut cds = extract_cds(&range, &layout).unwrap();
        let perdas = derive_backlog(&mut cds, &range, &layout);

        assert_eq!(perdas[0].perda_w, 0.0);
        assert_eq!(cds[0].backlog_vendas, 12.0);
    }
}
