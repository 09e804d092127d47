// ==========================================
// Testes de integração - extração da aba do dia
// ==========================================
// Grade em memória → process_day → CapacityReport
// ==========================================


use calamine::Data;
use cd_capacity::importer::{process_day, ImportError, InMemoryWorkbook};
use cd_capacity::{logging, CapacityReport, LayoutConfig, LayoutVariant};
use test_helpers::{with_cd, with_losses, SheetBuilder};

fn fiscal() -> LayoutConfig {
    LayoutConfig::with_variant(LayoutVariant::Fiscal)
}

fn run(sheet: SheetBuilder, dia: u32, layout: &LayoutConfig) -> CapacityReport {
    let mut workbook = InMemoryWorkbook::new().with_sheet(&dia.to_string(), sheet.build());
    process_day(&mut workbook, dia, layout).unwrap()
}

// ==========================================
// Aba ausente
// ==========================================

#[test]
fn test_missing_day_sheet_for_every_day() {
    logging::init_test();
    let layout = fiscal();

    for dia in 1..=31 {
        let mut workbook = InMemoryWorkbook::new().with_sheet("Resumo", SheetBuilder::new().build());
        let err = process_day(&mut workbook, dia, &layout).unwrap_err();

        assert!(err.is_structural());
        match err {
            ImportError::SheetNotFound(name) => assert_eq!(name, dia.to_string()),
            other => panic!("erro inesperado: {:?}", other),
        }
    }
}

#[test]
fn test_day_out_of_range() {
    let mut workbook = InMemoryWorkbook::new();
    assert!(matches!(
        process_day(&mut workbook, 0, &fiscal()),
        Err(ImportError::InvalidDay(0))
    ));
    assert!(matches!(
        process_day(&mut workbook, 32, &fiscal()),
        Err(ImportError::InvalidDay(32))
    ));
}

// ==========================================
// Capacidades
// ==========================================

#[test]
fn test_capacity_scaling_heuristic() {
    logging::init_test();
    let sheet = with_cd(SheetBuilder::new(), 4, "SERRA", 0.865, 92.0);
    let sheet = with_cd(sheet, 5, "LOUVEIRA", 10.0, 10.5);

    let report = run(sheet, 5, &fiscal());

    let serra = report.cd("SERRA").unwrap();
    assert_eq!(serra.capacidade_pallet, Some(87.0));
    assert_eq!(serra.capacidade_caixas, Some(92.0));

    // Limite inclusivo: 10 ainda é fração
    let louveira = report.cd("LOUVEIRA").unwrap();
    assert_eq!(louveira.capacidade_pallet, Some(1000.0));
    assert_eq!(louveira.capacidade_caixas, Some(11.0));
}

#[test]
fn test_general_capacity_and_blank_ratios() {
    let sheet = SheetBuilder::new()
        .text("B4", "IGARASSU")
        .num("X4", 45.0)
        .num("C4", 60.0)
        .text("B5", "INDAIATUBA")
        .num("X5", 10.0)
        .num("C5", 0.0)
        .text("AM5", "n/d");

    let report = run(sheet, 2, &fiscal());

    let igarassu = report.cd("IGARASSU").unwrap();
    assert_eq!(igarassu.capacidade_geral, Some(75.0));
    assert_eq!(igarassu.capacidade_pallet, None);

    let indaiatuba = report.cd("INDAIATUBA").unwrap();
    assert_eq!(indaiatuba.capacidade_geral, None);
    assert_eq!(indaiatuba.capacidade_pallet, None);
}

// ==========================================
// Dock e inclusão
// ==========================================

#[test]
fn test_dock_totals_and_inclusion() {
    let sheet = SheetBuilder::new()
        .text("B4", "SERRA")
        .num("D4", 120.0)
        .num("E4", 15.0)
        .num("F4", 40.0)
        .text("I4", "12")
        .num("N4", 1.0)
        .num("Q4", 2.0)
        .text("T4", "x")
        .num("U4", 4.0)
        .num("AB4", 9.0)
        .num("S4", 7.0)
        .text("B5", "LOUVEIRA")
        .num("D5", 80.0)
        .num("E5", 0.0);

    let report = run(sheet, 10, &fiscal());

    let serra = report.cd("SERRA").unwrap();
    assert_eq!(serra.inclusao, Some(15.0));
    assert_eq!(serra.total_com_inclusao, 135.0);
    assert_eq!(serra.dock_total_vendas, 52.0);
    assert_eq!(serra.dock_total_transferencias, 7.0);
    assert_eq!(serra.dock_total_geral, 59.0);
    assert_eq!(serra.agendamentos, 9.0);
    assert_eq!(serra.backlog_transferencias, 7.0);

    let louveira = report.cd("LOUVEIRA").unwrap();
    assert_eq!(louveira.inclusao, None);
    assert_eq!(louveira.total_com_inclusao, 80.0);
}

// ==========================================
// Backlog
// ==========================================

#[test]
fn test_sales_backlog_never_negative() {
    let sheet = SheetBuilder::new().text("B4", "SERRA");
    let sheet = with_losses(sheet, 16, 50.0, 30.0, 100.0);

    let report = run(sheet, 3, &fiscal());

    assert_eq!(report.cds[0].backlog_vendas, 0.0);
    assert_eq!(report.perdas[0].backlog, 0.0);
}

#[test]
fn test_fiscal_backlog_derivation() {
    let sheet = SheetBuilder::new()
        .text("B4", "SERRA")
        .num("G4", 90.0)
        .num("S4", 5.0);
    let sheet = with_losses(sheet, 16, 50.0, 30.0, 20.0);

    let report = run(sheet, 3, &fiscal());
    let serra = &report.cds[0];

    assert_eq!(serra.backlog_vendas, 60.0);
    assert_eq!(serra.backlog_expedido, Some(20.0));
    assert_eq!(serra.total_fluxo, Some(90.0));
    assert_eq!(serra.fluxo_fiscal, Some(70.0));
    assert_eq!(serra.backlog_total, 65.0);

    let perda = &report.perdas[0];
    assert_eq!(perda.nome, "SERRA");
    assert_eq!(perda.perda_w, 50.0);
    assert_eq!(perda.perda_t, 30.0);
    assert_eq!(perda.backlog, 60.0);
}

#[test]
fn test_basic_variant_ignores_billed_column() {
    let sheet = SheetBuilder::new()
        .text("B4", "SERRA")
        .num("G4", 90.0);
    let sheet = with_losses(sheet, 16, 50.0, 30.0, 20.0);

    let report = run(sheet, 3, &LayoutConfig::with_variant(LayoutVariant::Basic));
    let serra = &report.cds[0];

    assert_eq!(serra.backlog_vendas, 80.0);
    assert_eq!(serra.total_fluxo, None);
    assert_eq!(serra.backlog_expedido, None);
    assert_eq!(serra.fluxo_fiscal, None);
}

#[test]
fn test_blank_row_skipped_and_losses_paired_by_position() {
    logging::init_test();
    let sheet = SheetBuilder::new()
        .text("B4", "SERRA")
        .text("B6", "LOUVEIRA");
    let sheet = with_losses(sheet, 16, 10.0, 0.0, 0.0);
    let sheet = with_losses(sheet, 17, 20.0, 0.0, 0.0);
    let sheet = with_losses(sheet, 18, 99.0, 0.0, 0.0);

    let report = run(sheet, 4, &fiscal());

    assert_eq!(report.cds.len(), 2);
    assert_eq!(report.perdas.len(), report.cds.len());

    // LOUVEIRA é o 2º da lista: lê a linha 17, não a 18
    assert_eq!(report.perdas[1].nome, "LOUVEIRA");
    assert_eq!(report.perdas[1].perda_w, 20.0);
    assert_eq!(report.cds[1].backlog_vendas, 20.0);

    for (cd, perda) in report.cds.iter().zip(&report.perdas) {
        assert_eq!(cd.nome, perda.nome);
        assert_eq!(cd.backlog_vendas, perda.backlog);
    }
}

#[test]
fn test_blank_first_row_still_pairs_from_block_start() {
    let sheet = SheetBuilder::new()
        .text("B4", "")
        .text("B5", "IGARASSU");
    let sheet = with_losses(sheet, 16, 11.0, 1.0, 0.0);
    let sheet = with_losses(sheet, 17, 77.0, 7.0, 0.0);

    let report = run(sheet, 8, &fiscal());

    assert_eq!(report.cds.len(), 1);
    assert_eq!(report.cds[0].nome, "IGARASSU");
    assert_eq!(report.perdas[0].perda_w, 11.0);
    assert_eq!(report.cds[0].backlog_vendas, 12.0);
}

#[test]
fn test_whitespace_name_kept_as_found() {
    let sheet = SheetBuilder::new()
        .text("B4", "   ")
        .text("B5", "  SERRA ");
    let sheet = with_losses(sheet, 16, 1.0, 0.0, 0.0);
    let sheet = with_losses(sheet, 17, 30.0, 5.0, 0.0);

    let report = run(sheet, 9, &fiscal());

    let names: Vec<&str> = report.cds.iter().map(|cd| cd.nome.as_str()).collect();
    assert_eq!(names, vec!["   ", "  SERRA "]);

    // Segundo da lista: perdas da linha 17
    assert_eq!(report.perdas[1].nome, "  SERRA ");
    assert_eq!(report.perdas[1].perda_w, 30.0);
    assert_eq!(report.cds[1].backlog_vendas, 35.0);
}

#[test]
fn test_falsy_name_cells_skip_the_row() {
    let sheet = SheetBuilder::new()
        .num("B4", 0.0)
        .set("B5", Data::Bool(false))
        .num("B6", 5.0);

    let report = run(sheet, 2, &fiscal());

    assert_eq!(report.cds.len(), 1);
    assert_eq!(report.cds[0].nome, "5.0");
}

#[test]
fn test_status_values_kept_as_read() {
    let sheet = SheetBuilder::new()
        .text("B4", "SERRA")
        .text("Y4", "ABERTO")
        .num("Z4", 1.0)
        .set("AA4", Data::Bool(true));

    let report = run(sheet, 6, &fiscal());
    let json = serde_json::to_value(&report.cds[0]).unwrap();

    assert_eq!(json["status_inclusao"], "ABERTO");
    assert_eq!(json["status_caixas"], 1.0);
    assert_eq!(json["status_pallets"], true);
}

// ==========================================
// Determinismo
// ==========================================

#[test]
fn test_extraction_is_deterministic() {
    let build = || {
        let sheet = with_cd(SheetBuilder::new(), 4, "SERRA", 0.5, 61.0)
            .num("X4", 3.0)
            .num("C4", 7.0)
            .num("G4", 40.0);
        let sheet = with_cd(sheet, 7, "JABOATÃO", 0.75, 0.2);
        let sheet = with_losses(sheet, 16, 5.0, 6.0, 2.0);
        with_losses(sheet, 17, 1.0, 1.0, 1.0)
    };

    let first = run(build(), 12, &fiscal());
    let second = run(build(), 12, &fiscal());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
