// ==========================================
// Capacidade dos CDs - coerção de células
// ==========================================
// Células heterogêneas → número / texto / status.
// Falha de coerção nunca levanta erro: cada campo
// declara a política de padrão que usa.
// ==========================================

use crate::domain::types::StatusValue;
use calamine::Data;
use chrono::NaiveDateTime;

/// Limite da heurística de escala: valores <= 10 são frações (0.865 → 86.5%)
pub const FRACTION_SCALE_LIMIT: f64 = 10.0;

// ==========================================
// NumberPolicy - padrão quando a coerção falha
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Campos acumuladores (dock, backlog, parcelas de soma): 0
    Accumulator,
    /// Métricas isoladas (percentuais): ausente
    Standalone,
}

/// Tenta converter a célula em número finito
///
/// - Float/Int → valor
/// - Bool → 1 / 0
/// - String → parse após TRIM
/// - Vazio, erro, data/hora → None
pub fn coerce_number(cell: Option<&Data>) -> Option<f64> {
    let value = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Data::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    // NaN/inf não têm representação no JSON de saída
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Coerção com política explícita: `Some(0.0)` ou `None` em caso de falha
pub fn parse_number_or(cell: Option<&Data>, policy: NumberPolicy) -> Option<f64> {
    match coerce_number(cell) {
        Some(v) => Some(v),
        None => {
            if let Some(raw) = cell.filter(|c| !is_blank(Some(*c))) {
                tracing::trace!(?raw, ?policy, "Célula não numérica, usando padrão");
            }
            match policy {
                NumberPolicy::Accumulator => Some(0.0),
                NumberPolicy::Standalone => None,
            }
        }
    }
}

/// Atalho para acumuladores
pub fn number_or_zero(cell: Option<&Data>) -> f64 {
    parse_number_or(cell, NumberPolicy::Accumulator).unwrap_or(0.0)
}

/// Heurística de escala para capacidade de pallet/caixas
///
/// - valor <= 10 (inclusivo): fração, multiplica por 100 e arredonda
/// - valor > 10: já é percentual, só arredonda
pub fn scale_capacity_ratio(value: f64) -> f64 {
    if value <= FRACTION_SCALE_LIMIT {
        (value * 100.0).round()
    } else {
        value.round()
    }
}

/// Célula "falsa": ausente, Empty, texto vazio, 0 ou false
///
/// Texto só com espaços NÃO é falso.
pub fn is_falsy(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.is_empty(),
        Some(Data::Float(f)) => *f == 0.0,
        Some(Data::Int(i)) => *i == 0,
        Some(Data::Bool(b)) => !*b,
        Some(_) => false,
    }
}

/// Célula considerada vazia: falsa ou texto em branco
pub fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        Some(Data::String(s)) => s.trim().is_empty(),
        other => is_falsy(other),
    }
}

/// Data/hora da célula, se houver
pub fn cell_datetime(cell: Option<&Data>) -> Option<NaiveDateTime> {
    match cell? {
        Data::DateTime(dt) => dt.as_datetime(),
        Data::DateTimeIso(s) => parse_iso_datetime(s),
        _ => None,
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Texto da célula como exibido (datas em `YYYY-MM-DD HH:MM:SS`)
///
/// Números inteiros em ponto flutuante saem como `14.0`, preservando
/// a forma textual usada na busca de cabeçalhos.
pub fn cell_text(cell: Option<&Data>) -> Option<String> {
    let cell = cell?;
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{:.1}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell_datetime(Some(cell)) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string(),
    };
    Some(text)
}

/// Nome de CD como está na célula (sem TRIM); célula falsa → None
pub fn raw_label(cell: Option<&Data>) -> Option<String> {
    if is_falsy(cell) {
        return None;
    }
    cell_text(cell)
}

/// Status de abertura: valor repassado sem coerção
pub fn status_value(cell: Option<&Data>) -> Option<StatusValue> {
    match cell? {
        Data::Empty => None,
        Data::String(s) => Some(StatusValue::Text(s.clone())),
        Data::Float(f) => Some(StatusValue::Number(*f)),
        Data::Int(i) => Some(StatusValue::Number(*i as f64)),
        Data::Bool(b) => Some(StatusValue::Flag(*b)),
        other => cell_text(Some(other)).map(StatusValue::Text),
    }
}
