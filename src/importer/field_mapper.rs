// ==========================================
// Capacidade dos CDs - mapa de colunas
// ==========================================
// Esquema por posição: cada campo do CD vive numa coluna fixa.
// A tabela CD_COLUMNS é a única fonte do mapa; read_row percorre
// a tabela e aplica a regra de coerção de cada entrada.
// ==========================================

use crate::domain::types::{LayoutVariant, StatusValue};
use crate::importer::data_cleaner::{
    parse_number_or, raw_label, scale_capacity_ratio, status_value, NumberPolicy,
};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Data, Range};
use std::collections::BTreeMap;

// ==========================================
// Coordenadas
// ==========================================

/// Letras de coluna → índice 1-based (A=1, Z=26, AA=27, AM=39)
pub fn column_index(letters: &str) -> ImportResult<u32> {
    let trimmed = letters.trim();
    if trimmed.is_empty() {
        return Err(ImportError::InvalidCoordinate(letters.to_string()));
    }

    let mut index: u32 = 0;
    for ch in trimmed.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(ImportError::InvalidCoordinate(letters.to_string()));
        }
        let digit = (ch.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ImportError::InvalidCoordinate(letters.to_string()))?;
    }
    Ok(index)
}

/// Coordenada de célula no formato "B4" (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl std::str::FromStr for CellRef {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ImportError::InvalidCoordinate(s.to_string()))?;
        let (letters, digits) = trimmed.split_at(split);

        let col = column_index(letters).map_err(|_| ImportError::InvalidCoordinate(s.to_string()))?;
        let row = digits
            .parse::<u32>()
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| ImportError::InvalidCoordinate(s.to_string()))?;

        Ok(CellRef { row, col })
    }
}

// ==========================================
// SheetGrid - leitura 1-based sobre calamine::Range
// ==========================================
#[derive(Clone, Copy)]
pub struct SheetGrid<'a> {
    range: &'a Range<Data>,
}

impl<'a> SheetGrid<'a> {
    pub fn new(range: &'a Range<Data>) -> Self {
        Self { range }
    }

    /// Célula na linha/coluna 1-based; fora da área usada → None
    pub fn cell(&self, row: u32, col: u32) -> Option<&'a Data> {
        if row == 0 || col == 0 {
            return None;
        }
        self.range.get_value((row - 1, col - 1))
    }

    /// Célula por coordenada textual ("AM4")
    pub fn cell_at(&self, coordinate: &str) -> ImportResult<Option<&'a Data>> {
        let cell_ref: CellRef = coordinate.parse()?;
        Ok(self.cell(cell_ref.row, cell_ref.col))
    }
}

// ==========================================
// Campos lidos da linha de um CD
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CdField {
    Nome,
    CapacidadeDenominador, // C
    DockVendas,            // D
    Inclusao,              // E
    VendasF,
    TotalFluxo,            // G
    VendasI,
    TransfN,
    TransfQ,
    BacklogTransferencias, // S
    TransfT,
    TransfU,
    CapacidadeNumerador,   // X
    StatusInclusao,        // Y
    StatusCaixas,          // Z
    StatusPallets,         // AA
    Agendamentos,          // AB
    CapacidadeCaixas,      // AH
    CapacidadePallet,      // AM
}

/// Regra de coerção de uma coluna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Texto do nome, sem TRIM; célula falsa pula a linha
    Label,
    /// Valor repassado como está
    Status,
    /// Número com padrão explícito
    Number(NumberPolicy),
    /// Percentual com heurística de escala (<= 10 → ×100)
    CapacityRatio,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: CdField,
    pub column: &'static str,
    pub coercion: Coercion,
    /// Lida só na variante fiscal
    pub fiscal_only: bool,
}

const fn spec(field: CdField, column: &'static str, coercion: Coercion) -> ColumnSpec {
    ColumnSpec {
        field,
        column,
        coercion,
        fiscal_only: false,
    }
}

const ACC: Coercion = Coercion::Number(NumberPolicy::Accumulator);
const OPT: Coercion = Coercion::Number(NumberPolicy::Standalone);

/// Mapa de colunas do bloco de CDs da aba do dia
pub const CD_COLUMNS: &[ColumnSpec] = &[
    spec(CdField::Nome, "B", Coercion::Label),
    spec(CdField::CapacidadeNumerador, "X", OPT),
    spec(CdField::CapacidadeDenominador, "C", OPT),
    spec(CdField::CapacidadePallet, "AM", Coercion::CapacityRatio),
    spec(CdField::CapacidadeCaixas, "AH", Coercion::CapacityRatio),
    spec(CdField::StatusInclusao, "Y", Coercion::Status),
    spec(CdField::StatusCaixas, "Z", Coercion::Status),
    spec(CdField::StatusPallets, "AA", Coercion::Status),
    spec(CdField::DockVendas, "D", ACC),
    spec(CdField::Inclusao, "E", OPT),
    spec(CdField::VendasF, "F", ACC),
    spec(CdField::VendasI, "I", ACC),
    spec(CdField::TransfN, "N", ACC),
    spec(CdField::TransfQ, "Q", ACC),
    spec(CdField::TransfT, "T", ACC),
    spec(CdField::TransfU, "U", ACC),
    spec(CdField::Agendamentos, "AB", ACC),
    spec(CdField::BacklogTransferencias, "S", ACC),
    ColumnSpec {
        field: CdField::TotalFluxo,
        column: "G",
        coercion: ACC,
        fiscal_only: true,
    },
];

/// Parcelas do dock total de vendas
pub const SALES_ADDENDS: &[CdField] = &[CdField::VendasF, CdField::VendasI];

/// Parcelas do dock total de transferências
pub const TRANSFER_ADDENDS: &[CdField] = &[
    CdField::TransfN,
    CdField::TransfQ,
    CdField::TransfT,
    CdField::TransfU,
];

// ==========================================
// RowReading - valores já coeridos de uma linha
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Label(Option<String>),
    Status(Option<StatusValue>),
    Number(Option<f64>),
}

#[derive(Debug, Clone)]
pub struct RowReading {
    pub row: u32,
    values: BTreeMap<CdField, FieldValue>,
}

impl RowReading {
    pub fn label(&self, field: CdField) -> Option<&str> {
        match self.values.get(&field) {
            Some(FieldValue::Label(v)) => v.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self, field: CdField) -> Option<StatusValue> {
        match self.values.get(&field) {
            Some(FieldValue::Status(v)) => v.clone(),
            _ => None,
        }
    }

    /// Número após a regra da coluna (None = ausente ou campo não lido)
    pub fn number(&self, field: CdField) -> Option<f64> {
        match self.values.get(&field) {
            Some(FieldValue::Number(v)) => *v,
            _ => None,
        }
    }

    /// Número com padrão 0
    pub fn amount(&self, field: CdField) -> f64 {
        self.number(field).unwrap_or(0.0)
    }

    /// Soma tolerante: parcela que falha contribui 0
    pub fn sum(&self, fields: &[CdField]) -> f64 {
        fields.iter().map(|f| self.amount(*f)).sum()
    }

    /// Se o campo foi lido nesta variante
    pub fn has(&self, field: CdField) -> bool {
        self.values.contains_key(&field)
    }
}

/// Percorre a tabela de colunas numa linha da aba
pub fn read_row(
    grid: &SheetGrid<'_>,
    row: u32,
    columns: &[ColumnSpec],
    variant: LayoutVariant,
) -> ImportResult<RowReading> {
    let mut values = BTreeMap::new();

    for column in columns {
        if column.fiscal_only && !variant.tracks_fiscal_flow() {
            continue;
        }

        let cell = grid.cell(row, column_index(column.column)?);
        let value = match column.coercion {
            Coercion::Label => FieldValue::Label(raw_label(cell)),
            Coercion::Status => FieldValue::Status(status_value(cell)),
            Coercion::Number(policy) => FieldValue::Number(parse_number_or(cell, policy)),
            Coercion::CapacityRatio => FieldValue::Number(
                parse_number_or(cell, NumberPolicy::Standalone).map(scale_capacity_ratio),
            ),
        };
        values.insert(column.field, value);
    }

    Ok(RowReading { row, values })
}
