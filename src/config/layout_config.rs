// ==========================================
// Capacidade dos CDs - configuração de layout
// ==========================================
// Onde ficam os blocos na planilha diária e na aba de dinâmicas.
// Fonte: arquivo JSON (opcional) + padrões embutidos
// ==========================================

use crate::domain::types::LayoutVariant;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Nome do arquivo de layout dentro do diretório de configuração
pub const LAYOUT_FILE_NAME: &str = "layout.json";

/// Subdiretório da aplicação em `dirs::config_dir()`
pub const APP_CONFIG_DIR: &str = "cd-capacity";

/// Limites de uma aba .xlsx
pub const MAX_SHEET_ROWS: u32 = 1_048_576;
pub const MAX_SHEET_COLS: u32 = 16_384;

// ==========================================
// LayoutConfig
// ==========================================
// Linhas e colunas são 1-based, como aparecem no Excel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Revisão da planilha em uso nesta implantação
    pub variant: LayoutVariant,

    // ===== Aba do dia =====
    pub cd_first_row: u32,
    pub cd_last_row: u32,
    /// Deslocamento do bloco de perdas em relação ao início do bloco de CDs
    pub perda_row_offset: u32,

    // ===== Aba de dinâmicas (backlog fluxo) =====
    pub dynamics_sheet: String,
    pub dynamics_header_row: u32,
    pub dynamics_first_scan_col: u32,
    pub dynamics_last_scan_col: u32,
    pub dynamics_first_row: u32,
    pub dynamics_last_row: u32,
    /// Rótulo de linha de totais, ignorado como nome de CD
    pub dynamics_total_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            variant: LayoutVariant::Fiscal,
            cd_first_row: 4,
            cd_last_row: 11,
            perda_row_offset: 12,
            dynamics_sheet: "Dinâmicas".to_string(),
            dynamics_header_row: 108,
            dynamics_first_scan_col: 1,
            dynamics_last_scan_col: 49,
            dynamics_first_row: 109,
            dynamics_last_row: 119,
            dynamics_total_label: "Total Geral".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Layout padrão com a variante informada
    pub fn with_variant(variant: LayoutVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    pub fn cd_rows(&self) -> RangeInclusive<u32> {
        self.cd_first_row..=self.cd_last_row
    }

    /// Linha de perdas para o CD na posição `index` da lista já filtrada
    pub fn perda_row(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.cd_first_row
            .saturating_add(self.perda_row_offset)
            .saturating_add(index)
    }

    pub fn dynamics_rows(&self) -> RangeInclusive<u32> {
        self.dynamics_first_row..=self.dynamics_last_row
    }

    pub fn dynamics_scan_cols(&self) -> RangeInclusive<u32> {
        self.dynamics_first_scan_col..=self.dynamics_last_scan_col
    }

    /// Valida intervalos (linhas/colunas 1-based, não invertidos)
    pub fn validate(&self) -> ImportResult<()> {
        let ranges = [
            ("cd_first_row..cd_last_row", self.cd_first_row, self.cd_last_row),
            (
                "dynamics_first_row..dynamics_last_row",
                self.dynamics_first_row,
                self.dynamics_last_row,
            ),
            (
                "dynamics_first_scan_col..dynamics_last_scan_col",
                self.dynamics_first_scan_col,
                self.dynamics_last_scan_col,
            ),
        ];

        for (key, first, last) in ranges {
            if first == 0 || last < first {
                return Err(ImportError::ConfigValueError {
                    key: key.to_string(),
                    value: format!("{}..{}", first, last),
                    message: "intervalo deve começar em 1 e não pode ser invertido".to_string(),
                });
            }
        }

        let row_limits = [
            ("cd_last_row", self.cd_last_row),
            ("dynamics_last_row", self.dynamics_last_row),
            ("dynamics_header_row", self.dynamics_header_row),
        ];
        for (key, value) in row_limits {
            if value > MAX_SHEET_ROWS {
                return Err(ImportError::ConfigValueError {
                    key: key.to_string(),
                    value: value.to_string(),
                    message: format!("linha além do limite da planilha ({})", MAX_SHEET_ROWS),
                });
            }
        }

        if self.dynamics_last_scan_col > MAX_SHEET_COLS {
            return Err(ImportError::ConfigValueError {
                key: "dynamics_last_scan_col".to_string(),
                value: self.dynamics_last_scan_col.to_string(),
                message: format!("coluna além do limite da planilha ({})", MAX_SHEET_COLS),
            });
        }

        // Última linha de perdas: um CD em cada linha do bloco
        let last_perda_row = self
            .cd_last_row
            .checked_add(self.perda_row_offset)
            .filter(|row| *row <= MAX_SHEET_ROWS);
        if last_perda_row.is_none() {
            return Err(ImportError::ConfigValueError {
                key: "perda_row_offset".to_string(),
                value: self.perda_row_offset.to_string(),
                message: format!("bloco de perdas além do limite da planilha ({})", MAX_SHEET_ROWS),
            });
        }

        if self.dynamics_header_row == 0 {
            return Err(ImportError::ConfigValueError {
                key: "dynamics_header_row".to_string(),
                value: "0".to_string(),
                message: "linhas começam em 1".to_string(),
            });
        }

        if self.dynamics_sheet.trim().is_empty() {
            return Err(ImportError::ConfigValueError {
                key: "dynamics_sheet".to_string(),
                value: self.dynamics_sheet.clone(),
                message: "nome da aba não pode ser vazio".to_string(),
            });
        }

        Ok(())
    }

    /// Lê um layout de um arquivo JSON; campos ausentes usam o padrão
    pub fn from_file(path: &Path) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: LayoutConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                key: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Caminho padrão: `<config_dir>/cd-capacity/layout.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(LAYOUT_FILE_NAME))
    }

    /// Ordem: caminho explícito → caminho padrão (se existir) → padrões embutidos
    pub fn load(explicit: Option<&Path>) -> ImportResult<Self> {
        if let Some(path) = explicit {
            tracing::info!(path = %path.display(), "Carregando layout informado");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "Carregando layout do diretório de configuração");
                Self::from_file(&path)
            }
            _ => {
                tracing::debug!("Nenhum arquivo de layout encontrado, usando padrões");
                Ok(Self::default())
            }
        }
    }
}
