// ==========================================
// Capacidade dos CDs - erros do importador
// ==========================================
// Dois grupos: estruturais (aba esperada ausente) e inesperados
// (falha ao abrir/ler, sempre com contexto).
// Falha de coerção de célula NÃO é erro: vira valor padrão.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Estruturais =====
    #[error("Aba \"{0}\" não encontrada no arquivo")]
    SheetNotFound(String),

    #[error("Aba \"{0}\" não encontrada no arquivo de backlog fluxo")]
    DynamicsSheetNotFound(String),

    // ===== Arquivo =====
    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não permitido: {0} (use .xlsx, .xls ou .xlsm)")]
    UnsupportedFormat(String),

    // ===== Layout =====
    #[error("Coordenada de célula inválida: {0}")]
    InvalidCoordinate(String),

    #[error("Dia inválido: {0} (esperado 1 a 31)")]
    InvalidDay(u32),

    // ===== Configuração =====
    #[error("Falha ao ler configuração ({key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("Valor de configuração inválido (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== Inesperado (abrir/ler a pasta) =====
    #[error("{context}: {message}")]
    Unexpected { context: String, message: String },
}

impl ImportError {
    /// Aba esperada ausente (dia ou dinâmicas)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ImportError::SheetNotFound(_) | ImportError::DynamicsSheetNotFound(_)
        )
    }

    /// Embrulha uma falha inesperada com contexto
    pub fn unexpected(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ImportError::Unexpected {
            context: context.into(),
            message: err.to_string(),
        }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_not_found_names_the_sheet() {
        let err = ImportError::SheetNotFound("7".to_string());
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "Aba \"7\" não encontrada no arquivo");
    }

    #[test]
    fn test_unexpected_is_not_structural() {
        let err = ImportError::unexpected("Erro ao processar arquivo", "zip truncado");
        assert!(!err.is_structural());
        assert_eq!(err.to_string(), "Erro ao processar arquivo: zip truncado");
    }
}
