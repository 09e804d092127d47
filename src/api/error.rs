// ==========================================
// Capacidade dos CDs - erros da camada de API
// ==========================================
// Converte falhas do importador em mensagens para o usuário,
// com status no estilo HTTP (400 entrada / 500 processamento).
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Entrada do usuário (400) =====
    #[error("{0}")]
    InvalidInput(String),

    #[error("Formato de arquivo não permitido. Use .xlsx, .xls ou .xlsm")]
    UnsupportedFormat(String),

    // ===== Processamento (500) =====
    #[error("Erro ao processar arquivo: {0}")]
    ProcessingError(#[source] ImportError),

    #[error("Erro ao processar arquivo de backlog fluxo: {0}")]
    FlowBacklogError(#[source] ImportError),
}

impl ApiError {
    /// Status HTTP equivalente
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) | ApiError::UnsupportedFormat(_) => 400,
            _ => 500,
        }
    }

    /// Aba esperada ausente (dia ou dinâmicas)
    pub fn is_structural(&self) -> bool {
        match self {
            ApiError::ProcessingError(e) | ApiError::FlowBacklogError(e) => e.is_structural(),
            _ => false,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
