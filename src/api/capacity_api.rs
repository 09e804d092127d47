// ==========================================
// Capacidade dos CDs - API de processamento
// ==========================================
// Fluxo de upload:
// 1. validar arquivo / dia / extensão
// 2. abrir a pasta → extrair o dia → (opcional) backlog fluxo
// 3. remover o arquivo temporário em qualquer saída (UploadedFile::drop)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::LayoutConfig;
use crate::domain::capacity::{CapacityReport, FlowBacklog};
use crate::importer::capacity_extractor::MAX_DAY;
use crate::importer::capacity_importer_impl::CapacityImporterImpl;
use crate::importer::capacity_importer_trait::CapacityImporter;
use crate::importer::error::ImportError;
use crate::importer::file_parser::check_extension;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ==========================================
// UploadedFile - arquivo temporário do upload
// ==========================================
// Removido no drop, a não ser que seja apenas emprestado.
#[derive(Debug)]
pub struct UploadedFile {
    path: PathBuf,
    remove_on_drop: bool,
}

impl UploadedFile {
    /// Arquivo de upload: a API passa a ser dona e o remove ao final
    pub fn transient<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            remove_on_drop: true,
        }
    }

    /// Arquivo do usuário: apenas lido, nunca removido
    pub fn borrowed<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            remove_on_drop: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadedFile {
    fn drop(&mut self) {
        if !self.remove_on_drop || self.path.as_os_str().is_empty() {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Arquivo temporário removido"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Falha ao remover arquivo temporário")
            }
        }
    }
}

// ==========================================
// Respostas
// ==========================================

/// Dados do dia (+ backlog fluxo quando a segunda pasta é enviada)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyData {
    #[serde(flatten)]
    pub report: CapacityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backlog_fluxo: Option<FlowBacklog>,
}

/// Envelope: `{"success": true, "dados": ...}` ou `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dados: Option<DailyData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub status: u16,
}

impl ApiResponse {
    pub fn from_result(result: ApiResult<DailyData>) -> Self {
        match result {
            Ok(dados) => Self {
                success: Some(true),
                dados: Some(dados),
                error: None,
                status: 200,
            },
            Err(e) => Self {
                success: None,
                dados: None,
                error: Some(e.to_string()),
                status: e.status_code(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

// ==========================================
// Validação do formulário
// ==========================================

/// Valida o dia informado no formulário
pub fn parse_day(dia: Option<&str>) -> ApiResult<u32> {
    let raw = dia
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Selecione o dia".to_string()))?;

    match raw.parse::<u32>() {
        Ok(d) if (1..=MAX_DAY).contains(&d) => Ok(d),
        _ => Err(ApiError::InvalidInput(format!(
            "Dia inválido: {} (esperado 1 a {})",
            raw, MAX_DAY
        ))),
    }
}

/// Validação comum de arquivo enviado
fn check_upload(upload: &UploadedFile) -> ApiResult<()> {
    if upload.path().as_os_str().is_empty() {
        return Err(ApiError::InvalidInput("Nenhum arquivo selecionado".to_string()));
    }
    Ok(())
}

fn check_format(upload: &UploadedFile) -> ApiResult<()> {
    check_extension(upload.path()).map_err(|e| match e {
        ImportError::UnsupportedFormat(ext) => ApiError::UnsupportedFormat(ext),
        other => ApiError::ProcessingError(other),
    })
}

// ==========================================
// CapacityApi
// ==========================================
pub struct CapacityApi<I = CapacityImporterImpl> {
    importer: I,
}

impl CapacityApi<CapacityImporterImpl> {
    pub fn new(layout: LayoutConfig) -> Self {
        Self::with_importer(CapacityImporterImpl::new(layout))
    }
}

impl<I: CapacityImporter> CapacityApi<I> {
    pub fn with_importer(importer: I) -> Self {
        Self { importer }
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.importer.layout()
    }

    /// Processa a planilha diária de capacidade
    ///
    /// O arquivo é liberado (e removido, se transitório) ao sair,
    /// com sucesso ou erro.
    pub fn process_upload(&self, upload: UploadedFile, dia: Option<&str>) -> ApiResult<CapacityReport> {
        check_upload(&upload)?;
        let dia = parse_day(dia)?;
        check_format(&upload)?;

        tracing::info!(path = %upload.path().display(), dia, "Processando planilha de capacidade");

        let report = self
            .importer
            .import_day(upload.path(), dia)
            .map_err(ApiError::ProcessingError)?;

        drop(upload);
        Ok(report)
    }

    /// Processa a pasta de backlog fluxo (aba de dinâmicas)
    pub fn process_flow_backlog_upload(&self, upload: UploadedFile, dia: u32) -> ApiResult<FlowBacklog> {
        check_upload(&upload)?;
        check_format(&upload)?;

        self.importer
            .import_flow_backlog(upload.path(), dia)
            .map_err(ApiError::FlowBacklogError)
    }

    /// Planilha do dia + backlog fluxo opcional, pronto para o envelope
    pub fn process_daily(
        &self,
        capacity: UploadedFile,
        dia: Option<&str>,
        flow_backlog: Option<UploadedFile>,
    ) -> ApiResult<DailyData> {
        let report = match self.process_upload(capacity, dia) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Falha ao processar planilha de capacidade");
                return Err(e);
            }
        };

        let backlog_fluxo = match flow_backlog {
            Some(upload) => Some(self.process_flow_backlog_upload(upload, report.dia)?),
            None => None,
        };

        Ok(DailyData {
            report,
            backlog_fluxo,
        })
    }
}
