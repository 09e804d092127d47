// ==========================================
// Capacidade dos CDs - linha de comando
// ==========================================
// Equivalente ao envio do formulário: planilha + dia
// (+ pasta de backlog fluxo opcional). Saída: envelope JSON
// ou tabela CSV dos CDs.
// ==========================================

use anyhow::{Context, Result};
use cd_capacity::api::{ApiResponse, CapacityApi, UploadedFile};
use cd_capacity::config::LayoutConfig;
use cd_capacity::domain::LayoutVariant;
use cd_capacity::logging::{self, LogFormat};
use cd_capacity::report;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Basic,
    Fiscal,
}

impl From<VariantArg> for LayoutVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Basic => LayoutVariant::Basic,
            VariantArg::Fiscal => LayoutVariant::Fiscal,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "cd-capacity",
    version,
    about = "Extrai capacidade, backlog e fluxo fiscal dos CDs da planilha diária."
)]
struct Args {
    /// Planilha diária (.xlsx, .xls ou .xlsm), uma aba por dia.
    arquivo: PathBuf,

    /// Dia do mês (nome da aba, 1 a 31).
    #[arg(long)]
    dia: Option<String>,

    /// Pasta de backlog fluxo (aba "Dinâmicas"), lida para o dia anterior.
    #[arg(long = "backlog-fluxo")]
    backlog_fluxo: Option<PathBuf>,

    /// Arquivo de layout JSON (padrão: <config_dir>/cd-capacity/layout.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sobrescreve a variante de layout do arquivo de configuração.
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Formato de saída.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Remove os arquivos de entrada ao final (modo upload).
    #[arg(long)]
    delete_after: bool,

    /// Logs em JSON.
    #[arg(long)]
    json_logs: bool,
}

fn upload(path: PathBuf, transient: bool) -> UploadedFile {
    if transient {
        UploadedFile::transient(path)
    } else {
        UploadedFile::borrowed(path)
    }
}

fn run(args: Args) -> Result<bool> {
    let mut layout = LayoutConfig::load(args.config.as_deref()).context("falha ao carregar layout")?;
    if let Some(variant) = args.variant {
        layout.variant = variant.into();
    }

    let api = CapacityApi::new(layout);
    let result = api.process_daily(
        upload(args.arquivo, args.delete_after),
        args.dia.as_deref(),
        args.backlog_fluxo.map(|p| upload(p, args.delete_after)),
    );
    let response = ApiResponse::from_result(result);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match (&response.dados, args.format) {
        (Some(dados), OutputFormat::Csv) => {
            let backlog = dados.backlog_fluxo.clone().unwrap_or_default();
            report::write_csv(&mut out, &dados.report, &backlog).context("falha ao escrever CSV")?;
        }
        _ => {
            serde_json::to_writer_pretty(&mut out, &response).context("falha ao escrever JSON")?;
            writeln!(out)?;
        }
    }

    Ok(response.is_success())
}

fn main() -> ExitCode {
    let args = Args::parse();

    logging::init_with_format(if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });
    tracing::debug!(version = cd_capacity::VERSION, "{}", cd_capacity::APP_NAME);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Falha na execução");
            ExitCode::FAILURE
        }
    }
}
