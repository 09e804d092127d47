// ==========================================
// Inicialização de logs
// ==========================================
// tracing + tracing-subscriber
// Nível via variável de ambiente RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Formato de saída dos logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Inicializa os logs (stderr, para não misturar com o JSON de saída)
///
/// # Variáveis de ambiente
/// - RUST_LOG: filtro de nível (padrão: info)
///   ex.: RUST_LOG=debug ou RUST_LOG=cd_capacity=trace
///
/// # Exemplo
/// ```no_run
/// use cd_capacity::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_format(LogFormat::Text);
}

pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(e) = result {
        eprintln!("logs já inicializados: {}", e);
    }
}

/// Logs para testes: nível debug, saída capturada pelo harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
