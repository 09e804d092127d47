// ==========================================
// Capacidade dos CDs - configuração
// ==========================================
// Layout da planilha por implantação (JSON opcional)
// ==========================================

pub mod layout_config;

pub use layout_config::{LayoutConfig, APP_CONFIG_DIR, LAYOUT_FILE_NAME, MAX_SHEET_COLS, MAX_SHEET_ROWS};
