// ==========================================
// Capacidade dos CDs - abertura de pastas de trabalho
// ==========================================
// Suporta: .xlsx / .xlsm / .xls (valores calculados das fórmulas)
// A pasta inteira é carregada por aba antes da extração.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extensões aceitas no upload
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm"];

// ==========================================
// WorkbookSource - fonte de abas
// ==========================================
// Implementações: CalamineWorkbook (arquivo), InMemoryWorkbook (grade pronta)
pub trait WorkbookSource {
    /// Nomes das abas, na ordem do arquivo
    fn sheet_names(&self) -> Vec<String>;

    /// Carrega a aba inteira
    fn load_sheet(&mut self, name: &str) -> ImportResult<Range<Data>>;

    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }
}

/// Valida a extensão do arquivo (sem diferenciar maiúsculas)
pub fn check_extension(path: &Path) -> ImportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFormat(ext))
    }
}

// ==========================================
// CalamineWorkbook - arquivo em disco
// ==========================================
pub struct CalamineWorkbook {
    sheets: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open<P: AsRef<Path>>(file_path: P) -> ImportResult<Self> {
        let path = file_path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        check_extension(path)?;

        let sheets = open_workbook_auto(path).map_err(|e| {
            ImportError::unexpected(format!("Falha ao abrir \"{}\"", path.display()), e)
        })?;

        tracing::debug!(path = %path.display(), "Pasta de trabalho aberta");
        Ok(Self { sheets })
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn load_sheet(&mut self, name: &str) -> ImportResult<Range<Data>> {
        self.sheets
            .worksheet_range(name)
            .map_err(|e| ImportError::unexpected(format!("Falha ao ler a aba \"{}\"", name), e))
    }
}

// ==========================================
// InMemoryWorkbook - abas já carregadas
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    order: Vec<String>,
    sheets: HashMap<String, Range<Data>>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona (ou substitui) uma aba
    pub fn with_sheet(mut self, name: &str, range: Range<Data>) -> Self {
        if !self.sheets.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.sheets.insert(name.to_string(), range);
        self
    }
}

impl WorkbookSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn load_sheet(&mut self, name: &str) -> ImportResult<Range<Data>> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| ImportError::SheetNotFound(name.to_string()))
    }
}
