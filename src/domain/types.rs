// ==========================================
// Capacidade dos CDs - tipos de domínio
// ==========================================
// Variante de layout da planilha e valores de status repassados
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Variante de layout (Layout Variant)
// ==========================================
// Duas revisões da planilha convivem; cada implantação escolhe uma.
// Basic: sem coluna de faturado/expedido, backlog = perdas W + T
// Fiscal: lê total de fluxo (G) e faturado/expedido (I), deriva fluxo fiscal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Basic,
    #[default]
    Fiscal,
}

impl LayoutVariant {
    /// Se a variante lê as colunas de fluxo e faturado/expedido
    pub fn tracks_fiscal_flow(&self) -> bool {
        matches!(self, LayoutVariant::Fiscal)
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutVariant::Basic => write!(f, "basic"),
            LayoutVariant::Fiscal => write!(f, "fiscal"),
        }
    }
}

impl std::str::FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(LayoutVariant::Basic),
            "fiscal" => Ok(LayoutVariant::Fiscal),
            other => Err(format!("variante de layout desconhecida: {}", other)),
        }
    }
}

// ==========================================
// Valor de status (passthrough)
// ==========================================
// Colunas Y/Z/AA carregam o que estiver na célula, sem coerção.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Text(s) => write!(f, "{}", s),
            StatusValue::Number(n) => write!(f, "{}", n),
            StatusValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!("FISCAL".parse::<LayoutVariant>().unwrap(), LayoutVariant::Fiscal);
        assert_eq!(" basic ".parse::<LayoutVariant>().unwrap(), LayoutVariant::Basic);
        assert!("rich".parse::<LayoutVariant>().is_err());
    }

    #[test]
    fn test_status_value_serializes_untagged() {
        let text = serde_json::to_string(&StatusValue::Text("ABERTO".to_string())).unwrap();
        assert_eq!(text, "\"ABERTO\"");
        let flag = serde_json::to_string(&StatusValue::Flag(true)).unwrap();
        assert_eq!(flag, "true");
    }
}
