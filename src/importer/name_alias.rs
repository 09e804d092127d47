// ==========================================
// Capacidade dos CDs - normalização de nomes de CD
// ==========================================
// Tabela ordenada (padrão → nome canônico); a primeira regra que
// casa vence. Comparação após TRIM + UPPER + remoção de acentos.
// Não reordenar: "CABO STO AGOSTINHO" precisa vir antes de "CABO".
// ==========================================

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

/// Regra de apelido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasRule {
    pub pattern: &'static str,
    pub canonical: &'static str,
}

const fn rule(pattern: &'static str, canonical: &'static str) -> AliasRule {
    AliasRule { pattern, canonical }
}

pub const SITE_ALIASES: &[AliasRule] = &[
    rule("CABO STO AGOSTINHO", "CABO DE SANTO AGOSTINHO"),
    rule("CABO", "CABO DE SANTO AGOSTINHO"),
    rule("CABO DE SANTO AGOSTINHO", "CABO DE SANTO AGOSTINHO"),
    rule("GOIÂNIA", "GOIÂNIA"),
    rule("IGARASSU", "IGARASSU"),
    rule("INDAIATUBA", "INDAIATUBA"),
    rule("JABOATÃO", "JABOATÃO"),
    rule("LOUVEIRA", "LOUVEIRA"),
    rule("POUSO ALEGRE", "POUSO ALEGRE"),
    rule("SERRA", "SERRA"),
];

/// Remove acentos (NFKD sem marcas combinantes)
pub fn fold_diacritics(value: &str) -> String {
    value.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Chave de comparação: TRIM + UPPER + sem acentos + espaços simples
pub fn match_key(value: &str) -> String {
    fold_diacritics(&value.trim().to_uppercase())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Regra que casa com o nome, na ordem da tabela
pub fn find_alias(name: &str) -> Option<&'static AliasRule> {
    let key = match_key(name);
    SITE_ALIASES.iter().find(|r| match_key(r.pattern) == key)
}

/// Nome canônico; sem regra, devolve o nome como veio
pub fn canonical_name(name: &str) -> String {
    match find_alias(name) {
        Some(rule) => rule.canonical.to_string(),
        None => name.to_string(),
    }
}

/// Nome de CD (como na aba do dia) corresponde ao local informado?
///
/// Igualdade canônica ou um contido no outro, sem diferenciar
/// maiúsculas nem acentos.
pub fn matches_site(cd_name: &str, site: &str) -> bool {
    let cd_key = match_key(&canonical_name(cd_name));
    let site_key = match_key(&canonical_name(site));
    if cd_key.is_empty() || site_key.is_empty() {
        return false;
    }
    cd_key == site_key || cd_key.contains(&site_key) || site_key.contains(&cd_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_aliases() {
        assert_eq!(canonical_name("Cabo Sto Agostinho"), "CABO DE SANTO AGOSTINHO");
        assert_eq!(canonical_name("  cabo "), "CABO DE SANTO AGOSTINHO");
        assert_eq!(canonical_name("Goiania"), "GOIÂNIA");
        assert_eq!(canonical_name("JABOATAO"), "JABOATÃO");
        assert_eq!(canonical_name("serra"), "SERRA");
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_diacritics("GOIÂNIA"), "GOIANIA");
        assert_eq!(fold_diacritics("Jaboatão"), "Jaboatao");
        assert_eq!(match_key("  pouso   alegre "), "POUSO ALEGRE");
    }

    #[test]
    fn test_unknown_name_kept() {
        assert_eq!(canonical_name("  Extrema "), "  Extrema ");
    }

    #[test]
    fn test_first_rule_wins() {
        let rule = find_alias("CABO STO AGOSTINHO").unwrap();
        assert_eq!(rule.pattern, "CABO STO AGOSTINHO");
    }

    #[test]
    fn test_matches_site() {
        assert!(matches_site("CD Louveira", "LOUVEIRA"));
        assert!(matches_site("Jaboatão", "JABOATÃO"));
        assert!(matches_site("Cabo", "CABO DE SANTO AGOSTINHO"));
        assert!(!matches_site("Serra", "LOUVEIRA"));
        assert!(!matches_site("", "SERRA"));
    }
}
