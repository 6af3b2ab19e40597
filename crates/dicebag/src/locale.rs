//! Locale-aware fake data: person names, postcodes, and Brazilian geography tables.

use crate::source::UniformSource;

/// Supplies realistic names and postcodes for a locale.
///
/// Implementations draw through the given source so callers control randomness.
pub trait LocaleProvider: Send + Sync {
    /// A full person name, possibly carrying an honorific prefix.
    fn full_name(&self, locale: &str, source: &dyn UniformSource) -> String;

    /// A postcode in the locale's usual presentation (may include separators).
    fn postcode(&self, locale: &str, source: &dyn UniformSource) -> String;
}

/// Brazilian federative unit codes.
pub const BRAZILIAN_STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB", "PR",
    "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Neighborhood names. Duplicates are kept so common names come up more often.
pub const NEIGHBORHOODS: [&str; 49] = [
    "Jardim Goiás",
    "Pedro Ludovico",
    "Marista",
    "Nova Suíça",
    "Jardim América",
    "Parque Amazônia",
    "Serrinha",
    "Cidade Jardim",
    "Bela Vista",
    "Vila Redenção",
    "Residencial Eldorado",
    "Universitário",
    "Jardim Guanabara",
    "Vila Nova",
    "Conjunto Vera Cruz",
    "Jardim Presidente",
    "Parque Atheneu",
    "Garavelo",
    "Cidade Jardim",
    "Vila Maria",
    "Campinas",
    "Criméia Oeste",
    "Faiçalville",
    "Jaó",
    "Leste Universitário",
    "Nova Vila",
    "Santa Genoveva",
    "Aeroporto",
    "Coimbra",
    "Bueno",
    "Pedro Ludovico",
    "Marista",
    "Sul",
    "Nova Suíça",
    "Jardim América",
    "Parque Amazônia",
    "Vila União",
    "Bacacheri",
    "Cabral",
    "Água Verde",
    "Mercês",
    "Champagnat",
    "Bigorrilho",
    "Santa Felicidade",
    "Campo Comprido",
    "Juvevê",
    "Vila Maria",
    "Residencial Eldorado",
    "Vila Redenção",
];

/// Honorific prefixes stripped from generated names.
pub const HONORIFICS: [&str; 7] = ["Sr.", "Sra.", "Dr.", "Mr.", "Mrs.", "Dra.", "Srta."];

/// Remove every honorific followed by whitespace.
pub fn strip_honorifics(name: &str) -> String {
    let mut out = name.to_string();
    for honorific in HONORIFICS {
        for ws in [' ', '\t', '\n'] {
            out = out.replace(&format!("{}{}", honorific, ws), "");
        }
    }
    out
}

struct NameTable {
    prefixes: &'static [&'static str],
    first: &'static [&'static str],
    last: &'static [&'static str],
}

const PT_BR: NameTable = NameTable {
    prefixes: &["Sr.", "Sra.", "Dr.", "Dra.", "Srta."],
    first: &[
        "Ana", "Beatriz", "Bruno", "Carla", "Daniel", "Eduardo", "Fernanda", "Gabriel",
        "Helena", "Igor", "Juliana", "Lucas", "Mariana", "Otávio", "Paula", "Rafael",
        "Sofia", "Thiago", "Vitória", "Yasmin",
    ],
    last: &[
        "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves", "Pereira",
        "Lima", "Gomes", "Costa", "Ribeiro", "Martins", "Carvalho", "Rocha", "Barbosa",
    ],
};

const EN_US: NameTable = NameTable {
    prefixes: &["Mr.", "Mrs.", "Dr."],
    first: &[
        "Alice", "Brandon", "Chloe", "David", "Emily", "Frank", "Grace", "Henry", "Isabel",
        "Jack", "Karen", "Liam", "Megan", "Nathan", "Olivia", "Peter",
    ],
    last: &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson",
        "Anderson", "Taylor", "Thomas", "Moore",
    ],
};

fn pick<'a>(items: &'a [&'a str], source: &dyn UniformSource) -> &'a str {
    let idx = source.int_in_range(0, items.len() as i64 - 1);
    items[idx as usize]
}

fn digits(count: usize, source: &dyn UniformSource) -> String {
    (0..count)
        .map(|_| char::from(b'0' + source.int_in_range(0, 9) as u8))
        .collect()
}

/// Built-in provider backed by static pt_BR and en_US tables.
///
/// Unsupported locales fall back to en_US.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocale;

impl BuiltinLocale {
    pub fn new() -> Self {
        Self
    }

    fn table(locale: &str) -> &'static NameTable {
        match locale {
            "pt_BR" | "pt-BR" => &PT_BR,
            _ => &EN_US,
        }
    }
}

impl LocaleProvider for BuiltinLocale {
    fn full_name(&self, locale: &str, source: &dyn UniformSource) -> String {
        let table = Self::table(locale);
        let name = format!("{} {}", pick(table.first, source), pick(table.last, source));
        // One name in ten carries an honorific.
        if source.int_in_range(1, 10) == 1 {
            format!("{} {}", pick(table.prefixes, source), name)
        } else {
            name
        }
    }

    fn postcode(&self, locale: &str, source: &dyn UniformSource) -> String {
        match locale {
            "pt_BR" | "pt-BR" => format!("{}-{}", digits(5, source), digits(3, source)),
            _ => digits(5, source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedSource, ThreadRngSource};

    #[test]
    fn test_strip_honorifics() {
        assert_eq!(strip_honorifics("Sr. João Silva"), "João Silva");
        assert_eq!(strip_honorifics("Dra. Ana Lima"), "Ana Lima");
        assert_eq!(strip_honorifics("Mrs. Grace Brown"), "Grace Brown");
        assert_eq!(strip_honorifics("Ana Lima"), "Ana Lima");
    }

    #[test]
    fn test_honorific_prefix_is_drawn_when_roll_is_one() {
        // first name, last name, honorific roll, prefix
        let source = FixedSource::new(vec![0, 0, 1, 0]);
        let name = BuiltinLocale.full_name("pt_BR", &source);
        assert_eq!(name, "Sr. Ana Silva");
    }

    #[test]
    fn test_full_name_has_two_parts() {
        let source = ThreadRngSource::new();
        for _ in 0..50 {
            let name = strip_honorifics(&BuiltinLocale.full_name("en_US", &source));
            assert_eq!(name.split(' ').count(), 2, "unexpected name {}", name);
        }
    }

    #[test]
    fn test_brazilian_postcode_format() {
        let source = ThreadRngSource::new();
        let cep = BuiltinLocale.postcode("pt_BR", &source);
        assert_eq!(cep.len(), 9);
        assert_eq!(cep.chars().nth(5), Some('-'));
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let source = FixedSource::new(vec![0, 0, 5]);
        let name = BuiltinLocale.full_name("xx_XX", &source);
        assert_eq!(name, "Alice Smith");
    }
}
