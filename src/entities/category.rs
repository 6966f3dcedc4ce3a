// 🏷️ Category Entity - Official competition categories
//
// Two static tables:
// - the master dictionary (code → label + kind) used by the athlete dashboard
// - the official table (code → modality, age, belt, gender) used by the
//   ranking filter and to backfill labels missing from server payloads
//
// The category code is the join key between both tables and the ranking
// rows reported by the server.

use serde::Serialize;

// ============================================================================
// CATEGORY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Kumite / point fighting
    Combat,

    /// Kata (traditional or creative)
    Form,

    /// Weapons kata
    Weapon,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Combat => "combat",
            CategoryKind::Form => "form",
            CategoryKind::Weapon => "weapon",
        }
    }
}

// ============================================================================
// MASTER DICTIONARY
// ============================================================================

/// Display metadata for a category code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDefinition {
    pub code: &'static str,
    pub label: &'static str,
    pub kind: CategoryKind,
}

pub const CATEGORY_DICTIONARY: &[CategoryDefinition] = &[
    CategoryDefinition { code: "K01", label: "Kata Tradicional", kind: CategoryKind::Form },
    CategoryDefinition { code: "K02", label: "Kata Creativa", kind: CategoryKind::Form },
    CategoryDefinition { code: "C107", label: "Combate", kind: CategoryKind::Combat },
    CategoryDefinition { code: "C06", label: "Combate Open Weight", kind: CategoryKind::Combat },
    CategoryDefinition { code: "W01", label: "Kata con Armas", kind: CategoryKind::Weapon },
];

impl CategoryDefinition {
    /// Look up a code in the master dictionary
    pub fn find(code: &str) -> Option<&'static CategoryDefinition> {
        CATEGORY_DICTIONARY.iter().find(|def| def.code == code)
    }
}

// ============================================================================
// OFFICIAL CATEGORY TABLE
// ============================================================================

/// One row of the official category table.
///
/// Each (modality, age, belt, gender) tuple appears once and maps to a
/// unique code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficialCategory {
    pub code: &'static str,
    pub modality: &'static str,
    pub age: &'static str,
    pub belt: &'static str,
    pub gender: &'static str,
}

impl OfficialCategory {
    pub const fn new(
        code: &'static str,
        modality: &'static str,
        age: &'static str,
        belt: &'static str,
        gender: &'static str,
    ) -> Self {
        OfficialCategory { code, modality, age, belt, gender }
    }

    /// Kind derived from the code prefix (K = kata, C = combate, W = armas)
    pub fn kind(&self) -> CategoryKind {
        match self.code.chars().next() {
            Some('C') => CategoryKind::Combat,
            Some('W') => CategoryKind::Weapon,
            _ => CategoryKind::Form,
        }
    }
}

pub const OFFICIAL_CATEGORIES: &[OfficialCategory] = &[
    // Kata Tradicional
    OfficialCategory::new("K10", "Kata Tradicional", "12-13 años", "Blanco-Amarillo", "Mixto"),
    OfficialCategory::new("K11", "Kata Tradicional", "12-13 años", "Naranja-Verde", "Mixto"),
    OfficialCategory::new("K12", "Kata Tradicional", "14-15 años", "Naranja-Verde", "Masculino"),
    OfficialCategory::new("K13", "Kata Tradicional", "14-15 años", "Naranja-Verde", "Femenino"),
    OfficialCategory::new("K14", "Kata Tradicional", "16-17 años", "Azul-Morado", "Masculino"),
    OfficialCategory::new("K15", "Kata Tradicional", "16-17 años", "Azul-Morado", "Femenino"),
    OfficialCategory::new("K01", "Kata Tradicional", "+18", "Naranja-Verde", "Masculino"),
    OfficialCategory::new("K03", "Kata Tradicional", "+18", "Naranja-Verde", "Femenino"),
    OfficialCategory::new("K04", "Kata Tradicional", "+18", "Marrón-Negro", "Masculino"),
    OfficialCategory::new("K05", "Kata Tradicional", "+18", "Marrón-Negro", "Femenino"),
    // Kata Creativa
    OfficialCategory::new("K20", "Kata Creativa", "14-15 años", "Azul-Morado", "Mixto"),
    OfficialCategory::new("K21", "Kata Creativa", "16-17 años", "Marrón-Negro", "Mixto"),
    OfficialCategory::new("K02", "Kata Creativa", "+18", "Marrón-Negro", "Mixto"),
    // Combate
    OfficialCategory::new("C101", "Combate", "8-9 años", "Blanco-Amarillo", "Mixto"),
    OfficialCategory::new("C102", "Combate", "10-11 años", "Blanco-Amarillo", "Mixto"),
    OfficialCategory::new("C103", "Combate", "10-11 años", "Naranja-Verde", "Mixto"),
    OfficialCategory::new("C104", "Combate", "12-13 años", "Naranja-Verde", "Masculino"),
    OfficialCategory::new("C105", "Combate", "12-13 años", "Naranja-Verde", "Femenino"),
    OfficialCategory::new("C106", "Combate", "16-17 años", "Marrón-Negro", "Masculino"),
    OfficialCategory::new("C108", "Combate", "16-17 años", "Marrón-Negro", "Femenino"),
    OfficialCategory::new("C107", "Combate", "+18", "Marrón-Negro", "Masculino"),
    OfficialCategory::new("C109", "Combate", "+18", "Marrón-Negro", "Femenino"),
    OfficialCategory::new("C110", "Combate", "+18", "Azul-Morado", "Masculino"),
    // Combate Open Weight
    OfficialCategory::new("C06", "Combate Open Weight", "+18", "Marrón-Negro", "Masculino"),
    OfficialCategory::new("C07", "Combate Open Weight", "+18", "Marrón-Negro", "Femenino"),
    // Kata con Armas
    OfficialCategory::new("W02", "Kata con Armas", "14-15 años", "Azul-Morado", "Mixto"),
    OfficialCategory::new("W03", "Kata con Armas", "16-17 años", "Azul-Morado", "Mixto"),
    OfficialCategory::new("W01", "Kata con Armas", "+18", "Marrón-Negro", "Mixto"),
];

// ============================================================================
// CATEGORY REGISTRY
// ============================================================================

/// Read-only view over the official table and the master dictionary
#[derive(Debug, Clone, Copy)]
pub struct CategoryRegistry {
    official: &'static [OfficialCategory],
    dictionary: &'static [CategoryDefinition],
}

impl CategoryRegistry {
    /// Registry backed by the built-in league tables
    pub fn official() -> Self {
        CategoryRegistry {
            official: OFFICIAL_CATEGORIES,
            dictionary: CATEGORY_DICTIONARY,
        }
    }

    pub fn official_table(&self) -> &'static [OfficialCategory] {
        self.official
    }

    /// Find an official category by code
    pub fn find_by_code(&self, code: &str) -> Option<&'static OfficialCategory> {
        self.official.iter().find(|cat| cat.code == code)
    }

    /// Find a dictionary definition by code
    pub fn definition(&self, code: &str) -> Option<&'static CategoryDefinition> {
        self.dictionary.iter().find(|def| def.code == code)
    }

    /// Best display label for a code: dictionary first, then the official
    /// modality, then the raw code
    pub fn label_for(&self, code: &str) -> String {
        if let Some(def) = self.definition(code) {
            return def.label.to_string();
        }
        match self.find_by_code(code) {
            Some(cat) => cat.modality.to_string(),
            None => code.to_string(),
        }
    }

    pub fn count(&self) -> usize {
        self.official.len()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::official()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_official_codes_are_unique() {
        let codes: HashSet<_> = OFFICIAL_CATEGORIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), OFFICIAL_CATEGORIES.len());
    }

    #[test]
    fn test_official_tuples_are_unique() {
        let tuples: HashSet<_> = OFFICIAL_CATEGORIES
            .iter()
            .map(|c| (c.modality, c.age, c.belt, c.gender))
            .collect();
        assert_eq!(tuples.len(), OFFICIAL_CATEGORIES.len());
    }

    #[test]
    fn test_dictionary_codes_exist_in_official_table() {
        let registry = CategoryRegistry::official();
        for def in CATEGORY_DICTIONARY {
            let official = registry.find_by_code(def.code).expect("dictionary code missing");
            assert_eq!(official.modality, def.label);
            assert_eq!(official.kind(), def.kind);
        }
    }

    #[test]
    fn test_label_for_falls_back() {
        let registry = CategoryRegistry::official();
        assert_eq!(registry.label_for("C107"), "Combate");
        assert_eq!(registry.label_for("K13"), "Kata Tradicional");
        assert_eq!(registry.label_for("ZZZ"), "ZZZ");
    }

    #[test]
    fn test_kind_from_prefix() {
        let registry = CategoryRegistry::official();
        assert_eq!(registry.find_by_code("W02").unwrap().kind(), CategoryKind::Weapon);
        assert_eq!(registry.find_by_code("C101").unwrap().kind(), CategoryKind::Combat);
        assert_eq!(registry.find_by_code("K20").unwrap().kind(), CategoryKind::Form);
    }
}
