// 🔎 Category Filter - Cascading modality → age → belt → gender narrowing
//
// Pure and synchronous: every selection change re-derives the downstream
// options from the constant table. The four selections always resolve to at
// most one official category.

use crate::entities::OfficialCategory;
use thiserror::Error;

/// Shown when the four selections do not resolve to a category
pub const NO_MATCH_MESSAGE: &str = "No se encontró una categoría válida con esa combinación.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("No se encontró una categoría válida con esa combinación.")]
    NoMatch,
}

/// Snapshot of the four dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    pub modality: Option<String>,
    pub age: Option<String>,
    pub belt: Option<String>,
    pub gender: Option<String>,
}

impl CategorySelection {
    fn matches(&self, category: &OfficialCategory, depth: usize) -> bool {
        let fields = [
            (self.modality.as_deref(), category.modality),
            (self.age.as_deref(), category.age),
            (self.belt.as_deref(), category.belt),
            (self.gender.as_deref(), category.gender),
        ];
        fields[..depth].iter().all(|(selected, value)| *selected == Some(*value))
    }
}

/// Which dropdown a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Modality,
    Age,
    Belt,
    Gender,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Modality,
        FilterField::Age,
        FilterField::Belt,
        FilterField::Gender,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Modality => "Modalidad",
            FilterField::Age => "Edad",
            FilterField::Belt => "Cinta",
            FilterField::Gender => "Género",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FilterField::Modality => FilterField::Age,
            FilterField::Age => FilterField::Belt,
            FilterField::Belt => FilterField::Gender,
            FilterField::Gender => FilterField::Modality,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FilterField::Modality => FilterField::Gender,
            FilterField::Age => FilterField::Modality,
            FilterField::Belt => FilterField::Age,
            FilterField::Gender => FilterField::Belt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryFilter {
    table: &'static [OfficialCategory],
    selection: CategorySelection,
}

impl CategoryFilter {
    /// Filter over `table`, preselecting the first modality
    pub fn new(table: &'static [OfficialCategory]) -> Self {
        let mut filter = CategoryFilter {
            table,
            selection: CategorySelection::default(),
        };
        filter.selection.modality = filter.modalities().first().map(|m| m.to_string());
        filter.cascade_from_age();
        filter
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    // ========================================================================
    // DERIVED OPTIONS
    // ========================================================================

    pub fn modalities(&self) -> Vec<&'static str> {
        distinct(self.table.iter().map(|c| c.modality))
    }

    pub fn ages(&self) -> Vec<&'static str> {
        distinct(self.narrowed(1).map(|c| c.age))
    }

    pub fn belts(&self) -> Vec<&'static str> {
        distinct(self.narrowed(2).map(|c| c.belt))
    }

    pub fn genders(&self) -> Vec<&'static str> {
        distinct(self.narrowed(3).map(|c| c.gender))
    }

    /// Rows matching the first `depth` selections
    fn narrowed(&self, depth: usize) -> impl Iterator<Item = &'static OfficialCategory> + '_ {
        self.table.iter().filter(move |c| self.selection.matches(c, depth))
    }

    /// Options currently offered for a dropdown
    pub fn options(&self, field: FilterField) -> Vec<&'static str> {
        match field {
            FilterField::Modality => self.modalities(),
            FilterField::Age => self.ages(),
            FilterField::Belt => self.belts(),
            FilterField::Gender => self.genders(),
        }
    }

    pub fn selected(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Modality => self.selection.modality.as_deref(),
            FilterField::Age => self.selection.age.as_deref(),
            FilterField::Belt => self.selection.belt.as_deref(),
            FilterField::Gender => self.selection.gender.as_deref(),
        }
    }

    // ========================================================================
    // SELECTION (each change re-derives everything downstream)
    // ========================================================================

    /// Select a modality. A value absent from the table is kept, and every
    /// dependent field is cleared because it has no options.
    pub fn select_modality(&mut self, modality: &str) {
        self.selection.modality = Some(modality.to_string());
        self.cascade_from_age();
    }

    /// Select an age; a value not offered for the current modality clears
    /// the age and everything below it
    pub fn select_age(&mut self, age: &str) {
        self.selection.age = offered(age, &self.ages());
        self.cascade_from_belt();
    }

    pub fn select_belt(&mut self, belt: &str) {
        self.selection.belt = offered(belt, &self.belts());
        self.cascade_from_gender();
    }

    pub fn select_gender(&mut self, gender: &str) {
        self.selection.gender = offered(gender, &self.genders());
    }

    /// Move a dropdown to its next (or previous) option, wrapping around
    pub fn cycle(&mut self, field: FilterField, forward: bool) {
        let options = self.options(field);
        if options.is_empty() {
            return;
        }
        let current = self
            .selected(field)
            .and_then(|value| options.iter().position(|o| *o == value));
        let index = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) | (None, false) => options.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };
        let value = options[index];
        match field {
            FilterField::Modality => self.select_modality(value),
            FilterField::Age => self.select_age(value),
            FilterField::Belt => self.select_belt(value),
            FilterField::Gender => self.select_gender(value),
        }
    }

    fn cascade_from_age(&mut self) {
        let ages = self.ages();
        keep_or_first(&mut self.selection.age, &ages);
        self.cascade_from_belt();
    }

    fn cascade_from_belt(&mut self) {
        let belts = self.belts();
        keep_or_first(&mut self.selection.belt, &belts);
        self.cascade_from_gender();
    }

    fn cascade_from_gender(&mut self) {
        let genders = self.genders();
        keep_or_first(&mut self.selection.gender, &genders);
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// The single category matching all four selections
    pub fn resolve(&self) -> Result<&'static OfficialCategory, FilterError> {
        self.narrowed(4).next().ok_or(FilterError::NoMatch)
    }
}

/// Heading shown above the results of a category search
pub fn search_label(category: &OfficialCategory) -> String {
    format!("{} • {}", category.modality, category.age)
}

fn distinct(values: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn keep_or_first(current: &mut Option<String>, options: &[&'static str]) {
    let still_offered = current
        .as_deref()
        .is_some_and(|value| options.contains(&value));
    if !still_offered {
        *current = options.first().map(|o| o.to_string());
    }
}

fn offered(value: &str, options: &[&'static str]) -> Option<String> {
    options.iter().find(|o| **o == value).map(|o| o.to_string())
}
