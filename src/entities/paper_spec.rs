//! Paper spec entity: expected limits and biases per test item

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::mapping::ProductMap;

/// A limit or bias column that can be checked against the test plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitField {
    Min,
    Max,
    Bias1,
    Bias2,
    Bias3,
}

impl LimitField {
    pub fn all() -> &'static [LimitField] {
        &[
            LimitField::Min,
            LimitField::Max,
            LimitField::Bias1,
            LimitField::Bias2,
            LimitField::Bias3,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitField::Min => "Min",
            LimitField::Max => "Max",
            LimitField::Bias1 => "Bias1",
            LimitField::Bias2 => "Bias2",
            LimitField::Bias3 => "Bias3",
        }
    }
}

impl fmt::Display for LimitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a product's paper spec table
///
/// Limit and bias values are kept as written; a blank value means the
/// field is not checked. The `Compare_*` toggles are optional and a blank
/// toggle counts as enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecRow {
    #[serde(rename = "NO")]
    pub no: String,
    #[serde(rename = "ITEM")]
    pub item: String,
    #[serde(rename = "Min")]
    pub min: String,
    #[serde(rename = "Min_Unit")]
    pub min_unit: String,
    #[serde(rename = "Max")]
    pub max: String,
    #[serde(rename = "Max_Unit")]
    pub max_unit: String,
    #[serde(rename = "Bias1")]
    pub bias1: String,
    #[serde(rename = "Bias1_Unit")]
    pub bias1_unit: String,
    #[serde(rename = "Bias2")]
    pub bias2: String,
    #[serde(rename = "Bias2_Unit")]
    pub bias2_unit: String,
    #[serde(rename = "Bias3")]
    pub bias3: String,
    #[serde(rename = "Bias3_Unit")]
    pub bias3_unit: String,
    #[serde(rename = "Compare_Limit", with = "flag")]
    pub compare_limit: Option<bool>,
    #[serde(rename = "Compare_Bias1", with = "flag")]
    pub compare_bias1: Option<bool>,
    #[serde(rename = "Compare_Bias2", with = "flag")]
    pub compare_bias2: Option<bool>,
    #[serde(rename = "Compare_Bias3", with = "flag")]
    pub compare_bias3: Option<bool>,
}

impl SpecRow {
    pub const HEADERS: [&'static str; 16] = [
        "NO",
        "ITEM",
        "Min",
        "Min_Unit",
        "Max",
        "Max_Unit",
        "Bias1",
        "Bias1_Unit",
        "Bias2",
        "Bias2_Unit",
        "Bias3",
        "Bias3_Unit",
        "Compare_Limit",
        "Compare_Bias1",
        "Compare_Bias2",
        "Compare_Bias3",
    ];

    pub fn new(no: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            no: no.into(),
            item: item.into(),
            ..Default::default()
        }
    }

    /// Raw value of a limit field, as written
    pub fn raw(&self, field: LimitField) -> &str {
        match field {
            LimitField::Min => &self.min,
            LimitField::Max => &self.max,
            LimitField::Bias1 => &self.bias1,
            LimitField::Bias2 => &self.bias2,
            LimitField::Bias3 => &self.bias3,
        }
    }

    /// Expected value of a limit field, or `None` if it is blank
    pub fn expected(&self, field: LimitField) -> Option<&str> {
        let value = self.raw(field).trim();
        if is_blank(value) {
            None
        } else {
            Some(value)
        }
    }

    /// Whether the row's toggles ask for this field to be compared
    pub fn enforces(&self, field: LimitField) -> bool {
        let toggle = match field {
            LimitField::Min | LimitField::Max => self.compare_limit,
            LimitField::Bias1 => self.compare_bias1,
            LimitField::Bias2 => self.compare_bias2,
            LimitField::Bias3 => self.compare_bias3,
        };
        toggle.unwrap_or(true)
    }

    /// Row as table cells in [`SpecRow::HEADERS`] order
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.no.clone(),
            self.item.clone(),
            self.min.clone(),
            self.min_unit.clone(),
            self.max.clone(),
            self.max_unit.clone(),
            self.bias1.clone(),
            self.bias1_unit.clone(),
            self.bias2.clone(),
            self.bias2_unit.clone(),
            self.bias3.clone(),
            self.bias3_unit.clone(),
            flag::display(self.compare_limit).to_string(),
            flag::display(self.compare_bias1).to_string(),
            flag::display(self.compare_bias2).to_string(),
            flag::display(self.compare_bias3).to_string(),
        ]
    }
}

/// Spreadsheet-style placeholders that mean "no value"
fn is_blank(value: &str) -> bool {
    value.is_empty()
        || ["nan", "na", "n/a", "null"]
            .iter()
            .any(|na| value.eq_ignore_ascii_case(na))
}

/// Serde adapter for the optional `Compare_*` booleans
///
/// Accepts the spellings spreadsheet tools emit (`True`, `false`, `1`,
/// `yes`, ...) and writes `True`/`False`, or an empty cell for `None`.
/// Anything else reads as `True`, so a malformed toggle keeps its check.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn display(value: Option<bool>) -> &'static str {
        match value {
            Some(true) => "True",
            Some(false) => "False",
            None => "",
        }
    }

    pub fn parse(raw: &str) -> Option<bool> {
        let value = raw.trim();
        if super::is_blank(value) {
            return None;
        }
        match value.to_lowercase().as_str() {
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => Some(true),
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(display(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(parse(&raw))
    }
}

/// Everything the spec-limit rule needs, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct PaperSpecs {
    mapping: ProductMap,
    tables: HashMap<String, Vec<SpecRow>>,
    /// Products whose table could not be read, with the reason
    failures: HashMap<String, String>,
}

impl PaperSpecs {
    pub fn new(mapping: ProductMap) -> Self {
        Self {
            mapping,
            tables: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Record that a product's table could not be loaded
    pub fn insert_failure(&mut self, product: impl Into<String>, reason: impl Into<String>) {
        self.failures.insert(product.into(), reason.into());
    }

    /// Why a product's table could not be loaded, if it failed
    pub fn load_error(&self, product: &str) -> Option<&str> {
        self.failures.get(product).map(String::as_str)
    }

    pub fn with_table(mut self, product: impl Into<String>, rows: Vec<SpecRow>) -> Self {
        self.insert_table(product, rows);
        self
    }

    pub fn insert_table(&mut self, product: impl Into<String>, rows: Vec<SpecRow>) {
        self.tables.insert(product.into(), rows);
    }

    pub fn mapping(&self) -> &ProductMap {
        &self.mapping
    }

    pub fn product_for(&self, filename: &str) -> Option<&str> {
        self.mapping.product_for(filename)
    }

    /// Spec rows for a product; a product without a table has no rows
    pub fn table(&self, product: &str) -> &[SpecRow] {
        self.tables.get(product).map(Vec::as_slice).unwrap_or(&[])
    }
}
