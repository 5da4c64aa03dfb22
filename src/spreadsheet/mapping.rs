use super::reader::{CellValue, RowRecord};

/// Header spellings accepted for one logical field, in priority order.
pub type Aliases = &'static [&'static str];

pub const ITEM_NAME: Aliases = &["item_name"];
pub const ITEM_EMPLOYEE_ID: Aliases = &["employee_id"];
// Some exported sheets carry the line break of a wrapped header cell in the text
pub const ITEM_CODE: Aliases = &["item_code", "item_code\r\n", "item_code\n"];

pub const EMPLOYEE_NUMBER: Aliases = &["employee_number"];
pub const EMPLOYEE_NAME: Aliases = &["employee_name"];
pub const EMPLOYEE_SALARY: Aliases = &["employee_salary"];
pub const EMPLOYEE_POSITION: Aliases = &["position"];

/// First alias present in the record wins.
pub fn lookup<'a>(record: &'a RowRecord, aliases: Aliases) -> Option<&'a CellValue> {
    aliases.iter().find_map(|alias| record.get(*alias))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemRow {
    pub item_name: Option<CellValue>,
    pub employee_id: Option<CellValue>,
    /// Rendered as text with surrounding whitespace removed.
    pub item_code: Option<String>,
}

impl ItemRow {
    pub fn from_record(record: &RowRecord) -> Self {
        // An empty cell under one spelling falls through to the next
        let item_code = ITEM_CODE
            .iter()
            .filter_map(|alias| record.get(*alias))
            .find(|code| !matches!(code, CellValue::Text(text) if text.is_empty()))
            .map(|code| code.to_text().trim().to_string());

        Self {
            item_name: lookup(record, ITEM_NAME).cloned(),
            employee_id: lookup(record, ITEM_EMPLOYEE_ID).cloned(),
            item_code,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeInfoRow {
    pub employee_number: Option<CellValue>,
    pub employee_name: Option<CellValue>,
    pub employee_salary: Option<CellValue>,
    pub position: Option<CellValue>,
}

impl EmployeeInfoRow {
    pub fn from_record(record: &RowRecord) -> Self {
        Self {
            employee_number: lookup(record, EMPLOYEE_NUMBER).cloned(),
            employee_name: lookup(record, EMPLOYEE_NAME).cloned(),
            employee_salary: lookup(record, EMPLOYEE_SALARY).cloned(),
            position: lookup(record, EMPLOYEE_POSITION).cloned(),
        }
    }
}
