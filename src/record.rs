//! The input record. This is plain data handed over by whatever collected the permit
//! details; the engine only reads it.

use crate::PermitError;
use serde::{Deserialize, Serialize};

/// Everything printed on a permit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// The kind of document, e.g. "building" or "electrical"
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub permit_number: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub project_info: ProjectInfo,
    #[serde(default)]
    pub owner_info: Option<PartyInfo>,
    #[serde(default)]
    pub contractor_info: Option<PartyInfo>,
    #[serde(default)]
    pub scope_of_work: Option<String>,
    #[serde(default)]
    pub conditions: Option<Vec<String>>,
    #[serde(default)]
    pub fees: Option<Vec<Fee>>,
    #[serde(default)]
    pub disclaimers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// A permittee (owner) or contractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub description: String,
    /// Shown exactly as given; parsed separately for the total
    pub amount: String,
}

impl Fee {
    pub fn new<D: ToString, A: ToString>(description: D, amount: A) -> Fee {
        Fee {
            description: description.to_string(),
            amount: amount.to_string(),
        }
    }

    /// The numeric value of [Fee::amount]: every character other than digits, `.` and `-`
    /// is stripped, then the longest leading run that reads as a number is taken, so
    /// `"$100.00 (est.)"` is 100. Amounts with no number in front count as zero; the
    /// display string is printed unchanged either way.
    pub fn parsed_amount(&self) -> f64 {
        let numeric: String = self
            .amount
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        (1..=numeric.len())
            .rev()
            .find_map(|end| numeric[..end].parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

/// Fills in a blank or missing string with a placeholder
pub(crate) fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
}

impl DocumentRecord {
    /// Parse a record from its JSON representation (snake_case keys)
    pub fn from_json(json: &str) -> Result<DocumentRecord, PermitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the fields the document cannot be issued without. Nothing is drawn for a
    /// record that fails this.
    pub fn validate(&self) -> Result<(), PermitError> {
        if self.project_info.name.trim().is_empty() {
            return Err(PermitError::MissingField("project_info.name"));
        }
        if self.project_info.address.trim().is_empty() {
            return Err(PermitError::MissingField("project_info.address"));
        }
        Ok(())
    }

    pub fn fees(&self) -> &[Fee] {
        self.fees.as_deref().unwrap_or_default()
    }

    pub fn conditions(&self) -> &[String] {
        self.conditions.as_deref().unwrap_or_default()
    }

    pub fn disclaimers(&self) -> &[String] {
        self.disclaimers.as_deref().unwrap_or_default()
    }

    /// Sum of every parsed fee amount
    pub fn fee_total(&self) -> f64 {
        self.fees().iter().map(Fee::parsed_amount).sum()
    }

    /// A record is a draft until it carries a status other than "draft"
    pub fn is_draft(&self) -> bool {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(status) => status.eq_ignore_ascii_case("draft"),
        }
    }

    /// "City, ST 12345", skipping whatever parts are missing
    pub fn locality(&self) -> Option<String> {
        let info = &self.project_info;
        let city = info.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let state_zip: Vec<&str> = [info.state.as_deref(), info.zip.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        let state_zip = (!state_zip.is_empty()).then(|| state_zip.join(" "));
        match (city, state_zip) {
            (Some(city), Some(rest)) => Some(format!("{city}, {rest}")),
            (Some(city), None) => Some(city.to_string()),
            (None, rest) => rest,
        }
    }
}

/// Format a dollar amount with thousands separators and two decimals, e.g. `$1,250.00`
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
