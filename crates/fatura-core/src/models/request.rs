//! Purchase requisition envelope wrapping a batch of line items.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::LineItem;
use crate::error::PayloadError;

const MONTHS_PT: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Account assignment category of a requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountCategory {
    /// Charged to a cost center.
    #[default]
    #[serde(rename = "K")]
    CostCenter,
    /// Charged to an internal order.
    #[serde(rename = "F")]
    Order,
}

impl AccountCategory {
    pub fn code(self) -> &'static str {
        match self {
            Self::CostCenter => "K",
            Self::Order => "F",
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AccountCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "K" => Ok(Self::CostCenter),
            "F" => Ok(Self::Order),
            other => Err(format!("unknown account category: {} (expected K or F)", other)),
        }
    }
}

/// Header fields entered by the requester.
#[derive(Debug, Clone, Default)]
pub struct RequisitionForm {
    /// Free text describing the purchase.
    pub text_line: String,
    /// Delivery date as `dd/mm/yyyy`.
    pub delivery_date: String,
    pub category: Option<AccountCategory>,
    pub cost_center: String,
    /// General ledger account, either `<code>` or `<code> - <description>`.
    pub gl_account: String,
    pub requester_name: String,
    pub requester_email: String,
    pub plant: String,
}

impl RequisitionForm {
    /// Check required fields, reporting every missing one at once.
    pub fn validate(&self) -> Result<(), PayloadError> {
        let required = [
            ("Description", self.text_line.trim().is_empty()),
            ("Delivery date", self.delivery_date.trim().is_empty()),
            ("Category", self.category.is_none()),
            ("Cost center", self.cost_center.trim().is_empty()),
            ("GL account", self.gl_account.trim().is_empty()),
        ];

        let missing: Vec<String> = required
            .iter()
            .filter(|(_, empty)| *empty)
            .map(|(name, _)| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PayloadError::MissingFields(missing))
        }
    }

    /// Wrap `items` into a requisition dated `today`.
    pub fn build(&self, items: Vec<LineItem>, today: NaiveDate) -> Result<Requisition, PayloadError> {
        self.validate()?;

        if items.is_empty() {
            return Err(PayloadError::EmptyBatch);
        }

        let delivery = NaiveDate::parse_from_str(self.delivery_date.trim(), "%d/%m/%Y")
            .map_err(|_| PayloadError::InvalidDate(self.delivery_date.clone()))?;

        Ok(Requisition {
            envelope: Envelope {
                webshop: WebshopRequest {
                    topdesk_key: Uuid::new_v4(),
                    cr_number: cr_number(today),
                    requester: Requester {
                        user: Uuid::new_v4(),
                        nome: title_case(&self.requester_name),
                        email: self.requester_email.clone(),
                    },
                    text_line: self.text_line.clone(),
                    deliv_date: format_delivery_date(delivery),
                    acctasscat: self.category.unwrap_or_default(),
                    cost_center: self.cost_center.clone(),
                    order: String::new(),
                    plant: self.plant.clone(),
                    conta_razao: gl_account_code(&self.gl_account).to_string(),
                    items,
                },
            },
        })
    }
}

/// The complete requisition payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requisition {
    #[serde(rename = "ZSBR_MM_AZU_WEBSHOP_PREQ")]
    pub envelope: Envelope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "I_WEBSHOP")]
    pub webshop: WebshopRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WebshopRequest {
    pub topdesk_key: Uuid,
    pub cr_number: String,
    pub requester: Requester,
    pub text_line: String,
    pub deliv_date: String,
    pub acctasscat: AccountCategory,
    pub cost_center: String,
    pub order: String,
    pub plant: String,
    pub conta_razao: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Requester {
    pub user: Uuid,
    pub nome: String,
    pub email: String,
}

impl Requisition {
    pub fn items(&self) -> &[LineItem] {
        &self.envelope.webshop.items
    }
}

/// `CR-<yymm>-<5 random hex chars>`.
fn cr_number(today: NaiveDate) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("CR-{}-{}", today.format("%y%m"), &suffix[..5])
}

/// `05 Março 2025`.
pub fn format_delivery_date(date: NaiveDate) -> String {
    format!("{:02} {} {}", date.day(), MONTHS_PT[date.month0() as usize], date.year())
}

/// Code part of a `<code> - <description>` account label.
pub fn gl_account_code(label: &str) -> &str {
    label.split(" - ").next().unwrap_or(label).trim()
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
