//! Terminal rendering. Models describe their columns through [`Tabular`];
//! [`Table`] does layout and sanitising, so no call site ever formats raw
//! server strings by hand.

use std::fmt;

use serde_json::Value;

use crate::{
    format::{format_currency, format_date, format_date_str, format_datetime, format_share},
    model::{
        Booking, CommonFund, Dispute, EContract, Expense, ExpenseShare, FundTransaction, Group,
        OwnershipShare, Payment, UsageHistory, User, Vehicle, Vote, VoteOption,
    },
};

pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    empty_label: String,
}

impl Table {
    pub fn of<T: Tabular>(items: &[T], empty_label: &str) -> Self {
        Self {
            headers: T::headers().iter().map(|h| h.to_string()).collect(),
            rows: items.iter().map(|item| sanitize_row(item.row())).collect(),
            empty_label: empty_label.to_string(),
        }
    }

    /// Two-column key/value table for loosely typed payloads such as reports.
    pub fn of_value(value: &Value, empty_label: &str) -> Self {
        let rows = match value {
            Value::Object(fields) => fields
                .iter()
                .map(|(k, v)| {
                    let cell = if is_date_field(k) {
                        format_date_str(v.as_str())
                    } else {
                        cell_of(v)
                    };
                    sanitize_row(vec![k.clone(), cell])
                })
                .collect(),
            Value::Null => Vec::new(),
            other => vec![sanitize_row(vec!["value".to_string(), cell_of(other)])],
        };
        Self {
            headers: vec!["Field".to_string(), "Value".to_string()],
            rows,
            empty_label: empty_label.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        write_row(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;

        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty_label);
        }
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(f, "{}", line.join("  ").trim_end())
}

fn sanitize_row(row: Vec<String>) -> Vec<String> {
    row.into_iter().map(|cell| sanitize(&cell)).collect()
}

/// Replaces control characters so server data cannot move the cursor or
/// inject terminal escape sequences.
pub fn sanitize(cell: &str) -> String {
    let cleaned: String = cell
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "-".to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_date_field(key: &str) -> bool {
    key.ends_with("Date") || key.ends_with("At") || key == "date"
}

fn cell_of(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn id(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// One-shot notification banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "[ok]",
            NoticeKind::Error => "[error]",
            NoticeKind::Info => "[info]",
        };
        write!(f, "{tag} {}", sanitize(&self.message))
    }
}

impl Tabular for User {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Roles"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.display_name().to_string(),
            text(&self.email),
            if self.roles.is_empty() {
                "USER".to_string()
            } else {
                self.roles.join(", ")
            },
        ]
    }
}

impl Tabular for Group {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Owner", "Members"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.name),
            self.owner_name().to_string(),
            self.member_count().to_string(),
        ]
    }
}

impl Tabular for OwnershipShare {
    fn headers() -> &'static [&'static str] {
        &["User ID", "Name", "Share"]
    }

    fn row(&self) -> Vec<String> {
        let user = self.user.as_ref();
        vec![
            id(user.and_then(|u| u.id)),
            user.map_or("-", User::display_name).to_string(),
            format_share(self.percentage),
        ]
    }
}

impl Tabular for Vehicle {
    fn headers() -> &'static [&'static str] {
        &["ID", "Plate", "Model", "VIN"]
    }

    fn row(&self) -> Vec<String> {
        vec![id(self.id), text(&self.plate), text(&self.model), text(&self.vin)]
    }
}

impl Tabular for Booking {
    fn headers() -> &'static [&'static str] {
        &["ID", "Vehicle", "Start", "End", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.vehicle
                .as_ref()
                .and_then(|v| v.plate.clone())
                .unwrap_or_else(|| "-".to_string()),
            format_datetime(self.start_time),
            format_datetime(self.end_time),
            text(&self.status),
        ]
    }
}

impl Tabular for Expense {
    fn headers() -> &'static [&'static str] {
        &["ID", "Type", "Amount", "Date", "Split", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.kind),
            format_currency(self.amount),
            format_date(self.date),
            text(&self.split_method),
            text(&self.status),
        ]
    }
}

impl Tabular for ExpenseShare {
    fn headers() -> &'static [&'static str] {
        &["ID", "Expense", "Amount", "Paid", "Status"]
    }

    fn row(&self) -> Vec<String> {
        let expense = self.expense.as_ref();
        vec![
            id(self.id),
            expense
                .and_then(|e| e.description.clone().or_else(|| e.kind.clone()))
                .unwrap_or_else(|| "-".to_string()),
            format_currency(self.amount),
            format_currency(self.paid_amount),
            text(&self.status),
        ]
    }
}

impl Tabular for CommonFund {
    fn headers() -> &'static [&'static str] {
        &["ID", "Type", "Balance", "Created", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.fund_type),
            format_currency(self.balance),
            format_date(self.created_at),
            text(&self.description),
        ]
    }
}

impl Tabular for FundTransaction {
    fn headers() -> &'static [&'static str] {
        &["ID", "Type", "Amount", "When", "Description", "Reference"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.kind),
            format_currency(self.amount),
            format_datetime(self.transaction_date),
            text(&self.description),
            text(&self.reference),
        ]
    }
}

impl Tabular for EContract {
    fn headers() -> &'static [&'static str] {
        &["ID", "Contract", "Start", "End", "Status", "Signed"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.contract_no),
            format_date(self.start_date),
            format_date(self.end_date),
            text(&self.status),
            format_date(self.signed_at),
        ]
    }
}

impl Tabular for Vote {
    fn headers() -> &'static [&'static str] {
        &["ID", "Topic", "Method", "Deadline", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.topic),
            text(&self.voting_method),
            format_datetime(self.deadline),
            text(&self.status),
        ]
    }
}

impl Tabular for VoteOption {
    fn headers() -> &'static [&'static str] {
        &["Option", "Votes"]
    }

    fn row(&self) -> Vec<String> {
        vec![text(&self.option), self.count.unwrap_or(0).to_string()]
    }
}

impl Tabular for Payment {
    fn headers() -> &'static [&'static str] {
        &["ID", "Amount", "Method", "Status", "Created", "Transaction"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            format_currency(self.amount),
            text(&self.method),
            text(&self.status),
            format_datetime(self.created_at),
            text(&self.transaction_id),
        ]
    }
}

impl Tabular for UsageHistory {
    fn headers() -> &'static [&'static str] {
        &["ID", "Vehicle", "Start", "End", "Distance", "Notes"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            self.vehicle
                .as_ref()
                .and_then(|v| v.plate.clone())
                .unwrap_or_else(|| "-".to_string()),
            format_datetime(self.start_time),
            format_datetime(self.end_time),
            self.distance.map_or_else(|| "-".to_string(), |d| format!("{d} km")),
            text(&self.notes),
        ]
    }
}

impl Tabular for Dispute {
    fn headers() -> &'static [&'static str] {
        &["ID", "Title", "Category", "Status", "Opened"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            id(self.id),
            text(&self.title),
            text(&self.category),
            text(&self.status),
            format_datetime(self.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_collections_render_a_no_data_row() {
        let table = Table::of::<Group>(&[], "You have not joined any group");
        let rendered = table.to_string();
        assert!(table.is_empty());
        assert!(rendered.starts_with("ID  Name  Owner  Members\n"));
        assert!(rendered.ends_with("You have not joined any group\n"));
    }

    #[test]
    fn columns_are_aligned() {
        let groups = vec![
            Group {
                id: Some(1),
                name: Some("Family EV".to_string()),
                ..Default::default()
            },
            Group {
                id: Some(12),
                name: Some("Office".to_string()),
                ..Default::default()
            },
        ];
        let rendered = Table::of(&groups, "none").to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  Name       Owner  Members");
        assert_eq!(lines[2], "1   Family EV  -      0");
        assert_eq!(lines[3], "12  Office     -      0");
    }

    #[test]
    fn control_characters_are_neutralised() {
        assert_eq!(sanitize("evil\u{1b}[2Jname"), "evil [2Jname");
        assert_eq!(sanitize("two\nlines"), "two lines");
        assert_eq!(sanitize("  "), "-");
    }

    #[test]
    fn value_tables_list_fields() {
        let table = Table::of_value(&json!({"totalCost": 1200, "note": null}), "no report");
        let rendered = table.to_string();
        assert!(rendered.contains("totalCost  1200"));
        assert!(rendered.contains("note       -"));
    }

    #[test]
    fn report_dates_are_day_first() {
        let table = Table::of_value(&json!({"startDate": "2025-01-31"}), "no report");
        assert!(table.to_string().contains("startDate  31/01/2025"));
    }

    #[test]
    fn notices_are_tagged() {
        assert_eq!(Notice::error("boom").to_string(), "[error] boom");
        assert_eq!(Notice::success("done").to_string(), "[ok] done");
    }
}
