//! Spreadsheet and CSV export of the member roster.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::member::Member;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("failed to finish csv output: {0}")]
    Flush(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Columns that can be exported, in the order they are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberColumn {
    Name,
    Role,
    Department,
    Team,
    Year,
    JoinYear,
    Status,
    Skills,
    Email,
    Facebook,
    Github,
}

impl MemberColumn {
    pub const ALL: [MemberColumn; 11] = [
        Self::Name,
        Self::Role,
        Self::Department,
        Self::Team,
        Self::Year,
        Self::JoinYear,
        Self::Status,
        Self::Skills,
        Self::Email,
        Self::Facebook,
        Self::Github,
    ];

    pub const DEFAULT: [MemberColumn; 6] = [
        Self::Name,
        Self::Role,
        Self::Department,
        Self::Team,
        Self::JoinYear,
        Self::Status,
    ];

    /// Header written to the exported file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::Department => "department",
            Self::Team => "team",
            Self::Year => "year",
            Self::JoinYear => "joinYear",
            Self::Status => "status",
            Self::Skills => "skills",
            Self::Email => "email",
            Self::Facebook => "facebook",
            Self::Github => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Tên thành viên",
            Self::Role => "Vai trò",
            Self::Department => "Phòng ban",
            Self::Team => "Team",
            Self::Year => "Năm nhiệm kỳ",
            Self::JoinYear => "Năm tham gia",
            Self::Status => "Trạng thái",
            Self::Skills => "Kỹ năng",
            Self::Email => "Email",
            Self::Facebook => "Facebook",
            Self::Github => "Github",
        }
    }

    fn value(&self, member: &Member) -> String {
        match self {
            Self::Name => member.name.clone(),
            Self::Role => member.role.clone(),
            Self::Department => member.department.clone(),
            Self::Team => member.team.clone(),
            Self::Year => member.year.clone().unwrap_or_default(),
            Self::JoinYear => member.join_year.clone(),
            Self::Status => member.status.as_str().to_string(),
            Self::Skills => member.skills.join(", "),
            Self::Email => member.links.email.clone(),
            Self::Facebook => member.links.facebook.clone(),
            Self::Github => member.links.github.clone(),
        }
    }
}

impl FromStr for MemberColumn {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ExportError::UnknownColumn(s.to_string()))
    }
}

/// Output format of the export. Excel is what the admin form offers first.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Xlsx,
    Csv,
}

impl FileType {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// Export options chosen in the admin console. Blank filters match everything.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    #[serde(default)]
    pub file_type: FileType,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub join_year: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl ExportQuery {
    fn matches(&self, member: &Member) -> bool {
        (self.team.is_empty() || member.team == self.team)
            && (self.status.is_empty() || member.status.as_str() == self.status)
            && (self.year.is_empty() || member.year.as_deref() == Some(self.year.as_str()))
            && (self.join_year.is_empty() || member.join_year == self.join_year)
    }

    /// Selected columns, falling back to the default set when none is chosen.
    pub fn columns(&self) -> Result<Vec<MemberColumn>, ExportError> {
        if self.fields.is_empty() {
            return Ok(MemberColumn::DEFAULT.to_vec());
        }
        self.fields.iter().map(|f| f.parse()).collect()
    }
}

pub fn export_filename(today: NaiveDate, file_type: FileType) -> String {
    format!(
        "DSC_Members_{}.{}",
        today.format("%Y-%m-%d"),
        file_type.extension()
    )
}

/// Renders the members matching `query` in the requested file type.
pub fn export_file(members: &[Member], query: &ExportQuery) -> Result<Vec<u8>, ExportError> {
    match query.file_type {
        FileType::Xlsx => members_xlsx(members, query),
        FileType::Csv => members_csv(members, query),
    }
}

const UTF8_BOM: &str = "\u{feff}";

/// Writes the members matching `query` as CSV, one header row first.
///
/// The output starts with a byte-order mark so Excel reads it as UTF-8.
pub fn members_csv(members: &[Member], query: &ExportQuery) -> Result<Vec<u8>, ExportError> {
    let columns = query.columns()?;
    let mut writer = csv::Writer::from_writer(UTF8_BOM.as_bytes().to_vec());
    writer.write_record(columns.iter().map(MemberColumn::key))?;
    for member in members.iter().filter(|m| query.matches(m)) {
        writer.write_record(columns.iter().map(|c| c.value(member)))?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))
}

/// Writes the members matching `query` to a single `Members` sheet.
pub fn members_xlsx(members: &[Member], query: &ExportQuery) -> Result<Vec<u8>, ExportError> {
    let columns = query.columns()?;
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Members")?;

    for (col, column) in (0u16..).zip(&columns) {
        sheet.write_string_with_format(0, col, column.key(), &header)?;
    }
    let rows = members.iter().filter(|m| query.matches(m));
    for (row, member) in (1u32..).zip(rows) {
        for (col, column) in (0u16..).zip(&columns) {
            sheet.write_string(row, col, column.value(member))?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}
