use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Report header, rendered only on the first page.
///
/// Every field is free text and empty by default. `date` holds an ISO
/// calendar date (`YYYY-MM-DD`), the two times hold `HH:MM`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    pub owner_name: String,
    pub po_no: String,
    pub project_name: String,
    pub supervisor: String,
    pub entry_time: String,
    pub exit_time: String,
    pub date: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeaderField {
    OwnerName,
    PoNo,
    ProjectName,
    Supervisor,
    EntryTime,
    ExitTime,
    Date,
}

impl HeaderField {
    pub const ALL: [HeaderField; 7] = [
        HeaderField::OwnerName,
        HeaderField::PoNo,
        HeaderField::ProjectName,
        HeaderField::Supervisor,
        HeaderField::EntryTime,
        HeaderField::ExitTime,
        HeaderField::Date,
    ];

    /// Human label used by the text view and the printed header block.
    pub fn label(&self) -> &'static str {
        match self {
            HeaderField::OwnerName => "Owner",
            HeaderField::PoNo => "PO No.",
            HeaderField::ProjectName => "Project",
            HeaderField::Supervisor => "Supervisor",
            HeaderField::EntryTime => "Entry time",
            HeaderField::ExitTime => "Exit time",
            HeaderField::Date => "Date",
        }
    }

    /// Parse the kebab-case name used on the command line and in sessions.
    pub fn from_name(name: &str) -> Option<Self> {
        HeaderField::from_str(name, true).ok()
    }
}

impl Header {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::OwnerName => &self.owner_name,
            HeaderField::PoNo => &self.po_no,
            HeaderField::ProjectName => &self.project_name,
            HeaderField::Supervisor => &self.supervisor,
            HeaderField::EntryTime => &self.entry_time,
            HeaderField::ExitTime => &self.exit_time,
            HeaderField::Date => &self.date,
        }
    }

    pub fn set(&mut self, field: HeaderField, value: String) {
        let slot = match field {
            HeaderField::OwnerName => &mut self.owner_name,
            HeaderField::PoNo => &mut self.po_no,
            HeaderField::ProjectName => &mut self.project_name,
            HeaderField::Supervisor => &mut self.supervisor,
            HeaderField::EntryTime => &mut self.entry_time,
            HeaderField::ExitTime => &mut self.exit_time,
            HeaderField::Date => &mut self.date,
        };
        *slot = value;
    }
}
