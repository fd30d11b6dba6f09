//! # Reference Tables
//!
//! Quick-reference guidance for welding and brazing sheet metal: materials and
//! fillers, inspection characteristics, procedure limits, qualification tests
//! and brazing requirements. Values are prompts drawn from MIL-STD-248D and
//! MIL-S-23284A; confirm details in the source specifications.
//!
//! Tables are grouped into [`Page`]s the way a reader browses them.
//!
//! ## Example
//!
//! ```rust
//! use braze_core::reference::{Page, TableId};
//!
//! let fillers = TableId::FillerCombinations.table();
//! assert_eq!(fillers.columns[0], "Base Metal");
//!
//! // Case-insensitive search across every cell
//! let aluminum = fillers.filter("6061");
//! assert_eq!(aluminum.len(), 1);
//!
//! let page = Page::Brazing.render_markdown();
//! assert!(page.starts_with("# Brazing Requirements"));
//! ```

mod data;

use serde::{Deserialize, Serialize};

use crate::errors::{GuideError, GuideResult};

/// Identifier for each static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableId {
    BaseFillerMaterials,
    InspectionChecklist,
    WeldingLimitations,
    MaterialThicknessLimits,
    AssemblyTests,
    FillerCombinations,
    QualificationLimits,
    PerformanceEvaluation,
    BrazingRequirements,
    BrazingQualification,
    GdtCallouts,
}

/// A titled table of text cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceTable {
    pub id: TableId,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [&'static [&'static str]],
}

static TABLES: [ReferenceTable; 11] = [
    ReferenceTable {
        id: TableId::BaseFillerMaterials,
        title: "Base and filler materials",
        columns: &["Base Material", "Filler Metals", "Process", "Guiding Spec"],
        rows: data::BASE_FILLER_MATERIALS,
    },
    ReferenceTable {
        id: TableId::InspectionChecklist,
        title: "Inspection checklist",
        columns: &["Category", "Characteristic", "Why it matters"],
        rows: data::INSPECTION_CHECKLIST,
    },
    ReferenceTable {
        id: TableId::WeldingLimitations,
        title: "Welding procedure limitations",
        columns: &["Process", "Forms", "Positions", "Limitations"],
        rows: data::WELDING_LIMITATIONS,
    },
    ReferenceTable {
        id: TableId::MaterialThicknessLimits,
        title: "Material thickness limits by process",
        columns: &["Process", "Thickness Qualified", "Notes"],
        rows: data::MATERIAL_THICKNESS_LIMITS,
    },
    ReferenceTable {
        id: TableId::AssemblyTests,
        title: "Welding procedure assembly test requirements",
        columns: &["Assembly Test", "Requirement", "When"],
        rows: data::ASSEMBLY_TESTS,
    },
    ReferenceTable {
        id: TableId::FillerCombinations,
        title: "Filler metal and process combinations",
        columns: &["Base Metal", "Filler", "Process", "Notes"],
        rows: data::FILLER_COMBINATIONS,
    },
    ReferenceTable {
        id: TableId::QualificationLimits,
        title: "Qualification test limitations",
        columns: &["Test", "Limitation"],
        rows: data::QUALIFICATION_LIMITS,
    },
    ReferenceTable {
        id: TableId::PerformanceEvaluation,
        title: "Performance qualification evaluation",
        columns: &["Evaluation", "Requirement"],
        rows: data::PERFORMANCE_EVALUATION,
    },
    ReferenceTable {
        id: TableId::BrazingRequirements,
        title: "Material and brazing alloy requirements",
        columns: &["Topic", "Requirement"],
        rows: data::BRAZING_REQUIREMENTS,
    },
    ReferenceTable {
        id: TableId::BrazingQualification,
        title: "Brazing alloys, test specimens, and loads",
        columns: &["Item", "Requirement"],
        rows: data::BRAZING_QUALIFICATION,
    },
    ReferenceTable {
        id: TableId::GdtCallouts,
        title: "Drawing callouts to watch",
        columns: &["Callout", "Use"],
        rows: data::GDT_CALLOUTS,
    },
];

impl TableId {
    /// All tables, in page order
    pub const ALL: [TableId; 11] = [
        TableId::BaseFillerMaterials,
        TableId::InspectionChecklist,
        TableId::WeldingLimitations,
        TableId::MaterialThicknessLimits,
        TableId::AssemblyTests,
        TableId::FillerCombinations,
        TableId::QualificationLimits,
        TableId::PerformanceEvaluation,
        TableId::BrazingRequirements,
        TableId::BrazingQualification,
        TableId::GdtCallouts,
    ];

    pub fn table(&self) -> &'static ReferenceTable {
        &TABLES[*self as usize]
    }

    /// Stable identifier used by the CLI
    pub fn id(&self) -> &'static str {
        match self {
            TableId::BaseFillerMaterials => "base-filler-materials",
            TableId::InspectionChecklist => "inspection-checklist",
            TableId::WeldingLimitations => "welding-limitations",
            TableId::MaterialThicknessLimits => "material-thickness-limits",
            TableId::AssemblyTests => "assembly-tests",
            TableId::FillerCombinations => "filler-combinations",
            TableId::QualificationLimits => "qualification-limits",
            TableId::PerformanceEvaluation => "performance-evaluation",
            TableId::BrazingRequirements => "brazing-requirements",
            TableId::BrazingQualification => "brazing-qualification",
            TableId::GdtCallouts => "gdt-callouts",
        }
    }

    /// Parse from an id, ignoring case; underscores and spaces read as hyphens
    pub fn from_str_flexible(s: &str) -> GuideResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "materials" | "fillers" => Ok(TableId::BaseFillerMaterials),
            "checklist" | "inspection" => Ok(TableId::InspectionChecklist),
            "gdt" | "callouts" => Ok(TableId::GdtCallouts),
            other => TableId::ALL
                .iter()
                .find(|t| t.id() == other)
                .copied()
                .ok_or_else(|| GuideError::TableNotFound { table: s.to_string() }),
        }
    }
}

impl ReferenceTable {
    /// Cells of one column, by heading
    pub fn column(&self, heading: &str) -> Option<Vec<&'static str>> {
        let index = self.columns.iter().position(|c| c.eq_ignore_ascii_case(heading))?;
        Some(self.rows.iter().filter_map(|row| row.get(index).copied()).collect())
    }

    /// Rows with any cell containing `needle`, ignoring case
    pub fn filter(&self, needle: &str) -> Vec<&'static [&'static str]> {
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
            .copied()
            .collect()
    }

    /// Markdown table of all rows
    pub fn to_markdown(&self) -> String {
        render_markdown_rows(self.columns, self.rows)
    }

    /// Markdown table of the given rows under this table's headings
    pub fn rows_to_markdown(&self, rows: &[&[&str]]) -> String {
        render_markdown_rows(self.columns, rows)
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn render_markdown_rows(columns: &[&str], rows: &[&[&str]]) -> String {
    let mut output = String::new();
    output.push_str(&format!("| {} |\n", columns.join(" | ")));
    output.push_str(&format!(
        "|{}|\n",
        columns.iter().map(|c| "-".repeat(c.len() + 2)).collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    output
}

// ============================================================================
// Pages
// ============================================================================

/// Topic pages grouping the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Materials,
    Inspection,
    Qualifications,
    Brazing,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Materials, Page::Inspection, Page::Qualifications, Page::Brazing];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Materials => "materials",
            Page::Inspection => "inspection",
            Page::Qualifications => "qualifications",
            Page::Brazing => "brazing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Materials => "Materials, Fillers, and Drawings",
            Page::Inspection => "Inspection & Procedure Limits",
            Page::Qualifications => "Procedure & Performance Qualification",
            Page::Brazing => "Brazing Requirements",
        }
    }

    pub fn intro(&self) -> &'static str {
        match self {
            Page::Materials => {
                "Common base and filler materials paired with welding or brazing processes. \
                 Values are quick-reference prompts based on the MIL guidance; confirm details \
                 in the source specifications."
            }
            Page::Inspection => "Inspection characteristics and the procedure limits they are checked against.",
            Page::Qualifications => {
                "Use these tables to plan qualification coupons and acceptance reviews. Align \
                 selections with the governing MIL standards and drawing notes."
            }
            Page::Brazing => {
                "Consolidated brazing criteria reflecting the MIL brazing guidance. Tailor the \
                 notes to your exact joint design, fixture strategy, and alloy family."
            }
        }
    }

    pub fn tables(&self) -> &'static [TableId] {
        match self {
            Page::Materials => &[TableId::BaseFillerMaterials, TableId::GdtCallouts],
            Page::Inspection => &[
                TableId::InspectionChecklist,
                TableId::WeldingLimitations,
                TableId::MaterialThicknessLimits,
            ],
            Page::Qualifications => &[
                TableId::FillerCombinations,
                TableId::QualificationLimits,
                TableId::PerformanceEvaluation,
                TableId::AssemblyTests,
            ],
            Page::Brazing => &[TableId::BrazingRequirements, TableId::BrazingQualification],
        }
    }

    /// Parse from an id or a short alias, ignoring case
    pub fn from_str_flexible(s: &str) -> GuideResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "fillers" | "drawings" => Ok(Page::Materials),
            "procedures" | "limits" => Ok(Page::Inspection),
            "qualification" | "qualifications-and-tests" => Ok(Page::Qualifications),
            "braze" => Ok(Page::Brazing),
            other => Page::ALL
                .iter()
                .find(|p| p.id() == other)
                .copied()
                .ok_or_else(|| GuideError::PageNotFound { page: s.to_string() }),
        }
    }

    /// Markdown for the whole page: title, intro, and each table
    pub fn render_markdown(&self) -> String {
        let mut output = format!("# {}\n\n{}\n\n", self.title(), self.intro());
        for table_id in self.tables() {
            let table = table_id.table();
            output.push_str(&format!("## {}\n\n", capitalize(table.title)));
            output.push_str(&table.to_markdown());
            output.push('\n');
        }
        output
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
