//! Line encoding for the CSV store
//!
//! Sixteen columns in fixed order. Text containing `,` or `"` is quoted with
//! `"` doubled; line breaks inside text become spaces so one record is always
//! exactly one line.

use std::str::FromStr;

use super::error::MalformedRow;
use super::types::{AssessmentRecord, RawRow};
use crate::clinical::{ClinicalInput, Gender};

/// Column names, written once as the first line of a new store
pub const HEADER: [&str; 16] = [
    "id",
    "age",
    "gender",
    "hb",
    "mcv",
    "mch",
    "rdw",
    "rbc",
    "fatigue",
    "familyRelation",
    "jaundice",
    "spleen",
    "mentzerIndex",
    "greenKingIndex",
    "thalassemiaResult",
    "ironResult",
];

pub(crate) const COL_THALASSEMIA: usize = 14;
pub(crate) const COL_IRON: usize = 15;

/// The header line including its terminating newline
pub(crate) fn header_line() -> String {
    let mut line = HEADER.join(",");
    line.push('\n');
    line
}

/// Serialize a record as one line including its terminating newline
pub fn encode_line(record: &AssessmentRecord) -> String {
    let input = &record.input;
    let fields = [
        record.id.to_string(),
        input.age.to_string(),
        input.gender.to_string(),
        input.hb.to_string(),
        input.mcv.to_string(),
        input.mch.to_string(),
        input.rdw.to_string(),
        input.rbc.to_string(),
        input.fatigue.to_string(),
        input.family_relation.to_string(),
        input.jaundice.to_string(),
        input.spleen.to_string(),
        record.mentzer_index.to_string(),
        record.green_king_index.to_string(),
        escape_field(&record.thalassemia_result),
        escape_field(&record.iron_result),
    ];

    let mut line = fields.join(",");
    line.push('\n');
    line
}

fn escape_field(value: &str) -> String {
    let flattened: String = value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();

    if flattened.contains([',', '"']) {
        format!("\"{}\"", flattened.replace('"', "\"\""))
    } else {
        flattened
    }
}

/// Split one line (without its newline) into columns, honouring quotes
pub fn split_line(line: &str) -> RawRow {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = Vec::with_capacity(HEADER.len());
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    RawRow::new(fields)
}

fn parse_column<T: FromStr>(row: &RawRow, index: usize) -> Result<T, MalformedRow> {
    let value = row.field(index).trim();
    value.parse().map_err(|_| MalformedRow {
        column: HEADER[index],
        value: value.to_string(),
    })
}

impl TryFrom<&RawRow> for AssessmentRecord {
    type Error = MalformedRow;

    fn try_from(row: &RawRow) -> Result<Self, Self::Error> {
        let id = row.id().ok_or_else(|| MalformedRow {
            column: HEADER[0],
            value: row.field(0).to_string(),
        })?;

        let gender = Gender::parse(row.field(2)).ok_or_else(|| MalformedRow {
            column: HEADER[2],
            value: row.field(2).to_string(),
        })?;

        Ok(Self {
            id,
            input: ClinicalInput {
                age: parse_column(row, 1)?,
                gender,
                hb: parse_column(row, 3)?,
                mcv: parse_column(row, 4)?,
                mch: parse_column(row, 5)?,
                rdw: parse_column(row, 6)?,
                rbc: parse_column(row, 7)?,
                fatigue: parse_column(row, 8)?,
                family_relation: parse_column(row, 9)?,
                jaundice: parse_column(row, 10)?,
                spleen: parse_column(row, 11)?,
            },
            mentzer_index: parse_column(row, 12)?,
            green_king_index: parse_column(row, 13)?,
            thalassemia_result: row.field(COL_THALASSEMIA).to_string(),
            iron_result: row.field(COL_IRON).to_string(),
        })
    }
}
