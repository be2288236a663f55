//! Typed view of a MAF mutation row
//!
//! A [`Mutation`] owns the handful of columns the filters need and keeps
//! the row it was built from, so every other column is written back out
//! untouched.
//!
//! Columns are mapped through [`MUTATION_FIELDS`], a fixed table of
//! (column name, parser, renderer) entries.

use crate::error::{Error, Result};
use crate::table::RawRecord;
use std::collections::BTreeSet;

/// Status assigned to mutations routed to the uncalled file
pub const UNCALLED_STATUS: &str = "UNCALLED";

/// Literal written for a true flag
pub const TRUE_TOKEN: &str = "True";

/// Literal written for a false flag
pub const FALSE_TOKEN: &str = "False";

/// A column owned by [`Mutation`]
pub struct MutationField {
    /// Column name in the MAF header
    pub name: &'static str,
    parse: fn(&mut Mutation, &str) -> Result<()>,
    render: fn(&Mutation) -> String,
}

/// Every column owned by [`Mutation`], in output order
pub const MUTATION_FIELDS: &[MutationField] = &[
    MutationField {
        name: "t_ref_count",
        parse: |m, v| {
            m.t_ref_count = parse_count("t_ref_count", v)?;
            Ok(())
        },
        render: |m| m.t_ref_count.to_string(),
    },
    MutationField {
        name: "t_alt_count",
        parse: |m, v| {
            m.t_alt_count = parse_count("t_alt_count", v)?;
            Ok(())
        },
        render: |m| m.t_alt_count.to_string(),
    },
    MutationField {
        name: "Mutation_Status",
        parse: |m, v| {
            m.mutation_status = v.to_string();
            Ok(())
        },
        render: |m| m.mutation_status.clone(),
    },
    MutationField {
        name: "is_fillout",
        parse: |m, v| {
            m.is_fillout = parse_flag("is_fillout", v)?;
            Ok(())
        },
        render: |m| render_flag(m.is_fillout),
    },
];

fn is_mutation_field(name: &str) -> bool {
    MUTATION_FIELDS.iter().any(|f| f.name == name)
}

/// Which source columns were consumed while building a [`Mutation`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUse {
    /// Source columns mapped onto a typed attribute
    pub mapped: BTreeSet<String>,
    /// Source columns carried through untouched
    pub unused: BTreeSet<String>,
    /// Typed attributes with no source column, left at their default
    pub unset: BTreeSet<String>,
}

/// A mutation row with its typed columns parsed out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mutation {
    /// Reads supporting the reference allele
    pub t_ref_count: u64,
    /// Reads supporting the alternate allele
    pub t_alt_count: u64,
    /// Mutation status label
    pub mutation_status: String,
    /// Added by a fillout genotyping pass rather than variant calling
    pub is_fillout: bool,
    pub(crate) source: RawRecord,
    pub(crate) field_use: FieldUse,
}

impl Mutation {
    /// Build a mutation from a raw row
    ///
    /// Known columns are parsed; a malformed count or flag is an error.
    /// Known columns missing from the row keep their zero/false default.
    pub fn from_record(record: RawRecord) -> Result<Self> {
        let mut mutation = Mutation::default();
        let mut field_use = FieldUse::default();

        for field in MUTATION_FIELDS {
            match record.get(field.name) {
                Some(value) => {
                    (field.parse)(&mut mutation, value)?;
                    field_use.mapped.insert(field.name.to_string());
                }
                None => {
                    field_use.unset.insert(field.name.to_string());
                }
            }
        }

        field_use.unused = record
            .keys()
            .filter(|k| !is_mutation_field(k))
            .cloned()
            .collect();

        mutation.source = record;
        mutation.field_use = field_use;
        Ok(mutation)
    }

    /// Flatten back into a raw row
    ///
    /// Typed columns come from the current attribute values; every other
    /// column of the source row is copied over unchanged.
    pub fn to_record(&self) -> RawRecord {
        let mut record: RawRecord = MUTATION_FIELDS
            .iter()
            .map(|f| (f.name.to_string(), (f.render)(self)))
            .collect();

        for (key, value) in &self.source {
            record
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        record
    }

    /// Set the status to [`UNCALLED_STATUS`]
    pub fn set_uncalled(&mut self) {
        self.mutation_status = UNCALLED_STATUS.to_string();
    }

    /// The row this mutation was built from
    pub fn source(&self) -> &RawRecord {
        &self.source
    }

    /// Ledger of mapped, unused and unset columns
    pub fn field_use(&self) -> &FieldUse {
        &self.field_use
    }

    /// Column names this mutation writes out, sorted
    pub fn field_names(&self) -> Vec<String> {
        self.to_record().into_keys().collect()
    }
}

impl TryFrom<RawRecord> for Mutation {
    type Error = Error;

    fn try_from(record: RawRecord) -> Result<Self> {
        Mutation::from_record(record)
    }
}

fn parse_count(field: &str, value: &str) -> Result<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    // u64::from_str takes a leading '+', which is not a count
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    trimmed.parse().map_err(|_| Error::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "" => Ok(false),
        _ => Err(Error::InvalidBool {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn render_flag(flag: bool) -> String {
    let token = if flag { TRUE_TOKEN } else { FALSE_TOKEN };
    token.to_string()
}
