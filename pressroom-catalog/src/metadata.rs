//! Parser for the curated post metadata table.
//!
//! The table is a 10-column CSV maintained by hand:
//! ```text
//! slug,identifier,title,imageSlug,workDate,pubDate,category,cluster,featured,notes
//! robot-rabbits,8aacc89aecc9,"Robot Rabbits, Part 1",rabbits,2024-01-02,2024-02-01,animals,ep-12,yes,
//! ```
//! Quoted fields may contain commas; a doubled quote inside a quoted field is
//! a literal quote. The header line is discarded.

use std::collections::HashMap;

use pressroom_core::Identifier;

use crate::error::CatalogError;
use crate::types::{MetadataRecord, parse_featured};

/// Number of columns every data row must have.
pub const METADATA_COLUMNS: usize = 10;

/// Column names in table order.
pub const METADATA_HEADER: [&str; METADATA_COLUMNS] = [
    "slug",
    "identifier",
    "title",
    "imageSlug",
    "workDate",
    "pubDate",
    "category",
    "cluster",
    "featured",
    "notes",
];

/// A data-quality finding that does not stop parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableWarning {
    /// The identifier cell holds no extractable identifier; the row was skipped.
    MissingIdentifier { row: usize, value: String },
    /// A later row reused an identifier and replaced the earlier row.
    DuplicateIdentifier { row: usize, identifier: Identifier },
    /// Two rows assign the same non-blank slug.
    DuplicateSlug { row: usize, slug: String },
}

impl std::fmt::Display for TableWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIdentifier { row, value } if value.is_empty() => {
                write!(f, "row {row}: no identifier, row skipped")
            }
            Self::MissingIdentifier { row, value } => {
                write!(f, "row {row}: no identifier in '{value}', row skipped")
            }
            Self::DuplicateIdentifier { row, identifier } => {
                write!(f, "row {row}: identifier {identifier} repeated, earlier row replaced")
            }
            Self::DuplicateSlug { row, slug } => {
                write!(f, "row {row}: slug '{slug}' already used by another row")
            }
        }
    }
}

/// The parsed metadata table, indexed by identifier and slug.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    records: Vec<MetadataRecord>,
    /// Source row of each record, parallel to `records`.
    rows: Vec<usize>,
    by_identifier: HashMap<Identifier, usize>,
    by_slug: HashMap<String, usize>,
    warnings: Vec<TableWarning>,
}

impl MetadataTable {
    /// Parse the raw table text.
    ///
    /// Fails with [`CatalogError::MalformedRow`] on the first row whose field
    /// count is not [`METADATA_COLUMNS`]; no partial table is returned.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(raw.as_bytes());

        let mut table = MetadataTable::default();

        for (i, result) in reader.records().enumerate() {
            let record = result?;
            // Row 1 is the header
            let row = i + 2;

            if record.len() != METADATA_COLUMNS {
                return Err(CatalogError::MalformedRow {
                    row,
                    expected: METADATA_COLUMNS,
                    found: record.len(),
                });
            }

            let get = |i: usize| record.get(i).unwrap_or("").to_string();

            let id_cell = get(1);
            let Some(identifier) = Identifier::extract(&id_cell) else {
                log::warn!("Metadata row {row} has no identifier ('{id_cell}'), skipping");
                table.warnings.push(TableWarning::MissingIdentifier {
                    row,
                    value: id_cell,
                });
                continue;
            };

            let parsed = MetadataRecord {
                slug: get(0),
                identifier,
                title: get(2),
                image_slug: get(3),
                work_date: get(4),
                pub_date: get(5),
                category: get(6),
                cluster: get(7),
                featured: parse_featured(&get(8)),
                notes: get(9),
            };
            table.insert(row, parsed);
        }

        table.rebuild_slug_index();
        Ok(table)
    }

    /// Build a table from already-parsed records, applying the same
    /// last-wins rule as [`MetadataTable::parse`].
    pub fn from_records(records: impl IntoIterator<Item = MetadataRecord>) -> Self {
        let mut table = MetadataTable::default();
        for (i, record) in records.into_iter().enumerate() {
            table.insert(i + 2, record);
        }
        table.rebuild_slug_index();
        table
    }

    fn insert(&mut self, row: usize, record: MetadataRecord) {
        match self.by_identifier.get(&record.identifier) {
            Some(&pos) => {
                log::warn!(
                    "Metadata row {row} repeats identifier {}, replacing earlier row",
                    record.identifier
                );
                self.warnings.push(TableWarning::DuplicateIdentifier {
                    row,
                    identifier: record.identifier.clone(),
                });
                self.records[pos] = record;
                self.rows[pos] = row;
            }
            None => {
                self.by_identifier
                    .insert(record.identifier.clone(), self.records.len());
                self.records.push(record);
                self.rows.push(row);
            }
        }
    }

    /// Index non-blank slugs, warning on reuse. First row keeps the index entry.
    fn rebuild_slug_index(&mut self) {
        self.by_slug.clear();
        for (pos, record) in self.records.iter().enumerate() {
            if record.slug.is_empty() {
                continue;
            }
            if self.by_slug.contains_key(&record.slug) {
                log::warn!("Metadata slug '{}' is used by more than one row", record.slug);
                self.warnings.push(TableWarning::DuplicateSlug {
                    row: self.rows[pos],
                    slug: record.slug.clone(),
                });
                continue;
            }
            self.by_slug.insert(record.slug.clone(), pos);
        }
    }

    pub fn get_by_identifier(&self, identifier: &Identifier) -> Option<&MetadataRecord> {
        self.by_identifier
            .get(identifier)
            .map(|&pos| &self.records[pos])
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&MetadataRecord> {
        self.by_slug.get(slug).map(|&pos| &self.records[pos])
    }

    /// Records in first-seen row order, one per identifier.
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn warnings(&self) -> &[TableWarning] {
        &self.warnings
    }
}
