//! Minimal `CREATE TABLE` parser.
//!
//! Recognizes `CREATE TABLE [IF NOT EXISTS] [schema.]name ( ... );` blocks and
//! one column definition per line. Everything else in the file is ignored.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use super::types::SchemaField;

static RE_CREATE_TABLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:"?\w+"?\.)?"?(\w+)"?\s*\((.*?)\)\s*;"#,
    )
    .ok()
});

static RE_COLUMN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"^"?([A-Za-z_]\w*)"?\s+([A-Za-z]\w*(?:\s*\(\s*\d+(?:\s*,\s*\d+)?\s*\))?)"#).ok()
});

/// Line prefixes that introduce table constraints rather than columns.
const CONSTRAINT_PREFIXES: &[&str] = &["CONSTRAINT", "PRIMARY KEY", "FOREIGN KEY", "UNIQUE", "CHECK"];

/// One parsed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTable {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

/// Tables in file order plus a field-name index.
#[derive(Debug, Clone, Default)]
pub struct ParsedSchema {
    pub tables: Vec<SchemaTable>,
    /// field name -> (table index, field index) of the first defining table.
    index: FxHashMap<String, (usize, usize)>,
}

impl ParsedSchema {
    /// First table (in file order) that declares `field`.
    pub fn find_field(&self, field: &str) -> Option<&SchemaField> {
        let &(t, f) = self.index.get(field)?;
        self.tables.get(t)?.fields.get(f)
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.fields.len()).sum()
    }
}

/// Parse every `CREATE TABLE` block in `sql`.
pub fn parse_schema(sql: &str) -> ParsedSchema {
    let mut schema = ParsedSchema::default();
    let Some(re) = RE_CREATE_TABLE.as_ref() else {
        return schema;
    };

    for caps in re.captures_iter(sql) {
        let name = caps[1].to_string();
        let fields: Vec<SchemaField> = caps[2]
            .lines()
            .filter_map(|line| parse_column(line, &name))
            .collect();

        let table_idx = schema.tables.len();
        for (field_idx, field) in fields.iter().enumerate() {
            schema
                .index
                .entry(field.name.clone())
                .or_insert((table_idx, field_idx));
        }
        tracing::trace!(table = %name, fields = fields.len(), "parsed table");
        schema.tables.push(SchemaTable { name, fields });
    }
    schema
}

fn parse_column(line: &str, table: &str) -> Option<SchemaField> {
    let line = line.trim().trim_end_matches(',').trim();
    if line.is_empty() || line.starts_with("--") || line.starts_with("/*") || line.starts_with('*') {
        return None;
    }
    let upper = line.to_ascii_uppercase();
    if CONSTRAINT_PREFIXES.iter().any(|p| upper.starts_with(p)) {
        return None;
    }
    let caps = RE_COLUMN.as_ref()?.captures(line)?;
    Some(SchemaField {
        name: caps[1].to_string(),
        field_type: caps[2].to_string(),
        nullable: !upper.contains("NOT NULL"),
        table: table.to_string(),
    })
}
