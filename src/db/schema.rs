//! SQL DDL and the schema catalog for the insurance database.
//!
//! The catalog is the single source of truth for what the model is told about
//! the database; the DDL below must stay in sync with it.

use serde::Serialize;
use std::fmt::Write;
use std::sync::LazyLock;

/// SQLite schema for the seven demo tables. `reset()` drops and re-runs this.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS addresses (
    address_id INTEGER PRIMARY KEY AUTOINCREMENT,
    street_address TEXT,
    city TEXT,
    state TEXT,
    zip_code TEXT,
    country TEXT DEFAULT 'USA'
);

CREATE TABLE IF NOT EXISTS customers (
    customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT,
    last_name TEXT,
    date_of_birth TEXT,
    email TEXT,
    phone TEXT,
    ssn TEXT,
    address_id INTEGER REFERENCES addresses(address_id)
);

CREATE TABLE IF NOT EXISTS agents (
    agent_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT,
    last_name TEXT,
    email TEXT,
    phone TEXT,
    hire_date TEXT,
    address_id INTEGER REFERENCES addresses(address_id)
);

CREATE TABLE IF NOT EXISTS policy_types (
    type_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    description TEXT,
    base_premium REAL,
    coverage_limit REAL
);

CREATE TABLE IF NOT EXISTS policies (
    policy_id INTEGER PRIMARY KEY AUTOINCREMENT,
    policy_number TEXT UNIQUE,
    customer_id INTEGER REFERENCES customers(customer_id),
    agent_id INTEGER REFERENCES agents(agent_id),
    type_id INTEGER REFERENCES policy_types(type_id),
    start_date TEXT,
    end_date TEXT,
    premium REAL,
    status TEXT
);

CREATE TABLE IF NOT EXISTS claims (
    claim_id INTEGER PRIMARY KEY AUTOINCREMENT,
    claim_number TEXT UNIQUE,
    policy_id INTEGER REFERENCES policies(policy_id),
    customer_id INTEGER REFERENCES customers(customer_id),
    claim_date TEXT,
    description TEXT,
    amount_claimed REAL,
    amount_paid REAL,
    status TEXT
);

CREATE TABLE IF NOT EXISTS prospects (
    prospect_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT,
    last_name TEXT,
    email TEXT,
    phone TEXT,
    source TEXT,
    status TEXT,
    notes TEXT,
    created_date TEXT
);
"#;

/// Drop order respects the FK graph (children first).
pub const TABLE_NAMES: [&str; 7] = [
    "claims",
    "policies",
    "prospects",
    "customers",
    "agents",
    "policy_types",
    "addresses",
];

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaCatalog {
    pub tables: Vec<TableSchema>,
    pub relationships: Vec<&'static str>,
}

impl SchemaCatalog {
    /// Render the catalog as the plain-text block embedded in every prompt.
    pub fn prompt_text(&self) -> String {
        let mut out = String::from("The database has the following tables:\n\n");
        for (i, table) in self.tables.iter().enumerate() {
            let cols = table
                .columns
                .iter()
                .map(|(name, ty)| format!("{name} {ty}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "{}. {}: ({})", i + 1, table.name, cols);
        }
        out.push_str("\nRelationships:\n");
        for rel in &self.relationships {
            let _ = writeln!(out, "- {rel}");
        }
        out
    }
}

/// Built once at startup; immutable afterwards.
pub static CATALOG: LazyLock<SchemaCatalog> = LazyLock::new(|| SchemaCatalog {
    tables: vec![
        TableSchema {
            name: "addresses",
            columns: vec![
                ("address_id", "INTEGER"),
                ("street_address", "TEXT"),
                ("city", "TEXT"),
                ("state", "TEXT"),
                ("zip_code", "TEXT"),
                ("country", "TEXT"),
            ],
        },
        TableSchema {
            name: "customers",
            columns: vec![
                ("customer_id", "INTEGER"),
                ("first_name", "TEXT"),
                ("last_name", "TEXT"),
                ("date_of_birth", "TEXT"),
                ("email", "TEXT"),
                ("phone", "TEXT"),
                ("ssn", "TEXT"),
                ("address_id", "INTEGER"),
            ],
        },
        TableSchema {
            name: "agents",
            columns: vec![
                ("agent_id", "INTEGER"),
                ("first_name", "TEXT"),
                ("last_name", "TEXT"),
                ("email", "TEXT"),
                ("phone", "TEXT"),
                ("hire_date", "TEXT"),
                ("address_id", "INTEGER"),
            ],
        },
        TableSchema {
            name: "policy_types",
            columns: vec![
                ("type_id", "INTEGER"),
                ("name", "TEXT"),
                ("description", "TEXT"),
                ("base_premium", "REAL"),
                ("coverage_limit", "REAL"),
            ],
        },
        TableSchema {
            name: "policies",
            columns: vec![
                ("policy_id", "INTEGER"),
                ("policy_number", "TEXT"),
                ("customer_id", "INTEGER"),
                ("agent_id", "INTEGER"),
                ("type_id", "INTEGER"),
                ("start_date", "TEXT"),
                ("end_date", "TEXT"),
                ("premium", "REAL"),
                ("status", "TEXT"),
            ],
        },
        TableSchema {
            name: "claims",
            columns: vec![
                ("claim_id", "INTEGER"),
                ("claim_number", "TEXT"),
                ("policy_id", "INTEGER"),
                ("customer_id", "INTEGER"),
                ("claim_date", "TEXT"),
                ("description", "TEXT"),
                ("amount_claimed", "REAL"),
                ("amount_paid", "REAL"),
                ("status", "TEXT"),
            ],
        },
        TableSchema {
            name: "prospects",
            columns: vec![
                ("prospect_id", "INTEGER"),
                ("first_name", "TEXT"),
                ("last_name", "TEXT"),
                ("email", "TEXT"),
                ("phone", "TEXT"),
                ("source", "TEXT"),
                ("status", "TEXT"),
                ("notes", "TEXT"),
                ("created_date", "TEXT"),
            ],
        },
    ],
    relationships: vec![
        "customers.address_id -> addresses.address_id",
        "agents.address_id -> addresses.address_id",
        "policies.customer_id -> customers.customer_id",
        "policies.agent_id -> agents.agent_id",
        "policies.type_id -> policy_types.type_id",
        "claims.policy_id -> policies.policy_id",
        "claims.customer_id -> customers.customer_id",
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_table_in_drop_order() {
        let catalog_names: Vec<&str> = CATALOG.tables.iter().map(|t| t.name).collect();
        for name in TABLE_NAMES {
            assert!(catalog_names.contains(&name), "missing table {name}");
        }
        assert_eq!(catalog_names.len(), TABLE_NAMES.len());
    }

    #[test]
    fn prompt_text_mentions_tables_and_relationships() {
        let text = CATALOG.prompt_text();
        assert!(text.contains("policies"));
        assert!(text.contains("claims.policy_id -> policies.policy_id"));
    }
}
