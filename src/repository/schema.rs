//! Explicit table definition for equipment records

use rust_decimal::Decimal;

/// Column of a persisted table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub max_length: Option<usize>,
    pub unique: bool,
}

/// Table layout, used to build queries
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub schema: &'static str,
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [Column],
}

pub const CODE_MAX_LEN: usize = 50;
pub const TYPE_MAX_LEN: usize = 120;
pub const MODEL_MAX_LEN: usize = 120;
pub const STATUS_MAX_LEN: usize = 50;
pub const LOCATION_MAX_LEN: usize = 200;

/// `horimetro` is NUMERIC(10,2)
pub const HOUR_METER_SCALE: u32 = 2;
pub const HOUR_METER_MAX: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, HOUR_METER_SCALE);

const fn varchar(name: &'static str, max: usize, unique: bool) -> Column {
    Column {
        name,
        sql_type: "VARCHAR",
        max_length: Some(max),
        unique,
    }
}

pub const EQUIPMENT: Table = Table {
    schema: "public",
    name: "equipamentos_pesados",
    primary_key: "id",
    columns: &[
        varchar("codigo", CODE_MAX_LEN, true),
        varchar("tipo", TYPE_MAX_LEN, false),
        varchar("modelo", MODEL_MAX_LEN, false),
        Column {
            name: "horimetro",
            sql_type: "NUMERIC(10,2)",
            max_length: None,
            unique: false,
        },
        varchar("status_operacional", STATUS_MAX_LEN, false),
        Column {
            name: "data_aquisicao",
            sql_type: "DATE",
            max_length: None,
            unique: false,
        },
        varchar("localizacao_atual", LOCATION_MAX_LEN, false),
    ],
};

impl Table {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key followed by every data column
    pub fn select_list(&self) -> String {
        std::iter::once(self.primary_key)
            .chain(self.columns.iter().map(|c| c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Data columns only, in declaration order
    pub fn insert_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `$1, $2, ...` matching [`Table::insert_list`]
    pub fn insert_placeholders(&self) -> String {
        (1..=self.columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `col = $1, ...`; the primary key binds last
    pub fn update_assignments(&self) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.name, i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
