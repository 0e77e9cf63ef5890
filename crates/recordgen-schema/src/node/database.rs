use crate::{Error, prelude::*};
use convert_case::{Case, Casing};

///
/// Database
///
/// The full table list of one schema file. Generation only ever reads it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Database {
    pub name: String,

    /// Base package/namespace; each table's class lives one level below it.
    pub package: String,

    #[serde(default, rename = "table")]
    pub tables: Vec<Table>,
}

impl Database {
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            tables: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Parse a schema document.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Class name and package generated for `table_name`.
    #[must_use]
    pub fn class_info(&self, table_name: &str) -> Option<ClassInfo> {
        let table = self.table(table_name)?;
        let class_name = table
            .class_name
            .clone()
            .unwrap_or_else(|| table.name.to_case(Case::Pascal));
        let package = format!("{}.{}", self.package, class_name.to_lowercase());

        Some(ClassInfo {
            class_name,
            package,
        })
    }
}

///
/// ClassInfo
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ClassInfo {
    pub class_name: String,
    pub package: String,
}

impl ClassInfo {
    /// Wildcard import covering everything generated for the table.
    #[must_use]
    pub fn wildcard_import(&self) -> String {
        format!("{}.*", self.package)
    }

    /// Fully-qualified name of the table's class.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.class_name)
    }
}
