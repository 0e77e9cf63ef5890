use crate::{mapping::TypeMapping, node::Table};

///
/// DdlRenderer
///
/// Produces literal create/drop statement text for a table.
///

pub trait DdlRenderer: Send + Sync {
    fn create_table(&self, table: &Table, mapping: &dyn TypeMapping) -> String;

    fn drop_table(&self, table: &Table) -> String;
}

///
/// SqliteDdlRenderer
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteDdlRenderer;

impl DdlRenderer for SqliteDdlRenderer {
    fn create_table(&self, table: &Table, mapping: &dyn TypeMapping) -> String {
        let columns = table
            .fields
            .iter()
            .map(|field| {
                let sql_type = field
                    .raw_type
                    .as_deref()
                    .unwrap_or_else(|| mapping.sql_type(field.ty));

                let mut column = format!("\t{} {sql_type}", field.name);
                if field.primary_key {
                    column.push_str(" PRIMARY KEY");
                    if field.auto_increment {
                        column.push_str(" AUTOINCREMENT");
                    }
                } else if !field.nullable {
                    column.push_str(" NOT NULL");
                }

                column
            })
            .collect::<Vec<_>>();

        format!("CREATE TABLE {} (\n{}\n);", table.name, columns.join(",\n"))
    }

    fn drop_table(&self, table: &Table) -> String {
        format!("DROP TABLE IF EXISTS {};", table.name)
    }
}
