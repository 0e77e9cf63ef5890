use crate::model::ClassModel;
use serde::Serialize;

///
/// GeneratedTable
///
/// Everything produced for one table.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedTable {
    pub table: String,

    /// The record class, or the enum class of an enumeration table.
    pub record: ClassModel,

    /// Standalone enum classes for local enums that are not nested.
    pub siblings: Vec<ClassModel>,

    pub test: Option<ClassModel>,
}

impl GeneratedTable {
    /// Every produced class: record, siblings, then the test.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        std::iter::once(&self.record)
            .chain(&self.siblings)
            .chain(self.test.as_ref())
    }
}

///
/// CodeEmitter
///
/// Renders class models into the target language and persists them.
///

pub trait CodeEmitter {
    type Error;

    fn emit(&mut self, class: &ClassModel) -> Result<(), Self::Error>;
}

/// Hand every produced class to `emitter`, returning how many were emitted.
pub fn emit_all<E: CodeEmitter + ?Sized>(
    emitter: &mut E,
    generated: &[GeneratedTable],
) -> Result<usize, E::Error> {
    let mut count = 0;

    for class in generated.iter().flat_map(GeneratedTable::classes) {
        emitter.emit(class)?;
        count += 1;
    }

    Ok(count)
}
