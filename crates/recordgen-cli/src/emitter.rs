use anyhow::Context;
use recordgen::build::{emit::CodeEmitter, model::ClassModel};
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// JsonEmitter
///
/// Writes each class model as pretty JSON at `<out>/<package path>/<Class>.json`.
///

#[derive(Debug)]
pub struct JsonEmitter {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl JsonEmitter {
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Output path of `class`, one directory per package segment.
    #[must_use]
    pub fn path_for(&self, class: &ClassModel) -> PathBuf {
        let mut path = self.out_dir.clone();
        path.extend(class.package.split('.').filter(|s| !s.is_empty()));
        path.push(format!("{}.json", class.name));

        path
    }
}

impl CodeEmitter for JsonEmitter {
    type Error = anyhow::Error;

    fn emit(&mut self, class: &ClassModel) -> Result<(), Self::Error> {
        let path = self.path_for(class);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }

        let json = serde_json::to_string_pretty(class)
            .with_context(|| format!("serializing {}", class.qualified_name()))?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;

        tracing::debug!(path = %path.display(), "wrote class");
        self.written.push(path);

        Ok(())
    }
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen::build::model::ClassKind;

    #[test]
    fn writes_one_file_per_class_under_package_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut emitter = JsonEmitter::new(dir.path());
        let class = ClassModel::new("PersonBaseRecord", "com.example.person", ClassKind::Record);

        emitter.emit(&class).expect("emit");

        let path = dir.path().join("com/example/person/PersonBaseRecord.json");
        assert_eq!(emitter.written(), [path.clone()]);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json");
        assert_eq!(json["name"], "PersonBaseRecord");
        assert_eq!(json["kind"], "Record");
    }
}
