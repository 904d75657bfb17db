use crate::builder::build_index;
use crate::corpus::CorpusLayout;
use crate::persist::{load_index, save_index};
use crate::Index;
use anyhow::Result;

/// Source of the index a keyword search runs against.
pub trait IndexProvider {
    fn index(&self) -> Result<Index>;
}

/// An in-memory index serves itself.
impl IndexProvider for Index {
    fn index(&self) -> Result<Index> {
        Ok(self.clone())
    }
}

/// Loads the persisted index of a corpus. A missing, corrupt or outdated
/// file is replaced by a fresh rebuild before returning. If the rebuilt
/// index cannot be written, the failure is logged as an error and the
/// in-memory index is still returned.
#[derive(Debug, Clone)]
pub struct FileIndexProvider {
    layout: CorpusLayout,
}

impl FileIndexProvider {
    pub fn new(layout: CorpusLayout) -> Self {
        Self { layout }
    }
}

impl IndexProvider for FileIndexProvider {
    fn index(&self) -> Result<Index> {
        let path = self.layout.index_path();
        match load_index(&path) {
            Ok(index) => Ok(index),
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "index unusable, rebuilding");
                let index = build_index(&self.layout);
                if let Err(err) = save_index(&path, &index) {
                    tracing::error!(error = %err, path = %path.display(), "failed to write rebuilt index");
                }
                Ok(index)
            }
        }
    }
}
