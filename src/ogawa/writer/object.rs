//! Object writer handle.

use std::sync::Arc;

use super::archive::OArchive;
use super::property::OCompoundProperty;

/// Object in the archive hierarchy, owner of a property tree.
pub struct OObject {
    name: String,
    archive: Arc<OArchive>,
}

impl OObject {
    pub fn new(archive: Arc<OArchive>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            archive,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn archive(&self) -> &Arc<OArchive> {
        &self.archive
    }

    /// Child object sharing this object's archive.
    pub fn add_child(&self, name: impl Into<String>) -> Arc<OObject> {
        OObject::new(Arc::clone(&self.archive), name)
    }

    /// Top compound property of this object.
    pub fn properties(self: &Arc<Self>) -> Arc<OCompoundProperty> {
        OCompoundProperty::new(Arc::clone(self), "")
    }
}
