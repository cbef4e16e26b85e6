//! Compound property writer handle.
//!
//! Compound properties only carry the parent links an array property needs
//! to reach its object and archive.

use std::sync::Arc;

use super::archive::OArchive;
use super::array::OArrayProperty;
use super::group::OGroup;
use super::object::OObject;
use crate::core::PropertyHeader;
use crate::util::Result;

/// Compound property: parent of array properties.
pub struct OCompoundProperty {
    name: String,
    object: Arc<OObject>,
}

impl OCompoundProperty {
    pub fn new(object: Arc<OObject>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            object,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &Arc<OObject> {
        &self.object
    }

    pub fn archive(&self) -> &Arc<OArchive> {
        self.object.archive()
    }

    /// Child compound property on the same object.
    pub fn add_compound(&self, name: impl Into<String>) -> Arc<OCompoundProperty> {
        OCompoundProperty::new(Arc::clone(&self.object), name)
    }

    /// Create an array property writer with a fresh group.
    pub fn create_array_property(self: &Arc<Self>, header: PropertyHeader) -> Result<OArrayProperty> {
        OArrayProperty::new(Arc::clone(self), OGroup::new(), header)
    }
}
