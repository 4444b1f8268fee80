use crate::models::Attribute;

/// Attributes provides numeric access to the named fields of a record.
pub trait Attributes {
    /// Reads the value of an attribute.
    ///
    /// # Arguments
    /// * `attribute` - The attribute to read.
    ///
    /// # Returns
    /// The integer value currently held by the record.
    fn attribute(&self, attribute: Attribute) -> i64;
}
