pub(crate) enum DeleteResult<V> {
    /// The key wasn't found so nothing was deleted.
    NotFound,
    /// The node holding the key was unlinked from the tree. The value is handed back to the
    /// caller of `Tree::delete` untouched.
    Deleted(V),
}

impl<V> DeleteResult<V> {
    pub(crate) fn into_value(self) -> Option<V> {
        match self {
            Self::NotFound => None,
            Self::Deleted(value) => Some(value),
        }
    }
}
