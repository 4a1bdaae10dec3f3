/// Builder-style setter for a field nested one level down, e.g. the page
/// number inside a request's query.
macro_rules! setter {
    ($field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = $subfield.into();
            self
        }
    };
}

pub(crate) use setter;
