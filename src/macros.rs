macro_rules! builder_must_use {
    () => {
        "builder setters take the entire structure and return the result"
    };
}

/// Generates by-value setters for a builder whose fields share the setter's name.
macro_rules! builder_setters {
    ($(#[$attr:meta])* $name:ident : $ty:ty) => {
        $(#[$attr])*
        #[must_use = builder_must_use!()]
        #[inline(always)]
        pub fn $name(mut self, $name: $ty) -> Self {
            self.$name = $name;
            self
        }
    };
    ($($(#[$attr:meta])* $name:ident : $ty:ty),+ $(,)?) => {$(
        builder_setters!($(#[$attr])* $name: $ty);
    )+};
}
