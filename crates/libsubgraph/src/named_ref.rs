use std::marker::PhantomData;

/// Represents a strongly-typed, `String`-named reference to a "resource"
/// (`TResource`) stored within some other data-store (`TSource`) without
/// holding an explicit reference to the data-store. De-referencing a
/// [NamedRef] is done via [NamedRef::deref()] by providing an explicit
/// reference to the `TSource`.
///
/// Two concrete uses exist in this crate:
///
/// - [`NamedTypeRef`](crate::types::NamedTypeRef) lets a
///   [`TypeAnnotation`](crate::types::TypeAnnotation) point at a
///   [`SchemaType`](crate::types::SchemaType) without the
///   [`Schema`](crate::schema::Schema) having to store self-references.
/// - [`SyntheticFieldRef`](crate::synthetic::SyntheticFieldRef) lets a
///   [`FieldPath`](crate::field_path::FieldPath) or an
///   [`Expr`](crate::synthetic::Expr) name a synthetic field that is looked up
///   in a [`SyntheticFieldRegistry`](crate::synthetic::SyntheticFieldRegistry)
///   only when it is needed. Because the lookup is lazy, a synthetic field may
///   (erroneously) name itself, which is what the registry's cycle check
///   guards against.
pub struct NamedRef<TSource, TResource: DerefByName<Source = TSource>> {
    name: String,
    phantom: PhantomData<fn(&TSource) -> TResource>,
}
impl<TSource, TResource: DerefByName<Source = TSource>> NamedRef<TSource, TResource> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn new(name: impl AsRef<str>) -> NamedRef<TSource, TResource> {
        NamedRef {
            name: name.as_ref().to_string(),
            phantom: PhantomData,
        }
    }

    pub fn deref<'a>(
        &self,
        source: &'a TSource,
    ) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}

// Implemented by hand so that neither `TSource` nor `TResource` need to
// implement these traits themselves.
impl<TSource, TResource: DerefByName<Source = TSource>> Clone for NamedRef<TSource, TResource> {
    fn clone(&self) -> Self {
        Self::new(self.name.as_str())
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> std::fmt::Debug for NamedRef<TSource, TResource> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NamedRef").field(&self.name).finish()
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> PartialEq for NamedRef<TSource, TResource> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> Eq for NamedRef<TSource, TResource> {}
impl<TSource, TResource: DerefByName<Source = TSource>> std::hash::Hash for NamedRef<TSource, TResource> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

/// Implement this trait for any type that could be referenced by name. This
/// will enable usage of [`NamedRef<T>`](NamedRef) for that type.
pub trait DerefByName {
    type Source;

    fn deref_name<'a>(
        source: &'a Self::Source,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> where Self: Sized;

    fn named_ref(name: &str) -> NamedRef<Self::Source, Self> where Self: Sized {
        NamedRef::<Self::Source, Self>::new(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DerefByNameError {
    DanglingReference(String),
}
