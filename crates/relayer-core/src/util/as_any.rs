use core::any::Any;

/// Exposes a value as `&dyn Any`, so that a concrete type can be recovered
/// from behind a capability trait object.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
