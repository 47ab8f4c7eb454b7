//! # Support for type-level programming
//!
//! Pins carry their identity and polarity in their type. The [`Is`] trait
//! below lets generic code accept "any pin" through a type class such as
//! [`AnyPin`](crate::gpio::AnyPin) and still get back the concrete
//! [`Pin`](crate::gpio::Pin) type. The pattern follows the
//! [ATSAMD HAL](https://docs.rs/atsamd-hal/0.13.0/atsamd_hal/typelevel/index.html).
use crate::Sealed;

/// Marker trait for type identity
///
/// Every implementor has `<Self as Is>::Type == Self`. Used as a bound, e.g.
/// `P: Is<Type = Pin<PA5, ActiveLow>>`, it pins a type parameter to one
/// specific type while keeping the parameter generic, and the super traits
/// convert between the two for free:
///
/// ```ignore
/// fn blink<P: AnyPin>(led: P) {
///     let led: SpecificPin<P> = led.into();
///     led.toggle();
/// }
/// ```
pub trait Is
where
    Self: Sealed,
    Self: From<IsType<Self>>,
    Self: Into<IsType<Self>>,
    Self: AsRef<IsType<Self>>,
    Self: AsMut<IsType<Self>>,
{
    type Type;
}

/// Type alias for [`Is::Type`]
pub type IsType<T> = <T as Is>::Type;

impl<T> Is for T
where
    T: Sealed + AsRef<T> + AsMut<T>,
{
    type Type = T;
}
