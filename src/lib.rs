#![cfg_attr(not(test), no_std)]

#[cfg(not(any(
    feature = "stm32f0x0",
    feature = "stm32f0x1",
    feature = "stm32f0x2",
    feature = "stm32f0x8"
)))]
compile_error!(
    "Select a device with one of the features stm32f0x0, stm32f0x1, stm32f0x2 or stm32f0x8"
);

#[cfg(any(
    all(
        feature = "stm32f0x0",
        any(feature = "stm32f0x1", feature = "stm32f0x2", feature = "stm32f0x8")
    ),
    all(
        feature = "stm32f0x1",
        any(feature = "stm32f0x2", feature = "stm32f0x8")
    ),
    all(feature = "stm32f0x2", feature = "stm32f0x8"),
))]
compile_error!(
    "Select exactly one device: more than one of stm32f0x0, stm32f0x1, stm32f0x2 and stm32f0x8 is enabled"
);

// Only the first selected device is re-exported, so a bad selection reports
// the error above and nothing else
#[cfg(feature = "stm32f0x0")]
pub use stm32f0::stm32f0x0 as pac;
#[cfg(all(feature = "stm32f0x1", not(feature = "stm32f0x0")))]
pub use stm32f0::stm32f0x1 as pac;
#[cfg(all(
    feature = "stm32f0x2",
    not(any(feature = "stm32f0x0", feature = "stm32f0x1"))
))]
pub use stm32f0::stm32f0x2 as pac;
#[cfg(all(
    feature = "stm32f0x8",
    not(any(feature = "stm32f0x0", feature = "stm32f0x1", feature = "stm32f0x2"))
))]
pub use stm32f0::stm32f0x8 as pac;

pub mod gpio;
pub mod prelude;
pub mod typelevel;

mod private {
    /// Super trait used to mark traits with an exhaustive set of
    /// implementations
    pub trait Sealed {}
}

pub(crate) use private::Sealed;
