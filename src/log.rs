//  LOG.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 10:02:11
//  Last edited:
//    18 Oct 2026, 18:20:37
//  Auto updated?
//    Yes
//
//  Description:
//!   Provides [`log`]-macro counterparts that only emit something when the
//!   engine is compiled with the `log`-feature.
//!
//!   The engine logs every pass, fact change and (at trace level) every
//!   candidate binding it considers, which is far too chatty to pay for in
//!   builds that don't want it.
//!
//!   The macros always expand to a block of type `()`. Without the feature,
//!   that block is empty and the arguments are never evaluated.
//


/***** LIBRARY *****/
/// Forwards to `log::warn!()` if the `log`-feature is enabled.
#[allow(unused)]
macro_rules! warning {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($t)*);
    }};
}
#[allow(unused)]
pub(crate) use warning as warn;

/// Forwards to `log::debug!()` if the `log`-feature is enabled.
///
/// Used for things happening once per pass or per fact change.
#[allow(unused)]
macro_rules! debug {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($t)*);
    }};
}
#[allow(unused)]
pub(crate) use debug;

/// Forwards to `log::trace!()` if the `log`-feature is enabled.
///
/// Used for things happening once per candidate binding.
#[allow(unused)]
macro_rules! trace {
    ($($t:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::trace!($($t)*);
    }};
}
#[allow(unused)]
pub(crate) use trace;
