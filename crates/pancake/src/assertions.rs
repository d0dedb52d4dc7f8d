//! Assertion and declaration macros
//!
//! # Assertions
//!
//! Every assertion takes the case context first. `expect` forms record a
//! failure and keep going; `assert` forms record it and return early from the
//! enclosing body with `?`, so they only work inside a function returning
//! [`Outcome`](crate::Outcome) (case bodies and fixture hooks do).
//!
//! - `tt_expect_true!(t, cond)` / `tt_assert_true!(t, cond)`
//! - `tt_expect_false!(t, cond)` / `tt_assert_false!(t, cond)`
//! - `tt_expect_eq!(t, lhs, rhs)` / `tt_assert_eq!(t, lhs, rhs)`
//! - `tt_expect_ne!(t, lhs, rhs)` / `tt_assert_ne!(t, lhs, rhs)`
//!
//! Comparison failures carry `lhs=<value>, rhs=<value>`. Values print with
//! `Debug`; a type without `Debug` prints as `<type name>`.
//!
//! # Declarations
//!
//! ```ignore
//! tt_test!(Math, add, |t| {
//!     tt_expect_eq!(t, 2 + 2, 4);
//! });
//!
//! tt_test_f!(MyFix, value, |t, fx| {
//!     tt_assert_eq!(t, fx.buf, 42);
//! });
//! ```

use std::any::type_name;
use std::fmt::Debug;

#[doc(hidden)]
pub struct Describe<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait DescribeDebug {
    fn describe(&self) -> String;
}

impl<T: Debug + ?Sized> DescribeDebug for &Describe<'_, T> {
    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }
}

#[doc(hidden)]
pub trait DescribeTypeName {
    fn describe(&self) -> String;
}

impl<T: ?Sized> DescribeTypeName for Describe<'_, T> {
    fn describe(&self) -> String {
        format!("<{}>", type_name::<T>())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tt_here {
    () => {
        $crate::Location::new(::core::file!(), ::core::line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tt_describe {
    ($value:expr) => {{
        #[allow(unused_imports)]
        use $crate::assertions::{DescribeDebug as _, DescribeTypeName as _};
        (&&$crate::assertions::Describe($value)).describe()
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tt_compare {
    ($t:expr, $method:ident, $op:tt, $lhs:expr, $rhs:expr) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => {
                let ok = *lhs $op *rhs;
                let diagnostic = if ok {
                    ::std::string::String::new()
                } else {
                    ::std::format!(
                        "lhs={}, rhs={}",
                        $crate::__tt_describe!(lhs),
                        $crate::__tt_describe!(rhs)
                    )
                };
                $t.$method(
                    ok,
                    $crate::__tt_here!(),
                    ::core::concat!(
                        ::core::stringify!($lhs),
                        " ",
                        ::core::stringify!($op),
                        " ",
                        ::core::stringify!($rhs)
                    ),
                    diagnostic,
                )
            }
        }
    };
}

/// Non-fatal: record a failure when `cond` is false
#[macro_export]
macro_rules! tt_expect_true {
    ($t:expr, $cond:expr $(,)?) => {{
        let ok: bool = $cond;
        $t.expect(
            ok,
            $crate::__tt_here!(),
            ::core::stringify!($cond),
            ::std::string::String::new(),
        );
    }};
}

/// Fatal: record a failure and leave the body when `cond` is false
#[macro_export]
macro_rules! tt_assert_true {
    ($t:expr, $cond:expr $(,)?) => {{
        let ok: bool = $cond;
        $t.require(
            ok,
            $crate::__tt_here!(),
            ::core::stringify!($cond),
            ::std::string::String::new(),
        )?;
    }};
}

/// Non-fatal: record a failure when `cond` is true
#[macro_export]
macro_rules! tt_expect_false {
    ($t:expr, $cond:expr $(,)?) => {{
        let ok: bool = !($cond);
        $t.expect(
            ok,
            $crate::__tt_here!(),
            ::core::concat!("!(", ::core::stringify!($cond), ")"),
            ::std::string::String::new(),
        );
    }};
}

/// Fatal: record a failure and leave the body when `cond` is true
#[macro_export]
macro_rules! tt_assert_false {
    ($t:expr, $cond:expr $(,)?) => {{
        let ok: bool = !($cond);
        $t.require(
            ok,
            $crate::__tt_here!(),
            ::core::concat!("!(", ::core::stringify!($cond), ")"),
            ::std::string::String::new(),
        )?;
    }};
}

/// Non-fatal: `lhs == rhs`
#[macro_export]
macro_rules! tt_expect_eq {
    ($t:expr, $lhs:expr, $rhs:expr $(,)?) => {{
        $crate::__tt_compare!($t, expect, ==, $lhs, $rhs);
    }};
}

/// Fatal: `lhs == rhs`
#[macro_export]
macro_rules! tt_assert_eq {
    ($t:expr, $lhs:expr, $rhs:expr $(,)?) => {{
        let outcome: $crate::Outcome = $crate::__tt_compare!($t, require, ==, $lhs, $rhs);
        outcome?;
    }};
}

/// Non-fatal: `lhs != rhs`
#[macro_export]
macro_rules! tt_expect_ne {
    ($t:expr, $lhs:expr, $rhs:expr $(,)?) => {{
        $crate::__tt_compare!($t, expect, !=, $lhs, $rhs);
    }};
}

/// Fatal: `lhs != rhs`
#[macro_export]
macro_rules! tt_assert_ne {
    ($t:expr, $lhs:expr, $rhs:expr $(,)?) => {{
        let outcome: $crate::Outcome = $crate::__tt_compare!($t, require, !=, $lhs, $rhs);
        outcome?;
    }};
}

/// Declare and register a plain case.
///
/// The body sees the case context as `t` (any identifier works) and may use
/// every assertion macro.
#[macro_export]
macro_rules! tt_test {
    ($suite:ident, $name:ident, |$t:ident| $body:block) => {
        const _: () = {
            #[allow(unused_variables, unreachable_code)]
            fn body($t: &mut $crate::Context<'_>) -> $crate::Outcome {
                $body
                ::core::result::Result::Ok(())
            }

            fn invoke(t: &mut $crate::Context<'_>) {
                $crate::fixture::run_plain(t, body)
            }

            $crate::inventory::submit! {
                $crate::Declaration::new(
                    ::core::stringify!($suite),
                    ::core::stringify!($name),
                    ::core::file!(),
                    ::core::line!(),
                    invoke,
                )
            }
        };
    };
}

/// Declare and register a case that runs against a fresh `$fixture`.
///
/// The fixture type names the suite, as in `Fixture.name`.
#[macro_export]
macro_rules! tt_test_f {
    ($fixture:ident, $name:ident, |$t:ident, $fx:ident| $body:block) => {
        const _: () = {
            #[allow(unused_variables, unreachable_code)]
            fn body($t: &mut $crate::Context<'_>, $fx: &mut $fixture) -> $crate::Outcome {
                $body
                ::core::result::Result::Ok(())
            }

            fn invoke(t: &mut $crate::Context<'_>) {
                $crate::fixture::run_fixture::<$fixture, _>(t, body)
            }

            $crate::inventory::submit! {
                $crate::Declaration::new(
                    ::core::stringify!($fixture),
                    ::core::stringify!($name),
                    ::core::file!(),
                    ::core::line!(),
                    invoke,
                )
            }
        };
    };
}

/// Define `main` for a `harness = false` test target
#[macro_export]
macro_rules! tt_main {
    () => {
        fn main() {
            $crate::logging::init();
            ::std::process::exit($crate::run_all_tests(::std::env::args()));
        }
    };
}
