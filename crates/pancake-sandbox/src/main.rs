//! Sample suite: every case here passes
//!
//! ```text
//! pancake-sandbox [--filter=PATTERN] [--color=always|never|auto] [--no-color] [--list]
//! ```

use pancake::*;

tt_test!(Math, add, |t| {
    let a = 2 + 2;
    tt_expect_eq!(t, a, 4);
    tt_assert_true!(t, a == 4);
});

#[derive(Default)]
struct MyFix {
    buf: i32,
}

impl Fixture for MyFix {
    fn set_up(&mut self, _t: &mut Context<'_>) -> Outcome {
        self.buf = 42;
        Ok(())
    }
}

tt_test_f!(MyFix, value, |t, fx| {
    tt_expect_eq!(t, fx.buf, 42);
});

tt_main!();
