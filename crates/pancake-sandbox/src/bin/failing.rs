//! Sample suite that exercises every failure path.
//!
//! `Passing.*` is the only suite expected to pass; everything under `Broken`
//! and `Guarded` fails on purpose.

use pancake::*;

tt_test!(Passing, ok, |t| {
    tt_expect_eq!(t, 2 + 2, 4);
});

tt_test!(Broken, nonfatal_continues, |t| {
    tt_expect_eq!(t, 2, 4);
    println!("after nonfatal");
    tt_expect_true!(t, 1 > 2);
});

#[derive(Default)]
struct Guarded {
    open: bool,
}

impl Fixture for Guarded {
    fn set_up(&mut self, _t: &mut Context<'_>) -> Outcome {
        self.open = true;
        Ok(())
    }

    fn tear_down(&mut self, _t: &mut Context<'_>) -> Outcome {
        println!("tear_down ran (open={})", self.open);
        Ok(())
    }
}

tt_test_f!(Guarded, fatal_aborts, |t, fx| {
    tt_assert_eq!(t, fx.open, false);
    println!("unreachable after fatal");
});

#[derive(Default)]
struct BrokenSetUp;

impl Fixture for BrokenSetUp {
    fn set_up(&mut self, t: &mut Context<'_>) -> Outcome {
        tt_assert_true!(t, std::env::var_os("PANCAKE_SANDBOX_READY").is_some());
        Ok(())
    }

    fn tear_down(&mut self, _t: &mut Context<'_>) -> Outcome {
        println!("set_up failed, tear_down still ran");
        Ok(())
    }
}

tt_test_f!(BrokenSetUp, body_skipped, |t, fx| {
    println!("body ran after set_up");
});

tt_main!();
