/// A ternary expression macro.  Rust's `if` is already an expression,
/// but `cargo fmt` insists on breaking it across four lines, and the
/// border-handling tables in the seam code read much better as a
/// compact condition/value/value triple.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
