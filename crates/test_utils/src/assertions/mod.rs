// Path: crates/test_utils/src/assertions/mod.rs
//! Assertion utilities for testing

/// Assert that two byte arrays are equal
#[macro_export]
macro_rules! assert_bytes_eq {
    ($left:expr, $right:expr) => {
        assert_eq!($left.as_ref(), $right.as_ref());
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        assert_eq!($left.as_ref(), $right.as_ref(), $($arg)+);
    };
}

/// Assert that a result is OK and unwrap it
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
}

/// Assert that a result is an error with the given stable error code, and
/// unwrap the error.
#[macro_export]
macro_rules! assert_err_code {
    ($expr:expr, $code:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err({}), got Ok: {:?}", $code, val),
            Err(err) => {
                use evm_mapping_types::error::ErrorCode as _;
                assert_eq!(err.code(), $code, "unexpected error: {}", err);
                err
            }
        }
    };
}
