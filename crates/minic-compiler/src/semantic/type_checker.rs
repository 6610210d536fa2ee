use thiserror::Error;

use crate::ast::nodes::BinaryOp;

use super::types::{Type, Value};

/// Constant division whose divisor folded to zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Division by zero")]
pub struct DivisionByZero;

/// Whether a value of type `from` may be stored where `to` is expected.
///
/// Only identical, non-error types are compatible; there is no conversion
/// between `int` and `bool`.
pub fn types_compatible(to: Type, from: Type) -> bool {
    if to.is_error() || from.is_error() {
        return false;
    }
    to == from
}

/// Check a binary operation and return the result type, or an error message.
pub fn check_binary_op(left: Type, right: Type) -> Result<Type, String> {
    if !types_compatible(left, right) {
        return Err(format!(
            "Type mismatch in binary operation: {} and {}",
            left, right
        ));
    }
    if left != Type::Int {
        return Err(format!(
            "Arithmetic operations are only supported for int type, got: {}",
            left
        ));
    }
    Ok(Type::Int)
}

/// Fold a binary operation over two constant operands.
///
/// Yields `Ok(None)` unless both operands are known integers. Arithmetic
/// wraps on overflow.
pub fn fold_binary(
    left: Option<Value>,
    op: BinaryOp,
    right: Option<Value>,
) -> Result<Option<Value>, DivisionByZero> {
    let (Some(l), Some(r)) = (
        left.and_then(Value::as_int),
        right.and_then(Value::as_int),
    ) else {
        return Ok(None);
    };
    let folded = match op {
        BinaryOp::Plus => l.wrapping_add(r),
        BinaryOp::Minus => l.wrapping_sub(r),
        BinaryOp::Times => l.wrapping_mul(r),
        BinaryOp::Divide => {
            if r == 0 {
                return Err(DivisionByZero);
            }
            l.wrapping_div(r)
        }
    };
    Ok(Some(Value::Int(folded)))
}
