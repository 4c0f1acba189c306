//! Arithmetic operations a battle question can use

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A concrete arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Every concrete operation, in draw order for the wildcard
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Symbol used when rendering the plain equation
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '−',
            Operation::Multiply => '×',
            Operation::Divide => '÷',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

/// One entry of a profile's allowed-operation set
///
/// `Any` is the wildcard; the original level tables spelled it `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationChoice {
    Add,
    Subtract,
    Multiply,
    Divide,
    #[serde(alias = "all")]
    Any,
}

impl From<Operation> for OperationChoice {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Add => OperationChoice::Add,
            Operation::Subtract => OperationChoice::Subtract,
            Operation::Multiply => OperationChoice::Multiply,
            Operation::Divide => OperationChoice::Divide,
        }
    }
}

impl OperationChoice {
    /// The concrete operation, or None for the wildcard
    pub fn concrete(&self) -> Option<Operation> {
        match self {
            OperationChoice::Add => Some(Operation::Add),
            OperationChoice::Subtract => Some(Operation::Subtract),
            OperationChoice::Multiply => Some(Operation::Multiply),
            OperationChoice::Divide => Some(Operation::Divide),
            OperationChoice::Any => None,
        }
    }
}

/// Pick the operation for one question.
///
/// If the wildcard is present anywhere in `allowed` the pick is uniform over
/// all four operations, otherwise uniform over the listed entries. An empty
/// set is rejected at config load; here it degrades to addition.
pub fn pick_operation<R: Rng + ?Sized>(allowed: &[OperationChoice], rng: &mut R) -> Operation {
    if allowed.contains(&OperationChoice::Any) {
        return Operation::ALL[rng.random_range(0..Operation::ALL.len())];
    }

    allowed
        .choose(rng)
        .and_then(OperationChoice::concrete)
        .unwrap_or(Operation::Add)
}
