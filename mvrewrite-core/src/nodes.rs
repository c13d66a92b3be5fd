// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The PlanNode is the basic data structure of the optimizer. It is dynamically typed and is
//! the internal representation of the plan nodes.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerializableOrderedF64(pub OrderedFloat<f64>);

impl Serialize for SerializableOrderedF64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0 .0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SerializableOrderedF64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let float = f64::deserialize(deserializer)?;
        Ok(SerializableOrderedF64(OrderedFloat(float)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Value {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(SerializableOrderedF64),
    String(Arc<str>),
    Bool(bool),
    /// Days since the unix epoch.
    Date32(i32),
    /// A typed SQL `NULL`; the type lives in the owning node.
    Null,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt8(x) => write!(f, "{x}(u8)"),
            Self::UInt16(x) => write!(f, "{x}(u16)"),
            Self::UInt32(x) => write!(f, "{x}(u32)"),
            Self::UInt64(x) => write!(f, "{x}(u64)"),
            Self::Int8(x) => write!(f, "{x}(i8)"),
            Self::Int16(x) => write!(f, "{x}(i16)"),
            Self::Int32(x) => write!(f, "{x}(i32)"),
            Self::Int64(x) => write!(f, "{x}(i64)"),
            Self::Float(x) => write!(f, "{}(float)", x.0),
            Self::String(x) => write!(f, "\"{x}\""),
            Self::Bool(x) => write!(f, "{x}"),
            Self::Date32(x) => write!(f, "{x}(date32)"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

/// The `as_*()` functions do not perform conversions. This is *unlike* the `as`
/// keyword in rust. Calling one on a value of another variant is a bug in the caller.
impl Value {
    pub fn as_u64(&self) -> u64 {
        match self {
            Value::UInt64(i) => *i,
            _ => panic!("Value is not an u64"),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            Value::Int32(i) => *i,
            _ => panic!("Value is not an i32"),
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int64(i) => *i,
            _ => panic!("Value is not an i64"),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Float(i) => *i.0,
            _ => panic!("Value is not an f64"),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(i) => *i,
            _ => panic!("Value is not a bool"),
        }
    }

    pub fn as_str(&self) -> Arc<str> {
        match self {
            Value::String(i) => i.clone(),
            _ => panic!("Value is not a string"),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

pub trait NodeType:
    PartialEq + Eq + Hash + Clone + 'static + Display + Debug + Send + Sync
{
    type PredType: PartialEq + Eq + Hash + Clone + 'static + Display + Debug + Send + Sync;

    /// Stable identifier of a rule. Rules are disabled and reported by this id.
    type RuleType: Copy + PartialEq + Eq + Hash + 'static + Display + Debug + Send + Sync;

    fn is_logical(&self) -> bool;
}

pub type ArcPlanNode<T> = Arc<PlanNode<T>>;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PlanNode<T: NodeType> {
    /// A generic plan node type
    pub typ: T,
    /// Child plan nodes, which are always materialized.
    pub children: Vec<ArcPlanNode<T>>,
    /// Predicates, which are always materialized.
    pub predicates: Vec<ArcPredNode<T>>,
}

impl<T: NodeType> std::fmt::Display for PlanNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.typ)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        for predicate in &self.predicates {
            write!(f, " {}", predicate)?;
        }
        write!(f, ")")
    }
}

impl<T: NodeType> PlanNode<T> {
    pub fn child(&self, idx: usize) -> ArcPlanNode<T> {
        self.children[idx].clone()
    }

    pub fn predicate(&self, idx: usize) -> ArcPredNode<T> {
        self.predicates[idx].clone()
    }

    /// Builds a node of the same type and predicates over new children.
    pub fn with_children(&self, children: Vec<ArcPlanNode<T>>) -> ArcPlanNode<T> {
        Arc::new(PlanNode {
            typ: self.typ.clone(),
            children,
            predicates: self.predicates.clone(),
        })
    }
}

pub type ArcPredNode<T> = Arc<PredNode<T>>;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PredNode<T: NodeType> {
    /// A generic predicate node type
    pub typ: T::PredType,
    /// Child predicate nodes, always materialized
    pub children: Vec<ArcPredNode<T>>,
    /// Data associated with the predicate, if any
    pub data: Option<Value>,
}

impl<T: NodeType> std::fmt::Display for PredNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.typ)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        if let Some(data) = &self.data {
            write!(f, " {}", data)?;
        }
        write!(f, ")")
    }
}

impl<T: NodeType> PredNode<T> {
    pub fn child(&self, idx: usize) -> ArcPredNode<T> {
        self.children[idx].clone()
    }

    pub fn unwrap_data(&self) -> Value {
        self.data.clone().unwrap()
    }

    /// Builds a predicate of the same type and data over new children.
    pub fn with_children(&self, children: Vec<ArcPredNode<T>>) -> ArcPredNode<T> {
        Arc::new(PredNode {
            typ: self.typ.clone(),
            children,
            data: self.data.clone(),
        })
    }
}
