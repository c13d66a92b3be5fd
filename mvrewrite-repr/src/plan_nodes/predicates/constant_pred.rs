// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mvrewrite_core::nodes::{SerializableOrderedF64, Value};
use pretty_xmlish::Pretty;
use serde::{Deserialize, Serialize};

use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

/// Logical column types. The V2 date types and `DateTimeV2` carry the storage format of newer
/// tables; `DateTimeV2` keeps its fractional-second scale.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConstantType {
    /// The type of an untyped `NULL` literal.
    Null,
    Bool,
    Utf8String,
    VarChar(u32),
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float64,
    Decimal,
    Date,
    DateV2,
    DateTime,
    DateTimeV2(u8),
    Binary,
}

impl std::fmt::Display for ConstantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VarChar(len) => write!(f, "VarChar({len})"),
            Self::DateTimeV2(scale) => write!(f, "DateTimeV2({scale})"),
            other => write!(f, "{:?}", other),
        }
    }
}

impl ConstantType {
    pub fn get_data_type_from_value(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ConstantType::Bool,
            Value::String(_) => ConstantType::Utf8String,
            Value::UInt8(_) => ConstantType::UInt8,
            Value::UInt16(_) => ConstantType::UInt16,
            Value::UInt32(_) => ConstantType::UInt32,
            Value::UInt64(_) => ConstantType::UInt64,
            Value::Int8(_) => ConstantType::Int8,
            Value::Int16(_) => ConstantType::Int16,
            Value::Int32(_) => ConstantType::Int32,
            Value::Int64(_) => ConstantType::Int64,
            Value::Float(_) => ConstantType::Float64,
            Value::Date32(_) => ConstantType::DateV2,
            Value::Null => ConstantType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    pub fn is_integer_like(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer_like() || matches!(self, Self::Float64 | Self::Decimal)
    }

    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::Utf8String | Self::VarChar(_))
    }

    pub fn is_date_like(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateV2 | Self::DateTime | Self::DateTimeV2(_)
        )
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Width in bytes of integer types, used to order widening casts.
    pub(crate) fn integer_width(&self) -> Option<u8> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 => Some(4),
            Self::Int64 | Self::UInt64 => Some(8),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConstantPred(pub ArcMvPredNode);

impl ConstantPred {
    pub fn new(value: Value) -> Self {
        let typ = ConstantType::get_data_type_from_value(&value);
        Self::new_with_type(value, typ)
    }

    pub fn new_with_type(value: Value, typ: ConstantType) -> Self {
        ConstantPred(
            MvPredNode {
                typ: MvPredType::Constant(typ),
                children: vec![],
                data: Some(value),
            }
            .into(),
        )
    }

    /// A `NULL` literal of the given type.
    pub fn null(typ: ConstantType) -> Self {
        Self::new_with_type(Value::Null, typ)
    }

    pub fn bool(value: bool) -> Self {
        Self::new_with_type(Value::Bool(value), ConstantType::Bool)
    }

    pub fn string(value: impl AsRef<str>) -> Self {
        Self::new_with_type(
            Value::String(value.as_ref().into()),
            ConstantType::Utf8String,
        )
    }

    pub fn int32(value: i32) -> Self {
        Self::new_with_type(Value::Int32(value), ConstantType::Int32)
    }

    pub fn int64(value: i64) -> Self {
        Self::new_with_type(Value::Int64(value), ConstantType::Int64)
    }

    pub fn float64(value: f64) -> Self {
        Self::new_with_type(
            Value::Float(SerializableOrderedF64(value.into())),
            ConstantType::Float64,
        )
    }

    /// A date given as days since the unix epoch.
    pub fn date(days: i32) -> Self {
        Self::new_with_type(Value::Date32(days), ConstantType::Date)
    }

    /// Gets the constant value.
    pub fn value(&self) -> Value {
        self.0.unwrap_data()
    }

    pub fn constant_type(&self) -> ConstantType {
        if let MvPredType::Constant(typ) = self.0.typ {
            typ
        } else {
            panic!("not a constant")
        }
    }
}

impl MvReprPredNode for ConstantPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if let MvPredType::Constant(_) = pred_node.typ {
            Some(Self(pred_node))
        } else {
            None
        }
    }

    fn explain(&self) -> Pretty<'static> {
        match self.value() {
            Value::Null => Pretty::display(&format!("NULL::{}", self.constant_type())),
            value => Pretty::display(&value),
        }
    }
}
