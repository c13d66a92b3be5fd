// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use itertools::Itertools;

use crate::plan_nodes::ConstantType;

/// A declared argument or return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgType {
    Exact(ConstantType),
    /// Accepts any type and resolves to the type of the actual argument.
    Any,
    /// Resolves to the type of the actual argument at the given position.
    FollowArg(usize),
}

impl From<ConstantType> for ArgType {
    fn from(typ: ConstantType) -> Self {
        Self::Exact(typ)
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(typ) => write!(f, "{typ}"),
            Self::Any => write!(f, "Any"),
            Self::FollowArg(idx) => write!(f, "${idx}"),
        }
    }
}

/// A declared signature. With `var_args`, the last argument type repeats.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub ret: ArgType,
    pub args: Vec<ArgType>,
    pub var_args: bool,
}

pub struct SignatureBuilder {
    ret: ArgType,
}

impl SignatureBuilder {
    pub fn args(self, args: Vec<ArgType>) -> FunctionSignature {
        FunctionSignature {
            ret: self.ret,
            args,
            var_args: false,
        }
    }

    pub fn var_args(self, args: Vec<ArgType>) -> FunctionSignature {
        FunctionSignature {
            ret: self.ret,
            args,
            var_args: true,
        }
    }
}

impl FunctionSignature {
    pub fn ret(ret: impl Into<ArgType>) -> SignatureBuilder {
        SignatureBuilder { ret: ret.into() }
    }

    pub fn accepts_arity(&self, arity: usize) -> bool {
        if self.var_args {
            arity >= self.args.len()
        } else {
            arity == self.args.len()
        }
    }

    pub fn arg_type(&self, index: usize) -> Option<ArgType> {
        match self.args.get(index) {
            Some(typ) => Some(*typ),
            None if self.var_args => self.args.last().copied(),
            None => None,
        }
    }

    /// Replaces the placeholders with the actual argument types. The resulting signature lists one
    /// type per actual argument.
    pub fn implement(&self, arg_types: &[ConstantType]) -> Option<ResolvedSignature> {
        if !self.accepts_arity(arg_types.len()) {
            return None;
        }
        let resolve = |declared: ArgType, actual: ConstantType| match declared {
            ArgType::Exact(typ) => Some(typ),
            ArgType::Any => Some(actual),
            ArgType::FollowArg(idx) => arg_types.get(idx).copied(),
        };
        let args = arg_types
            .iter()
            .enumerate()
            .map(|(idx, actual)| resolve(self.arg_type(idx)?, *actual))
            .collect::<Option<Vec<_>>>()?;
        let ret = match self.ret {
            ArgType::Exact(typ) => typ,
            ArgType::FollowArg(idx) => *args.get(idx)?,
            ArgType::Any => return None,
        };
        Some(ResolvedSignature {
            ret,
            args,
            var_args: self.var_args,
        })
    }
}

impl std::fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}", self.ret, self.args.iter().join(", "))?;
        if self.var_args {
            write!(f, "...")?;
        }
        write!(f, ")")
    }
}

/// A signature with every type concrete, one argument type per actual argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedSignature {
    pub ret: ConstantType,
    pub args: Vec<ConstantType>,
    pub var_args: bool,
}

impl ResolvedSignature {
    pub fn arg_type(&self, index: usize) -> Option<ConstantType> {
        self.args.get(index).copied()
    }

    /// Rebuilds the argument types through `f(index, current_type)`.
    pub fn with_argument_types(&self, mut f: impl FnMut(usize, ConstantType) -> ConstantType) -> Self {
        Self {
            ret: self.ret,
            args: self
                .args
                .iter()
                .enumerate()
                .map(|(idx, typ)| f(idx, *typ))
                .collect(),
            var_args: self.var_args,
        }
    }
}

impl std::fmt::Display for ResolvedSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.ret, self.args.iter().join(", "))
    }
}
