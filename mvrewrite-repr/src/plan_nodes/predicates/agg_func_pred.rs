// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;

use super::{ListPred, SignaturePred};
use crate::error::AnalysisError;
use crate::functions::{AggFunction, ResolvedSignature};
use crate::plan_nodes::{ArcMvPredNode, MvPredNode, MvPredType, MvReprPredNode};

/// Identity of an aggregate call: the function and the flags it was written with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct AggFuncType {
    pub func: AggFunction,
    pub distinct: bool,
    /// The result is nullable even when no argument is, as for an aggregate over an empty input
    /// without group keys.
    pub always_nullable: bool,
}

impl std::fmt::Display for AggFuncType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.func)?;
        if self.distinct {
            write!(f, "(distinct)")?;
        }
        Ok(())
    }
}

/// An aggregate call. Child 0 is the argument list; child 1, once bound, is the resolved signature.
#[derive(Clone, Debug)]
pub struct AggFuncPred(pub ArcMvPredNode);

impl AggFuncPred {
    pub fn new(
        func: AggFunction,
        distinct: bool,
        always_nullable: bool,
        args: Vec<ArcMvPredNode>,
    ) -> Self {
        Self::from_parts(
            AggFuncType {
                func,
                distinct,
                always_nullable,
            },
            vec![ListPred::new(args).into_pred_node()],
        )
    }

    /// `window_funnel(window, mode, timestamp, condition, more_conditions...)`.
    pub fn window_funnel(
        distinct: bool,
        always_nullable: bool,
        window: ArcMvPredNode,
        mode: ArcMvPredNode,
        timestamp: ArcMvPredNode,
        condition: ArcMvPredNode,
        more_conditions: Vec<ArcMvPredNode>,
    ) -> Self {
        let mut args = vec![window, mode, timestamp, condition];
        args.extend(more_conditions);
        Self::new(AggFunction::WindowFunnel, distinct, always_nullable, args)
    }

    fn from_parts(typ: AggFuncType, children: Vec<ArcMvPredNode>) -> Self {
        AggFuncPred(
            MvPredNode {
                typ: MvPredType::AggFunc(typ),
                children,
                data: None,
            }
            .into(),
        )
    }

    pub fn typ(&self) -> AggFuncType {
        if let MvPredType::AggFunc(typ) = self.0.typ {
            typ
        } else {
            panic!("not an aggregate function")
        }
    }

    pub fn func(&self) -> AggFunction {
        self.typ().func
    }

    pub fn is_distinct(&self) -> bool {
        self.typ().distinct
    }

    pub fn always_nullable(&self) -> bool {
        self.typ().always_nullable
    }

    pub fn args(&self) -> ListPred {
        ListPred::from_pred_node(self.0.child(0)).unwrap()
    }

    /// Gets the i-th argument of the call.
    pub fn arg_at(&self, i: usize) -> ArcMvPredNode {
        self.args().child(i)
    }

    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// The resolved signature, present once the call has been bound.
    pub fn signature(&self) -> Option<ResolvedSignature> {
        self.0
            .children
            .get(1)
            .cloned()
            .and_then(SignaturePred::from_pred_node)
            .map(|sig| sig.signature())
    }

    pub fn with_signature(&self, signature: &ResolvedSignature) -> Self {
        Self::from_parts(
            self.typ(),
            vec![
                self.0.child(0),
                SignaturePred::new(signature).into_pred_node(),
            ],
        )
    }

    /// Same call with a different nullability flag; arguments and signature are kept.
    pub fn with_always_nullable(&self, always_nullable: bool) -> Self {
        Self::from_parts(
            AggFuncType {
                always_nullable,
                ..self.typ()
            },
            self.0.children.clone(),
        )
    }

    /// Same function over new arguments. The signature is dropped since the argument types may
    /// have changed.
    pub fn with_distinct_and_children(
        &self,
        distinct: bool,
        children: Vec<ArcMvPredNode>,
    ) -> Result<Self, AnalysisError> {
        self.func().check_arity(children.len())?;
        Ok(Self::new(
            self.func(),
            distinct,
            self.always_nullable(),
            children,
        ))
    }

    /// The call stripped of binding details, so that equivalent calls compare equal.
    pub fn canonical(&self) -> Self {
        Self::from_parts(
            AggFuncType {
                always_nullable: false,
                ..self.typ()
            },
            vec![self.0.child(0)],
        )
    }

    /// Nullability of the result given the nullability of each argument.
    pub fn nullable(&self, arg_nullable: &[bool]) -> bool {
        self.func().nullable(self.always_nullable(), arg_nullable)
    }
}

impl MvReprPredNode for AggFuncPred {
    fn into_pred_node(self) -> ArcMvPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcMvPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, MvPredType::AggFunc(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        let mut fields = vec![];
        if self.always_nullable() {
            fields.push(("always_nullable", Pretty::display(&true)));
        }
        Pretty::simple_record(
            self.typ().to_string(),
            fields,
            vec![self.args().explain()],
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::functions::AggFunction;
    use crate::plan_nodes::{ColumnRefPred, ConstantPred, ConstantType};

    fn col(idx: usize) -> ArcMvPredNode {
        ColumnRefPred::new(idx).into_pred_node()
    }

    #[test]
    fn window_funnel_merges_conditions_into_arguments() {
        let call = AggFuncPred::window_funnel(
            false,
            false,
            ConstantPred::int64(3600).into_pred_node(),
            ConstantPred::string("default").into_pred_node(),
            col(0),
            col(1),
            vec![col(2), col(3)],
        );
        assert_eq!(call.func(), AggFunction::WindowFunnel);
        assert_eq!(call.arity(), 6);
        assert_eq!(call.arg_at(4), col(2));
    }

    #[test]
    fn with_distinct_and_children_checks_arity() {
        let call = AggFuncPred::new(
            AggFunction::WindowFunnel,
            false,
            true,
            vec![col(0), col(1), col(2), col(3)],
        );
        let err = call
            .with_distinct_and_children(true, vec![col(0), col(1), col(2)])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ArityMismatch { actual: 3, .. }));

        let rebuilt = call
            .with_distinct_and_children(true, vec![col(4), col(5), col(6), col(7)])
            .unwrap();
        assert!(rebuilt.is_distinct());
        assert!(rebuilt.always_nullable());
        assert_eq!(rebuilt.arg_at(0), col(4));
    }

    #[test]
    fn canonical_ignores_binding_details() {
        let call = AggFuncPred::new(AggFunction::Sum, false, true, vec![col(1)]);
        let bound = call.with_signature(&ResolvedSignature {
            ret: ConstantType::Int64,
            args: vec![ConstantType::Int64],
            var_args: false,
        });
        assert!(bound.signature().is_some());
        assert_eq!(
            bound.canonical().into_pred_node(),
            AggFuncPred::new(AggFunction::Sum, false, false, vec![col(1)]).into_pred_node()
        );
        assert_eq!(
            bound.with_always_nullable(false).signature(),
            bound.signature()
        );
    }
}
