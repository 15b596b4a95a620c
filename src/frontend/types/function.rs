//! Function types.

use std::fmt;
use std::rc::Rc;

use super::{Type, TypedValue};

type ReturnFn = dyn Fn(&[TypedValue]) -> Vec<TypedValue>;

/// A function shape, described by how it computes its return values from its arguments.
///
/// Cloning shares the same function; equality is identity.
#[derive(Clone)]
pub struct FunctionType {
    returns: Rc<ReturnFn>,
}

impl FunctionType {
    /// A function returning `types` whatever its arguments.
    pub fn returning(types: Vec<Type>) -> Self {
        Self::computed(move |_| types.iter().cloned().map(TypedValue::new).collect())
    }

    /// A function whose return values depend on its arguments.
    pub fn computed(returns: impl Fn(&[TypedValue]) -> Vec<TypedValue> + 'static) -> Self {
        Self {
            returns: Rc::new(returns),
        }
    }

    pub fn get_returns(&self, args: &[TypedValue]) -> Vec<TypedValue> {
        (self.returns)(args)
    }

    pub fn ptr_eq(&self, other: &FunctionType) -> bool {
        Rc::ptr_eq(&self.returns, &other.returns)
    }
}

impl fmt::Debug for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionType").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returning_ignores_arguments() {
        let function = FunctionType::returning(vec![Type::number(), Type::string()]);
        let returns = function.get_returns(&[TypedValue::new(Type::nil())]);
        let types: Vec<Type> = returns.into_iter().map(|v| v.ty).collect();
        assert_eq!(types, vec![Type::number(), Type::string()]);
    }

    #[test]
    fn test_computed_sees_arguments() {
        let identity = FunctionType::computed(|args| args.to_vec());
        let args = vec![TypedValue::named("x", Type::boolean())];
        assert_eq!(identity.get_returns(&args), args);
    }

    #[test]
    fn test_identity_equality() {
        let function = FunctionType::returning(vec![]);
        assert!(function.ptr_eq(&function.clone()));
        assert!(!function.ptr_eq(&FunctionType::returning(vec![])));
    }
}
