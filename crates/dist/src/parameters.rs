use std::fmt::Display;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Owner of a parameter within a joint distribution
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum ParamOwner {
    /// Parameter of the marginal at the given index
    Marginal(usize),
    /// Parameter of the copula
    Copula,
}

/// Key of a parameter of a joint distribution.
///
/// The parameter name is kept apart from its owner so that names
/// containing separators remain unambiguous.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ParamKey {
    /// Distribution owning the parameter
    pub owner: ParamOwner,
    /// Parameter name as given by the owner
    pub name: String,
}

impl ParamKey {
    /// Key of parameter `name` of the `index`-th marginal
    pub fn marginal(index: usize, name: impl Into<String>) -> Self {
        ParamKey {
            owner: ParamOwner::Marginal(index),
            name: name.into(),
        }
    }

    /// Key of parameter `name` of the copula
    pub fn copula(name: impl Into<String>) -> Self {
        ParamKey {
            owner: ParamOwner::Copula,
            name: name.into(),
        }
    }
}

impl Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            ParamOwner::Marginal(i) => write!(f, "{} (marginal {})", self.name, i),
            ParamOwner::Copula => write!(f, "{} (copula)", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_key_with_separator() {
        let key = ParamKey::marginal(1, "shape_a_2");
        assert_eq!(key.owner, ParamOwner::Marginal(1));
        assert_eq!(key.name, "shape_a_2");
        assert_eq!(format!("{key}"), "shape_a_2 (marginal 1)");
        assert_ne!(key, ParamKey::copula("shape_a_2"));
    }
}
