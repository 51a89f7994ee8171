pub(crate) mod capability;
pub(crate) mod constant;
pub(crate) mod description;
pub(crate) mod expression;
pub(crate) mod filter;
pub(crate) mod map;
pub(crate) mod qualifier;
pub(crate) mod range;
pub(crate) mod structure;
pub(crate) mod tree;
pub(crate) mod variable;
