//! An arena-backed tree of identified values with lazy traversal.

mod identity;
mod node;
mod spec;
mod traverse;
mod tree;
mod unroll;

pub use arbor_identity::{Category, Identifiable};

pub use crate::{
    node::{Ancestors, Children, NodeRef},
    spec::{NodeSpec, Subtrees},
    traverse::{BreadthFirst, DepthFirst},
    tree::{NodeId, Tree, TreeError},
    unroll::{Unroll, unroll},
};
