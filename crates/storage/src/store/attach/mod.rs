#![forbid(unsafe_code)]

use super::*;

mod bind;
mod insert;
mod list;
mod remove;
mod reorder;

fn points_of_despline(despline: NodeId) -> SiblingSet {
    SiblingSet::DesplinePoints { despline }
}
