//! Data nodes - value sources for the graph

pub mod constant;
