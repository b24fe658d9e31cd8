#![allow(unused)]

mod fixtures;
mod fut;
mod mock;
mod time;
mod tracing;

pub use {fixtures::*, fut::*, mock::*, time::*};
