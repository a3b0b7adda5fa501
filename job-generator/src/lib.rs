#![deny(rust_2018_idioms)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod amount;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod job;
pub mod writer;
