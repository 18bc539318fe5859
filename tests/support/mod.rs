#![allow(dead_code)]

pub mod assertions;
pub mod legs;
pub mod temp;
